/// Rendered and measured bars
pub mod bar;
/// Binary image matrix
pub mod matrix;
/// 2D points
pub mod point;
/// Rectangular image regions
pub mod region;

pub use bar::{Bar, BarSequence, MeasuredBar};
pub use matrix::BitMatrix;
pub use point::{Point, PointI};
pub use region::Region;
