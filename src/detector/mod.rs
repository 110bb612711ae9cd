//! Label detection modules
//!
//! This module contains all the logic for finding and measuring a label in
//! an image:
//! - Connected components over binarized pixels
//! - Outer border following and polygon simplification
//! - Region location (the bordered, 2:1 label outline)
//! - Bar measurement inside the located crop

/// 8-connected labelling of dark pixels
pub mod connected_components;
/// Border following and Douglas-Peucker simplification
pub mod contour;
/// Label outline search
pub mod locator;
/// Bar height measurement
pub mod measurer;

pub use locator::RegionLocator;
pub use measurer::BarMeasurer;
