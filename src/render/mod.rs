//! Label rendering
//!
//! - Layout geometry (bar pitch, code box, quiet zone)
//! - Rasterization of a digit sequence into a grayscale canvas

/// Pixel geometry of a rendered label
pub mod layout;
/// Bar drawing
pub mod renderer;

pub use layout::Layout;
pub use renderer::render;
