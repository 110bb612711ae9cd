//! Utility functions for image processing
//!
//! This module provides helper functions for label reading:
//! - Grayscale conversion (RGB/RGBA to luminance)
//! - Binarization (adaptive mean, Otsu's method and fixed threshold)
//! - Geometry (point-line distance, contour perimeter)

/// Adaptive, Otsu and fixed thresholding
pub mod binarization;
/// Distances and perimeters
pub mod geometry;
/// RGB/RGBA to luma conversion
pub mod grayscale;
