//! bar_label - proportional bar-height labels
//!
//! Text over a 64-symbol alphabet becomes a row of vertical bars: each symbol
//! is two base-8 digits, each digit one bar whose height is proportional to
//! its value. Fixed-height sentinel bars frame the data. Reading runs the
//! opposite way: locate the bordered label in a frame, measure its bars,
//! quantize the heights and reassemble the text.
//!
//! ```
//! let img = bar_label::render_code("LC254Hk").unwrap();
//! assert_eq!(bar_label::read_code(&img).unwrap(), "LC254Hk");
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Live capture loop over a frame source
pub mod capture;
/// Alphabet and digit-pair codec
pub mod codec;
/// Quantization and decode tunables
pub mod decoder;
/// Region location and bar measurement
pub mod detector;
/// Error type shared by every stage
pub mod error;
/// Identifier validation and output naming
pub mod lookup;
/// Core data structures (bars, regions, BitMatrix, points)
pub mod models;
/// Locate, measure, quantize, decode
pub mod pipeline;
/// Label rendering
pub mod render;
/// Image I/O, statistics and batch helpers for the CLI and benches
pub mod tools;
/// Utility functions (grayscale, binarization, geometry)
pub mod utils;

mod debug;

pub use codec::{decode_digits, encode_symbols};
pub use decoder::DecodeConfig;
pub use error::BarError;
pub use models::{Bar, BarSequence, BitMatrix, MeasuredBar, Point, Region};
pub use pipeline::DecodeTelemetry;
pub use render::render;

use image::GrayImage;
use utils::grayscale::{PARALLEL_PIXEL_THRESHOLD, rgb_to_grayscale, rgb_to_grayscale_parallel};

/// Encode `text` and draw it as a label
pub fn render_code(text: &str) -> Result<GrayImage, BarError> {
    let digits = encode_symbols(text)?;
    render(&digits)
}

/// Read the label in a grayscale frame with the default configuration
pub fn read_code(frame: &GrayImage) -> Result<String, BarError> {
    pipeline::decode_frame(frame, &DecodeConfig::default())
}

/// Read the label in an RGB image
///
/// # Arguments
/// * `rgb` - Raw RGB bytes (3 bytes per pixel)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// Large frames are converted to grayscale in parallel. A buffer shorter
/// than `width * height * 3` bytes, or dimensions whose product overflows,
/// are treated as an empty frame.
pub fn decode_rgb(rgb: &[u8], width: usize, height: usize) -> Result<String, BarError> {
    let needed = width
        .checked_mul(height)
        .and_then(|pixels| pixels.checked_mul(3))
        .ok_or(BarError::EmptyFrame)?;
    if needed == 0 || rgb.len() < needed {
        return Err(BarError::EmptyFrame);
    }
    let gray = if width * height >= PARALLEL_PIXEL_THRESHOLD {
        rgb_to_grayscale_parallel(rgb, width, height)
    } else {
        rgb_to_grayscale(rgb, width, height)
    };
    let frame =
        GrayImage::from_raw(width as u32, height as u32, gray).ok_or(BarError::EmptyFrame)?;
    read_code(&frame)
}

/// Reader with its own configuration
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecodeConfig,
}

impl Decoder {
    /// Create a decoder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder configured from `BAR_*` environment variables
    pub fn from_env() -> Self {
        Self::with_config(DecodeConfig::from_env())
    }

    /// Create a decoder with explicit settings
    pub fn with_config(config: DecodeConfig) -> Self {
        Self { config }
    }

    /// Current settings
    pub fn config(&self) -> &DecodeConfig {
        &self.config
    }

    /// Read the label in a grayscale frame
    pub fn decode(&self, frame: &GrayImage) -> Result<String, BarError> {
        pipeline::decode_frame(frame, &self.config)
    }

    /// Read an already-cropped label
    pub fn decode_region(&self, crop: &GrayImage) -> Result<String, BarError> {
        pipeline::decode_region(crop, &self.config)
    }

    /// Read and report per-stage telemetry
    pub fn decode_with_telemetry(
        &self,
        frame: &GrayImage,
    ) -> (Result<String, BarError>, DecodeTelemetry) {
        pipeline::decode_frame_with_telemetry(frame, &self.config)
    }
}
