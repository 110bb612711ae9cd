//! Label reading modules that run after measurement
//!
//! - Quantization of measured bar heights back to digits
//! - Decode tunables shared by the locator and the measurer

/// Decode tunables (defaults plus `BAR_*` environment overrides)
pub mod config;
/// Height-ratio to digit quantization
pub mod quantizer;

pub use config::DecodeConfig;
pub use quantizer::quantize;
