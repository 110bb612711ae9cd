use image::GrayImage;

use crate::codec::decode_digits;
use crate::decoder::{DecodeConfig, quantize};
use crate::detector::measurer::heights;
use crate::detector::{BarMeasurer, RegionLocator};
use crate::error::BarError;
use crate::models::Region;

/// Stage-level counters collected while reading one frame.
///
/// Fields are filled in as far as the pipeline gets; a failure leaves the
/// later stages at their defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodeTelemetry {
    /// Region picked by the locator
    pub region: Option<Region>,
    /// Data bars left after sentinel stripping
    pub data_bars: usize,
    /// Measured height fractions of the data bars
    pub heights: Vec<f32>,
    /// Quantized digits
    pub digits: Vec<u8>,
}

/// Read the code in a whole frame: locate, crop, then [`decode_region`].
pub fn decode_frame(frame: &GrayImage, config: &DecodeConfig) -> Result<String, BarError> {
    decode_frame_with_telemetry(frame, config).0
}

/// Like [`decode_frame`] but also reports how far each stage got.
pub fn decode_frame_with_telemetry(
    frame: &GrayImage,
    config: &DecodeConfig,
) -> (Result<String, BarError>, DecodeTelemetry) {
    let mut tel = DecodeTelemetry::default();
    let result = run_frame(frame, config, &mut tel);
    (result, tel)
}

/// Read an already-cropped code region: measure, quantize, decode.
pub fn decode_region(crop: &GrayImage, config: &DecodeConfig) -> Result<String, BarError> {
    let mut tel = DecodeTelemetry::default();
    run_region(crop, config, &mut tel)
}

fn run_frame(
    frame: &GrayImage,
    config: &DecodeConfig,
    tel: &mut DecodeTelemetry,
) -> Result<String, BarError> {
    let region = RegionLocator::locate(frame, config)?;
    tel.region = Some(region);
    let crop = region.crop(frame);
    run_region(&crop, config, tel)
}

fn run_region(
    crop: &GrayImage,
    config: &DecodeConfig,
    tel: &mut DecodeTelemetry,
) -> Result<String, BarError> {
    let bars = BarMeasurer::measure(crop, config)?;
    tel.data_bars = bars.len();
    tel.heights = heights(&bars);

    tel.digits = quantize(&tel.heights)?;
    if crate::debug::debug_enabled() {
        eprintln!("QUANTIZE: digits {:?}", tel.digits);
    }

    decode_digits(&tel.digits)
}
