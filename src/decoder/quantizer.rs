use crate::codec::digits::MAX_DIGIT;
use crate::error::BarError;

/// Buckets per unit ratio: ratio 1.0 maps to digit 7
const LEVELS: f32 = (MAX_DIGIT + 1) as f32;

/// Map measured bar heights back to digits 0-7
///
/// Every height is normalized by the tallest bar in the same list, then
/// `digit = round(ratio * 8) - 1`, clamped to 0-7. Rounding is half away
/// from zero, so ratio 0.4375 (7/16) lands on digit 3.
///
/// The tallest data bar is assumed to be digit 7. A label whose largest
/// digit is smaller decodes with every digit shifted upward; the sentinels
/// are not used as a scale reference.
pub fn quantize(heights: &[f32]) -> Result<Vec<u8>, BarError> {
    let max = heights.iter().copied().fold(0.0f32, f32::max);
    if heights.is_empty() || max <= 0.0 {
        return Err(BarError::NoBarsDetected {
            found: heights.len(),
        });
    }

    Ok(heights
        .iter()
        .map(|&height| quantize_ratio(height / max))
        .collect())
}

/// Digit for a single height ratio (height / tallest height)
pub fn quantize_ratio(ratio: f32) -> u8 {
    let level = (ratio * LEVELS).round() as i32 - 1;
    level.clamp(0, MAX_DIGIT as i32) as u8
}
