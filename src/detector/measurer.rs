use image::GrayImage;
use image::imageops::{self, FilterType};

use crate::decoder::DecodeConfig;
use crate::detector::connected_components::label_components;
use crate::error::BarError;
use crate::models::MeasuredBar;
use crate::models::bar::{LEADING_SENTINELS, SENTINEL_COUNT, TRAILING_SENTINELS};
use crate::utils::binarization::adaptive_binarize;

/// Measures bar heights inside a cropped label
pub struct BarMeasurer;

impl BarMeasurer {
    /// Ordered data-bar measurements, sentinels removed
    pub fn measure(region: &GrayImage, config: &DecodeConfig) -> Result<Vec<MeasuredBar>, BarError> {
        let bars = Self::measure_all(region, config)?;
        strip_sentinels(bars)
    }

    /// Every bar-shaped feature in the crop, sorted left to right
    ///
    /// The crop is resized to the working size and trimmed by the inset,
    /// which removes the printed border. Each dark component yields its
    /// vertical extent over the trimmed height and its rightmost column.
    pub fn measure_all(
        region: &GrayImage,
        config: &DecodeConfig,
    ) -> Result<Vec<MeasuredBar>, BarError> {
        let (trim_w, trim_h) = config.trimmed_size();
        if region.width() == 0 || region.height() == 0 || trim_w == 0 || trim_h == 0 {
            return Err(BarError::EmptyFrame);
        }

        let working = imageops::resize(
            region,
            config.working_width,
            config.working_height,
            FilterType::Triangle,
        );
        let trimmed = imageops::crop_imm(&working, config.inset, config.inset, trim_w, trim_h)
            .to_image();

        let binary = adaptive_binarize(
            trimmed.as_raw(),
            trim_w as usize,
            trim_h as usize,
            config.measure_block,
            config.measure_offset,
        );

        let labeling = label_components(&binary);
        let mut bars: Vec<MeasuredBar> = labeling
            .components()
            .iter()
            .filter(|c| c.pixels >= config.min_component_pixels)
            .map(|c| {
                let height = (c.max_y - c.min_y) as f32 / trim_h as f32;
                MeasuredBar::new(c.max_x as u32, height)
            })
            .collect();
        bars.sort_by_key(|bar| bar.x);

        if crate::debug::debug_enabled() {
            eprintln!(
                "MEASURE: {} features (of {} components)",
                bars.len(),
                labeling.components().len()
            );
        }
        Ok(bars)
    }
}

/// Drop the leading and trailing sentinels from ordered measurements
pub fn strip_sentinels(bars: Vec<MeasuredBar>) -> Result<Vec<MeasuredBar>, BarError> {
    let found = bars.len();
    if found <= SENTINEL_COUNT {
        return Err(BarError::NoBarsDetected { found });
    }
    Ok(bars[LEADING_SENTINELS..found - TRAILING_SENTINELS].to_vec())
}

/// Height fractions of measured bars, in order
pub fn heights(bars: &[MeasuredBar]) -> Vec<f32> {
    bars.iter().map(|b| b.height).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    /// Crop-shaped image with solid bars of the given heights (fraction of 150)
    fn synthetic_crop(fractions: &[f32]) -> GrayImage {
        let mut img = GrayImage::from_pixel(300, 150, Luma([255]));
        for (i, &f) in fractions.iter().enumerate() {
            let bar_h = (f * 150.0).round() as u32;
            let top = (150 - bar_h) / 2;
            let left = 25 + i as u32 * 20;
            for y in top..top + bar_h {
                for x in left..left + 10 {
                    img.put_pixel(x, y, Luma([0]));
                }
            }
        }
        img
    }

    #[test]
    fn test_bars_sorted_left_to_right() {
        let crop = synthetic_crop(&[0.8, 0.1, 0.4, 0.2, 0.8, 0.8]);
        let bars = BarMeasurer::measure_all(&crop, &DecodeConfig::default()).unwrap();
        assert_eq!(bars.len(), 6);
        assert!(bars.windows(2).all(|w| w[0].x < w[1].x));
        // 0.4 of 150 rows spans 59 rows of the 130-row trimmed image
        assert!((bars[2].height - 59.0 / 130.0).abs() < 0.02);
    }

    #[test]
    fn test_sentinels_stripped() {
        let crop = synthetic_crop(&[0.8, 0.1, 0.4, 0.2, 0.8, 0.8]);
        let bars = BarMeasurer::measure(&crop, &DecodeConfig::default()).unwrap();
        assert_eq!(bars.len(), 3);
        assert!(bars[0].height < bars[2].height && bars[2].height < bars[1].height);
    }

    #[test]
    fn test_sentinels_only() {
        let crop = synthetic_crop(&[0.8, 0.8, 0.8]);
        let err = BarMeasurer::measure(&crop, &DecodeConfig::default()).unwrap_err();
        assert_eq!(err, BarError::NoBarsDetected { found: 3 });
    }

    #[test]
    fn test_speckle_ignored() {
        let mut crop = synthetic_crop(&[0.8, 0.3, 0.8, 0.8]);
        crop.put_pixel(200, 20, Luma([0]));
        let bars = BarMeasurer::measure_all(&crop, &DecodeConfig::default()).unwrap();
        assert_eq!(bars.len(), 4);
    }

    fn rendered_crop(digits: &[u8]) -> GrayImage {
        let frame = crate::render::render(digits).unwrap();
        crate::render::Layout::for_data_bars(digits.len())
            .code_box()
            .crop(&frame)
    }

    #[test]
    fn test_each_rendered_bar_is_one_feature() {
        // "A/" on the 400-px minimum code box: bars are wider than 11 px at
        // working size and the sentinels reach past the inset.
        let crop = rendered_crop(&[0, 0, 7, 7]);
        let bars = BarMeasurer::measure_all(&crop, &DecodeConfig::default()).unwrap();
        assert_eq!(bars.len(), 7);
        for sentinel in [bars[0], bars[5], bars[6]] {
            assert!(sentinel.height > 0.95);
        }
        let data = BarMeasurer::measure(&crop, &DecodeConfig::default()).unwrap();
        assert_eq!(data.len(), 4);
        assert!(data.iter().all(|b| b.height < 0.5));
    }

    #[test]
    fn test_rendered_sentinels_only() {
        let err = BarMeasurer::measure(&rendered_crop(&[]), &DecodeConfig::default()).unwrap_err();
        assert_eq!(err, BarError::NoBarsDetected { found: 3 });
    }

    #[test]
    fn test_dense_label_bars_stay_apart() {
        let digits: Vec<u8> = (0..44).map(|i| (i % 8) as u8).collect();
        let bars = BarMeasurer::measure(&rendered_crop(&digits), &DecodeConfig::default()).unwrap();
        assert_eq!(bars.len(), 44);
    }

    #[test]
    fn test_empty_crop() {
        let err = BarMeasurer::measure(&GrayImage::new(0, 0), &DecodeConfig::default())
            .unwrap_err();
        assert_eq!(err, BarError::EmptyFrame);
    }
}
