use image::GrayImage;

use crate::decoder::DecodeConfig;
use crate::detector::connected_components::label_components;
use crate::detector::contour::{approx_polygon, contour_perimeter, trace_outer_border};
use crate::error::BarError;
use crate::models::{BitMatrix, PointI, Region};
use crate::utils::binarization::{adaptive_binarize, otsu_binarize};

/// A quadrilateral outline with the label's proportions
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Bounding box of the outline
    pub region: Region,
    /// The four simplified polygon corners, in border order
    pub corners: Vec<PointI>,
}

/// Finds the label outline in an arbitrary frame
pub struct RegionLocator;

impl RegionLocator {
    /// Locate the label in a grayscale frame.
    ///
    /// Among all qualifying outlines the one with the largest bounding box
    /// wins, in every mode.
    pub fn locate(frame: &GrayImage, config: &DecodeConfig) -> Result<Region, BarError> {
        let (width, height) = (frame.width() as usize, frame.height() as usize);
        if width == 0 || height == 0 {
            return Err(BarError::EmptyFrame);
        }

        let candidates = Self::find_candidates(frame.as_raw(), width, height, config);
        let best = candidates
            .into_iter()
            .max_by_key(|c| c.region.area())
            .ok_or(BarError::RegionNotFound)?;

        if crate::debug::debug_enabled() {
            eprintln!(
                "LOCATE: selected {}x{} at ({}, {})",
                best.region.width, best.region.height, best.region.x, best.region.y
            );
        }
        Ok(best.region)
    }

    /// All qualifying outlines; adaptive binarization first, Otsu as fallback
    pub fn find_candidates(
        gray: &[u8],
        width: usize,
        height: usize,
        config: &DecodeConfig,
    ) -> Vec<Candidate> {
        let binary = adaptive_binarize(
            gray,
            width,
            height,
            config.locator_block,
            config.locator_offset,
        );
        let candidates = quadrilaterals(&binary, config);
        if !candidates.is_empty() || !config.otsu_fallback {
            return candidates;
        }

        if crate::debug::debug_enabled() {
            eprintln!("LOCATE: no outline after adaptive threshold, trying Otsu");
        }
        quadrilaterals(&otsu_binarize(gray, width, height), config)
    }
}

/// Outlines whose bounding box has the label's aspect ratio and relative size
/// and whose border simplifies to four corners
fn quadrilaterals(binary: &BitMatrix, config: &DecodeConfig) -> Vec<Candidate> {
    let labeling = label_components(binary);
    let frame_area = (binary.width() * binary.height()) as f32;
    let mut candidates = Vec::new();

    for component in labeling.components() {
        let region = component.bounds();

        let aspect = region.aspect_ratio();
        if !(config.min_aspect..=config.max_aspect).contains(&aspect) {
            continue;
        }

        let area_fraction = region.area() as f32 / frame_area;
        if !(config.min_area_fraction..=config.max_area_fraction).contains(&area_fraction) {
            continue;
        }

        let contour = trace_outer_border(&labeling, component);
        let epsilon = config.approx_epsilon * contour_perimeter(&contour);
        let corners = approx_polygon(&contour, epsilon);

        if crate::debug::debug_enabled() {
            eprintln!(
                "LOCATE: outline {}x{} aspect={:.2} area={:.1}% corners={}",
                region.width,
                region.height,
                aspect,
                area_fraction * 100.0,
                corners.len()
            );
        }

        if corners.len() == 4 {
            candidates.push(Candidate { region, corners });
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn draw_frame(img: &mut GrayImage, x0: u32, y0: u32, w: u32, h: u32, thickness: u32) {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                let edge = x < x0 + thickness
                    || x >= x0 + w - thickness
                    || y < y0 + thickness
                    || y >= y0 + h - thickness;
                if edge {
                    img.put_pixel(x, y, Luma([0]));
                }
            }
        }
    }

    #[test]
    fn test_locates_two_to_one_frame() {
        let mut img = GrayImage::from_pixel(300, 200, Luma([255]));
        draw_frame(&mut img, 40, 50, 200, 100, 4);

        let region = RegionLocator::locate(&img, &DecodeConfig::default()).unwrap();
        assert_eq!(region, Region::new(40, 50, 200, 100));
    }

    #[test]
    fn test_square_is_rejected() {
        let mut img = GrayImage::from_pixel(300, 200, Luma([255]));
        draw_frame(&mut img, 50, 50, 100, 100, 4);

        let err = RegionLocator::locate(&img, &DecodeConfig::default()).unwrap_err();
        assert_eq!(err, BarError::RegionNotFound);
    }

    #[test]
    fn test_too_small_is_rejected() {
        let mut img = GrayImage::from_pixel(400, 400, Luma([255]));
        // 0.5% of the frame
        draw_frame(&mut img, 10, 10, 40, 20, 2);

        let err = RegionLocator::locate(&img, &DecodeConfig::default()).unwrap_err();
        assert_eq!(err, BarError::RegionNotFound);
    }

    #[test]
    fn test_largest_outline_wins() {
        let mut img = GrayImage::from_pixel(500, 400, Luma([255]));
        draw_frame(&mut img, 10, 10, 120, 60, 3);
        draw_frame(&mut img, 100, 150, 300, 150, 4);

        let config = DecodeConfig::default();
        let candidates = RegionLocator::find_candidates(img.as_raw(), 500, 400, &config);
        assert_eq!(candidates.len(), 2);
        let region = RegionLocator::locate(&img, &config).unwrap();
        assert_eq!(region, Region::new(100, 150, 300, 150));
    }

    #[test]
    fn test_empty_frame() {
        let img = GrayImage::new(0, 0);
        let err = RegionLocator::locate(&img, &DecodeConfig::default()).unwrap_err();
        assert_eq!(err, BarError::EmptyFrame);
    }
}
