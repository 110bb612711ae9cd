use image::{GrayImage, Luma};

use super::layout::{BORDER_WIDTH, Layout, MAX_DATA_BARS};
use crate::codec::digits::MAX_DIGIT;
use crate::error::BarError;
use crate::models::{BarSequence, Region};

const INK: Luma<u8> = Luma([0]);
const PAPER: Luma<u8> = Luma([255]);

/// Draw data digits as a bar label.
///
/// Layout left to right: one sentinel, one bar per digit, two sentinels.
/// The output depends only on `digits`.
pub fn render(digits: &[u8]) -> Result<GrayImage, BarError> {
    if digits.len() > MAX_DATA_BARS {
        return Err(BarError::CapacityExceeded {
            bars: digits.len(),
            max: MAX_DATA_BARS,
        });
    }
    if let Some(position) = digits.iter().position(|&d| d > MAX_DIGIT) {
        return Err(BarError::InvalidDigit {
            digit: digits[position],
            position,
        });
    }

    let layout = Layout::for_data_bars(digits.len());
    let (width, height) = layout.canvas_size();
    let mut canvas = GrayImage::from_pixel(width, height, PAPER);

    draw_border(&mut canvas, layout.code_box());

    let sequence = BarSequence::from_digits(digits);
    for (index, bar) in sequence.bars().iter().enumerate() {
        fill_rect(&mut canvas, layout.bar_rect(index, bar.height_fraction()));
    }

    Ok(canvas)
}

fn draw_border(canvas: &mut GrayImage, code: Region) {
    let t = BORDER_WIDTH;
    fill_rect(canvas, Region::new(code.x, code.y, code.width, t));
    fill_rect(canvas, Region::new(code.x, code.y + code.height - t, code.width, t));
    fill_rect(canvas, Region::new(code.x, code.y, t, code.height));
    fill_rect(canvas, Region::new(code.x + code.width - t, code.y, t, code.height));
}

fn fill_rect(canvas: &mut GrayImage, rect: Region) {
    let x_end = (rect.x + rect.width).min(canvas.width());
    let y_end = (rect.y + rect.height).min(canvas.height());
    for y in rect.y..y_end {
        for x in rect.x..x_end {
            canvas.put_pixel(x, y, INK);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_is_deterministic() {
        let digits = [1, 3, 0, 2, 6, 6, 7, 1];
        let a = render(&digits).unwrap();
        let b = render(&digits).unwrap();
        assert_eq!(a.dimensions(), b.dimensions());
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn test_canvas_size_follows_layout() {
        let img = render(&[0; 14]).unwrap();
        assert_eq!(img.dimensions(), Layout::for_data_bars(14).canvas_size());
    }

    #[test]
    fn test_bar_pixels() {
        let layout = Layout::for_data_bars(2);
        let img = render(&[7, 0]).unwrap();

        let tall = layout.bar_rect(1, 0.40);
        let short = layout.bar_rect(2, 0.05);
        assert_eq!(img.get_pixel(tall.x + 7, tall.y)[0], 0);
        assert_eq!(img.get_pixel(tall.x + 7, tall.y - 1)[0], 255);
        assert_eq!(img.get_pixel(short.x, short.y + short.height - 1)[0], 0);
        assert_eq!(img.get_pixel(short.x, short.y + short.height)[0], 255);
        assert!(tall.height > short.height);
    }

    #[test]
    fn test_border_and_quiet_zone() {
        let layout = Layout::for_data_bars(4);
        let code = layout.code_box();
        let img = render(&[1, 2, 3, 4]).unwrap();
        assert_eq!(img.get_pixel(code.x, code.y)[0], 0);
        assert_eq!(img.get_pixel(code.x + BORDER_WIDTH, code.y + BORDER_WIDTH)[0], 255);
        assert_eq!(img.get_pixel(0, 0)[0], 255);
        assert_eq!(img.get_pixel(code.x - 1, code.y)[0], 255);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert_eq!(
            render(&[0; MAX_DATA_BARS + 1]).unwrap_err(),
            BarError::CapacityExceeded {
                bars: MAX_DATA_BARS + 1,
                max: MAX_DATA_BARS
            }
        );
        assert_eq!(
            render(&[1, 9]).unwrap_err(),
            BarError::InvalidDigit { digit: 9, position: 1 }
        );
    }
}
