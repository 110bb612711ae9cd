use crate::models::Region;
use crate::models::bar::SENTINEL_COUNT;

/// Width of one bar in pixels
pub const BAR_WIDTH: u32 = 15;
/// White space between neighbouring bars
pub const BAR_GAP: u32 = 10;
/// Horizontal distance between the left edges of neighbouring bars
pub const BAR_PITCH: u32 = BAR_WIDTH + BAR_GAP;
/// Minimum white space between the border and the outer bars
pub const CODE_MARGIN: u32 = 45;
/// Narrowest code box; short codes are centred in it
pub const MIN_CODE_WIDTH: u32 = 400;
/// Thickness of the border drawn around the code box
pub const BORDER_WIDTH: u32 = 4;
/// Most data bars one label can carry at the canonical 300-px working width
pub const MAX_DATA_BARS: usize = 44;

/// Pixel geometry of a rendered label
///
/// The code box (border plus bars) is always twice as wide as it is tall,
/// so every bar count falls in the locator's aspect window. A white quiet
/// zone of an eighth of the code height surrounds the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    bar_count: usize,
    code_width: u32,
    code_height: u32,
    quiet_zone: u32,
}

impl Layout {
    /// Layout for `data_bars` data bars plus the sentinels
    pub fn for_data_bars(data_bars: usize) -> Self {
        let bar_count = data_bars + SENTINEL_COUNT;
        let span = bar_count as u32 * BAR_PITCH - BAR_GAP;
        let code_width = (span + 2 * CODE_MARGIN).max(MIN_CODE_WIDTH);
        let code_height = code_width / 2;
        Self {
            bar_count,
            code_width,
            code_height,
            quiet_zone: code_height / 8,
        }
    }

    /// Bars including sentinels
    pub fn bar_count(&self) -> usize {
        self.bar_count
    }

    /// Full canvas size (code box plus quiet zone)
    pub fn canvas_size(&self) -> (u32, u32) {
        (
            self.code_width + 2 * self.quiet_zone,
            self.code_height + 2 * self.quiet_zone,
        )
    }

    /// The bordered code box inside the canvas
    pub fn code_box(&self) -> Region {
        Region::new(
            self.quiet_zone,
            self.quiet_zone,
            self.code_width,
            self.code_height,
        )
    }

    /// Rectangle of bar `index` drawn at `fraction` of the code height,
    /// centred vertically
    pub fn bar_rect(&self, index: usize, fraction: f32) -> Region {
        let span = self.bar_count as u32 * BAR_PITCH - BAR_GAP;
        let left = self.quiet_zone + (self.code_width - span) / 2 + index as u32 * BAR_PITCH;

        let max_height = self.code_height - 2 * BORDER_WIDTH;
        let height = ((fraction * self.code_height as f32).round() as u32).clamp(1, max_height);
        let top = self.quiet_zone + (self.code_height - height) / 2;

        Region::new(left, top, BAR_WIDTH, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_code_uses_minimum_width() {
        let layout = Layout::for_data_bars(0);
        assert_eq!(layout.code_box(), Region::new(25, 25, 400, 200));
        assert_eq!(layout.canvas_size(), (450, 250));
    }

    #[test]
    fn test_width_grows_with_bar_count() {
        // 14 data bars + 3 sentinels: 17 * 25 - 10 + 90 = 505
        let layout = Layout::for_data_bars(14);
        assert_eq!(layout.code_box(), Region::new(31, 31, 505, 252));
        assert_eq!(layout.canvas_size(), (567, 314));
    }

    #[test]
    fn test_code_box_aspect_is_locked() {
        for n in [0, 2, 14, 22, MAX_DATA_BARS] {
            let aspect = Layout::for_data_bars(n).code_box().aspect_ratio();
            assert!((1.99..=2.01).contains(&aspect), "n={n} aspect={aspect}");
        }
    }

    #[test]
    fn test_bars_stay_inside_margins() {
        let layout = Layout::for_data_bars(MAX_DATA_BARS);
        let code = layout.code_box();
        let first = layout.bar_rect(0, 0.9);
        let last = layout.bar_rect(layout.bar_count() - 1, 0.9);
        assert!(first.x >= code.x + CODE_MARGIN);
        assert!(last.x + last.width + CODE_MARGIN <= code.x + code.width);
        assert!(first.y > code.y + BORDER_WIDTH);
    }

    #[test]
    fn test_bar_heights() {
        let layout = Layout::for_data_bars(0);
        assert_eq!(layout.bar_rect(0, 0.05).height, 10);
        assert_eq!(layout.bar_rect(0, 0.40).height, 80);
        let sentinel = layout.bar_rect(0, 0.9);
        assert_eq!(sentinel.height, 180);
        assert_eq!(sentinel.y, 25 + 10);
    }
}
