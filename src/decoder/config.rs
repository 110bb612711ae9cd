//! Decode tunables with environment overrides

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn parse_env_u32(name: &str, default: u32) -> u32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

fn parse_env_i32(name: &str, default: i32) -> i32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<i32>().ok())
        .unwrap_or(default)
}

fn parse_env_f32(name: &str, default: f32) -> f32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<f32>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

fn parse_env_bool_u8(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .map(|v| v != 0)
        .unwrap_or(default)
}

/// Tunables for locating and measuring a label
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeConfig {
    /// Adaptive threshold window used to find the label outline
    pub locator_block: usize,
    /// Offset below the local mean for the locator threshold
    pub locator_offset: i32,
    /// Accepted label width/height range
    pub min_aspect: f32,
    /// Upper end of the aspect range
    pub max_aspect: f32,
    /// Accepted label area as a fraction of the frame
    pub min_area_fraction: f32,
    /// Upper end of the area range
    pub max_area_fraction: f32,
    /// Douglas-Peucker tolerance as a fraction of the contour perimeter
    pub approx_epsilon: f32,
    /// Retry the locator with Otsu binarization when adaptive finds nothing
    pub otsu_fallback: bool,
    /// Canonical size the crop is resized to before measuring
    pub working_width: u32,
    /// Height of the working image
    pub working_height: u32,
    /// Margin trimmed from every side of the working image
    pub inset: u32,
    /// Adaptive threshold window used to separate bars
    ///
    /// Must be wider than twice the widest bar at working size (11.25 px for
    /// a 400-px code box), or bar interiors binarize white and a bar cut by
    /// the inset splits into two strips.
    pub measure_block: usize,
    /// Offset below the local mean for the bar threshold
    pub measure_offset: i32,
    /// Dark components smaller than this are speckle, not bars
    pub min_component_pixels: usize,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            locator_block: 11,
            locator_offset: 2,
            min_aspect: 1.8,
            max_aspect: 2.2,
            min_area_fraction: 0.01,
            max_area_fraction: 0.80,
            approx_epsilon: 0.01,
            otsu_fallback: true,
            working_width: 300,
            working_height: 150,
            inset: 10,
            measure_block: 25,
            measure_offset: 5,
            min_component_pixels: 6,
        }
    }
}

impl DecodeConfig {
    /// Defaults overridden by `BAR_*` environment variables
    ///
    /// Unset or unparsable variables keep the default value.
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            locator_block: parse_env_usize("BAR_LOCATOR_BLOCK", d.locator_block).max(3),
            locator_offset: parse_env_i32("BAR_LOCATOR_OFFSET", d.locator_offset),
            min_aspect: parse_env_f32("BAR_MIN_ASPECT", d.min_aspect),
            max_aspect: parse_env_f32("BAR_MAX_ASPECT", d.max_aspect),
            min_area_fraction: parse_env_f32("BAR_MIN_AREA", d.min_area_fraction),
            max_area_fraction: parse_env_f32("BAR_MAX_AREA", d.max_area_fraction),
            approx_epsilon: parse_env_f32("BAR_APPROX_EPSILON", d.approx_epsilon),
            otsu_fallback: parse_env_bool_u8("BAR_OTSU_FALLBACK", d.otsu_fallback),
            working_width: parse_env_u32("BAR_WORKING_WIDTH", d.working_width).max(40),
            working_height: parse_env_u32("BAR_WORKING_HEIGHT", d.working_height).max(40),
            inset: parse_env_u32("BAR_INSET", d.inset).min(15),
            measure_block: parse_env_usize("BAR_MEASURE_BLOCK", d.measure_block).max(3),
            measure_offset: parse_env_i32("BAR_MEASURE_OFFSET", d.measure_offset),
            min_component_pixels: parse_env_usize("BAR_MIN_COMPONENT_PIXELS", d.min_component_pixels),
        }
    }

    /// Size of the working image after the inset is trimmed
    pub fn trimmed_size(&self) -> (u32, u32) {
        (
            self.working_width.saturating_sub(2 * self.inset),
            self.working_height.saturating_sub(2 * self.inset),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DecodeConfig::default();
        assert_eq!(config.trimmed_size(), (280, 130));
        assert!(config.min_aspect < 2.0 && config.max_aspect > 2.0);
    }

    #[test]
    fn test_env_override_and_fallback() {
        // SAFETY: these variable names are only read by this test
        unsafe {
            std::env::set_var("BAR_MEASURE_BLOCK", "13");
            std::env::set_var("BAR_MEASURE_OFFSET", "not-a-number");
        }
        let config = DecodeConfig::from_env();
        assert_eq!(config.measure_block, 13);
        assert_eq!(config.measure_offset, 5);
        unsafe {
            std::env::remove_var("BAR_MEASURE_BLOCK");
            std::env::remove_var("BAR_MEASURE_OFFSET");
        }
    }
}
