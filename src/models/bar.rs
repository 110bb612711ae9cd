/// Sentinel bars drawn before the data bars
pub const LEADING_SENTINELS: usize = 1;
/// Sentinel bars drawn after the data bars
pub const TRAILING_SENTINELS: usize = 2;
/// Total sentinel bars per label
pub const SENTINEL_COUNT: usize = LEADING_SENTINELS + TRAILING_SENTINELS;
/// Height of a sentinel bar as a fraction of the code height
pub const SENTINEL_FRACTION: f32 = 0.9;
/// Height added per digit step as a fraction of the code height
pub const DIGIT_STEP_FRACTION: f32 = 0.05;

/// One rendered bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bar {
    /// Fixed-height orientation and scale marker
    Sentinel,
    /// Data digit 0-7
    Data(u8),
}

impl Bar {
    /// Height as a fraction of the code height.
    ///
    /// Digit `d` is drawn at `0.05 * (d + 1)`, i.e. 0.05-0.40.
    pub fn height_fraction(&self) -> f32 {
        match self {
            Bar::Sentinel => SENTINEL_FRACTION,
            Bar::Data(digit) => DIGIT_STEP_FRACTION * (*digit as f32 + 1.0),
        }
    }

    /// Check if this is a sentinel bar
    pub fn is_sentinel(&self) -> bool {
        matches!(self, Bar::Sentinel)
    }
}

/// Canonical bar layout: leading sentinel, data bars, trailing sentinels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarSequence {
    bars: Vec<Bar>,
}

impl BarSequence {
    /// Wrap data digits with sentinels
    pub fn from_digits(digits: &[u8]) -> Self {
        let mut bars = Vec::with_capacity(digits.len() + SENTINEL_COUNT);
        bars.extend(std::iter::repeat(Bar::Sentinel).take(LEADING_SENTINELS));
        bars.extend(digits.iter().map(|&d| Bar::Data(d)));
        bars.extend(std::iter::repeat(Bar::Sentinel).take(TRAILING_SENTINELS));
        Self { bars }
    }

    /// All bars, left to right
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Number of bars including sentinels
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// A sequence always carries its sentinels, so it is never empty
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Number of data bars
    pub fn data_len(&self) -> usize {
        self.bars.len() - SENTINEL_COUNT
    }
}

/// A bar-shaped feature measured in a captured image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasuredBar {
    /// Rightmost x coordinate of the feature (ordering key only)
    pub x: u32,
    /// Vertical extent divided by the working image height
    pub height: f32,
}

impl MeasuredBar {
    /// Create a new measurement
    pub fn new(x: u32, height: f32) -> Self {
        Self { x, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_fractions() {
        assert!((Bar::Data(0).height_fraction() - 0.05).abs() < 1e-6);
        assert!((Bar::Data(7).height_fraction() - 0.40).abs() < 1e-6);
        assert!((Bar::Sentinel.height_fraction() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_sequence_layout() {
        let seq = BarSequence::from_digits(&[3, 5]);
        assert_eq!(
            seq.bars(),
            &[
                Bar::Sentinel,
                Bar::Data(3),
                Bar::Data(5),
                Bar::Sentinel,
                Bar::Sentinel
            ]
        );
        assert_eq!(seq.data_len(), 2);
    }

    #[test]
    fn test_sentinel_only_sequence() {
        let seq = BarSequence::from_digits(&[]);
        assert_eq!(seq.len(), SENTINEL_COUNT);
        assert!(seq.bars().iter().all(Bar::is_sentinel));
    }
}
