//! Error types shared by the codec, renderer and reader.

use thiserror::Error;

/// Errors produced while encoding, rendering or reading a bar label.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BarError {
    /// Input text contains a character outside the forward alphabet.
    #[error("symbol {symbol:?} at position {position} cannot be encoded")]
    UnknownSymbol {
        /// The offending character
        symbol: char,
        /// Character position in the input
        position: usize,
    },

    /// Digit sequence has an odd length and cannot be split into pairs.
    #[error("digit sequence has odd length {len}")]
    MalformedCode {
        /// Length of the rejected sequence
        len: usize,
    },

    /// A digit outside the base-8 range 0-7.
    #[error("digit {digit} at position {position} is outside 0-7")]
    InvalidDigit {
        /// The offending digit
        digit: u8,
        /// Position in the digit sequence
        position: usize,
    },

    /// A reassembled index has no symbol in the decode table.
    #[error("index {index} has no symbol")]
    UnmappedIndex {
        /// The reassembled index
        index: u16,
    },

    /// Too few bar-shaped features remained after sentinel stripping.
    #[error("no data bars detected ({found} bar-shaped features)")]
    NoBarsDetected {
        /// Number of features measured before sentinels were stripped
        found: usize,
    },

    /// No quadrilateral with the expected shape was found in the frame.
    #[error("no code region found in frame")]
    RegionNotFound,

    /// More data bars than a single label can carry.
    #[error("{bars} data bars exceed the capacity of {max}")]
    CapacityExceeded {
        /// Requested data bars
        bars: usize,
        /// Maximum supported data bars
        max: usize,
    },

    /// Frame or crop without pixels.
    #[error("frame has no pixels")]
    EmptyFrame,

    /// The capture loop was cancelled before a code was read.
    #[error("capture cancelled")]
    Cancelled,

    /// The frame source ran dry before a code was read.
    #[error("frame source exhausted after {frames} frames")]
    SourceExhausted {
        /// Frames polled before exhaustion
        frames: usize,
    },

    /// The frame source itself failed.
    #[error("frame source failed: {0}")]
    Capture(String),
}

impl BarError {
    /// True for invalid digit sequences (odd length or out-of-range digit).
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            BarError::MalformedCode { .. } | BarError::InvalidDigit { .. }
        )
    }

    /// True for failures tied to a single frame; a capture loop moves on to
    /// the next frame instead of giving up.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            BarError::RegionNotFound | BarError::NoBarsDetected { .. } | BarError::EmptyFrame
        )
    }
}
