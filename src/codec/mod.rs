//! Symbol codec
//!
//! Converts between text and the digit sequence drawn as bars:
//! - Alphabet table (64 symbols, 6 bits each)
//! - Base-8 digit pairs (two bars per symbol)

/// 64-symbol alphabet and its inverse
pub mod alphabet;
/// Digit-pair reassembly in both directions
pub mod digits;

pub use alphabet::{index_to_symbol, is_encodable, symbol_to_index};
pub use digits::{decode_digits, encode_symbols};
