use super::alphabet::{index_to_symbol, symbol_to_index};
use crate::error::BarError;

/// Largest base-8 digit
pub const MAX_DIGIT: u8 = 7;

/// Split an index (0-63) into two base-8 digits, most significant first.
///
/// Indices below 8 are zero-padded: 5 -> [0, 5].
pub fn index_to_pair(index: u8) -> [u8; 2] {
    [(index >> 3) & 0x07, index & 0x07]
}

/// Combine two base-8 digits into an index.
pub fn pair_to_index(high: u8, low: u8) -> u16 {
    high as u16 * 8 + low as u16
}

/// Encode text into its digit sequence (two digits per symbol).
pub fn encode_symbols(text: &str) -> Result<Vec<u8>, BarError> {
    let mut digits = Vec::with_capacity(text.len() * 2);
    for (position, symbol) in text.chars().enumerate() {
        let index =
            symbol_to_index(symbol).ok_or(BarError::UnknownSymbol { symbol, position })?;
        digits.extend_from_slice(&index_to_pair(index));
    }
    Ok(digits)
}

/// Decode a digit sequence back into text.
pub fn decode_digits(digits: &[u8]) -> Result<String, BarError> {
    if digits.len() % 2 != 0 {
        return Err(BarError::MalformedCode { len: digits.len() });
    }

    let mut text = String::with_capacity(digits.len() / 2);
    for (pair_idx, pair) in digits.chunks_exact(2).enumerate() {
        for (offset, &digit) in pair.iter().enumerate() {
            if digit > MAX_DIGIT {
                return Err(BarError::InvalidDigit {
                    digit,
                    position: pair_idx * 2 + offset,
                });
            }
        }

        let index = pair_to_index(pair[0], pair[1]);
        let symbol = u8::try_from(index)
            .ok()
            .and_then(index_to_symbol)
            .ok_or(BarError::UnmappedIndex { index })?;
        text.push(symbol);
    }

    Ok(text)
}
