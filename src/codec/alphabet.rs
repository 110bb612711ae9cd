/// Symbol alphabet (64 entries, 6 bits per symbol)
/// A-Z = 0-25, a-z = 26-51, '0' = 52 (decode only), '1'-'9' = 53-61, '+' = 62, '/' = 63
pub const SYMBOLS: [char; 64] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S',
    'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l',
    'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', '0', '1', '2', '3', '4',
    '5', '6', '7', '8', '9', '+', '/',
];

/// Index whose symbol can be produced by decoding but never encoded.
pub const DECODE_ONLY_INDEX: u8 = 52;

/// Number of symbols in the alphabet
pub const ALPHABET_SIZE: usize = SYMBOLS.len();

/// Map a symbol to its index.
///
/// Returns `None` for characters outside the alphabet and for `'0'`, which
/// only exists on the decode side.
pub const fn symbol_to_index(symbol: char) -> Option<u8> {
    match symbol {
        'A'..='Z' => Some(symbol as u8 - b'A'),
        'a'..='z' => Some(symbol as u8 - b'a' + 26),
        '1'..='9' => Some(symbol as u8 - b'0' + 52),
        '+' => Some(62),
        '/' => Some(63),
        _ => None,
    }
}

/// Map an index back to its symbol; index 52 yields `'0'`.
pub fn index_to_symbol(index: u8) -> Option<char> {
    SYMBOLS.get(index as usize).copied()
}

/// True if `symbol` can be encoded.
pub fn is_encodable(symbol: char) -> bool {
    symbol_to_index(symbol).is_some()
}
