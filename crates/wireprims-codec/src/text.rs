//! UTF-8 helpers shared by the string operations.

use std::borrow::Cow;

/// Terminator for null-terminated and zero-padded strings.
pub const NUL: u8 = 0;

/// Index of the first NUL byte, if any.
pub fn find_nul(bytes: &[u8]) -> Option<usize> {
    bytes.iter().position(|&b| b == NUL)
}

/// Decode the bytes before the first NUL (or all bytes if there is none).
///
/// Invalid UTF-8 sequences are replaced with `U+FFFD`. Valid input is
/// returned borrowed.
pub fn decode_until_nul(bytes: &[u8]) -> Cow<'_, str> {
    let end = find_nul(bytes).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end])
}

/// Longest prefix of `text` that fits in `max` bytes and ends on a character
/// boundary.
pub fn truncate_to_boundary(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
