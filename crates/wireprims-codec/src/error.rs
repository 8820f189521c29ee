/// Errors that can occur while reading or writing a buffer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The operation needs more bytes than remain in the buffer.
    #[error("out of bounds at offset {offset} (needed {needed} bytes, {remaining} remaining)")]
    OutOfBounds {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    /// The encoded text does not fit the declared field length.
    #[error("string too long ({len} bytes, max {max})")]
    StringTooLong { len: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_message_names_position() {
        let err = CodecError::OutOfBounds {
            offset: 6,
            needed: 4,
            remaining: 2,
        };
        assert_eq!(
            err.to_string(),
            "out of bounds at offset 6 (needed 4 bytes, 2 remaining)"
        );
    }

    #[test]
    fn string_too_long_message() {
        let err = CodecError::StringTooLong { len: 9, max: 8 };
        assert_eq!(err.to_string(), "string too long (9 bytes, max 8)");
    }
}
