use std::fmt;

use wireprims_codec::CodecError;

use crate::hex::HexError;
use crate::layout::LayoutError;

// Exit codes follow the sysexits-style ranges used across our CLIs.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(USAGE, message)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn codec_error(context: &str, err: CodecError) -> CliError {
    match err {
        CodecError::OutOfBounds { .. } => CliError::new(DATA_INVALID, format!("{context}: {err}")),
        CodecError::StringTooLong { .. } => CliError::new(USAGE, format!("{context}: {err}")),
    }
}

pub fn layout_error(err: LayoutError) -> CliError {
    CliError::usage(format!("layout: {err}"))
}

pub fn input_error(err: HexError) -> CliError {
    CliError::new(DATA_INVALID, format!("input: {err}"))
}
