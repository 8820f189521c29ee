//! Field layouts: the comma-separated list of field specs driving
//! `decode` and `encode`.

use std::fmt;
use std::str::FromStr;

use crate::hex::{self, HexError};

/// Errors from parsing a layout or a field value.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("layout is empty")]
    Empty,

    #[error("unknown field kind {0:?}")]
    UnknownField(String),

    #[error("field {field:?} requires a length (e.g. {field}:4)")]
    MissingLength { field: String },

    #[error("invalid length {value:?} for field {field:?}")]
    InvalidLength { field: String, value: String },

    #[error("invalid magic bytes: {0}")]
    Magic(#[source] HexError),

    #[error("field {field:?} needs at least one byte")]
    EmptyField { field: String },

    #[error("expected {expected} values for layout, got {found}")]
    ValueCount { expected: usize, found: usize },

    #[error("invalid value {value:?} for field {field}: {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// One field of a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    U8,
    I16,
    U16,
    I32,
    U32,
    /// 16-bit field stored low byte first in a big-endian buffer.
    I16Reversed,
    U16Reversed,
    Guid,
    /// Zero-padded string of a fixed byte length.
    FixedString(usize),
    /// NUL-terminated string.
    CString,
    Bytes(usize),
    /// Everything up to the end of the buffer.
    Rest,
    Skip(usize),
    /// Expected bytes, checked on decode and emitted on encode.
    Magic(Vec<u8>),
}

impl FieldKind {
    /// Whether `encode` expects a value argument for this field.
    pub fn takes_value(&self) -> bool {
        !matches!(self, FieldKind::Skip(_) | FieldKind::Magic(_))
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::U8 => f.write_str("u8"),
            FieldKind::I16 => f.write_str("i16"),
            FieldKind::U16 => f.write_str("u16"),
            FieldKind::I32 => f.write_str("i32"),
            FieldKind::U32 => f.write_str("u32"),
            FieldKind::I16Reversed => f.write_str("i16r"),
            FieldKind::U16Reversed => f.write_str("u16r"),
            FieldKind::Guid => f.write_str("guid"),
            FieldKind::FixedString(len) => write!(f, "str:{len}"),
            FieldKind::CString => f.write_str("cstr"),
            FieldKind::Bytes(len) => write!(f, "bytes:{len}"),
            FieldKind::Rest => f.write_str("rest"),
            FieldKind::Skip(len) => write!(f, "skip:{len}"),
            FieldKind::Magic(bytes) => write!(f, "magic:{}", hex::encode(bytes)),
        }
    }
}

impl FromStr for FieldKind {
    type Err = LayoutError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let spec = spec.trim();
        let (name, arg) = match spec.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (spec, None),
        };

        let length = |arg: Option<&str>| -> Result<usize, LayoutError> {
            let value = arg.ok_or_else(|| LayoutError::MissingLength {
                field: name.to_string(),
            })?;
            value.parse().map_err(|_| LayoutError::InvalidLength {
                field: name.to_string(),
                value: value.to_string(),
            })
        };

        let kind = match name.to_ascii_lowercase().as_str() {
            "u8" => FieldKind::U8,
            "i16" => FieldKind::I16,
            "u16" => FieldKind::U16,
            "i32" => FieldKind::I32,
            "u32" => FieldKind::U32,
            "i16r" => FieldKind::I16Reversed,
            "u16r" => FieldKind::U16Reversed,
            "guid" => FieldKind::Guid,
            "cstr" => FieldKind::CString,
            "rest" => FieldKind::Rest,
            "str" => FieldKind::FixedString(length(arg)?),
            "bytes" => FieldKind::Bytes(length(arg)?),
            "skip" => FieldKind::Skip(length(arg)?),
            "magic" => {
                let text = arg.ok_or_else(|| LayoutError::MissingLength {
                    field: name.to_string(),
                })?;
                let bytes = hex::decode(text).map_err(LayoutError::Magic)?;
                if bytes.is_empty() {
                    return Err(LayoutError::EmptyField {
                        field: name.to_string(),
                    });
                }
                FieldKind::Magic(bytes)
            }
            _ => return Err(LayoutError::UnknownField(spec.to_string())),
        };

        Ok(kind)
    }
}

/// Parse a comma-separated layout such as `u16,guid,str:8`.
pub fn parse_layout(text: &str) -> Result<Vec<FieldKind>, LayoutError> {
    let fields = text
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(str::parse)
        .collect::<Result<Vec<FieldKind>, _>>()?;

    if fields.is_empty() {
        return Err(LayoutError::Empty);
    }
    Ok(fields)
}

/// Parse an integer in decimal or `0x` hex, with an optional leading `-`.
pub fn parse_int(text: &str) -> Option<i64> {
    let text = text.trim();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    if digits.starts_with(['-', '+']) {
        return None;
    }

    let magnitude = match digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        Some(hex) if !hex.starts_with(['-', '+']) => i64::from_str_radix(hex, 16).ok()?,
        Some(_) => return None,
        None => digits.parse::<i64>().ok()?,
    };

    Some(if negative { -magnitude } else { magnitude })
}
