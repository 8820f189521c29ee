use std::fmt::Display;

use bytes::BytesMut;
use tracing::debug;
use wireprims_codec::{BigEndian, BinaryWriter, ByteOrder, Guid, LittleEndian};

use crate::cmd::{reversed_unsupported, EncodeArgs, OrderArg, ReversedOps};
use crate::exit::{codec_error, layout_error, CliError, CliResult, SUCCESS};
use crate::hex;
use crate::layout::{parse_int, parse_layout, FieldKind, LayoutError};
use crate::output::{print_encode, EncodeReport, OutputFormat};

/// Default output buffer size.
pub const DEFAULT_CAPACITY: usize = 4096;

/// Largest accepted `--capacity`.
pub const MAX_CAPACITY: usize = 16 * 1024 * 1024;

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let layout = parse_layout(&args.layout).map_err(layout_error)?;
    let expected = layout.iter().filter(|kind| kind.takes_value()).count();
    if args.values.len() != expected {
        return Err(layout_error(LayoutError::ValueCount {
            expected,
            found: args.values.len(),
        }));
    }

    let mut buf = output_buffer(args.capacity)?;
    let (order, written) = match args.order {
        OrderArg::Be => (
            BigEndian::NAME,
            encode_fields::<BigEndian>(&layout, &args.values, args.truncate, &mut buf)?,
        ),
        OrderArg::Le => (
            LittleEndian::NAME,
            encode_fields::<LittleEndian>(&layout, &args.values, args.truncate, &mut buf)?,
        ),
    };
    buf.truncate(written);
    let bytes = buf.freeze();
    debug!(order, size = bytes.len(), capacity = args.capacity, "encoded buffer");

    let report = EncodeReport {
        order,
        size: bytes.len(),
        hex: hex::encode(&bytes),
    };
    print_encode(&report, &bytes, format)?;
    Ok(SUCCESS)
}

fn output_buffer(capacity: usize) -> CliResult<BytesMut> {
    if capacity > MAX_CAPACITY {
        return Err(CliError::usage(format!(
            "--capacity {capacity} exceeds the maximum of {MAX_CAPACITY} bytes"
        )));
    }
    Ok(BytesMut::zeroed(capacity))
}

/// Encode one value per value-taking field of `layout` into `buf`.
///
/// Returns the number of bytes written.
pub fn encode_fields<O: ReversedOps>(
    layout: &[FieldKind],
    values: &[String],
    truncate: bool,
    buf: &mut [u8],
) -> CliResult<usize> {
    let mut writer = BinaryWriter::<O>::new(buf);
    let mut values = values.iter().map(String::as_str);

    for (index, kind) in layout.iter().enumerate() {
        let context = format!("field {index} ({kind})");
        let value = if kind.takes_value() {
            values.next().unwrap_or_default()
        } else {
            ""
        };
        encode_field(&mut writer, kind, value, truncate, &context)?;
    }

    Ok(writer.bytes_written())
}

fn encode_field<O: ReversedOps>(
    writer: &mut BinaryWriter<'_, O>,
    kind: &FieldKind,
    value: &str,
    truncate: bool,
    context: &str,
) -> CliResult<()> {
    let codec = |err| codec_error(context, err);

    match kind {
        FieldKind::U8 => writer.write_u8(int_value(kind, value)?).map_err(codec),
        FieldKind::I16 => writer.write_i16(int_value(kind, value)?).map_err(codec),
        FieldKind::U16 => writer.write_u16(int_value(kind, value)?).map_err(codec),
        FieldKind::I32 => writer.write_i32(int_value(kind, value)?).map_err(codec),
        FieldKind::U32 => writer.write_u32(int_value(kind, value)?).map_err(codec),
        FieldKind::I16Reversed => O::write_i16_reversed(writer, int_value(kind, value)?)
            .ok_or_else(|| reversed_unsupported(context))?
            .map_err(codec),
        FieldKind::U16Reversed => O::write_u16_reversed(writer, int_value(kind, value)?)
            .ok_or_else(|| reversed_unsupported(context))?
            .map_err(codec),
        FieldKind::Guid => {
            let guid: Guid = value.parse().map_err(|err| invalid(kind, value, err))?;
            writer.write_guid(guid).map_err(codec)
        }
        FieldKind::FixedString(len) if truncate => {
            writer.write_fixed_string(value, *len).map_err(codec)
        }
        FieldKind::FixedString(len) => writer.write_fixed_string_exact(value, *len).map_err(codec),
        FieldKind::CString => {
            if value.contains('\0') {
                return Err(invalid(kind, value, "contains a NUL byte"));
            }
            writer.write_bytes(value.as_bytes()).map_err(codec)?;
            writer.write_u8(0).map_err(codec)
        }
        FieldKind::Bytes(len) => {
            let bytes = hex::decode(value).map_err(|err| invalid(kind, value, err))?;
            if bytes.len() != *len {
                return Err(invalid(
                    kind,
                    value,
                    format!("expected {len} bytes, got {}", bytes.len()),
                ));
            }
            writer.write_bytes(&bytes).map_err(codec)
        }
        FieldKind::Rest => {
            let bytes = hex::decode(value).map_err(|err| invalid(kind, value, err))?;
            writer.write_bytes(&bytes).map_err(codec)
        }
        FieldKind::Skip(len) => writer.write_zeros(*len).map_err(codec),
        FieldKind::Magic(bytes) => writer.write_bytes(bytes).map_err(codec),
    }
}

fn int_value<T: TryFrom<i64>>(kind: &FieldKind, value: &str) -> CliResult<T> {
    let parsed = parse_int(value).ok_or_else(|| invalid(kind, value, "not an integer"))?;
    T::try_from(parsed).map_err(|_| invalid(kind, value, "out of range"))
}

fn invalid(kind: &FieldKind, value: &str, reason: impl Display) -> CliError {
    layout_error(LayoutError::InvalidValue {
        field: kind.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit::{DATA_INVALID, USAGE};

    fn encode<O: ReversedOps>(layout: &str, values: &[&str], truncate: bool) -> CliResult<Vec<u8>> {
        let layout = parse_layout(layout).unwrap();
        let values: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        let mut buf = vec![0u8; 64];
        let written = encode_fields::<O>(&layout, &values, truncate, &mut buf)?;
        buf.truncate(written);
        Ok(buf)
    }

    #[test]
    fn encodes_integers_in_each_order() {
        assert_eq!(
            encode::<BigEndian>("u16,i32", &["0x1234", "-2"], false).unwrap(),
            vec![0x12, 0x34, 0xFF, 0xFF, 0xFF, 0xFE]
        );
        assert_eq!(
            encode::<LittleEndian>("u16,i32", &["0x1234", "-2"], false).unwrap(),
            vec![0x34, 0x12, 0xFE, 0xFF, 0xFF, 0xFF]
        );
    }

    #[test]
    fn encodes_reversed_and_fixed_fields() {
        let bytes = encode::<BigEndian>(
            "magic:4950,u16r,skip:2,str:5,cstr,bytes:2",
            &["4660", "ab", "hi", "beef"],
            false,
        )
        .unwrap();
        assert_eq!(
            bytes,
            vec![0x49, 0x50, 0x34, 0x12, 0, 0, b'a', b'b', 0, 0, 0, b'h', b'i', 0, 0xBE, 0xEF]
        );
    }

    #[test]
    fn encodes_guid_in_wire_order() {
        let bytes = encode::<LittleEndian>(
            "guid",
            &["{01020304-0506-0708-090a-0b0c0d0e0f10}"],
            false,
        )
        .unwrap();
        assert_eq!(hex::encode(&bytes), "0403020106050807090a0b0c0d0e0f10");
    }

    #[test]
    fn oversize_string_rejected_unless_truncating() {
        let err = encode::<BigEndian>("str:3", &["hello"], false).unwrap_err();
        assert_eq!(err.code, USAGE);

        let bytes = encode::<BigEndian>("str:3", &["hello"], true).unwrap();
        assert_eq!(bytes, b"hel".to_vec());
    }

    #[test]
    fn invalid_values_are_usage_errors() {
        assert_eq!(encode::<BigEndian>("u8", &["256"], false).unwrap_err().code, USAGE);
        assert_eq!(encode::<BigEndian>("u16", &["x"], false).unwrap_err().code, USAGE);
        assert_eq!(encode::<BigEndian>("bytes:2", &["01"], false).unwrap_err().code, USAGE);
        assert_eq!(encode::<BigEndian>("guid", &["nope"], false).unwrap_err().code, USAGE);
        assert_eq!(encode::<LittleEndian>("u16r", &["1"], false).unwrap_err().code, USAGE);
    }

    #[test]
    fn capacity_overflow_is_data_invalid() {
        let layout = parse_layout("u32").unwrap();
        let mut buf = [0u8; 2];
        let values = ["1".to_string()];
        let err = encode_fields::<BigEndian>(&layout, &values, false, &mut buf).unwrap_err();
        assert_eq!(err.code, DATA_INVALID);
    }

    #[test]
    fn output_buffer_rejects_oversized_capacity() {
        assert_eq!(output_buffer(MAX_CAPACITY + 1).unwrap_err().code, USAGE);
        assert_eq!(output_buffer(usize::MAX).unwrap_err().code, USAGE);
        assert_eq!(output_buffer(DEFAULT_CAPACITY).unwrap().len(), DEFAULT_CAPACITY);
    }
}
