use tracing::debug;
use wireprims_codec::{BigEndian, BinaryReader, LittleEndian};

use crate::cmd::{reversed_unsupported, DecodeArgs, OrderArg, ReversedOps};
use crate::exit::{codec_error, input_error, layout_error, CliError, CliResult, FAILURE, SUCCESS};
use crate::hex;
use crate::layout::{parse_layout, FieldKind};
use crate::output::{print_decode, DecodeReport, DecodedField, FieldValue, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let layout = parse_layout(&args.layout).map_err(layout_error)?;
    let input = hex::decode(&args.input).map_err(input_error)?;
    debug!(order = ?args.order, fields = layout.len(), bytes = input.len(), "decoding buffer");

    let report = match args.order {
        OrderArg::Be => decode_fields::<BigEndian>(&layout, &input)?,
        OrderArg::Le => decode_fields::<LittleEndian>(&layout, &input)?,
    };
    print_decode(&report, format)?;

    let mismatched = report
        .fields
        .iter()
        .any(|field| field.value == Some(FieldValue::Match(false)));
    if args.strict && mismatched {
        return Err(CliError::new(FAILURE, "magic bytes did not match"));
    }
    Ok(SUCCESS)
}

/// Decode `input` according to `layout`, recording where each field sits.
pub fn decode_fields<O: ReversedOps>(
    layout: &[FieldKind],
    input: &[u8],
) -> CliResult<DecodeReport> {
    let mut reader = BinaryReader::<O>::new(input);
    let mut fields = Vec::with_capacity(layout.len());

    for (index, kind) in layout.iter().enumerate() {
        let offset = reader.bytes_read();
        let context = format!("field {index} ({kind})");
        let value = decode_field(&mut reader, kind, &context)?;
        fields.push(DecodedField {
            index,
            kind: kind.to_string(),
            offset,
            size: reader.bytes_read() - offset,
            value,
        });
    }

    if !reader.is_empty() {
        debug!(trailing = reader.bytes_left(), "layout did not consume the whole buffer");
    }

    Ok(DecodeReport {
        order: O::NAME,
        fields,
        consumed: reader.bytes_read(),
        trailing: reader.bytes_left(),
    })
}

fn decode_field<O: ReversedOps>(
    reader: &mut BinaryReader<'_, O>,
    kind: &FieldKind,
    context: &str,
) -> CliResult<Option<FieldValue>> {
    let codec = |err| codec_error(context, err);

    let value = match kind {
        FieldKind::U8 => FieldValue::Int(reader.read_u8().map_err(codec)?.into()),
        FieldKind::I16 => FieldValue::Int(reader.read_i16().map_err(codec)?.into()),
        FieldKind::U16 => FieldValue::Int(reader.read_u16().map_err(codec)?.into()),
        FieldKind::I32 => FieldValue::Int(reader.read_i32().map_err(codec)?.into()),
        FieldKind::U32 => FieldValue::Int(reader.read_u32().map_err(codec)?.into()),
        FieldKind::I16Reversed => {
            let value = O::read_i16_reversed(reader).ok_or_else(|| reversed_unsupported(context))?;
            FieldValue::Int(value.map_err(codec)?.into())
        }
        FieldKind::U16Reversed => {
            let value = O::read_u16_reversed(reader).ok_or_else(|| reversed_unsupported(context))?;
            FieldValue::Int(value.map_err(codec)?.into())
        }
        FieldKind::Guid => FieldValue::Text(reader.read_guid().map_err(codec)?.to_string()),
        FieldKind::FixedString(len) => {
            FieldValue::Text(reader.read_fixed_string(*len).map_err(codec)?.into_owned())
        }
        FieldKind::CString => FieldValue::Text(reader.read_string().into_owned()),
        FieldKind::Bytes(len) => {
            FieldValue::Text(hex::encode(reader.read_slice(*len).map_err(codec)?))
        }
        FieldKind::Rest => FieldValue::Text(hex::encode(reader.read_to_end())),
        FieldKind::Skip(len) => {
            reader.skip(*len).map_err(codec)?;
            return Ok(None);
        }
        FieldKind::Magic(expected) => {
            let matched = reader.verify_bytes(expected).map_err(codec)?;
            if !matched {
                debug!(%context, expected = %hex::encode(expected), "magic mismatch");
            }
            FieldValue::Match(matched)
        }
    };

    Ok(Some(value))
}
