use clap::{Args, Subcommand, ValueEnum};
use wireprims_codec::{
    BigEndian, BinaryReader, BinaryWriter, ByteOrder, LittleEndian, Result as CodecResult,
};

use crate::exit::{CliError, CliResult};
use crate::output::OutputFormat;

pub mod decode;
pub mod encode;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode a hex buffer field by field.
    Decode(DecodeArgs),
    /// Encode values into a buffer and print it.
    Encode(EncodeArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Decode(args) => decode::run(args, format),
        Command::Encode(args) => encode::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

/// Byte order of the buffer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    /// Big-endian (network order).
    Be,
    /// Little-endian.
    Le,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Comma-separated field layout (e.g. "magic:4950,u16,guid,str:8").
    #[arg(long, short = 'l')]
    pub layout: String,
    /// Byte order of integer fields.
    #[arg(long, short = 'o', env = "WIREPRIMS_ORDER", default_value = "be")]
    pub order: OrderArg,
    /// Exit with a failure code when a magic field does not match.
    #[arg(long)]
    pub strict: bool,
    /// Buffer contents as hex.
    pub input: String,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Comma-separated field layout (e.g. "u16,guid,str:8").
    #[arg(long, short = 'l')]
    pub layout: String,
    /// Byte order of integer fields.
    #[arg(long, short = 'o', env = "WIREPRIMS_ORDER", default_value = "be")]
    pub order: OrderArg,
    /// Size of the output buffer in bytes.
    #[arg(long, default_value_t = encode::DEFAULT_CAPACITY)]
    pub capacity: usize,
    /// Cut strings that do not fit their field instead of failing.
    #[arg(long)]
    pub truncate: bool,
    /// One value per field, skipping `skip` and `magic` fields.
    #[arg(allow_hyphen_values = true)]
    pub values: Vec<String>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Reversed 16-bit fields exist only for big-endian buffers.
pub trait ReversedOps: ByteOrder {
    fn read_u16_reversed(reader: &mut BinaryReader<'_, Self>) -> Option<CodecResult<u16>>;

    fn read_i16_reversed(reader: &mut BinaryReader<'_, Self>) -> Option<CodecResult<i16>>;

    fn write_u16_reversed(
        writer: &mut BinaryWriter<'_, Self>,
        value: u16,
    ) -> Option<CodecResult<()>>;

    fn write_i16_reversed(
        writer: &mut BinaryWriter<'_, Self>,
        value: i16,
    ) -> Option<CodecResult<()>>;
}

impl ReversedOps for BigEndian {
    fn read_u16_reversed(reader: &mut BinaryReader<'_, Self>) -> Option<CodecResult<u16>> {
        Some(reader.read_u16_reversed())
    }

    fn read_i16_reversed(reader: &mut BinaryReader<'_, Self>) -> Option<CodecResult<i16>> {
        Some(reader.read_i16_reversed())
    }

    fn write_u16_reversed(
        writer: &mut BinaryWriter<'_, Self>,
        value: u16,
    ) -> Option<CodecResult<()>> {
        Some(writer.write_u16_reversed(value))
    }

    fn write_i16_reversed(
        writer: &mut BinaryWriter<'_, Self>,
        value: i16,
    ) -> Option<CodecResult<()>> {
        Some(writer.write_i16_reversed(value))
    }
}

impl ReversedOps for LittleEndian {
    fn read_u16_reversed(_: &mut BinaryReader<'_, Self>) -> Option<CodecResult<u16>> {
        None
    }

    fn read_i16_reversed(_: &mut BinaryReader<'_, Self>) -> Option<CodecResult<i16>> {
        None
    }

    fn write_u16_reversed(_: &mut BinaryWriter<'_, Self>, _: u16) -> Option<CodecResult<()>> {
        None
    }

    fn write_i16_reversed(_: &mut BinaryWriter<'_, Self>, _: i16) -> Option<CodecResult<()>> {
        None
    }
}

pub fn reversed_unsupported(context: &str) -> CliError {
    CliError::usage(format!("{context}: reversed fields require --order be"))
}
