//! Big/little-endian binary codecs with mixed-endian GUID support.
//!
//! wireprims provides cursor-based readers and writers over caller-owned
//! buffers for legacy binary wire formats: network-order and little-endian
//! integers, zero-padded and NUL-terminated strings, borrowed byte slices,
//! and 16-byte identifiers with a mixed-endian wire layout.
//!
//! # Crate Structure
//!
//! - [`codec`]: Readers, writers, byte orders and the [`Guid`] type
//!
//! The `wireprims` binary (behind the `cli` feature) decodes and encodes
//! buffers from the command line using a field layout.

/// Re-export codec types.
pub mod codec {
    pub use wireprims_codec::*;
}

pub use wireprims_codec::{
    BigEndian, BigEndianReader, BigEndianWriter, BinaryReader, BinaryWriter, ByteOrder, CodecError,
    Guid, LittleEndian, LittleEndianReader, LittleEndianWriter,
};
