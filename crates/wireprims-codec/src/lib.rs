//! Cursor-based binary readers and writers over fixed byte buffers.
//!
//! This is the core layer of wireprims. Every codec pass works on a
//! caller-owned buffer:
//! - A [`BinaryReader`] borrows `&[u8]` and decodes primitives in sequence
//! - A [`BinaryWriter`] borrows `&mut [u8]` and encodes primitives in sequence
//! - The [`ByteOrder`] type parameter selects network order ([`BigEndian`])
//!   or host order ([`LittleEndian`])
//!
//! Identifiers ([`Guid`]) use a mixed-endian wire layout regardless of the
//! surrounding byte order.
//!
//! No I/O, no allocation of the backing buffer, no partial reads.

pub mod error;
pub mod guid;
pub mod order;
pub mod reader;
pub mod text;
pub mod writer;

pub use error::{CodecError, Result};
pub use guid::{swap_wire_order, Guid, GUID_SIZE};
pub use order::{BigEndian, ByteOrder, LittleEndian};
pub use reader::{BigEndianReader, BinaryReader, LittleEndianReader};
pub use writer::{BigEndianWriter, BinaryWriter, LittleEndianWriter};

pub use uuid::Uuid;
