use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

use bytes::Bytes;
use tracing::trace;

use crate::error::{CodecError, Result};
use crate::guid::{Guid, GUID_SIZE};
use crate::order::{BigEndian, ByteOrder, LittleEndian};
use crate::text;

/// Reader decoding network-order (big-endian) fields.
pub type BigEndianReader<'a> = BinaryReader<'a, BigEndian>;

/// Reader decoding little-endian fields.
pub type LittleEndianReader<'a> = BinaryReader<'a, LittleEndian>;

/// Decodes fields in sequence from a borrowed byte buffer.
///
/// Every read advances the cursor by exactly the number of bytes it consumes.
/// A read that needs more bytes than remain fails with
/// [`CodecError::OutOfBounds`] and leaves the cursor where it was.
#[derive(Clone)]
pub struct BinaryReader<'a, O> {
    buf: &'a [u8],
    pos: usize,
    _order: PhantomData<O>,
}

impl<'a, O: ByteOrder> BinaryReader<'a, O> {
    /// Create a reader positioned at the start of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            _order: PhantomData,
        }
    }

    /// Number of bytes consumed so far.
    pub fn bytes_read(&self) -> usize {
        self.pos
    }

    /// Number of bytes not yet consumed.
    pub fn bytes_left(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Returns true once every byte has been consumed.
    pub fn is_empty(&self) -> bool {
        self.bytes_left() == 0
    }

    /// The unconsumed tail, for handing off to a nested decoder.
    pub fn remaining(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    /// Borrow the whole underlying buffer.
    pub fn get_ref(&self) -> &'a [u8] {
        self.buf
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let remaining = self.bytes_left();
        if len > remaining {
            trace!(
                order = O::NAME,
                offset = self.pos,
                needed = len,
                remaining,
                "read out of bounds"
            );
            return Err(CodecError::OutOfBounds {
                offset: self.pos,
                needed: len,
                remaining,
            });
        }

        let start = self.pos;
        self.pos += len;
        Ok(&self.buf[start..self.pos])
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let mut src = self.take(2)?;
        Ok(O::get_u16(&mut src))
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        let mut src = self.take(2)?;
        Ok(O::get_i16(&mut src))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let mut src = self.take(4)?;
        Ok(O::get_u32(&mut src))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        let mut src = self.take(4)?;
        Ok(O::get_i32(&mut src))
    }

    /// Borrow the next `len` bytes without copying.
    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8]> {
        self.take(len)
    }

    /// Borrow every remaining byte without copying.
    pub fn read_to_end(&mut self) -> &'a [u8] {
        let rest = self.remaining();
        self.pos = self.buf.len();
        rest
    }

    /// Copy the next `len` bytes into an owned buffer.
    pub fn read_bytes(&mut self, len: usize) -> Result<Bytes> {
        self.take(len).map(Bytes::copy_from_slice)
    }

    /// Copy every remaining byte into an owned buffer.
    pub fn read_bytes_to_end(&mut self) -> Bytes {
        Bytes::copy_from_slice(self.read_to_end())
    }

    /// Copy the next `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let src = self.take(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(src);
        Ok(out)
    }

    /// Advance past `len` bytes without inspecting them.
    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.take(len).map(|_| ())
    }

    /// Consume `expected.len()` bytes and report whether they match.
    ///
    /// A mismatch is not an error: the cursor advances either way.
    pub fn verify_bytes(&mut self, expected: &[u8]) -> Result<bool> {
        Ok(self.take(expected.len())? == expected)
    }

    /// Read a [`Guid`] stored in the mixed-endian wire layout.
    pub fn read_guid(&mut self) -> Result<Guid> {
        self.read_array::<GUID_SIZE>().map(Guid::from_wire_bytes)
    }

    /// Read a zero-padded string occupying exactly `len` bytes.
    ///
    /// The text ends at the first NUL inside the field, or at the end of the
    /// field if it has none. The cursor always moves by `len`.
    pub fn read_fixed_string(&mut self, len: usize) -> Result<Cow<'a, str>> {
        self.take(len).map(text::decode_until_nul)
    }

    /// Read a NUL-terminated string.
    ///
    /// The cursor moves past the terminator. Without a terminator the rest
    /// of the buffer is the string and the cursor stops at the end.
    pub fn read_string(&mut self) -> Cow<'a, str> {
        let rest = self.remaining();
        match text::find_nul(rest) {
            Some(end) => {
                self.pos += end + 1;
                String::from_utf8_lossy(&rest[..end])
            }
            None => {
                self.pos = self.buf.len();
                String::from_utf8_lossy(rest)
            }
        }
    }
}

impl BinaryReader<'_, BigEndian> {
    /// Read a `u16` stored low byte first, against the buffer's byte order.
    pub fn read_u16_reversed(&mut self) -> Result<u16> {
        let mut src = self.take(2)?;
        Ok(LittleEndian::get_u16(&mut src))
    }

    /// Read an `i16` stored low byte first, against the buffer's byte order.
    pub fn read_i16_reversed(&mut self) -> Result<i16> {
        let mut src = self.take(2)?;
        Ok(LittleEndian::get_i16(&mut src))
    }
}

impl<O: ByteOrder> fmt::Debug for BinaryReader<'_, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryReader")
            .field("order", &O::NAME)
            .field("pos", &self.pos)
            .field("len", &self.buf.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_big_endian_integers() {
        let wire = [0x12, 0x34, 0xFF, 0xFE, 0x01, 0x02, 0x03, 0x04, 0xFF, 0xFF, 0xFF, 0xFF];
        let mut reader = BigEndianReader::new(&wire);

        assert_eq!(reader.read_u16().unwrap(), 0x1234);
        assert_eq!(reader.read_i16().unwrap(), -2);
        assert_eq!(reader.read_u32().unwrap(), 0x0102_0304);
        assert_eq!(reader.read_i32().unwrap(), -1);
        assert!(reader.is_empty());
    }

    #[test]
    fn read_little_endian_integers() {
        let wire = [0x34, 0x12, 0xFE, 0xFF, 0x04, 0x03, 0x02, 0x01, 0x00, 0x00, 0x00, 0x80];
        let mut reader = LittleEndianReader::new(&wire);

        assert_eq!(reader.read_u16().unwrap(), 0x1234);
        assert_eq!(reader.read_i16().unwrap(), -2);
        assert_eq!(reader.read_u32().unwrap(), 0x0102_0304);
        assert_eq!(reader.read_i32().unwrap(), i32::MIN);
        assert_eq!(reader.bytes_read(), 12);
    }

    #[test]
    fn read_reversed_sixteen_bit_fields() {
        let wire = [0x34, 0x12, 0x00, 0x80];
        let mut reader = BigEndianReader::new(&wire);

        assert_eq!(reader.read_u16_reversed().unwrap(), 0x1234);
        assert_eq!(reader.read_i16_reversed().unwrap(), i16::MIN);
    }

    #[test]
    fn read_u8_sequence() {
        let mut reader = LittleEndianReader::new(&[7, 8]);
        assert_eq!(reader.read_u8().unwrap(), 7);
        assert_eq!(reader.read_u8().unwrap(), 8);
        assert!(reader.read_u8().is_err());
    }

    #[test]
    fn out_of_bounds_leaves_cursor_in_place() {
        let wire = [0x01, 0x02, 0x03];
        let mut reader = BigEndianReader::new(&wire);
        reader.read_u16().unwrap();

        let err = reader.read_u32().unwrap_err();
        assert_eq!(
            err,
            CodecError::OutOfBounds {
                offset: 2,
                needed: 4,
                remaining: 1
            }
        );
        assert_eq!(reader.bytes_read(), 2);
        assert_eq!(reader.read_u8().unwrap(), 0x03);
    }

    #[test]
    fn slices_borrow_from_buffer() {
        let wire = *b"headbody";
        let mut reader = BigEndianReader::new(&wire);

        let head = reader.read_slice(4).unwrap();
        assert_eq!(head, b"head");
        assert!(std::ptr::eq(head.as_ptr(), wire.as_ptr()));

        let body = reader.read_to_end();
        assert_eq!(body, b"body");
        assert!(reader.is_empty());
        assert!(reader.read_to_end().is_empty());
    }

    #[test]
    fn owned_copies() {
        let wire = [1, 2, 3, 4, 5, 6];
        let mut reader = LittleEndianReader::new(&wire);

        assert_eq!(reader.read_bytes(2).unwrap().as_ref(), &[1, 2]);
        assert_eq!(reader.read_array::<2>().unwrap(), [3, 4]);
        assert_eq!(reader.read_bytes_to_end().as_ref(), &[5, 6]);
        assert!(reader.read_bytes(1).is_err());
    }

    #[test]
    fn remaining_hands_off_tail() {
        let wire = [0xAA, 0x00, 0x01, 0x00, 0x02];
        let mut outer = BigEndianReader::new(&wire);
        outer.read_u8().unwrap();

        let mut nested = LittleEndianReader::new(outer.remaining());
        assert_eq!(nested.read_u16().unwrap(), 0x0100);
        assert_eq!(nested.read_u16().unwrap(), 0x0200);
        assert_eq!(outer.bytes_left(), 4);
        assert_eq!(outer.get_ref().len(), 5);
    }

    #[test]
    fn skip_advances() {
        let mut reader = BigEndianReader::new(&[0, 0, 0, 9]);
        reader.skip(3).unwrap();
        assert_eq!(reader.read_u8().unwrap(), 9);
        assert!(reader.skip(1).is_err());
        reader.skip(0).unwrap();
    }

    #[test]
    fn verify_bytes_reports_match() {
        let mut reader = BigEndianReader::new(b"ACN\0rest");
        assert!(reader.verify_bytes(b"ACN\0").unwrap());
        assert_eq!(reader.bytes_read(), 4);
    }

    #[test]
    fn verify_bytes_mismatch_still_advances() {
        let mut reader = LittleEndianReader::new(b"XYZWrest");
        assert!(!reader.verify_bytes(b"ABCD").unwrap());
        assert_eq!(reader.bytes_read(), 4);
        assert_eq!(reader.remaining(), b"rest");
    }

    #[test]
    fn verify_bytes_out_of_bounds_is_an_error() {
        let mut reader = BigEndianReader::new(b"AB");
        assert!(reader.verify_bytes(b"ABC").is_err());
        assert_eq!(reader.bytes_read(), 0);
    }

    #[test]
    fn read_guid_applies_wire_permutation() {
        let wire = [
            0x04, 0x03, 0x02, 0x01, 0x06, 0x05, 0x08, 0x07, 0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E,
            0x0F, 0x10,
        ];
        let expected = Guid::new(
            0x0102_0304,
            0x0506,
            0x0708,
            [0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E, 0x0F, 0x10],
        );

        assert_eq!(BigEndianReader::new(&wire).read_guid().unwrap(), expected);
        assert_eq!(LittleEndianReader::new(&wire).read_guid().unwrap(), expected);
    }

    #[test]
    fn read_guid_needs_sixteen_bytes() {
        let mut reader = BigEndianReader::new(&[0u8; 15]);
        assert!(matches!(
            reader.read_guid(),
            Err(CodecError::OutOfBounds { needed: 16, .. })
        ));
    }

    #[test]
    fn fixed_string_consumes_declared_length() {
        let wire = [b'a', b'b', 0, 0, 0, 0x42];
        let mut reader = BigEndianReader::new(&wire);

        assert_eq!(reader.read_fixed_string(5).unwrap(), "ab");
        assert_eq!(reader.bytes_read(), 5);
        assert_eq!(reader.read_u8().unwrap(), 0x42);
    }

    #[test]
    fn fixed_string_without_terminator_uses_whole_field() {
        let mut reader = LittleEndianReader::new(b"abcdef");
        assert_eq!(reader.read_fixed_string(4).unwrap(), "abcd");
        assert_eq!(reader.remaining(), b"ef");
    }

    #[test]
    fn fixed_string_ignores_bytes_after_terminator() {
        let mut reader = BigEndianReader::new(b"ab\0zz");
        assert_eq!(reader.read_fixed_string(5).unwrap(), "ab");
        assert!(reader.is_empty());
    }

    #[test]
    fn fixed_string_decodes_invalid_utf8_lossily() {
        let mut reader = BigEndianReader::new(&[b'o', 0xC3, b'k', 0]);
        assert_eq!(reader.read_fixed_string(4).unwrap(), "o\u{FFFD}k");
    }

    #[test]
    fn null_terminated_string_skips_terminator() {
        let wire = [104, 105, 0, 1, 2];
        let mut reader = BigEndianReader::new(&wire);

        assert_eq!(reader.read_string(), "hi");
        assert_eq!(reader.bytes_read(), 3);
        assert_eq!(reader.remaining(), &[1, 2]);
    }

    #[test]
    fn null_terminated_string_without_terminator_reads_to_end() {
        let wire = [0xFF, b'h', b'i'];
        let mut reader = LittleEndianReader::new(&wire);
        reader.read_u8().unwrap();

        assert_eq!(reader.read_string(), "hi");
        assert_eq!(reader.bytes_read(), wire.len());
        assert_eq!(reader.read_string(), "");
        assert_eq!(reader.bytes_read(), wire.len());
    }

    #[test]
    fn consecutive_null_terminated_strings() {
        let mut reader = BigEndianReader::new(b"one\0\0two\0");
        assert_eq!(reader.read_string(), "one");
        assert_eq!(reader.read_string(), "");
        assert_eq!(reader.read_string(), "two");
        assert!(reader.is_empty());
    }

    #[test]
    fn bytes_read_tracks_every_operation() {
        let wire = [0u8; 32];
        let mut reader = LittleEndianReader::new(&wire);

        reader.read_u8().unwrap();
        reader.read_u16().unwrap();
        reader.read_i32().unwrap();
        reader.read_guid().unwrap();
        reader.read_fixed_string(3).unwrap();
        reader.skip(2).unwrap();
        assert_eq!(reader.bytes_read(), 1 + 2 + 4 + 16 + 3 + 2);
        assert_eq!(reader.bytes_left(), 32 - 28);
    }

    #[test]
    fn debug_output_omits_buffer_contents() {
        let reader = BigEndianReader::new(&[1, 2, 3]);
        assert_eq!(
            format!("{reader:?}"),
            "BinaryReader { order: \"be\", pos: 0, len: 3 }"
        );
    }
}
