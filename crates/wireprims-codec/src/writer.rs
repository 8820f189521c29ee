use std::fmt;
use std::marker::PhantomData;

use tracing::{debug, trace};

use crate::error::{CodecError, Result};
use crate::guid::Guid;
use crate::order::{BigEndian, ByteOrder, LittleEndian};
use crate::text;

/// Writer encoding network-order (big-endian) fields.
pub type BigEndianWriter<'a> = BinaryWriter<'a, BigEndian>;

/// Writer encoding little-endian fields.
pub type LittleEndianWriter<'a> = BinaryWriter<'a, LittleEndian>;

/// Encodes fields in sequence into a borrowed, fixed-size byte buffer.
///
/// The buffer is never grown. A write that does not fit fails with
/// [`CodecError::OutOfBounds`] before touching the buffer or the cursor.
pub struct BinaryWriter<'a, O> {
    buf: &'a mut [u8],
    pos: usize,
    _order: PhantomData<O>,
}

impl<'a, O: ByteOrder> BinaryWriter<'a, O> {
    /// Create a writer positioned at the start of `buf`.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            _order: PhantomData,
        }
    }

    /// Number of bytes written so far.
    pub fn bytes_written(&self) -> usize {
        self.pos
    }

    /// Room left before the end of the buffer.
    pub fn bytes_left(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// The bytes written so far.
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.pos]
    }

    /// The unwritten tail, for composing with a nested encoder.
    ///
    /// Bytes placed here are not counted until [`advance`](Self::advance)
    /// commits them.
    pub fn remaining_mut(&mut self) -> &mut [u8] {
        &mut self.buf[self.pos..]
    }

    /// Commit `len` bytes written directly into [`remaining_mut`](Self::remaining_mut).
    pub fn advance(&mut self, len: usize) -> Result<()> {
        self.claim(len).map(|_| ())
    }

    /// Consume the writer and return the whole underlying buffer.
    pub fn into_inner(self) -> &'a mut [u8] {
        self.buf
    }

    fn claim(&mut self, len: usize) -> Result<&mut [u8]> {
        let remaining = self.bytes_left();
        if len > remaining {
            trace!(
                order = O::NAME,
                offset = self.pos,
                needed = len,
                remaining,
                "write out of bounds"
            );
            return Err(CodecError::OutOfBounds {
                offset: self.pos,
                needed: len,
                remaining,
            });
        }

        let start = self.pos;
        self.pos += len;
        Ok(&mut self.buf[start..self.pos])
    }

    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.claim(1)?[0] = value;
        Ok(())
    }

    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        let mut dst = self.claim(2)?;
        O::put_u16(&mut dst, value);
        Ok(())
    }

    pub fn write_i16(&mut self, value: i16) -> Result<()> {
        let mut dst = self.claim(2)?;
        O::put_i16(&mut dst, value);
        Ok(())
    }

    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        let mut dst = self.claim(4)?;
        O::put_u32(&mut dst, value);
        Ok(())
    }

    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        let mut dst = self.claim(4)?;
        O::put_i32(&mut dst, value);
        Ok(())
    }

    /// Copy `bytes` into the buffer.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.claim(bytes.len())?.copy_from_slice(bytes);
        Ok(())
    }

    /// Clear the next `len` bytes.
    pub fn write_zeros(&mut self, len: usize) -> Result<()> {
        self.claim(len)?.fill(0);
        Ok(())
    }

    /// Write `value` as UTF-8 into a zero-padded field of exactly `len` bytes.
    ///
    /// Text longer than the field is cut at the last character boundary that
    /// fits. Use [`write_fixed_string_exact`](Self::write_fixed_string_exact)
    /// to reject it instead.
    pub fn write_fixed_string(&mut self, value: &str, len: usize) -> Result<()> {
        let kept = text::truncate_to_boundary(value, len);
        let field = self.claim(len)?;
        if kept.len() < value.len() {
            debug!(
                declared = len,
                encoded = value.len(),
                kept = kept.len(),
                "truncated fixed-length string"
            );
        }

        field.fill(0);
        field[..kept.len()].copy_from_slice(kept.as_bytes());
        Ok(())
    }

    /// Like [`write_fixed_string`](Self::write_fixed_string), but fails with
    /// [`CodecError::StringTooLong`] when the text does not fit.
    pub fn write_fixed_string_exact(&mut self, value: &str, len: usize) -> Result<()> {
        if value.len() > len {
            return Err(CodecError::StringTooLong {
                len: value.len(),
                max: len,
            });
        }
        self.write_fixed_string(value, len)
    }

    /// Write a [`Guid`] in the mixed-endian wire layout.
    pub fn write_guid(&mut self, value: Guid) -> Result<()> {
        self.write_bytes(&value.to_wire_bytes())
    }
}

impl BinaryWriter<'_, BigEndian> {
    /// Write a `u16` low byte first, against the buffer's byte order.
    pub fn write_u16_reversed(&mut self, value: u16) -> Result<()> {
        let mut dst = self.claim(2)?;
        LittleEndian::put_u16(&mut dst, value);
        Ok(())
    }

    /// Write an `i16` low byte first, against the buffer's byte order.
    pub fn write_i16_reversed(&mut self, value: i16) -> Result<()> {
        let mut dst = self.claim(2)?;
        LittleEndian::put_i16(&mut dst, value);
        Ok(())
    }
}

impl<O: ByteOrder> fmt::Debug for BinaryWriter<'_, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryWriter")
            .field("order", &O::NAME)
            .field("pos", &self.pos)
            .field("len", &self.buf.len())
            .finish()
    }
}
