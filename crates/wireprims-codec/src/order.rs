//! Byte-order strategies.
//!
//! Readers and writers are generic over a [`ByteOrder`], chosen once at
//! construction. Both strategies are zero-sized; the choice costs nothing at
//! runtime.

use std::fmt;

use bytes::{Buf, BufMut};

/// Encodes and decodes multi-byte integers in one fixed byte order.
///
/// Callers must ensure `src`/`dst` hold enough bytes; the reader and writer
/// bounds-check before handing over a sub-slice.
pub trait ByteOrder: Copy + Default + fmt::Debug + Send + Sync + 'static {
    /// Short name used in logs and CLI output.
    const NAME: &'static str;

    fn get_u16<B: Buf>(src: &mut B) -> u16;

    fn get_i16<B: Buf>(src: &mut B) -> i16;

    fn get_u32<B: Buf>(src: &mut B) -> u32;

    fn get_i32<B: Buf>(src: &mut B) -> i32;

    fn put_u16<B: BufMut>(dst: &mut B, value: u16);

    fn put_i16<B: BufMut>(dst: &mut B, value: i16);

    fn put_u32<B: BufMut>(dst: &mut B, value: u32);

    fn put_i32<B: BufMut>(dst: &mut B, value: i32);
}

/// Network byte order: most-significant byte first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BigEndian;

/// Host byte order on the supported wire formats: least-significant byte first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LittleEndian;

impl ByteOrder for BigEndian {
    const NAME: &'static str = "be";

    #[inline]
    fn get_u16<B: Buf>(src: &mut B) -> u16 {
        src.get_u16()
    }

    #[inline]
    fn get_i16<B: Buf>(src: &mut B) -> i16 {
        src.get_i16()
    }

    #[inline]
    fn get_u32<B: Buf>(src: &mut B) -> u32 {
        src.get_u32()
    }

    #[inline]
    fn get_i32<B: Buf>(src: &mut B) -> i32 {
        src.get_i32()
    }

    #[inline]
    fn put_u16<B: BufMut>(dst: &mut B, value: u16) {
        dst.put_u16(value);
    }

    #[inline]
    fn put_i16<B: BufMut>(dst: &mut B, value: i16) {
        dst.put_i16(value);
    }

    #[inline]
    fn put_u32<B: BufMut>(dst: &mut B, value: u32) {
        dst.put_u32(value);
    }

    #[inline]
    fn put_i32<B: BufMut>(dst: &mut B, value: i32) {
        dst.put_i32(value);
    }
}

impl ByteOrder for LittleEndian {
    const NAME: &'static str = "le";

    #[inline]
    fn get_u16<B: Buf>(src: &mut B) -> u16 {
        src.get_u16_le()
    }

    #[inline]
    fn get_i16<B: Buf>(src: &mut B) -> i16 {
        src.get_i16_le()
    }

    #[inline]
    fn get_u32<B: Buf>(src: &mut B) -> u32 {
        src.get_u32_le()
    }

    #[inline]
    fn get_i32<B: Buf>(src: &mut B) -> i32 {
        src.get_i32_le()
    }

    #[inline]
    fn put_u16<B: BufMut>(dst: &mut B, value: u16) {
        dst.put_u16_le(value);
    }

    #[inline]
    fn put_i16<B: BufMut>(dst: &mut B, value: i16) {
        dst.put_i16_le(value);
    }

    #[inline]
    fn put_u32<B: BufMut>(dst: &mut B, value: u32) {
        dst.put_u32_le(value);
    }

    #[inline]
    fn put_i32<B: BufMut>(dst: &mut B, value: i32) {
        dst.put_i32_le(value);
    }
}
