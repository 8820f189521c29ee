//! 16-byte identifiers with a mixed-endian wire layout.
//!
//! The canonical form stores `data1`, `data2` and `data3` most-significant
//! byte first, followed by the 8-byte `data4` tail. On the wire the three
//! leading fields are byte-reversed and the tail is copied as-is:
//!
//! ```text
//! canonical: c0 c1 c2 c3 | c4 c5 | c6 c7 | c8 .. c15
//! wire:      c3 c2 c1 c0 | c5 c4 | c7 c6 | c8 .. c15
//! ```
//!
//! The permutation is its own inverse and does not depend on the byte order
//! of the reader or writer carrying the identifier.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

/// Size of a [`Guid`] on the wire and in canonical form.
pub const GUID_SIZE: usize = 16;

/// A 16-byte identifier.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Guid(Uuid);

impl Guid {
    /// Create a GUID from its fields.
    pub const fn new(data1: u32, data2: u16, data3: u16, data4: [u8; 8]) -> Self {
        Self(Uuid::from_fields(data1, data2, data3, &data4))
    }

    /// The all-zero GUID.
    pub const fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Build from canonical bytes (every field most-significant byte first).
    pub const fn from_bytes(bytes: [u8; GUID_SIZE]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    /// Canonical bytes (every field most-significant byte first).
    pub const fn to_bytes(&self) -> [u8; GUID_SIZE] {
        *self.0.as_bytes()
    }

    /// Decode from the mixed-endian wire layout.
    pub const fn from_wire_bytes(wire: [u8; GUID_SIZE]) -> Self {
        Self(Uuid::from_bytes_le(wire))
    }

    /// Encode into the mixed-endian wire layout.
    pub const fn to_wire_bytes(&self) -> [u8; GUID_SIZE] {
        self.0.to_bytes_le()
    }

    pub fn data1(&self) -> u32 {
        self.0.as_fields().0
    }

    pub fn data2(&self) -> u16 {
        self.0.as_fields().1
    }

    pub fn data3(&self) -> u16 {
        self.0.as_fields().2
    }

    pub fn data4(&self) -> [u8; 8] {
        *self.0.as_fields().3
    }

    /// All four fields as a tuple.
    pub fn fields(&self) -> (u32, u16, u16, [u8; 8]) {
        let (d1, d2, d3, d4) = self.0.as_fields();
        (d1, d2, d3, *d4)
    }

    /// Returns true if every byte is zero.
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

/// Convert between canonical and wire byte layouts.
///
/// Applying it twice yields the input.
pub const fn swap_wire_order(bytes: [u8; GUID_SIZE]) -> [u8; GUID_SIZE] {
    Uuid::from_bytes(bytes).to_bytes_le()
}

impl From<[u8; GUID_SIZE]> for Guid {
    fn from(bytes: [u8; GUID_SIZE]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Guid> for [u8; GUID_SIZE] {
    fn from(guid: Guid) -> Self {
        guid.to_bytes()
    }
}

impl From<Uuid> for Guid {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<Guid> for Uuid {
    fn from(guid: Guid) -> Self {
        guid.0
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl fmt::Debug for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Guid({self})")
    }
}

/// Accepts the hyphenated form, optionally braced, in either case. The
/// simple (undashed) and `urn:uuid:` forms are accepted as well.
impl FromStr for Guid {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
