//! Byte-order primitives.
//!
//! EMF stores every multi-byte field little-endian. A stream in the *foreign* order has every
//! swappable field reversed, while color bytes, strings and opaque payloads keep their
//! format order either way.
//!
//! The swap primitives only exchange byte positions, so applying one twice is the identity and
//! they are correct regardless of the host's own endianness. The direction of a pass only
//! decides which order the *source* bytes are in, and therefore how field values must be read
//! before they are swapped.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// Order in which the fields of a buffer are currently stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endianness {
    /// The canonical EMF order.
    Little,
    /// Every swappable field reversed.
    Big,
}

impl Endianness {
    #[inline]
    pub(crate) fn u16_from(self, bytes: &[u8]) -> u16 {
        match self {
            Endianness::Little => LittleEndian::read_u16(bytes),
            Endianness::Big => BigEndian::read_u16(bytes),
        }
    }

    #[inline]
    pub(crate) fn u32_from(self, bytes: &[u8]) -> u32 {
        match self {
            Endianness::Little => LittleEndian::read_u32(bytes),
            Endianness::Big => BigEndian::read_u32(bytes),
        }
    }
}

/// Direction of a transcoding pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Canonical little-endian input, reversed output.
    ToForeign,
    /// Reversed input, canonical little-endian output.
    ToNative,
}

impl Direction {
    pub fn from_to_foreign(to_foreign: bool) -> Self {
        if to_foreign {
            Direction::ToForeign
        } else {
            Direction::ToNative
        }
    }

    /// Order of the bytes before the pass runs; all field values are read in this order.
    pub fn source_order(self) -> Endianness {
        match self {
            Direction::ToForeign => Endianness::Little,
            Direction::ToNative => Endianness::Big,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::ToForeign => Direction::ToNative,
            Direction::ToNative => Direction::ToForeign,
        }
    }
}

/// Swap the two bytes of each of the first `count` 2-byte groups of `region`.
///
/// The caller bounds-checks `region` first; groups past its end are not touched.
#[inline]
pub fn swap2(region: &mut [u8], count: usize) {
    debug_assert!(region.len() >= count.saturating_mul(2));
    for pair in region.chunks_exact_mut(2).take(count) {
        pair.swap(0, 1);
    }
}

/// Reverse the four bytes of each of the first `count` 4-byte groups of `region`.
///
/// The caller bounds-checks `region` first; groups past its end are not touched.
#[inline]
pub fn swap4(region: &mut [u8], count: usize) {
    debug_assert!(region.len() >= count.saturating_mul(4));
    for quad in region.chunks_exact_mut(4).take(count) {
        quad.reverse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_swap4_reverses_each_group() {
        let mut bytes = [1, 2, 3, 4, 5, 6, 7, 8, 9];
        swap4(&mut bytes, 2);
        assert_eq!(bytes, [4, 3, 2, 1, 8, 7, 6, 5, 9]);
    }

    #[test]
    fn test_swap2_only_touches_requested_groups() {
        let mut bytes = [1, 2, 3, 4, 5, 6];
        swap2(&mut bytes, 2);
        assert_eq!(bytes, [2, 1, 4, 3, 5, 6]);
    }

    #[test]
    fn test_swap_is_an_involution() {
        let original: Vec<u8> = (0..64).collect();
        let mut bytes = original.clone();
        swap4(&mut bytes, 16);
        assert_ne!(bytes, original);
        swap4(&mut bytes, 16);
        assert_eq!(bytes, original);
    }

    #[test]
    fn test_source_order_follows_direction() {
        let field = 0x0102_0304_u32.to_le_bytes();
        assert_eq!(Direction::ToForeign.source_order().u32_from(&field), 0x0102_0304);

        let mut reversed = field;
        swap4(&mut reversed, 1);
        assert_eq!(Direction::ToNative.source_order().u32_from(&reversed), 0x0102_0304);
        assert_eq!(Direction::from_to_foreign(false), Direction::ToForeign.reversed());
    }
}
