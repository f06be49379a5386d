//! Bounds checks and order-aware reads over record bytes.
//!
//! There are two layers:
//! - **Option layer** ([`in_bounds`], `read_*`): plain containment checks and reads that return
//!   `Option<T>`, used where the caller maps failures itself (the stream walker).
//! - **Result layer** (`*_r`, [`check_range`], [`extent`]): wrappers that produce
//!   `RecordError`s labelled with a `what` string naming the field.
//!
//! Design notes:
//! - Offsets are `usize` and relative to the slice passed in, which is always a whole record
//!   (or the whole stream for header reads).
//! - Limits are exclusive: a block ending exactly at `limit` is in bounds.
//! - Byte extents derived from counts are computed in `u32`, the width of every size field
//!   in the format; anything larger cannot describe bytes inside a record.

use crate::byte_order::Endianness;
use crate::err::{RecordError, RecordResult};

/// `true` iff `[base, base + extra_len)` ends at or before `limit` without wrapping.
#[inline]
pub fn in_bounds(base: usize, extra_len: usize, limit: usize) -> bool {
    match base.checked_add(extra_len) {
        Some(end) => end <= limit,
        None => false,
    }
}

/// Read a `u16` stored in `order` at `offset`.
#[inline]
pub(crate) fn read_u16(buf: &[u8], offset: usize, order: Endianness) -> Option<u16> {
    let end = offset.checked_add(2)?;
    buf.get(offset..end).map(|b| order.u16_from(b))
}

/// Read a `u32` stored in `order` at `offset`.
#[inline]
pub(crate) fn read_u32(buf: &[u8], offset: usize, order: Endianness) -> Option<u32> {
    let end = offset.checked_add(4)?;
    buf.get(offset..end).map(|b| order.u32_from(b))
}

#[inline]
fn out_of_range(what: &'static str, offset: usize, len: usize, start: usize, limit: usize) -> RecordError {
    RecordError::OffsetOutOfRange {
        what,
        offset: offset as u64,
        len: len as u64,
        start: start as u64,
        limit: limit as u64,
    }
}

/// Check that `[offset, offset + len)` lies inside `[start, limit)`.
pub(crate) fn check_range(
    offset: usize,
    len: usize,
    start: usize,
    limit: usize,
    what: &'static str,
) -> RecordResult<()> {
    if offset < start || !in_bounds(offset, len, limit) {
        return Err(out_of_range(what, offset, len, start, limit));
    }
    Ok(())
}

/// Check that the swapped block `[offset, offset + len)` shares no byte with the block
/// `[other, other + other_len)`. Empty blocks never overlap.
pub(crate) fn check_disjoint(
    offset: usize,
    len: usize,
    other: usize,
    other_len: usize,
    what: &'static str,
) -> RecordResult<()> {
    if len == 0 || other_len == 0 {
        return Ok(());
    }
    let end = offset.saturating_add(len);
    let other_end = other.saturating_add(other_len);
    if offset < other_end && other < end {
        return Err(out_of_range(what, offset, len, other_end, u32::MAX as usize));
    }
    Ok(())
}

/// `count * elem_size` in bytes, or `CountOverflow`.
#[inline]
pub(crate) fn extent(count: u32, elem_size: u32, what: &'static str) -> RecordResult<usize> {
    count
        .checked_mul(elem_size)
        .map(|bytes| bytes as usize)
        .ok_or(RecordError::CountOverflow {
            what,
            count,
            elem_size,
        })
}

pub(crate) fn read_u16_r(
    buf: &[u8],
    offset: usize,
    order: Endianness,
    what: &'static str,
) -> RecordResult<u16> {
    read_u16(buf, offset, order).ok_or_else(|| out_of_range(what, offset, 2, 0, buf.len()))
}

pub(crate) fn read_u32_r(
    buf: &[u8],
    offset: usize,
    order: Endianness,
    what: &'static str,
) -> RecordResult<u32> {
    read_u32(buf, offset, order).ok_or_else(|| out_of_range(what, offset, 4, 0, buf.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::err::ErrorKind;

    #[test]
    fn test_in_bounds_is_exclusive_at_limit() {
        assert!(in_bounds(40, 8, 48));
        assert!(!in_bounds(40, 9, 48));
        assert!(in_bounds(48, 0, 48));
        assert!(!in_bounds(49, 0, 48));
    }

    #[test]
    fn test_in_bounds_rejects_wrapping() {
        assert!(!in_bounds(usize::MAX - 2, 4, usize::MAX));
        assert!(!in_bounds(8, usize::MAX, usize::MAX));
    }

    #[test]
    fn test_check_range_respects_start() {
        assert!(check_range(28, 4, 28, 32, "points").is_ok());
        let err = check_range(24, 4, 28, 32, "points").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OffsetOutOfRange);
    }

    #[test]
    fn test_check_disjoint() {
        assert!(check_disjoint(8, 4, 12, 4, "a").is_ok());
        assert!(check_disjoint(12, 4, 8, 4, "a").is_ok());
        assert!(check_disjoint(8, 0, 8, 4, "a").is_ok());
        assert_eq!(check_disjoint(10, 4, 8, 4, "a").unwrap_err().kind(), ErrorKind::OffsetOutOfRange);
        assert!(check_disjoint(8, 16, 12, 2, "a").is_err());
    }

    #[test]
    fn test_extent_overflow() {
        assert_eq!(extent(3, 8, "points").unwrap(), 24);
        assert_eq!(
            extent(0x2000_0000, 8, "points").unwrap_err(),
            RecordError::CountOverflow {
                what: "points",
                count: 0x2000_0000,
                elem_size: 8
            }
        );
    }

    #[test]
    fn test_reads_respect_order() {
        let buf = [0x01, 0x02, 0x03, 0x04];
        assert_eq!(read_u32(&buf, 0, Endianness::Little), Some(0x0403_0201));
        assert_eq!(read_u32(&buf, 0, Endianness::Big), Some(0x0102_0304));
        assert_eq!(read_u16(&buf, 2, Endianness::Little), Some(0x0403));
        assert_eq!(read_u32(&buf, 1, Endianness::Little), None);
        assert!(read_u32_r(&buf, usize::MAX, Endianness::Little, "field").is_err());
    }
}
