//! Palette entries are four pre-ordered bytes (red, green, blue, flags) and are never swapped.

use crate::err::RecordResult;
use crate::utils::{RecordCursor, bytes};

pub(crate) const PALETTE_ENTRY_SIZE: u32 = 4;

/// Step over `count` inline palette entries at the cursor.
pub(crate) fn process_entries(c: &mut RecordCursor, count: u32) -> RecordResult<()> {
    c.byte_array(count, PALETTE_ENTRY_SIZE, "palette entries")
}

/// Walk a LOGPALETTE at the cursor: 16-bit version and entry count, then the entries.
pub(crate) fn process_logpalette(c: &mut RecordCursor) -> RecordResult<()> {
    c.u16("palVersion")?;
    let count = c.u16("palNumEntries")?;
    process_entries(c, u32::from(count))
}

/// Check `count` palette entries stored at `offset`, ending at or before `limit`.
pub(crate) fn check_entries_at(c: &RecordCursor, offset: usize, count: u32, limit: usize) -> RecordResult<()> {
    let len = bytes::extent(count, PALETTE_ENTRY_SIZE, "palette entries")?;
    bytes::check_range(offset, len, c.fixed_end(), limit, "palette entries")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::byte_order::Endianness;
    use crate::err::ErrorKind;
    use crate::utils::RecordBytes;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_logpalette_swaps_only_the_header() {
        let mut buf = vec![0x00, 0x03, 0x02, 0x00, 1, 2, 3, 0, 4, 5, 6, 0];
        let mut c = RecordCursor::new(RecordBytes::Exclusive(&mut buf), Endianness::Little);
        process_logpalette(&mut c).unwrap();
        assert_eq!(c.pos(), 12);
        assert_eq!(buf, vec![0x03, 0x00, 0x00, 0x02, 1, 2, 3, 0, 4, 5, 6, 0]);
    }

    #[test]
    fn test_entries_must_stop_at_limit() {
        let buf = vec![0u8; 24];
        let mut c = RecordCursor::new(RecordBytes::Shared(&buf), Endianness::Little);
        c.skip(8, "prefix").unwrap();
        c.end_fixed();

        assert!(check_entries_at(&c, 8, 3, 20).is_ok());
        assert_eq!(
            check_entries_at(&c, 8, 4, 20).unwrap_err().kind(),
            ErrorKind::OffsetOutOfRange
        );
        assert_eq!(
            check_entries_at(&c, 4, 1, 20).unwrap_err().kind(),
            ErrorKind::OffsetOutOfRange
        );
    }
}
