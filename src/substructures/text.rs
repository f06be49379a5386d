//! Text runs: the EMRTEXT block of ExtTextOut and the inline run of SmallTextOut.

use bitflags::bitflags;

use crate::err::RecordResult;
use crate::utils::{RecordCursor, bytes};

bitflags! {
    /// ExtTextOut option flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TextOptions: u32 {
        const OPAQUE = 0x0000_0002;
        const CLIPPED = 0x0000_0004;
        const GLYPH_INDEX = 0x0000_0010;
        const RTL_READING = 0x0000_0080;
        /// No bounds rectangle follows the fixed fields.
        const NO_RECT = 0x0000_0100;
        /// SmallTextOut characters are single bytes.
        const SMALL_CHARS = 0x0000_0200;
        const NUMERICS_LOCAL = 0x0000_0400;
        const NUMERICS_LATIN = 0x0000_0800;
        const IGNORE_LANGUAGE = 0x0000_1000;
        /// The spacing array holds an x and a y advance per character.
        const PDY = 0x0000_2000;
        const REVERSE_INDEX_MAP = 0x0001_0000;
    }
}

/// Bytes per character of a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CharWidth {
    Ansi = 1,
    Wide = 2,
}

/// Walk an EMRTEXT block starting at the cursor.
///
/// The block is: reference point, `nChars`, `offString`, `fOptions`, an optional bounds
/// rectangle, then `offDx`. The string and the spacing array it points at are located
/// relative to the record.
pub(crate) fn process_emrtext(c: &mut RecordCursor, width: CharWidth) -> RecordResult<()> {
    c.u32s(2, "text reference point")?;
    let n_chars = c.u32("nChars")?;
    let off_string = c.u32("offString")?;
    let options = TextOptions::from_bits_retain(c.u32("fOptions")?);
    if !options.contains(TextOptions::NO_RECT) {
        c.u32s(4, "text bounds")?;
    }
    let off_dx = c.u32("offDx")?;
    c.end_fixed();

    if n_chars == 0 {
        return Ok(());
    }

    let string_len = bytes::extent(n_chars, width as u32, "text string")?;
    c.block(off_string as usize, string_len, "text string")?;

    let advances = if options.contains(TextOptions::PDY) { 2 } else { 1 };
    let dx_len = bytes::extent(n_chars, 4 * advances, "text spacing")?;
    bytes::check_disjoint(off_dx as usize, dx_len, off_string as usize, string_len, "text spacing")?;
    c.u32s_at(off_dx as usize, dx_len / 4, "text spacing")
}

/// Walk the tail of a SmallTextOut record: optional bounds, then `c_chars` characters.
pub(crate) fn process_small_text(c: &mut RecordCursor, c_chars: u32, options: TextOptions) -> RecordResult<()> {
    if !options.contains(TextOptions::NO_RECT) {
        c.u32s(4, "text bounds")?;
    }
    let width = if options.contains(TextOptions::SMALL_CHARS) {
        CharWidth::Ansi
    } else {
        CharWidth::Wide
    };
    c.byte_array(c_chars, width as u32, "text string")
}
