//! The records that frame a stream (header and terminal record) and comments.

use crate::err::RecordResult;
use crate::substructures::{PIXEL_FORMAT_DESCRIPTOR, RECTL, palette};
use crate::utils::{RecordCursor, bytes, layout_size};

/// Where the optional header extensions end.
const EXTENSION_1_END: u32 = 100;
const EXTENSION_2_END: u32 = 108;

const PIXEL_FORMAT_DESCRIPTOR_SIZE: usize = layout_size(PIXEL_FORMAT_DESCRIPTOR);

/// The stream header.
///
/// The base layout is 88 bytes. Two extensions were added later; whether a producer wrote
/// them can only be told from the description and pixel-format offsets, since both blocks
/// follow the fixed part.
pub(super) fn header(c: &mut RecordCursor) -> RecordResult<()> {
    let size = c.len() as u32;

    c.fields(RECTL, "rclBounds")?;
    c.fields(RECTL, "rclFrame")?;
    c.u32s(4, "signature, version, bytes and records")?;
    c.u16s(2, "handles")?;
    let n_desc = c.u32("nDescription")?;
    let off_desc = c.u32("offDescription")?;
    c.u32("nPalEntries")?;
    c.u32s(4, "device size")?;

    let has_extension_1 = (n_desc != 0 && off_desc >= EXTENSION_1_END) || (off_desc == 0 && size >= EXTENSION_1_END);
    let mut pixel_format = None;
    if has_extension_1 {
        let cb_pix = c.u32("cbPixelFormat")?;
        let off_pix = c.u32("offPixelFormat")?;
        c.u32("bOpenGL")?;
        pixel_format = Some((cb_pix, off_pix));

        let has_extension_2 = (n_desc != 0 && off_desc >= EXTENSION_2_END)
            || (cb_pix != 0 && off_pix >= EXTENSION_2_END)
            || (off_desc == 0 && cb_pix == 0 && size >= EXTENSION_2_END);
        if has_extension_2 {
            c.u32s(2, "szlMicrometers")?;
        }
    }
    c.end_fixed();

    let mut description = (0, 0);
    if n_desc != 0 {
        let len = bytes::extent(n_desc, 2, "description")?;
        c.block(off_desc as usize, len, "description")?;
        description = (off_desc as usize, len);
    }
    if let Some((cb_pix, off_pix)) = pixel_format
        && cb_pix != 0
    {
        let (off_pix, cb_pix) = (off_pix as usize, cb_pix as usize);
        c.block(off_pix, cb_pix, "pixel format")?;
        // The descriptor is swapped whole, so the block has to hold all of it.
        bytes::check_range(off_pix, PIXEL_FORMAT_DESCRIPTOR_SIZE, off_pix, off_pix + cb_pix, "pixel format")?;
        bytes::check_disjoint(off_pix, PIXEL_FORMAT_DESCRIPTOR_SIZE, description.0, description.1, "pixel format")?;
        c.fields_at(off_pix, PIXEL_FORMAT_DESCRIPTOR, "pixel format")?;
    }
    Ok(())
}

/// The terminal record: an optional palette, then the record size repeated in the last field.
pub(super) fn eof(c: &mut RecordCursor) -> RecordResult<()> {
    let count = c.u32("nPalEntries")?;
    let offset = c.u32("offPalEntries")?;
    c.end_fixed();

    let size_last = c.len().saturating_sub(4);
    if count != 0 {
        palette::check_entries_at(c, offset as usize, count, size_last)?;
    }
    c.seek(size_last.max(c.fixed_end()), "nSizeLast")?;
    c.u32("nSizeLast")?;
    Ok(())
}

/// Comments carry opaque payloads (including embedded EMF+ streams) that are never swapped.
pub(super) fn comment(c: &mut RecordCursor) -> RecordResult<()> {
    let cb_data = c.u32("cbData")?;
    c.byte_array(cb_data, 1, "comment data")
}
