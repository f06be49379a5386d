//! Region data blocks.
//!
//! A region sub-block holds one or more RGNDATA structures back to back: a 32-byte header
//! (`dwSize, iType, nCount, nRgnSize` and a bounds rectangle) followed by `nCount` rectangles.
//! Each block's size follows from its own count, so the blocks have to be walked in order.

use crate::err::RecordResult;
use crate::utils::{RecordCursor, bytes};

pub(crate) const RGNDATAHEADER_SIZE: usize = 32;
const RECT_SIZE: u32 = 16;

/// `iMode` of ExtSelectClipRgn that allows an empty region (reset the clip).
pub(crate) const RGN_COPY: u32 = 5;

/// Validate and swap the region sub-block of `cb_rgn_data` bytes at `offset`.
///
/// At least one block is required; walking stops once fewer than a header's worth of bytes
/// remain.
pub(crate) fn process(c: &mut RecordCursor, offset: usize, cb_rgn_data: u32) -> RecordResult<()> {
    let len = cb_rgn_data as usize;
    c.block(offset, len, "region data")?;
    let end = offset + len;

    let mut pos = offset;
    loop {
        bytes::check_range(pos, RGNDATAHEADER_SIZE, offset, end, "region header")?;
        let count = c.u32_at(pos + 8, "region rectangle count")?;
        let rects = bytes::extent(count, RECT_SIZE, "region rectangles")?;
        let rects_start = pos + RGNDATAHEADER_SIZE;
        bytes::check_range(rects_start, rects, offset, end, "region rectangles")?;

        c.u32s_at(pos, (RGNDATAHEADER_SIZE + rects) / 4, "region data")?;
        pos = rects_start + rects;

        if end - pos < RGNDATAHEADER_SIZE {
            return Ok(());
        }
    }
}
