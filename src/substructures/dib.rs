//! Device-independent bitmaps.
//!
//! A record refers to a DIB through four fields: the offset and size of the bitmap-info block
//! (a 40-byte header followed by an optional color table) and the offset and size of the pixel
//! data. Only the info header is swapped; color tables are RGBQUADs in format order and pixel
//! data is opaque.

use crate::emf_parser::CodecSettings;
use crate::err::{RecordError, RecordResult};
use crate::utils::{Field, RecordCursor, bytes, layout_size};

/// `iUsage` value meaning the color table holds literal RGB values.
pub(crate) const DIB_RGB_COLORS: u32 = 0;

const BI_RGB: u32 = 0;
const BI_RLE8: u32 = 1;
const BI_RLE4: u32 = 2;
const BI_BITFIELDS: u32 = 3;

const BITMAPINFOHEADER: &[Field] = &[Field::U32(3), Field::U16(2), Field::U32(6)];
const BITMAPINFOHEADER_SIZE: usize = layout_size(BITMAPINFOHEADER);

/// The four fields locating one DIB inside a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DibRef {
    pub usage: u32,
    pub off_bmi: u32,
    pub cb_bmi: u32,
    pub off_bits: u32,
    pub cb_bits: u32,
}

impl DibRef {
    /// Read (and swap) `offBmi, cbBmi, offBits, cbBits` at the cursor.
    pub(crate) fn read(c: &mut RecordCursor, usage: u32) -> RecordResult<DibRef> {
        Ok(DibRef {
            usage,
            off_bmi: c.u32("offBmi")?,
            cb_bmi: c.u32("cbBmi")?,
            off_bits: c.u32("offBits")?,
            cb_bits: c.u32("cbBits")?,
        })
    }

    /// Read (and swap) `iUsage` followed by the four locating fields.
    pub(crate) fn read_with_usage(c: &mut RecordCursor) -> RecordResult<DibRef> {
        let usage = c.u32("iUsage")?;
        DibRef::read(c, usage)
    }

    pub(crate) fn is_present(&self) -> bool {
        self.cb_bmi != 0
    }

    fn header_range(&self) -> (usize, usize) {
        let start = self.off_bmi as usize;
        (start, start + BITMAPINFOHEADER_SIZE)
    }
}

/// Fail if the info header swapped for either DIB of a record touches a block of the other
/// one: its bitmap info (header and color table) or its pixels.
pub(crate) fn check_disjoint(first: &DibRef, second: &DibRef) -> RecordResult<()> {
    if !first.is_present() || !second.is_present() {
        return Ok(());
    }
    for (dib, other) in [(first, second), (second, first)] {
        let (start, end) = dib.header_range();
        let len = end - start;
        bytes::check_disjoint(start, len, other.off_bmi as usize, other.cb_bmi as usize, "bitmap info")?;
        bytes::check_disjoint(start, len, other.off_bits as usize, other.cb_bits as usize, "bitmap info")?;
    }
    Ok(())
}

/// Number of RGBQUAD entries the color table is expected to hold.
///
/// `clrUsed` wins when set; otherwise palettized depths use their full palette, capped by the
/// pixel count so tiny bitmaps may carry short tables.
pub(crate) fn color_count(clr_used: u32, bit_count: u16, width: i32, height: i32) -> u32 {
    if clr_used != 0 {
        return clr_used;
    }
    let full: u64 = match bit_count {
        1 => 2,
        4 => 16,
        8 => 256,
        _ => 0,
    };
    let area = (i64::from(width) * i64::from(height)).unsigned_abs();
    full.min(area) as u32
}

/// Bytes of unpadded pixel rows the geometry requires, `None` if it cannot be represented.
fn required_pixel_bytes(width: i32, height: i32, bit_count: u16) -> Option<u64> {
    let width = u64::try_from(width).ok()?;
    let bit_count = u64::from(bit_count);
    let row = if bit_count < 8 {
        width.checked_mul(bit_count)?.checked_add(7)? / 8
    } else {
        width.checked_mul(bit_count / 8)?
    };
    row.checked_mul(u64::from(height.unsigned_abs()))
}

fn inconsistent(reason: &'static str) -> RecordError {
    RecordError::InconsistentDib {
        what: "bitmap info",
        reason,
    }
}

/// Validate one DIB and swap its info header.
pub(crate) fn process(c: &mut RecordCursor, dib: &DibRef, settings: &CodecSettings) -> RecordResult<()> {
    if !dib.is_present() {
        return Ok(());
    }

    let off_bmi = dib.off_bmi as usize;
    let cb_bmi = dib.cb_bmi as usize;
    c.block(off_bmi, cb_bmi, "bitmap info")?;
    if dib.cb_bits != 0 {
        c.block(dib.off_bits as usize, dib.cb_bits as usize, "bitmap bits")?;
    }
    if cb_bmi < BITMAPINFOHEADER_SIZE {
        return Err(inconsistent("bitmap info is smaller than its header"));
    }
    bytes::check_disjoint(
        off_bmi,
        BITMAPINFOHEADER_SIZE,
        dib.off_bits as usize,
        dib.cb_bits as usize,
        "bitmap info",
    )?;

    let width = c.u32_at(off_bmi + 4, "biWidth")? as i32;
    let height = c.u32_at(off_bmi + 8, "biHeight")? as i32;
    let bit_count = c.u16_at(off_bmi + 14, "biBitCount")?;
    let compression = c.u32_at(off_bmi + 16, "biCompression")?;
    let clr_used = c.u32_at(off_bmi + 32, "biClrUsed")?;

    // JPEG and PNG payloads carry their own geometry.
    let has_table_rules = matches!(compression, BI_RGB | BI_RLE8 | BI_RLE4 | BI_BITFIELDS);

    if dib.usage == DIB_RGB_COLORS && has_table_rules {
        let colors = color_count(clr_used, bit_count, width, height);
        if bit_count < 16 && colors == 0 {
            return Err(inconsistent("color table is required below 16 bits per pixel"));
        }
        if bit_count >= 16 && colors != 0 {
            return Err(inconsistent("color table is not allowed at 16 or more bits per pixel"));
        }

        let table = bytes::extent(colors, 4, "color table")?;
        if !bytes::in_bounds(BITMAPINFOHEADER_SIZE, table, cb_bmi) {
            return Err(inconsistent("color table does not fit in the bitmap info"));
        }

        if compression == BI_RGB && settings.check_dib_pixels {
            match required_pixel_bytes(width, height, bit_count) {
                Some(needed) if needed <= u64::from(dib.cb_bits) => {}
                _ => return Err(inconsistent("pixel data is smaller than the bitmap geometry")),
            }
        }
    }

    c.fields_at(off_bmi, BITMAPINFOHEADER, "bitmap info header")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::byte_order::Endianness;
    use crate::err::ErrorKind;
    use crate::utils::RecordBytes;
    use pretty_assertions::assert_eq;

    const PREFIX: usize = 16;

    /// A record-like buffer: a 16-byte fixed prefix, the info header, `entries` table slots and
    /// `pixel_bytes` of pixels.
    fn dib_record(bit_count: u16, width: i32, height: i32, entries: usize, pixel_bytes: usize) -> (Vec<u8>, DibRef) {
        let mut buf = vec![0u8; PREFIX];
        buf.extend_from_slice(&40u32.to_le_bytes());
        buf.extend_from_slice(&width.to_le_bytes());
        buf.extend_from_slice(&height.to_le_bytes());
        buf.extend_from_slice(&1u16.to_le_bytes());
        buf.extend_from_slice(&bit_count.to_le_bytes());
        buf.extend_from_slice(&[0u8; 24]);
        buf.extend(std::iter::repeat_n(0xEEu8, entries * 4));
        let off_bits = buf.len();
        buf.extend(std::iter::repeat_n(0x55u8, pixel_bytes));

        let dib = DibRef {
            usage: DIB_RGB_COLORS,
            off_bmi: PREFIX as u32,
            cb_bmi: (40 + entries * 4) as u32,
            off_bits: off_bits as u32,
            cb_bits: pixel_bytes as u32,
        };
        (buf, dib)
    }

    fn check(buf: &[u8], dib: &DibRef) -> RecordResult<()> {
        let mut c = RecordCursor::new(RecordBytes::Shared(buf), Endianness::Little);
        c.skip(PREFIX, "prefix")?;
        c.end_fixed();
        process(&mut c, dib, &CodecSettings::default())
    }

    #[test]
    fn test_palettized_dib_requires_color_table() {
        let (buf, dib) = dib_record(8, 16, 16, 0, 256);
        assert_eq!(check(&buf, &dib).unwrap_err().kind(), ErrorKind::InconsistentDib);

        let (buf, dib) = dib_record(8, 16, 16, 256, 256);
        assert!(check(&buf, &dib).is_ok());
    }

    #[test]
    fn test_truecolor_dib_without_table() {
        let (buf, dib) = dib_record(24, 4, -2, 0, 24);
        assert!(check(&buf, &dib).is_ok());

        let (buf, dib) = dib_record(24, 4, -2, 0, 23);
        assert_eq!(
            check(&buf, &dib).unwrap_err(),
            inconsistent("pixel data is smaller than the bitmap geometry")
        );
    }

    #[test]
    fn test_pixel_check_can_be_disabled() {
        let (buf, dib) = dib_record(24, 4, 2, 0, 8);
        let mut c = RecordCursor::new(RecordBytes::Shared(&buf), Endianness::Little);
        c.skip(PREFIX, "prefix").unwrap();
        c.end_fixed();
        let settings = CodecSettings::new().check_dib_pixels(false);
        assert!(process(&mut c, &dib, &settings).is_ok());
    }

    #[test]
    fn test_absent_dib_is_accepted() {
        let dib = DibRef {
            usage: DIB_RGB_COLORS,
            off_bmi: 9999,
            cb_bmi: 0,
            off_bits: 9999,
            cb_bits: 12,
        };
        assert!(check(&[0u8; PREFIX], &dib).is_ok());
    }

    #[test]
    fn test_pixels_may_not_overlap_the_header() {
        let (mut buf, mut dib) = dib_record(24, 1, 1, 0, 4);
        dib.off_bits = (PREFIX + 36) as u32;
        buf.extend_from_slice(&[0u8; 4]);
        assert_eq!(check(&buf, &dib).unwrap_err().kind(), ErrorKind::OffsetOutOfRange);
    }

    #[test]
    fn test_header_may_not_overlap_the_other_pixels() {
        let (_, src) = dib_record(24, 1, 1, 0, 4);
        let mask = DibRef {
            usage: DIB_RGB_COLORS,
            off_bmi: 200,
            cb_bmi: 40,
            off_bits: src.off_bmi + 8,
            cb_bits: 4,
        };
        assert_eq!(check_disjoint(&src, &mask).unwrap_err().kind(), ErrorKind::OffsetOutOfRange);
        assert_eq!(check_disjoint(&mask, &src).unwrap_err().kind(), ErrorKind::OffsetOutOfRange);

        let apart = DibRef { off_bits: 300, ..mask };
        assert!(check_disjoint(&src, &apart).is_ok());
    }

    #[test]
    fn test_color_count_rules() {
        assert_eq!(color_count(0, 1, 10, 10), 2);
        assert_eq!(color_count(0, 8, 4, -2), 8);
        assert_eq!(color_count(12, 8, 16, 16), 12);
        assert_eq!(color_count(0, 24, 16, 16), 0);
    }

    #[test]
    fn test_monochrome_row_rounding() {
        assert_eq!(required_pixel_bytes(9, 3, 1), Some(6));
        assert_eq!(required_pixel_bytes(-1, 3, 1), None);
    }

    #[test]
    fn test_header_is_swapped_table_is_not() {
        let (mut buf, dib) = dib_record(8, 2, 2, 4, 4);
        let original = buf.clone();
        let mut c = RecordCursor::new(RecordBytes::Exclusive(&mut buf), Endianness::Little);
        c.skip(PREFIX, "prefix").unwrap();
        c.end_fixed();
        process(&mut c, &dib, &CodecSettings::default()).unwrap();

        assert_eq!(&buf[PREFIX..PREFIX + 4], &[0, 0, 0, 40]);
        assert_eq!(&buf[PREFIX + 12..PREFIX + 16], &[0, 1, 0, 8]);
        assert_eq!(&buf[PREFIX + 40..], &original[PREFIX + 40..]);
    }
}
