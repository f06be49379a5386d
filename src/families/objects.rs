//! Object creation records: pens, brushes, palettes, fonts, color spaces and pixel formats.

use crate::emf_parser::CodecSettings;
use crate::err::{RecordError, RecordResult};
use crate::substructures::dib::{self, DIB_RGB_COLORS, DibRef};
use crate::substructures::{COLORREF, LOG_COLOR_SPACE, LOGFONT, MAX_PATH, PIXEL_FORMAT_DESCRIPTOR, palette, pen};
use crate::utils::RecordCursor;

/// Declared size of the ExtCreateFont form that carries a PANOSE description.
const LOGFONT_PANOSE_RECORD_SIZE: usize = 332;
/// Smallest ExtCreateFont form that carries a design vector.
const LOGFONT_DESIGN_VECTOR_RECORD_SIZE: usize = 368;
const MAX_DESIGN_AXES: u32 = 16;

pub(super) fn create_pen(c: &mut RecordCursor) -> RecordResult<()> {
    c.u32("ihPen")?;
    c.u32s(3, "pen style and width")?;
    c.fields(COLORREF, "pen color")
}

pub(super) fn create_brush_indirect(c: &mut RecordCursor) -> RecordResult<()> {
    c.u32("ihBrush")?;
    c.u32("lbStyle")?;
    c.fields(COLORREF, "brush color")?;
    c.u32("lbHatch")?;
    Ok(())
}

pub(super) fn create_palette(c: &mut RecordCursor) -> RecordResult<()> {
    c.u32("ihPal")?;
    palette::process_logpalette(c)
}

pub(super) fn set_palette_entries(c: &mut RecordCursor) -> RecordResult<()> {
    c.u32("ihPal")?;
    c.u32("iStart")?;
    let count = c.u32("cEntries")?;
    palette::process_entries(c, count)
}

/// ExtCreateFontIndirectW. The record size decides which of the three LOGFONT forms follows
/// the handle.
pub(super) fn ext_create_font(c: &mut RecordCursor) -> RecordResult<()> {
    c.u32("ihFont")?;
    c.fields(LOGFONT, "logfont")?;

    let size = c.len();
    if size == LOGFONT_PANOSE_RECORD_SIZE {
        c.skip(128 + 64, "full name and style")?;
        c.u32s(4, "version, style size, match and reserved")?;
        c.skip(4, "vendor id")?;
        c.u32("culture")?;
        c.skip(10 + 2, "panose")?;
    } else if size >= LOGFONT_DESIGN_VECTOR_RECORD_SIZE {
        c.skip(128 + 64 + 64, "full name, style and script")?;
        c.u32("dvReserved")?;
        let axes = c.u32("dvNumAxes")?;
        if axes > MAX_DESIGN_AXES {
            return Err(RecordError::UnsupportedMode {
                what: "design vector axis count",
                value: axes,
            });
        }
        c.u32_array(axes, 1, "design vector values")?;
    }
    Ok(())
}

pub(super) fn ext_create_pen(c: &mut RecordCursor, settings: &CodecSettings) -> RecordResult<()> {
    c.u32("ihPen")?;
    let brush = DibRef::read(c, DIB_RGB_COLORS)?;
    pen::process_extlogpen(c)?;
    c.end_fixed();
    dib::process(c, &brush, settings)
}

/// CreateDIBPatternBrushPt and CreateMonoBrush.
pub(super) fn dib_brush(c: &mut RecordCursor, settings: &CodecSettings) -> RecordResult<()> {
    c.u32("ihBrush")?;
    let brush = DibRef::read_with_usage(c)?;
    c.end_fixed();
    dib::process(c, &brush, settings)
}

pub(super) fn create_color_space(c: &mut RecordCursor) -> RecordResult<()> {
    c.u32("ihCS")?;
    c.fields(LOG_COLOR_SPACE, "log color space")?;
    c.skip(MAX_PATH, "color space filename")
}

pub(super) fn create_color_space_w(c: &mut RecordCursor) -> RecordResult<()> {
    c.u32("ihCS")?;
    c.fields(LOG_COLOR_SPACE, "log color space")?;
    c.skip(2 * MAX_PATH, "color space filename")?;
    c.u32("dwFlags")?;
    let cb_data = c.u32("cbData")?;
    c.byte_array(cb_data, 1, "color profile data")
}

pub(super) fn pixel_format(c: &mut RecordCursor) -> RecordResult<()> {
    c.fields(PIXEL_FORMAT_DESCRIPTOR, "pixel format")
}
