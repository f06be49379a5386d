//! Bit-block transfers. Each record ends its fixed part with the fields locating one or two
//! DIBs, which are then checked and have their info headers swapped.

use crate::emf_parser::CodecSettings;
use crate::err::RecordResult;
use crate::substructures::dib::{self, DibRef};
use crate::substructures::{COLORREF, POINTL, RECTL, XFORM};
use crate::utils::RecordCursor;

/// Bounds, destination rectangle and raster operation.
fn destination(c: &mut RecordCursor) -> RecordResult<()> {
    c.fields(RECTL, "bounds")?;
    c.u32s(4, "destination")?;
    c.u32("dwRop")?;
    Ok(())
}

/// Source origin, source transform and background color.
fn source(c: &mut RecordCursor) -> RecordResult<()> {
    c.fields(POINTL, "source origin")?;
    c.fields(XFORM, "source transform")?;
    c.fields(COLORREF, "background color")
}

fn bit_blt_prefix(c: &mut RecordCursor) -> RecordResult<DibRef> {
    destination(c)?;
    source(c)?;
    DibRef::read_with_usage(c)
}

pub(super) fn bit_blt(c: &mut RecordCursor, settings: &CodecSettings) -> RecordResult<()> {
    let src = bit_blt_prefix(c)?;
    c.end_fixed();
    dib::process(c, &src, settings)
}

pub(super) fn stretch_blt(c: &mut RecordCursor, settings: &CodecSettings) -> RecordResult<()> {
    let src = bit_blt_prefix(c)?;
    c.u32s(2, "source extent")?;
    c.end_fixed();
    dib::process(c, &src, settings)
}

pub(super) fn mask_blt(c: &mut RecordCursor, settings: &CodecSettings) -> RecordResult<()> {
    let src = bit_blt_prefix(c)?;
    c.fields(POINTL, "mask origin")?;
    let mask = DibRef::read_with_usage(c)?;
    c.end_fixed();

    dib::check_disjoint(&src, &mask)?;
    dib::process(c, &src, settings)?;
    dib::process(c, &mask, settings)
}

pub(super) fn plg_blt(c: &mut RecordCursor, settings: &CodecSettings) -> RecordResult<()> {
    c.fields(RECTL, "bounds")?;
    c.u32s(6, "destination parallelogram")?;
    c.u32s(4, "source rectangle")?;
    c.fields(XFORM, "source transform")?;
    c.fields(COLORREF, "background color")?;
    let src = DibRef::read_with_usage(c)?;
    c.fields(POINTL, "mask origin")?;
    let mask = DibRef::read_with_usage(c)?;
    c.end_fixed();

    dib::check_disjoint(&src, &mask)?;
    dib::process(c, &src, settings)?;
    dib::process(c, &mask, settings)
}

/// The DIB locator of SetDIBitsToDevice and StretchDIBits, where `iUsage` follows the offsets.
fn trailing_usage_dib(c: &mut RecordCursor) -> RecordResult<DibRef> {
    let off_bmi = c.u32("offBmiSrc")?;
    let cb_bmi = c.u32("cbBmiSrc")?;
    let off_bits = c.u32("offBitsSrc")?;
    let cb_bits = c.u32("cbBitsSrc")?;
    let usage = c.u32("iUsageSrc")?;
    Ok(DibRef {
        usage,
        off_bmi,
        cb_bmi,
        off_bits,
        cb_bits,
    })
}

pub(super) fn set_dibits_to_device(c: &mut RecordCursor, settings: &CodecSettings) -> RecordResult<()> {
    c.fields(RECTL, "bounds")?;
    c.u32s(6, "destination, source and extent")?;
    let src = trailing_usage_dib(c)?;
    c.u32s(2, "scan lines")?;
    c.end_fixed();
    dib::process(c, &src, settings)
}

pub(super) fn stretch_dibits(c: &mut RecordCursor, settings: &CodecSettings) -> RecordResult<()> {
    c.fields(RECTL, "bounds")?;
    c.u32s(6, "destination, source and source extent")?;
    let src = trailing_usage_dib(c)?;
    c.u32("dwRop")?;
    c.u32s(2, "destination extent")?;
    c.end_fixed();
    dib::process(c, &src, settings)
}

/// AlphaBlend and TransparentBlt: the StretchBlt layout with a pre-ordered blend function or
/// transparent color in place of the raster operation.
pub(super) fn blend_blt(c: &mut RecordCursor, settings: &CodecSettings) -> RecordResult<()> {
    c.fields(RECTL, "bounds")?;
    c.u32s(4, "destination")?;
    c.skip(4, "blend function")?;
    source(c)?;
    let src = DibRef::read_with_usage(c)?;
    c.u32s(2, "source extent")?;
    c.end_fixed();
    dib::process(c, &src, settings)
}
