//! Records made only of fixed fields.

use crate::err::RecordResult;
use crate::substructures::{COLOR_ADJUSTMENT, COLORREF, POINTL, RECTL, XFORM};
use crate::utils::RecordCursor;

pub(super) fn mode(c: &mut RecordCursor) -> RecordResult<()> {
    c.u32("mode")?;
    Ok(())
}

pub(super) fn color(c: &mut RecordCursor) -> RecordResult<()> {
    c.fields(COLORREF, "color")
}

pub(super) fn pair(c: &mut RecordCursor) -> RecordResult<()> {
    c.u32s(2, "pair")
}

pub(super) fn rect(c: &mut RecordCursor) -> RecordResult<()> {
    c.fields(RECTL, "rectangle")
}

/// Bounding box and the start and end radials of an arc.
pub(super) fn rect_points(c: &mut RecordCursor) -> RecordResult<()> {
    c.fields(RECTL, "rectangle")?;
    c.fields(POINTL, "start point")?;
    c.fields(POINTL, "end point")
}

pub(super) fn set_pixel(c: &mut RecordCursor) -> RecordResult<()> {
    c.fields(POINTL, "pixel")?;
    c.fields(COLORREF, "pixel color")
}

pub(super) fn color_adjustment(c: &mut RecordCursor) -> RecordResult<()> {
    c.fields(COLOR_ADJUSTMENT, "color adjustment")
}

pub(super) fn world_transform(c: &mut RecordCursor) -> RecordResult<()> {
    c.fields(XFORM, "transform")
}

pub(super) fn modify_world_transform(c: &mut RecordCursor) -> RecordResult<()> {
    c.fields(XFORM, "transform")?;
    c.u32("iMode")?;
    Ok(())
}

/// Center, radius and two angles.
pub(super) fn angle_arc(c: &mut RecordCursor) -> RecordResult<()> {
    c.fields(POINTL, "center")?;
    c.u32s(3, "radius and angles")
}

pub(super) fn round_rect(c: &mut RecordCursor) -> RecordResult<()> {
    c.fields(RECTL, "rectangle")?;
    c.u32s(2, "corner size")
}

pub(super) fn ext_flood_fill(c: &mut RecordCursor) -> RecordResult<()> {
    c.fields(POINTL, "start point")?;
    c.fields(COLORREF, "fill color")?;
    c.u32("iMode")?;
    Ok(())
}
