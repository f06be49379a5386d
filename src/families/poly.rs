//! Point lists and gradient fills: a bounds rectangle followed by counted inline arrays.

use crate::err::RecordResult;
use crate::substructures::{RECTL, gradient};
use crate::utils::RecordCursor;

/// Width of one point coordinate.
#[derive(Debug, Clone, Copy)]
enum Coords {
    Wide,
    Short,
}

fn points(c: &mut RecordCursor, count: u32, coords: Coords) -> RecordResult<()> {
    match coords {
        Coords::Wide => c.u32_array(count, 2, "points"),
        Coords::Short => c.u16_array(count, 2, "points"),
    }
}

fn point_list(c: &mut RecordCursor, coords: Coords) -> RecordResult<()> {
    c.fields(RECTL, "bounds")?;
    let count = c.u32("point count")?;
    points(c, count, coords)
}

fn poly_poly(c: &mut RecordCursor, coords: Coords) -> RecordResult<()> {
    c.fields(RECTL, "bounds")?;
    let polys = c.u32("nPolys")?;
    let count = c.u32("point count")?;
    c.u32_array(polys, 1, "polygon point counts")?;
    points(c, count, coords)
}

fn poly_draw(c: &mut RecordCursor, coords: Coords) -> RecordResult<()> {
    c.fields(RECTL, "bounds")?;
    let count = c.u32("point count")?;
    points(c, count, coords)?;
    c.byte_array(count, 1, "point types")
}

pub(super) fn points32(c: &mut RecordCursor) -> RecordResult<()> {
    point_list(c, Coords::Wide)
}

pub(super) fn points16(c: &mut RecordCursor) -> RecordResult<()> {
    point_list(c, Coords::Short)
}

pub(super) fn poly_poly32(c: &mut RecordCursor) -> RecordResult<()> {
    poly_poly(c, Coords::Wide)
}

pub(super) fn poly_poly16(c: &mut RecordCursor) -> RecordResult<()> {
    poly_poly(c, Coords::Short)
}

pub(super) fn poly_draw32(c: &mut RecordCursor) -> RecordResult<()> {
    poly_draw(c, Coords::Wide)
}

pub(super) fn poly_draw16(c: &mut RecordCursor) -> RecordResult<()> {
    poly_draw(c, Coords::Short)
}

pub(super) fn gradient_fill(c: &mut RecordCursor) -> RecordResult<()> {
    c.fields(RECTL, "bounds")?;
    let n_vert = c.u32("nVer")?;
    let n_obj = c.u32("nTri")?;
    let mode = c.u32("ulMode")?;
    c.end_fixed();
    gradient::process(c, n_vert, n_obj, mode)
}
