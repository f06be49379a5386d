//! GradientFill vertex and object arrays.

use crate::err::{RecordError, RecordResult};
use crate::utils::{Field, RecordCursor, bytes, layout_size};

/// x and y (32 bit), then red, green, blue and alpha (16 bit).
const TRIVERTEX: &[Field] = &[Field::U32(2), Field::U16(4)];
const TRIVERTEX_SIZE: u32 = layout_size(TRIVERTEX) as u32;

pub(crate) const GRADIENT_FILL_RECT_H: u32 = 0;
pub(crate) const GRADIENT_FILL_RECT_V: u32 = 1;
pub(crate) const GRADIENT_FILL_TRIANGLE: u32 = 2;

/// Walk `n_vert` vertices and `n_obj` gradient objects laid out for `mode`.
pub(crate) fn process(c: &mut RecordCursor, n_vert: u32, n_obj: u32, mode: u32) -> RecordResult<()> {
    let vertices = bytes::extent(n_vert, TRIVERTEX_SIZE, "gradient vertices")?;
    bytes::check_range(c.pos(), vertices, c.pos(), c.len(), "gradient vertices")?;
    for _ in 0..n_vert {
        c.fields(TRIVERTEX, "gradient vertex")?;
    }

    if n_obj == 0 {
        return Ok(());
    }
    let indices_per_object = match mode {
        GRADIENT_FILL_TRIANGLE => 3,
        GRADIENT_FILL_RECT_H | GRADIENT_FILL_RECT_V => 2,
        value => {
            return Err(RecordError::UnsupportedMode {
                what: "gradient fill mode",
                value,
            });
        }
    };
    c.u32_array(n_obj, indices_per_object, "gradient objects")
}
