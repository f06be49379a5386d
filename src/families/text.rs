use crate::err::RecordResult;
use crate::substructures::RECTL;
use crate::substructures::text::{self, CharWidth, TextOptions};
use crate::utils::RecordCursor;

fn ext_text_out(c: &mut RecordCursor, width: CharWidth) -> RecordResult<()> {
    c.fields(RECTL, "bounds")?;
    c.u32("iGraphicsMode")?;
    c.u32s(2, "scale")?;
    text::process_emrtext(c, width)
}

pub(super) fn ext_text_out_a(c: &mut RecordCursor) -> RecordResult<()> {
    ext_text_out(c, CharWidth::Ansi)
}

pub(super) fn ext_text_out_w(c: &mut RecordCursor) -> RecordResult<()> {
    ext_text_out(c, CharWidth::Wide)
}

pub(super) fn small_text_out(c: &mut RecordCursor) -> RecordResult<()> {
    c.u32s(2, "reference point")?;
    let c_chars = c.u32("cChars")?;
    let options = TextOptions::from_bits_retain(c.u32("fuOptions")?);
    c.u32("iGraphicsMode")?;
    c.u32s(2, "scale")?;
    text::process_small_text(c, c_chars, options)
}
