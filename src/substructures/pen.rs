use crate::err::RecordResult;
use crate::utils::RecordCursor;

/// Walk an EXTLOGPEN at the cursor: style, width, brush style, color, hatch, then a
/// counted list of 32-bit style entries.
pub(crate) fn process_extlogpen(c: &mut RecordCursor) -> RecordResult<()> {
    c.u32s(3, "pen style")?;
    c.skip(4, "pen color")?;
    c.u32("elpHatch")?;
    let entries = c.u32("elpNumEntries")?;
    c.u32_array(entries, 1, "pen style entries")
}
