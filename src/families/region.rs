use crate::err::{RecordError, RecordResult};
use crate::substructures::RECTL;
use crate::substructures::region::{self, RGN_COPY};
use crate::utils::RecordCursor;

pub(super) fn fill_rgn(c: &mut RecordCursor) -> RecordResult<()> {
    c.fields(RECTL, "bounds")?;
    let cb_rgn_data = c.u32("cbRgnData")?;
    c.u32("ihBrush")?;
    c.end_fixed();
    region::process(c, c.pos(), cb_rgn_data)
}

pub(super) fn frame_rgn(c: &mut RecordCursor) -> RecordResult<()> {
    c.fields(RECTL, "bounds")?;
    let cb_rgn_data = c.u32("cbRgnData")?;
    c.u32("ihBrush")?;
    c.u32s(2, "stroke size")?;
    c.end_fixed();
    region::process(c, c.pos(), cb_rgn_data)
}

/// InvertRgn and PaintRgn.
pub(super) fn region_paint(c: &mut RecordCursor) -> RecordResult<()> {
    c.fields(RECTL, "bounds")?;
    let cb_rgn_data = c.u32("cbRgnData")?;
    c.end_fixed();
    region::process(c, c.pos(), cb_rgn_data)
}

/// An empty region is only meaningful with RGN_COPY, where it resets the clip.
pub(super) fn ext_select_clip_rgn(c: &mut RecordCursor) -> RecordResult<()> {
    let cb_rgn_data = c.u32("cbRgnData")?;
    let mode = c.u32("iMode")?;
    c.end_fixed();
    if cb_rgn_data == 0 {
        if mode == RGN_COPY {
            return Ok(());
        }
        return Err(RecordError::UnsupportedMode {
            what: "region select mode for an empty region",
            value: mode,
        });
    }
    region::process(c, c.pos(), cb_rgn_data)
}

#[cfg(test)]
mod tests {
    use crate::err::ErrorKind;
    use crate::families::test_walk::{swapped, validate};
    use crate::test_support::RecordBuilder;
    use pretty_assertions::assert_eq;

    fn region(builder: RecordBuilder, rects: &[[u32; 4]]) -> RecordBuilder {
        let count = rects.len() as u32;
        let builder = builder.u32s(&[32, 1, count, count * 16, 0, 0, 50, 50]);
        rects.iter().fold(builder, |b, r| b.u32s(r))
    }

    #[test]
    fn test_fill_region() {
        let record = region(
            RecordBuilder::new(71).u32s(&[0, 0, 50, 50]).u32(64).u32(3),
            &[[0, 0, 10, 10], [20, 20, 30, 30]],
        )
        .build();
        let out = swapped(&record);
        assert_eq!(&out[28..32], &[0, 0, 0, 3]);
        assert_eq!(&out[out.len() - 4..], &[0, 0, 0, 30]);
    }

    #[test]
    fn test_fill_region_shorter_than_declared() {
        let record = region(
            RecordBuilder::new(71).u32s(&[0, 0, 50, 50]).u32(80).u32(3),
            &[[0, 0, 10, 10], [20, 20, 30, 30]],
        )
        .build();
        assert_eq!(validate(&record).unwrap_err().kind(), ErrorKind::OffsetOutOfRange);
    }

    #[test]
    fn test_frame_region_with_two_blocks() {
        let builder = RecordBuilder::new(72).u32s(&[0, 0, 50, 50]).u32(112).u32(3).u32s(&[1, 1]);
        let builder = region(builder, &[[0, 0, 10, 10]]);
        let record = region(builder, &[[5, 5, 6, 6], [7, 7, 8, 8]]).build();
        assert_eq!(record.len(), 40 + 112);

        let out = swapped(&record);
        let second = 40 + 48;
        assert_eq!(&out[second + 8..second + 12], &[0, 0, 0, 2]);
        assert_eq!(&out[out.len() - 4..], &[0, 0, 0, 8]);
    }

    #[test]
    fn test_select_clip_empty_region() {
        let reset = RecordBuilder::new(75).u32(0).u32(5).build();
        assert!(validate(&reset).is_ok());

        let and = RecordBuilder::new(75).u32(0).u32(1).build();
        assert_eq!(validate(&and).unwrap_err().kind(), ErrorKind::UnsupportedMode);
    }

    #[test]
    fn test_paint_region_requires_data() {
        let record = RecordBuilder::new(74).u32s(&[0, 0, 50, 50]).u32(0).build();
        assert_eq!(validate(&record).unwrap_err().kind(), ErrorKind::OffsetOutOfRange);
    }
}
