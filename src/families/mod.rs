//! Per-family record walks.
//!
//! Every walk starts with the cursor just past the common 8-byte header and visits the
//! record's fields in order: fixed fields first, then [`RecordCursor::end_fixed`], then the
//! offset-addressed blocks. Inline tails (points, counts, entries) are walked straight after
//! the field that counts them.

mod bitmap;
mod objects;
mod poly;
mod region;
mod simple;
mod stream;
mod text;

use crate::emf_parser::CodecSettings;
use crate::err::RecordResult;
use crate::record_catalog::ShapeFamily;
use crate::utils::RecordCursor;

pub(crate) fn process(family: ShapeFamily, c: &mut RecordCursor, settings: &CodecSettings) -> RecordResult<()> {
    use ShapeFamily as F;

    match family {
        F::HeaderOnly | F::Unimplemented => Ok(()),
        F::Mode => simple::mode(c),
        F::Color => simple::color(c),
        F::Pair => simple::pair(c),
        F::Rect => simple::rect(c),
        F::RectPoints => simple::rect_points(c),
        F::SetPixel => simple::set_pixel(c),
        F::ColorAdjustment => simple::color_adjustment(c),
        F::WorldTransform => simple::world_transform(c),
        F::ModifyWorldTransform => simple::modify_world_transform(c),
        F::AngleArc => simple::angle_arc(c),
        F::RoundRect => simple::round_rect(c),
        F::ExtFloodFill => simple::ext_flood_fill(c),

        F::Points32 => poly::points32(c),
        F::Points16 => poly::points16(c),
        F::PolyPoly32 => poly::poly_poly32(c),
        F::PolyPoly16 => poly::poly_poly16(c),
        F::PolyDraw32 => poly::poly_draw32(c),
        F::PolyDraw16 => poly::poly_draw16(c),
        F::GradientFill => poly::gradient_fill(c),

        F::Header => stream::header(c),
        F::Eof => stream::eof(c),
        F::Comment => stream::comment(c),

        F::CreatePen => objects::create_pen(c),
        F::CreateBrushIndirect => objects::create_brush_indirect(c),
        F::CreatePalette => objects::create_palette(c),
        F::SetPaletteEntries => objects::set_palette_entries(c),
        F::ExtCreateFont => objects::ext_create_font(c),
        F::ExtCreatePen => objects::ext_create_pen(c, settings),
        F::DibBrush => objects::dib_brush(c, settings),
        F::CreateColorSpace => objects::create_color_space(c),
        F::CreateColorSpaceW => objects::create_color_space_w(c),
        F::PixelFormat => objects::pixel_format(c),

        F::FillRgn => region::fill_rgn(c),
        F::FrameRgn => region::frame_rgn(c),
        F::RegionPaint => region::region_paint(c),
        F::ExtSelectClipRgn => region::ext_select_clip_rgn(c),

        F::BitBlt => bitmap::bit_blt(c, settings),
        F::StretchBlt => bitmap::stretch_blt(c, settings),
        F::MaskBlt => bitmap::mask_blt(c, settings),
        F::PlgBlt => bitmap::plg_blt(c, settings),
        F::SetDiBitsToDevice => bitmap::set_dibits_to_device(c, settings),
        F::StretchDiBits => bitmap::stretch_dibits(c, settings),
        F::BlendBlt => bitmap::blend_blt(c, settings),

        F::ExtTextOutA => text::ext_text_out_a(c),
        F::ExtTextOutW => text::ext_text_out_w(c),
        F::SmallTextOut => text::small_text_out(c),
    }
}
