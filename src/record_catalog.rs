//! The closed table of EMF record types.
//!
//! Every tag from 1 to 122 maps to a [`RecordType`], its minimum declared size and the
//! [`ShapeFamily`] whose layout it shares. The table is a `const` array indexed by `tag - 1`;
//! tags outside the range resolve to the unimplemented fallback.

use serde::Serialize;
use std::fmt;

/// Layout classes shared by record types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ShapeFamily {
    /// Nothing after the common header.
    HeaderOnly,
    /// One 32-bit mode, index or value.
    Mode,
    /// One color reference.
    Color,
    /// Two 32-bit values (a point, a size or an extent).
    Pair,
    /// One rectangle.
    Rect,
    /// A rectangle and two points.
    RectPoints,
    Points32,
    Points16,
    PolyPoly32,
    PolyPoly16,
    PolyDraw32,
    PolyDraw16,
    Header,
    Eof,
    SetPixel,
    ColorAdjustment,
    WorldTransform,
    ModifyWorldTransform,
    CreatePen,
    CreateBrushIndirect,
    AngleArc,
    RoundRect,
    CreatePalette,
    SetPaletteEntries,
    ExtFloodFill,
    Comment,
    FillRgn,
    FrameRgn,
    RegionPaint,
    ExtSelectClipRgn,
    BitBlt,
    StretchBlt,
    MaskBlt,
    PlgBlt,
    SetDiBitsToDevice,
    StretchDiBits,
    ExtCreateFont,
    ExtTextOutA,
    ExtTextOutW,
    DibBrush,
    ExtCreatePen,
    CreateColorSpace,
    CreateColorSpaceW,
    PixelFormat,
    SmallTextOut,
    /// AlphaBlend and TransparentBlt.
    BlendBlt,
    GradientFill,
    /// Types without a modeled layout: only the common header is known.
    Unimplemented,
}

/// EMF record types, numbered by their tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(u32)]
pub enum RecordType {
    Header = 1,
    PolyBezier = 2,
    Polygon = 3,
    Polyline = 4,
    PolyBezierTo = 5,
    PolylineTo = 6,
    PolyPolyline = 7,
    PolyPolygon = 8,
    SetWindowExtEx = 9,
    SetWindowOrgEx = 10,
    SetViewportExtEx = 11,
    SetViewportOrgEx = 12,
    SetBrushOrgEx = 13,
    Eof = 14,
    SetPixelV = 15,
    SetMapperFlags = 16,
    SetMapMode = 17,
    SetBkMode = 18,
    SetPolyFillMode = 19,
    SetRop2 = 20,
    SetStretchBltMode = 21,
    SetTextAlign = 22,
    SetColorAdjustment = 23,
    SetTextColor = 24,
    SetBkColor = 25,
    OffsetClipRgn = 26,
    MoveToEx = 27,
    SetMetaRgn = 28,
    ExcludeClipRect = 29,
    IntersectClipRect = 30,
    ScaleViewportExtEx = 31,
    ScaleWindowExtEx = 32,
    SaveDc = 33,
    RestoreDc = 34,
    SetWorldTransform = 35,
    ModifyWorldTransform = 36,
    SelectObject = 37,
    CreatePen = 38,
    CreateBrushIndirect = 39,
    DeleteObject = 40,
    AngleArc = 41,
    Ellipse = 42,
    Rectangle = 43,
    RoundRect = 44,
    Arc = 45,
    Chord = 46,
    Pie = 47,
    SelectPalette = 48,
    CreatePalette = 49,
    SetPaletteEntries = 50,
    ResizePalette = 51,
    RealizePalette = 52,
    ExtFloodFill = 53,
    LineTo = 54,
    ArcTo = 55,
    PolyDraw = 56,
    SetArcDirection = 57,
    SetMiterLimit = 58,
    BeginPath = 59,
    EndPath = 60,
    CloseFigure = 61,
    FillPath = 62,
    StrokeAndFillPath = 63,
    StrokePath = 64,
    FlattenPath = 65,
    WidenPath = 66,
    SelectClipPath = 67,
    AbortPath = 68,
    Undef69 = 69,
    Comment = 70,
    FillRgn = 71,
    FrameRgn = 72,
    InvertRgn = 73,
    PaintRgn = 74,
    ExtSelectClipRgn = 75,
    BitBlt = 76,
    StretchBlt = 77,
    MaskBlt = 78,
    PlgBlt = 79,
    SetDiBitsToDevice = 80,
    StretchDiBits = 81,
    ExtCreateFontIndirectW = 82,
    ExtTextOutA = 83,
    ExtTextOutW = 84,
    PolyBezier16 = 85,
    Polygon16 = 86,
    Polyline16 = 87,
    PolyBezierTo16 = 88,
    PolylineTo16 = 89,
    PolyPolyline16 = 90,
    PolyPolygon16 = 91,
    PolyDraw16 = 92,
    CreateMonoBrush = 93,
    CreateDibPatternBrushPt = 94,
    ExtCreatePen = 95,
    PolyTextOutA = 96,
    PolyTextOutW = 97,
    SetIcmMode = 98,
    CreateColorSpace = 99,
    SetColorSpace = 100,
    DeleteColorSpace = 101,
    GlsRecord = 102,
    GlsBoundedRecord = 103,
    PixelFormat = 104,
    DrawEscape = 105,
    ExtEscape = 106,
    Undef107 = 107,
    SmallTextOut = 108,
    ForceUfiMapping = 109,
    NamedEscape = 110,
    ColorCorrectPalette = 111,
    SetIcmProfileA = 112,
    SetIcmProfileW = 113,
    AlphaBlend = 114,
    SetLayout = 115,
    TransparentBlt = 116,
    Undef117 = 117,
    GradientFill = 118,
    SetLinkedUfis = 119,
    SetTextJustification = 120,
    ColorMatchToTargetW = 121,
    CreateColorSpaceW = 122,
}

/// Classification of one tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    /// `None` for tags outside the known range.
    pub record_type: Option<RecordType>,
    pub name: &'static str,
    pub min_size: u32,
    pub family: ShapeFamily,
}

/// Size of the common `{type, size}` header every record starts with.
pub const RECORD_HEADER_SIZE: usize = 8;

/// Tag of the record that ends a stream.
pub const TERMINAL_RECORD_TAG: u32 = RecordType::Eof as u32;

const fn entry(record_type: RecordType, name: &'static str, min_size: u32, family: ShapeFamily) -> CatalogEntry {
    CatalogEntry {
        record_type: Some(record_type),
        name,
        min_size,
        family,
    }
}

const UNKNOWN: CatalogEntry = CatalogEntry {
    record_type: None,
    name: "EMR_UNKNOWN",
    min_size: RECORD_HEADER_SIZE as u32,
    family: ShapeFamily::Unimplemented,
};

use RecordType as R;
use ShapeFamily as F;

static CATALOG: [CatalogEntry; 122] = [
    // The stream header accepts the short pre-extension layout of old producers.
    entry(R::Header, "EMR_HEADER", 88, F::Header),
    entry(R::PolyBezier, "EMR_POLYBEZIER", 28, F::Points32),
    entry(R::Polygon, "EMR_POLYGON", 28, F::Points32),
    entry(R::Polyline, "EMR_POLYLINE", 28, F::Points32),
    entry(R::PolyBezierTo, "EMR_POLYBEZIERTO", 28, F::Points32),
    entry(R::PolylineTo, "EMR_POLYLINETO", 28, F::Points32),
    entry(R::PolyPolyline, "EMR_POLYPOLYLINE", 32, F::PolyPoly32),
    entry(R::PolyPolygon, "EMR_POLYPOLYGON", 32, F::PolyPoly32),
    entry(R::SetWindowExtEx, "EMR_SETWINDOWEXTEX", 16, F::Pair),
    entry(R::SetWindowOrgEx, "EMR_SETWINDOWORGEX", 16, F::Pair),
    entry(R::SetViewportExtEx, "EMR_SETVIEWPORTEXTEX", 16, F::Pair),
    entry(R::SetViewportOrgEx, "EMR_SETVIEWPORTORGEX", 16, F::Pair),
    entry(R::SetBrushOrgEx, "EMR_SETBRUSHORGEX", 16, F::Pair),
    entry(R::Eof, "EMR_EOF", 20, F::Eof),
    entry(R::SetPixelV, "EMR_SETPIXELV", 20, F::SetPixel),
    entry(R::SetMapperFlags, "EMR_SETMAPPERFLAGS", 12, F::Mode),
    entry(R::SetMapMode, "EMR_SETMAPMODE", 12, F::Mode),
    entry(R::SetBkMode, "EMR_SETBKMODE", 12, F::Mode),
    entry(R::SetPolyFillMode, "EMR_SETPOLYFILLMODE", 12, F::Mode),
    entry(R::SetRop2, "EMR_SETROP2", 12, F::Mode),
    entry(R::SetStretchBltMode, "EMR_SETSTRETCHBLTMODE", 12, F::Mode),
    entry(R::SetTextAlign, "EMR_SETTEXTALIGN", 12, F::Mode),
    entry(R::SetColorAdjustment, "EMR_SETCOLORADJUSTMENT", 32, F::ColorAdjustment),
    entry(R::SetTextColor, "EMR_SETTEXTCOLOR", 12, F::Color),
    entry(R::SetBkColor, "EMR_SETBKCOLOR", 12, F::Color),
    entry(R::OffsetClipRgn, "EMR_OFFSETCLIPRGN", 16, F::Pair),
    entry(R::MoveToEx, "EMR_MOVETOEX", 16, F::Pair),
    entry(R::SetMetaRgn, "EMR_SETMETARGN", 8, F::HeaderOnly),
    entry(R::ExcludeClipRect, "EMR_EXCLUDECLIPRECT", 24, F::Rect),
    entry(R::IntersectClipRect, "EMR_INTERSECTCLIPRECT", 24, F::Rect),
    entry(R::ScaleViewportExtEx, "EMR_SCALEVIEWPORTEXTEX", 24, F::Rect),
    entry(R::ScaleWindowExtEx, "EMR_SCALEWINDOWEXTEX", 24, F::Rect),
    entry(R::SaveDc, "EMR_SAVEDC", 8, F::HeaderOnly),
    entry(R::RestoreDc, "EMR_RESTOREDC", 12, F::Mode),
    entry(R::SetWorldTransform, "EMR_SETWORLDTRANSFORM", 32, F::WorldTransform),
    entry(R::ModifyWorldTransform, "EMR_MODIFYWORLDTRANSFORM", 36, F::ModifyWorldTransform),
    entry(R::SelectObject, "EMR_SELECTOBJECT", 12, F::Mode),
    entry(R::CreatePen, "EMR_CREATEPEN", 28, F::CreatePen),
    entry(R::CreateBrushIndirect, "EMR_CREATEBRUSHINDIRECT", 24, F::CreateBrushIndirect),
    entry(R::DeleteObject, "EMR_DELETEOBJECT", 12, F::Mode),
    entry(R::AngleArc, "EMR_ANGLEARC", 28, F::AngleArc),
    entry(R::Ellipse, "EMR_ELLIPSE", 24, F::Rect),
    entry(R::Rectangle, "EMR_RECTANGLE", 24, F::Rect),
    entry(R::RoundRect, "EMR_ROUNDRECT", 32, F::RoundRect),
    entry(R::Arc, "EMR_ARC", 40, F::RectPoints),
    entry(R::Chord, "EMR_CHORD", 40, F::RectPoints),
    entry(R::Pie, "EMR_PIE", 40, F::RectPoints),
    entry(R::SelectPalette, "EMR_SELECTPALETTE", 12, F::Mode),
    entry(R::CreatePalette, "EMR_CREATEPALETTE", 16, F::CreatePalette),
    entry(R::SetPaletteEntries, "EMR_SETPALETTEENTRIES", 20, F::SetPaletteEntries),
    entry(R::ResizePalette, "EMR_RESIZEPALETTE", 16, F::Pair),
    entry(R::RealizePalette, "EMR_REALIZEPALETTE", 8, F::HeaderOnly),
    entry(R::ExtFloodFill, "EMR_EXTFLOODFILL", 24, F::ExtFloodFill),
    entry(R::LineTo, "EMR_LINETO", 16, F::Pair),
    entry(R::ArcTo, "EMR_ARCTO", 40, F::RectPoints),
    entry(R::PolyDraw, "EMR_POLYDRAW", 28, F::PolyDraw32),
    entry(R::SetArcDirection, "EMR_SETARCDIRECTION", 12, F::Mode),
    entry(R::SetMiterLimit, "EMR_SETMITERLIMIT", 12, F::Mode),
    entry(R::BeginPath, "EMR_BEGINPATH", 8, F::HeaderOnly),
    entry(R::EndPath, "EMR_ENDPATH", 8, F::HeaderOnly),
    entry(R::CloseFigure, "EMR_CLOSEFIGURE", 8, F::HeaderOnly),
    entry(R::FillPath, "EMR_FILLPATH", 24, F::Rect),
    entry(R::StrokeAndFillPath, "EMR_STROKEANDFILLPATH", 24, F::Rect),
    entry(R::StrokePath, "EMR_STROKEPATH", 24, F::Rect),
    entry(R::FlattenPath, "EMR_FLATTENPATH", 8, F::HeaderOnly),
    entry(R::WidenPath, "EMR_WIDENPATH", 8, F::HeaderOnly),
    entry(R::SelectClipPath, "EMR_SELECTCLIPPATH", 12, F::Mode),
    entry(R::AbortPath, "EMR_ABORTPATH", 8, F::HeaderOnly),
    entry(R::Undef69, "EMR_UNDEF69", 8, F::Unimplemented),
    entry(R::Comment, "EMR_COMMENT", 12, F::Comment),
    entry(R::FillRgn, "EMR_FILLRGN", 32, F::FillRgn),
    entry(R::FrameRgn, "EMR_FRAMERGN", 40, F::FrameRgn),
    entry(R::InvertRgn, "EMR_INVERTRGN", 28, F::RegionPaint),
    entry(R::PaintRgn, "EMR_PAINTRGN", 28, F::RegionPaint),
    entry(R::ExtSelectClipRgn, "EMR_EXTSELECTCLIPRGN", 16, F::ExtSelectClipRgn),
    entry(R::BitBlt, "EMR_BITBLT", 100, F::BitBlt),
    entry(R::StretchBlt, "EMR_STRETCHBLT", 108, F::StretchBlt),
    entry(R::MaskBlt, "EMR_MASKBLT", 128, F::MaskBlt),
    entry(R::PlgBlt, "EMR_PLGBLT", 140, F::PlgBlt),
    entry(R::SetDiBitsToDevice, "EMR_SETDIBITSTODEVICE", 76, F::SetDiBitsToDevice),
    entry(R::StretchDiBits, "EMR_STRETCHDIBITS", 80, F::StretchDiBits),
    entry(R::ExtCreateFontIndirectW, "EMR_EXTCREATEFONTINDIRECTW", 104, F::ExtCreateFont),
    entry(R::ExtTextOutA, "EMR_EXTTEXTOUTA", 60, F::ExtTextOutA),
    entry(R::ExtTextOutW, "EMR_EXTTEXTOUTW", 60, F::ExtTextOutW),
    entry(R::PolyBezier16, "EMR_POLYBEZIER16", 28, F::Points16),
    entry(R::Polygon16, "EMR_POLYGON16", 28, F::Points16),
    entry(R::Polyline16, "EMR_POLYLINE16", 28, F::Points16),
    entry(R::PolyBezierTo16, "EMR_POLYBEZIERTO16", 28, F::Points16),
    entry(R::PolylineTo16, "EMR_POLYLINETO16", 28, F::Points16),
    entry(R::PolyPolyline16, "EMR_POLYPOLYLINE16", 32, F::PolyPoly16),
    entry(R::PolyPolygon16, "EMR_POLYPOLYGON16", 32, F::PolyPoly16),
    entry(R::PolyDraw16, "EMR_POLYDRAW16", 28, F::PolyDraw16),
    entry(R::CreateMonoBrush, "EMR_CREATEMONOBRUSH", 32, F::DibBrush),
    entry(R::CreateDibPatternBrushPt, "EMR_CREATEDIBPATTERNBRUSHPT", 32, F::DibBrush),
    entry(R::ExtCreatePen, "EMR_EXTCREATEPEN", 52, F::ExtCreatePen),
    entry(R::PolyTextOutA, "EMR_POLYTEXTOUTA", 8, F::Unimplemented),
    entry(R::PolyTextOutW, "EMR_POLYTEXTOUTW", 8, F::Unimplemented),
    entry(R::SetIcmMode, "EMR_SETICMMODE", 12, F::Mode),
    entry(R::CreateColorSpace, "EMR_CREATECOLORSPACE", 340, F::CreateColorSpace),
    entry(R::SetColorSpace, "EMR_SETCOLORSPACE", 12, F::Mode),
    entry(R::DeleteColorSpace, "EMR_DELETECOLORSPACE", 12, F::Mode),
    entry(R::GlsRecord, "EMR_GLSRECORD", 8, F::Unimplemented),
    entry(R::GlsBoundedRecord, "EMR_GLSBOUNDEDRECORD", 8, F::Unimplemented),
    entry(R::PixelFormat, "EMR_PIXELFORMAT", 48, F::PixelFormat),
    entry(R::DrawEscape, "EMR_DRAWESCAPE", 8, F::Unimplemented),
    entry(R::ExtEscape, "EMR_EXTESCAPE", 8, F::Unimplemented),
    entry(R::Undef107, "EMR_UNDEF107", 8, F::Unimplemented),
    entry(R::SmallTextOut, "EMR_SMALLTEXTOUT", 36, F::SmallTextOut),
    entry(R::ForceUfiMapping, "EMR_FORCEUFIMAPPING", 8, F::Unimplemented),
    entry(R::NamedEscape, "EMR_NAMEDESCAPE", 8, F::Unimplemented),
    entry(R::ColorCorrectPalette, "EMR_COLORCORRECTPALETTE", 8, F::Unimplemented),
    entry(R::SetIcmProfileA, "EMR_SETICMPROFILEA", 8, F::Unimplemented),
    entry(R::SetIcmProfileW, "EMR_SETICMPROFILEW", 8, F::Unimplemented),
    entry(R::AlphaBlend, "EMR_ALPHABLEND", 108, F::BlendBlt),
    entry(R::SetLayout, "EMR_SETLAYOUT", 12, F::Mode),
    entry(R::TransparentBlt, "EMR_TRANSPARENTBLT", 108, F::BlendBlt),
    entry(R::Undef117, "EMR_UNDEF117", 8, F::Unimplemented),
    entry(R::GradientFill, "EMR_GRADIENTFILL", 36, F::GradientFill),
    entry(R::SetLinkedUfis, "EMR_SETLINKEDUFIS", 8, F::Unimplemented),
    entry(R::SetTextJustification, "EMR_SETTEXTJUSTIFICATION", 8, F::Unimplemented),
    entry(R::ColorMatchToTargetW, "EMR_COLORMATCHTOTARGETW", 8, F::Unimplemented),
    entry(R::CreateColorSpaceW, "EMR_CREATECOLORSPACEW", 608, F::CreateColorSpaceW),
];

/// Classify a record tag. Unknown tags get the header-only fallback.
#[inline]
pub fn lookup(tag: u32) -> &'static CatalogEntry {
    match tag.checked_sub(1) {
        Some(index) => CATALOG.get(index as usize).unwrap_or(&UNKNOWN),
        None => &UNKNOWN,
    }
}

impl RecordType {
    pub fn from_tag(tag: u32) -> Option<RecordType> {
        lookup(tag).record_type
    }

    pub fn tag(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        lookup(self.tag()).name
    }

    pub fn min_size(self) -> u32 {
        lookup(self.tag()).min_size
    }

    pub fn family(self) -> ShapeFamily {
        lookup(self.tag()).family
    }

    /// All record types in tag order.
    pub fn all() -> impl Iterator<Item = RecordType> {
        CATALOG.iter().filter_map(|e| e.record_type)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_catalog_is_indexed_by_tag() {
        for (index, entry) in CATALOG.iter().enumerate() {
            let record_type = entry.record_type.expect("every catalog slot is named");
            assert_eq!(record_type.tag() as usize, index + 1, "{}", entry.name);
        }
        assert_eq!(RecordType::all().count(), 122);
    }

    #[test]
    fn test_every_minimum_covers_the_header() {
        for entry in CATALOG.iter() {
            assert!(entry.min_size >= RECORD_HEADER_SIZE as u32, "{}", entry.name);
            assert_eq!(entry.min_size % 4, 0, "{}", entry.name);
        }
    }

    #[test]
    fn test_lookup_falls_back_for_unknown_tags() {
        assert_eq!(lookup(0), &UNKNOWN);
        assert_eq!(lookup(123), &UNKNOWN);
        assert_eq!(lookup(u32::MAX).family, ShapeFamily::Unimplemented);
        assert_eq!(RecordType::from_tag(54), Some(RecordType::LineTo));
        assert_eq!(RecordType::Eof.tag(), TERMINAL_RECORD_TAG);
    }

    #[test]
    fn test_family_assignment() {
        assert_eq!(RecordType::Polyline.family(), ShapeFamily::Points32);
        assert_eq!(RecordType::Polyline16.family(), ShapeFamily::Points16);
        assert_eq!(RecordType::TransparentBlt.family(), ShapeFamily::BlendBlt);
        assert_eq!(RecordType::PolyTextOutW.family(), ShapeFamily::Unimplemented);
        assert_eq!(RecordType::Header.min_size(), 88);
        assert_eq!(RecordType::StretchDiBits.to_string(), "EMR_STRETCHDIBITS");
    }
}
