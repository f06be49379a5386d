//! Structures embedded in more than one record family.
//!
//! Each codec is a single walk over a [`RecordCursor`](crate::utils::RecordCursor): it checks
//! the structure against the record bounds and swaps its fields in the same pass. Offsets
//! found inside these structures are always relative to the start of the enclosing record.

pub(crate) mod dib;
pub(crate) mod gradient;
pub(crate) mod palette;
pub(crate) mod pen;
pub(crate) mod region;
pub(crate) mod text;

use crate::utils::Field;

pub(crate) const RECTL: &[Field] = &[Field::U32(4)];
pub(crate) const POINTL: &[Field] = &[Field::U32(2)];
pub(crate) const XFORM: &[Field] = &[Field::U32(6)];
pub(crate) const COLORREF: &[Field] = &[Field::Bytes(4)];

/// Size and version (16 bit), flags, twenty single-byte counts, three masks.
pub(crate) const PIXEL_FORMAT_DESCRIPTOR: &[Field] =
    &[Field::U16(2), Field::U32(1), Field::Bytes(20), Field::U32(3)];

/// Height, width, escapement, orientation and weight, eight single-byte attributes, then a
/// UTF-16 face name of 32 characters.
pub(crate) const LOGFONT: &[Field] = &[Field::U32(5), Field::Bytes(8), Field::Bytes(64)];

/// Signature, version, size, type and intent, nine CIE endpoint values, then three gamma
/// values stored as ordered bytes.
pub(crate) const LOG_COLOR_SPACE: &[Field] = &[Field::U32(5), Field::U32(9), Field::Bytes(12)];

/// Filename buffers in color space records hold `MAX_PATH` characters.
pub(crate) const MAX_PATH: usize = 260;

/// Twelve 16-bit adjustment values.
pub(crate) const COLOR_ADJUSTMENT: &[Field] = &[Field::U16(12)];
