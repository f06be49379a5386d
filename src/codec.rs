//! A single record: the common header checks, then the walk of its family.

use crate::byte_order::Endianness;
use crate::emf_parser::CodecSettings;
use crate::err::{RecordError, RecordResult};
use crate::families;
use crate::record_catalog::{self, CatalogEntry, RECORD_HEADER_SIZE, ShapeFamily};
use crate::utils::{RecordBytes, RecordCursor, bytes};

/// The `{type, size}` pair every record starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RecordHeader {
    pub tag: u32,
    pub size: u32,
}

impl RecordHeader {
    /// Read the header at `offset`, `None` if fewer than 8 bytes remain.
    pub(crate) fn read(buf: &[u8], offset: usize, order: Endianness) -> Option<RecordHeader> {
        Some(RecordHeader {
            tag: bytes::read_u32(buf, offset, order)?,
            size: bytes::read_u32(buf, offset.checked_add(4)?, order)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RecordOutcome {
    Handled,
    /// Only the common header was understood.
    Unhandled,
}

/// Check a declared size against the catalog and the `available` bytes from the record start.
pub(crate) fn check_size(header: RecordHeader, available: usize) -> RecordResult<&'static CatalogEntry> {
    let entry = record_catalog::lookup(header.tag);
    if header.size < entry.min_size {
        return Err(RecordError::UndersizedRecord {
            declared: header.size,
            minimum: entry.min_size,
        });
    }
    if header.size % 4 != 0 {
        return Err(RecordError::MisalignedSize { declared: header.size });
    }
    bytes::check_range(0, header.size as usize, 0, available, "record")?;
    Ok(entry)
}

/// Validate one record and, over exclusive bytes, swap it.
///
/// `bytes` starts at the record and may run past its end; only the declared size is touched.
pub(crate) fn process_record(
    bytes: RecordBytes<'_>,
    header: RecordHeader,
    order: Endianness,
    settings: &CodecSettings,
) -> RecordResult<RecordOutcome> {
    let entry = check_size(header, bytes.len())?;
    let unhandled = entry.family == ShapeFamily::Unimplemented;
    if unhandled && settings.strict_unhandled {
        return Err(RecordError::UnhandledType { record_type: header.tag });
    }

    let size = header.size as usize;
    let record = bytes.truncate(size).ok_or(RecordError::OffsetOutOfRange {
        what: "record",
        offset: 0,
        len: size as u64,
        start: 0,
        limit: 0,
    })?;
    let mut c = RecordCursor::new(record, order);
    c.u32s(RECORD_HEADER_SIZE / 4, "record header")?;
    c.end_fixed();
    families::process(entry.family, &mut c, settings)?;

    Ok(if unhandled {
        RecordOutcome::Unhandled
    } else {
        RecordOutcome::Handled
    })
}
