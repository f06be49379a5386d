//! Validation and byte-order transcoding of Enhanced Metafile (EMF) record streams.
//!
//! An EMF stream is a flat sequence of type-tagged records, each starting with a
//! `{type, size}` header and ending with the terminal `EMR_EOF` record. This crate checks
//! that every declared size, count and record-relative offset stays inside its record and
//! the buffer, and converts every multi-byte field between the canonical little-endian
//! order and the reversed ("foreign") order, leaving colors, strings and opaque payloads
//! untouched. Nothing here depends on the byte order of the host.
//!
//! ```no_run
//! use emf_endian::{EmfParser, ErrorKind};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut parser = EmfParser::from_path("drawing.emf")?;
//!     for record in parser.records() {
//!         let record = record?;
//!         println!("{:08x} {} ({} bytes)", record.offset, record.name(), record.size);
//!     }
//!
//!     match parser.transcode() {
//!         Ok(report) => println!("converted {} records", report.records),
//!         Err(e) if e.kind() == ErrorKind::InconsistentDib => eprintln!("bad bitmap: {e}"),
//!         Err(e) => return Err(e.into()),
//!     }
//!     std::fs::write("drawing.be.emf", parser.into_inner())?;
//!     Ok(())
//! }
//! ```
#![deny(unused_must_use)]
#![forbid(unsafe_code)]

use log::{debug, warn};

pub use byte_order::{Direction, Endianness, swap2, swap4};
pub use emf_parser::{CodecSettings, EmfParser, validate_buffers};
pub use emf_record::RecordInfo;
pub use err::{EmfError, ErrorKind, RecordError, Result, ValidationError, ValidationResult};
pub use record_catalog::{CatalogEntry, RECORD_HEADER_SIZE, RecordType, ShapeFamily, TERMINAL_RECORD_TAG, lookup};
pub use utils::bytes::in_bounds;
pub use walker::{Diagnostic, WalkReport};

pub mod byte_order;
mod codec;
pub mod emf_parser;
mod emf_record;
pub mod err;
mod families;
pub mod record_catalog;
mod substructures;
pub mod utils;
mod walker;

#[cfg(test)]
mod test_support;

use codec::{RecordHeader, RecordOutcome};
use utils::RecordBytes;

/// Check a canonical (little-endian) stream without modifying it.
pub fn validate(buffer: &[u8]) -> ValidationResult<WalkReport> {
    validate_with_settings(buffer, &CodecSettings::default())
}

pub fn validate_with_settings(buffer: &[u8], settings: &CodecSettings) -> ValidationResult<WalkReport> {
    emf_parser::validate_stream(buffer, settings)
}

/// Convert a stream in place, to the foreign order when `to_foreign` is set and back to the
/// canonical order otherwise.
///
/// The whole stream is validated before the first byte is swapped, so on error the buffer is
/// unchanged.
pub fn transcode(buffer: &mut [u8], to_foreign: bool) -> ValidationResult<WalkReport> {
    transcode_with_settings(buffer, Direction::from_to_foreign(to_foreign), &CodecSettings::default())
}

pub fn transcode_with_settings(
    buffer: &mut [u8],
    direction: Direction,
    settings: &CodecSettings,
) -> ValidationResult<WalkReport> {
    emf_parser::transcode_stream(buffer, direction, settings)
}

/// Check a single canonical record. `record` may extend past the record's declared end.
pub fn validate_one(record: &[u8]) -> bool {
    let Some(header) = RecordHeader::read(record, 0, Endianness::Little) else {
        return false;
    };
    codec::process_record(
        RecordBytes::Shared(record),
        header,
        Endianness::Little,
        &CodecSettings::default(),
    )
    .is_ok()
}

/// Check and convert a single record in place.
///
/// `stream_offset` is the record's position in its stream; it only appears in log messages.
pub fn transcode_one(record: &mut [u8], stream_offset: usize, to_foreign: bool) -> bool {
    let settings = CodecSettings::default();
    let order = Direction::from_to_foreign(to_foreign).source_order();
    let Some(header) = RecordHeader::read(record, 0, order) else {
        debug!("truncated record header at offset {}", stream_offset);
        return false;
    };

    match codec::process_record(RecordBytes::Shared(&*record), header, order, &settings) {
        Ok(RecordOutcome::Handled) => {}
        Ok(RecordOutcome::Unhandled) => warn!(
            "record type {} at offset {} is not modeled, only its header is converted",
            header.tag, stream_offset
        ),
        Err(e) => {
            debug!("{}", e.at(stream_offset, header.tag));
            return false;
        }
    }
    codec::process_record(RecordBytes::Exclusive(record), header, order, &settings).is_ok()
}
