//! The forward-only walk over a whole record stream.
//!
//! A walk starts in [`WalkState::Scanning`] at offset 0 and visits one record per step. It
//! moves to [`WalkState::Terminated`] after the terminal record, whatever follows it, and to
//! [`WalkState::Failed`] on the first error. The offset only ever grows by a record's
//! declared size, which has been checked against the bytes left.

use log::{debug, trace, warn};
use serde::Serialize;

use crate::byte_order::Endianness;
use crate::codec::{self, RecordHeader, RecordOutcome};
use crate::emf_parser::CodecSettings;
use crate::emf_record::RecordInfo;
use crate::err::{ValidationError, ValidationResult};
use crate::record_catalog::{self, TERMINAL_RECORD_TAG};
use crate::utils::RecordBytes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WalkState {
    Scanning,
    Terminated,
    Failed,
}

/// A non-fatal finding reported alongside a successful walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum Diagnostic {
    /// Only the common header of the record at `offset` was understood (and swapped).
    UnhandledType { offset: usize, record_type: u32 },
}

/// Summary of a successful walk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WalkReport {
    /// Records visited, the terminal record included.
    pub records: usize,
    /// Offset just past the terminal record.
    pub end_offset: usize,
    /// Bytes after the terminal record, which are never read.
    pub trailing_bytes: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl WalkReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

pub(crate) struct StreamWalker<'a> {
    bytes: RecordBytes<'a>,
    order: Endianness,
    settings: &'a CodecSettings,
    offset: usize,
    state: WalkState,
}

impl<'a> StreamWalker<'a> {
    pub(crate) fn new(bytes: RecordBytes<'a>, order: Endianness, settings: &'a CodecSettings) -> Self {
        StreamWalker {
            bytes,
            order,
            settings,
            offset: 0,
            state: WalkState::Scanning,
        }
    }

    pub(crate) fn state(&self) -> WalkState {
        self.state
    }

    fn step(&mut self) -> ValidationResult<RecordInfo> {
        let offset = self.offset;
        let remaining = self.bytes.len().saturating_sub(offset);
        let truncated = || ValidationError::TruncatedHeader { offset, remaining };

        let header = RecordHeader::read(self.bytes.as_slice(), offset, self.order).ok_or_else(truncated)?;
        let record = self.bytes.tail(offset).ok_or_else(truncated)?;
        let outcome = codec::process_record(record, header, self.order, self.settings)
            .map_err(|e| e.at(offset, header.tag))?;

        let entry = record_catalog::lookup(header.tag);
        trace!("{} ({}) at offset {}, {} bytes", entry.name, header.tag, offset, header.size);
        if outcome == RecordOutcome::Unhandled {
            warn!(
                "record type {} at offset {} is not modeled, only its header is converted",
                header.tag, offset
            );
        }

        self.offset = offset + header.size as usize;
        if header.tag == TERMINAL_RECORD_TAG {
            debug!("terminal record at offset {}, stream ends at {}", offset, self.offset);
            self.state = WalkState::Terminated;
        }

        Ok(RecordInfo {
            offset,
            tag: header.tag,
            record_type: entry.record_type,
            size: header.size,
            handled: outcome == RecordOutcome::Handled,
        })
    }

    /// Walk to the end and summarize.
    pub(crate) fn run(mut self) -> ValidationResult<WalkReport> {
        let total = self.bytes.len();
        debug!("walking {} bytes in {:?} byte order", total, self.order);

        let mut report = WalkReport::default();
        for visited in self.by_ref() {
            let info = visited?;
            report.records += 1;
            if !info.handled {
                report.diagnostics.push(Diagnostic::UnhandledType {
                    offset: info.offset,
                    record_type: info.tag,
                });
            }
        }

        report.end_offset = self.offset;
        report.trailing_bytes = total - self.offset;
        debug!(
            "walk finished after {} records, {} trailing bytes",
            report.records, report.trailing_bytes
        );
        Ok(report)
    }
}

impl Iterator for StreamWalker<'_> {
    type Item = ValidationResult<RecordInfo>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state != WalkState::Scanning {
            return None;
        }
        let visited = self.step();
        if visited.is_err() {
            self.state = WalkState::Failed;
        }
        Some(visited)
    }
}
