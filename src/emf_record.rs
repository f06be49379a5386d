use serde::Serialize;

use crate::record_catalog::{self, RecordType};

/// One record visited by a walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordInfo {
    /// Byte offset of the record in its stream.
    pub offset: usize,
    pub tag: u32,
    /// `None` for tags outside the catalog.
    pub record_type: Option<RecordType>,
    pub size: u32,
    /// `false` when only the common header of the record is understood.
    pub handled: bool,
}

impl RecordInfo {
    pub fn name(&self) -> &'static str {
        record_catalog::lookup(self.tag).name
    }

    pub fn is_terminal(&self) -> bool {
        self.tag == record_catalog::TERMINAL_RECORD_TAG
    }

    /// Byte range of the record in its stream.
    pub fn range(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.size as usize
    }
}
