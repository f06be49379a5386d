use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EmfError>;
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;
pub(crate) type RecordResult<T> = std::result::Result<T, RecordError>;

/// A problem found inside a single record.
///
/// Offsets carried here are relative to the start of the record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("declared size {declared} is below the minimum of {minimum} bytes")]
    UndersizedRecord { declared: u32, minimum: u32 },

    #[error("declared size {declared} is not a multiple of 4")]
    MisalignedSize { declared: u32 },

    #[error("{what} at offset {offset} (len={len}) is out of range (allowed {start}..{limit})")]
    OffsetOutOfRange {
        what: &'static str,
        offset: u64,
        len: u64,
        start: u64,
        limit: u64,
    },

    #[error("{what} count {count} overflows when scaled by {elem_size} bytes")]
    CountOverflow {
        what: &'static str,
        count: u32,
        elem_size: u32,
    },

    #[error("inconsistent DIB in {what}: {reason}")]
    InconsistentDib {
        what: &'static str,
        reason: &'static str,
    },

    #[error("unsupported {what} value {value}")]
    UnsupportedMode { what: &'static str, value: u32 },

    #[error("record type {record_type} is not modeled")]
    UnhandledType { record_type: u32 },
}

/// A failure of a whole-stream pass, located in the stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("truncated record header at offset {offset}: {remaining} bytes remain, need 8")]
    TruncatedHeader { offset: usize, remaining: usize },

    #[error("record of type {record_type} at offset {offset}: {source}")]
    Record {
        offset: usize,
        record_type: u32,
        #[source]
        source: RecordError,
    },
}

/// Fieldless view of an error, for callers that only branch on the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    TruncatedHeader,
    UndersizedRecord,
    MisalignedSize,
    OffsetOutOfRange,
    CountOverflow,
    InconsistentDib,
    UnsupportedMode,
    UnhandledType,
}

impl RecordError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RecordError::UndersizedRecord { .. } => ErrorKind::UndersizedRecord,
            RecordError::MisalignedSize { .. } => ErrorKind::MisalignedSize,
            RecordError::OffsetOutOfRange { .. } => ErrorKind::OffsetOutOfRange,
            RecordError::CountOverflow { .. } => ErrorKind::CountOverflow,
            RecordError::InconsistentDib { .. } => ErrorKind::InconsistentDib,
            RecordError::UnsupportedMode { .. } => ErrorKind::UnsupportedMode,
            RecordError::UnhandledType { .. } => ErrorKind::UnhandledType,
        }
    }

    pub(crate) fn at(self, offset: usize, record_type: u32) -> ValidationError {
        ValidationError::Record {
            offset,
            record_type,
            source: self,
        }
    }
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::TruncatedHeader { .. } => ErrorKind::TruncatedHeader,
            ValidationError::Record { source, .. } => source.kind(),
        }
    }

    /// Stream offset of the failing record (or of the missing header).
    pub fn offset(&self) -> usize {
        match self {
            ValidationError::TruncatedHeader { offset, .. } => *offset,
            ValidationError::Record { offset, .. } => *offset,
        }
    }

    pub fn record_type(&self) -> Option<u32> {
        match self {
            ValidationError::TruncatedHeader { .. } => None,
            ValidationError::Record { record_type, .. } => Some(*record_type),
        }
    }
}

#[derive(Debug, Error)]
pub enum EmfError {
    #[error("Failed to open file {}: {source}", path.display())]
    FailedToOpenFile { source: io::Error, path: PathBuf },

    #[error("An I/O error has occurred: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
