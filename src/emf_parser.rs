use log::debug;

#[cfg(feature = "multithreading")]
use rayon::prelude::*;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::byte_order::{Direction, Endianness};
use crate::emf_record::RecordInfo;
use crate::err::{EmfError, Result, ValidationResult};
use crate::utils::RecordBytes;
use crate::walker::{StreamWalker, WalkReport};

/// Knobs shared by every validation and transcoding entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecSettings {
    pub(crate) strict_unhandled: bool,
    pub(crate) check_dib_pixels: bool,
    pub(crate) num_threads: usize,
}

impl Default for CodecSettings {
    fn default() -> Self {
        CodecSettings {
            strict_unhandled: false,
            check_dib_pixels: true,
            num_threads: 0,
        }
    }
}

impl CodecSettings {
    pub fn new() -> Self {
        CodecSettings::default()
    }

    /// Fail on record types whose layout is not modeled, instead of reporting a diagnostic.
    pub fn strict_unhandled(mut self, strict: bool) -> Self {
        self.strict_unhandled = strict;
        self
    }

    /// Cross-check uncompressed DIB pixel data against the bitmap geometry.
    pub fn check_dib_pixels(mut self, check: bool) -> Self {
        self.check_dib_pixels = check;
        self
    }

    /// Worker threads used by [`validate_buffers`]. `0` lets rayon decide.
    pub fn num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = if cfg!(feature = "multithreading") { num_threads } else { 1 };
        self
    }

    pub fn is_strict_unhandled(&self) -> bool {
        self.strict_unhandled
    }

    pub fn should_check_dib_pixels(&self) -> bool {
        self.check_dib_pixels
    }

    pub fn get_num_threads(&self) -> usize {
        self.num_threads
    }
}

/// Walk `buffer` as a canonical (little-endian) stream without modifying it.
pub(crate) fn validate_stream(buffer: &[u8], settings: &CodecSettings) -> ValidationResult<WalkReport> {
    StreamWalker::new(RecordBytes::Shared(buffer), Endianness::Little, settings).run()
}

/// Validate the whole stream in the source order of `direction`, then swap it in place.
pub(crate) fn transcode_stream(
    buffer: &mut [u8],
    direction: Direction,
    settings: &CodecSettings,
) -> ValidationResult<WalkReport> {
    let order = direction.source_order();
    StreamWalker::new(RecordBytes::Shared(&*buffer), order, settings).run()?;
    debug!("stream is valid, converting {:?}", direction);
    StreamWalker::new(RecordBytes::Exclusive(buffer), order, settings).run()
}

/// An EMF stream held in memory.
#[derive(Debug)]
pub struct EmfParser {
    data: Vec<u8>,
    order: Endianness,
    settings: CodecSettings,
}

impl EmfParser {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut f = File::open(path).map_err(|source| EmfError::FailedToOpenFile {
            source,
            path: path.to_path_buf(),
        })?;
        Self::from_read(&mut f)
    }

    pub fn from_read(reader: &mut impl Read) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data).map_err(EmfError::Io)?;
        Ok(Self::from_buffer(data))
    }

    /// Wrap a canonical (little-endian) stream.
    pub fn from_buffer(data: Vec<u8>) -> Self {
        EmfParser {
            data,
            order: Endianness::Little,
            settings: CodecSettings::default(),
        }
    }

    /// Wrap a stream whose fields are currently stored in `order`.
    pub fn from_buffer_in(data: Vec<u8>, order: Endianness) -> Self {
        EmfParser {
            order,
            ..Self::from_buffer(data)
        }
    }

    pub fn with_configuration(mut self, settings: CodecSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &CodecSettings {
        &self.settings
    }

    /// Current byte order of the held stream.
    pub fn order(&self) -> Endianness {
        self.order
    }

    /// Visit the records in stream order. The iterator ends after the terminal record or
    /// after the first error.
    pub fn records(&self) -> impl Iterator<Item = ValidationResult<RecordInfo>> + '_ {
        StreamWalker::new(RecordBytes::Shared(&self.data), self.order, &self.settings)
    }

    pub fn validate(&self) -> ValidationResult<WalkReport> {
        StreamWalker::new(RecordBytes::Shared(&self.data), self.order, &self.settings).run()
    }

    /// Convert the held stream to the other byte order. On error nothing is modified.
    pub fn transcode(&mut self) -> ValidationResult<WalkReport> {
        let direction = match self.order {
            Endianness::Little => Direction::ToForeign,
            Endianness::Big => Direction::ToNative,
        };
        let report = transcode_stream(&mut self.data, direction, &self.settings)?;
        self.order = direction.reversed().source_order();
        Ok(report)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

/// Validate independent canonical streams, in parallel when `multithreading` is enabled.
///
/// Results are returned in input order.
pub fn validate_buffers<B>(buffers: &[B], settings: &CodecSettings) -> Vec<ValidationResult<WalkReport>>
where
    B: AsRef<[u8]> + Sync,
{
    #[cfg(feature = "multithreading")]
    {
        let run = || -> Vec<ValidationResult<WalkReport>> {
            buffers
                .par_iter()
                .map(|b| validate_stream(b.as_ref(), settings))
                .collect()
        };

        if settings.num_threads == 0 {
            return run();
        }
        match rayon::ThreadPoolBuilder::new().num_threads(settings.num_threads).build() {
            Ok(pool) => pool.install(run),
            Err(e) => {
                debug!("failed to build a thread pool ({}), using the global one", e);
                run()
            }
        }
    }

    #[cfg(not(feature = "multithreading"))]
    {
        buffers.iter().map(|b| validate_stream(b.as_ref(), settings)).collect()
    }
}
