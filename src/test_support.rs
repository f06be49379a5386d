//! Helpers shared by the unit tests.

use std::sync::Once;

static LOGGER_INIT: Once = Once::new();

// Tests run concurrently, so the logger has to be installed exactly once.
pub fn ensure_env_logger_initialized() {
    use std::io::Write;

    LOGGER_INIT.call_once(|| {
        let mut builder = env_logger::Builder::from_default_env();
        builder
            .format(|buf, record| writeln!(buf, "[{}] - {}", record.level(), record.args()))
            .is_test(true)
            .init();
    });
}

/// Builds one little-endian record. The size field is filled in by [`RecordBuilder::build`].
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    tag: u32,
    body: Vec<u8>,
}

impl RecordBuilder {
    pub fn new(tag: u32) -> Self {
        RecordBuilder { tag, body: Vec::new() }
    }

    pub fn u32(mut self, value: u32) -> Self {
        self.body.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn i32(self, value: i32) -> Self {
        self.u32(value as u32)
    }

    pub fn u32s(self, values: &[u32]) -> Self {
        values.iter().fold(self, |b, v| b.u32(*v))
    }

    pub fn u16(mut self, value: u16) -> Self {
        self.body.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn bytes(mut self, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(bytes);
        self
    }

    pub fn zeros(mut self, len: usize) -> Self {
        self.body.resize(self.body.len() + len, 0);
        self
    }

    /// Size of the record built so far, header included.
    pub fn len(&self) -> usize {
        self.body.len() + 8
    }

    pub fn build(self) -> Vec<u8> {
        let size = self.len() as u32;
        self.build_with_size(size)
    }

    pub fn build_with_size(self, size: u32) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        out.extend_from_slice(&self.tag.to_le_bytes());
        out.extend_from_slice(&size.to_le_bytes());
        out.extend(self.body);
        out
    }
}

/// A stream header of the short 88-byte form.
pub fn header_record() -> Vec<u8> {
    RecordBuilder::new(1)
        .u32s(&[0, 0, 100, 100, 0, 0, 2540, 2540])
        .u32s(&[0x464D_4520, 0x0001_0000, 0, 0])
        .u16(1)
        .u16(0)
        .u32s(&[0, 0, 0])
        .u32s(&[1024, 768, 320, 240])
        .build()
}

pub fn eof_record() -> Vec<u8> {
    RecordBuilder::new(14).u32(0).u32(16).u32(20).build()
}

/// Header, the given records, then EOF.
pub fn stream(records: &[Vec<u8>]) -> Vec<u8> {
    let mut out = header_record();
    for record in records {
        out.extend_from_slice(record);
    }
    out.extend(eof_record());
    out
}
