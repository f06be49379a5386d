#![allow(dead_code)]
use std::path::{Path, PathBuf};

use std::sync::Once;

static LOGGER_INIT: Once = Once::new();

// Rust runs the tests concurrently, so unless we synchronize logging access
// it will crash when attempting to run `cargo test` with some logging facilities.
#[cfg(test)]
pub fn ensure_env_logger_initialized() {
    use std::io::Write;

    LOGGER_INIT.call_once(|| {
        let mut builder = env_logger::Builder::from_default_env();
        builder
            .format(|buf, record| writeln!(buf, "[{}] - {}", record.level(), record.args()))
            .init();
    });
}

/// Builds one little-endian record; the size field is filled in by `build`.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    tag: u32,
    body: Vec<u8>,
}

impl RecordBuilder {
    pub fn new(tag: u32) -> Self {
        RecordBuilder { tag, body: vec![] }
    }

    pub fn u32(mut self, value: u32) -> Self {
        self.body.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn u32s(self, values: &[u32]) -> Self {
        values.iter().fold(self, |b, v| b.u32(*v))
    }

    pub fn u16(mut self, value: u16) -> Self {
        self.body.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn u16s(self, values: &[u16]) -> Self {
        values.iter().fold(self, |b, v| b.u16(*v))
    }

    pub fn bytes(mut self, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(bytes);
        self
    }

    pub fn zeros(mut self, len: usize) -> Self {
        self.body.resize(self.body.len() + len, 0);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let size = (self.body.len() + 8) as u32;
        self.build_with_size(size)
    }

    pub fn build_with_size(self, size: u32) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.body.len() + 8);
        out.extend_from_slice(&self.tag.to_le_bytes());
        out.extend_from_slice(&size.to_le_bytes());
        out.extend(self.body);
        out
    }
}

/// A zero-filled record of `size` bytes with a valid header.
pub fn zeroed_record(tag: u32, size: u32) -> Vec<u8> {
    RecordBuilder::new(tag).zeros(size as usize - 8).build()
}

pub fn header_record() -> Vec<u8> {
    RecordBuilder::new(1)
        .u32s(&[0, 0, 100, 100, 0, 0, 2540, 2540])
        .u32s(&[0x464D_4520, 0x0001_0000, 0, 0])
        .u16s(&[2, 0])
        .u32s(&[0, 0, 0])
        .u32s(&[1024, 768, 320, 240])
        .build()
}

pub fn eof_record() -> Vec<u8> {
    RecordBuilder::new(14).u32s(&[0, 16, 20]).build()
}

pub fn line_to(x: u32, y: u32) -> Vec<u8> {
    RecordBuilder::new(54).u32s(&[x, y]).build()
}

/// A Polyline over three points, 52 bytes.
pub fn polyline() -> Vec<u8> {
    RecordBuilder::new(4)
        .u32s(&[0, 0, 20, 20])
        .u32(3)
        .u32s(&[0, 0, 10, 20, 20, 0])
        .build()
}

/// BitBlt of a 2x2 8bpp bitmap with `entries` color table entries.
pub fn bit_blt_8bpp(entries: u32) -> Vec<u8> {
    let cb_bmi = 40 + entries * 4;
    RecordBuilder::new(76)
        .u32s(&[0, 0, 2, 2])
        .u32s(&[0, 0, 2, 2])
        .u32(0x00CC_0020)
        .u32s(&[0, 0])
        .u32s(&[0x3F80_0000, 0, 0, 0x3F80_0000, 0, 0])
        .bytes(&[0xFF, 0xFF, 0xFF, 0x00])
        .u32(0)
        .u32s(&[100, cb_bmi, 100 + cb_bmi, 4])
        .u32s(&[40, 2, 2])
        .u16s(&[1, 8])
        .u32s(&[0, 4, 0, 0, 0, 0])
        .bytes(&vec![0xAB; entries as usize * 4])
        .bytes(&[0, 1, 2, 3])
        .build()
}

/// Records from most families, all well formed.
pub fn drawing_records() -> Vec<Vec<u8>> {
    vec![
        RecordBuilder::new(17).u32(8).build(),
        RecordBuilder::new(9).u32s(&[100, 100]).build(),
        RecordBuilder::new(24).bytes(&[0x00, 0x00, 0xFF, 0x00]).build(),
        RecordBuilder::new(38).u32s(&[1, 0, 1, 0]).bytes(&[0xFF, 0, 0, 0]).build(),
        RecordBuilder::new(37).u32(1).build(),
        RecordBuilder::new(27).u32s(&[0, 0]).build(),
        line_to(10, 10),
        polyline(),
        // PolyPolygon16: two polygons of 2 and 3 points.
        RecordBuilder::new(91)
            .u32s(&[0, 0, 9, 9])
            .u32s(&[2, 5])
            .u32s(&[2, 3])
            .u16s(&[0, 0, 1, 1, 2, 2, 3, 3, 4, 4])
            .build(),
        // ExtTextOutW of "Hi" with two advances.
        RecordBuilder::new(84)
            .u32s(&[0, 0, 100, 20])
            .u32(1)
            .u32s(&[0x3F80_0000, 0x3F80_0000])
            .u32s(&[5, 5, 2, 76, 0])
            .u32s(&[0, 0, 100, 20])
            .u32(80)
            .bytes(&[b'H', 0, b'i', 0])
            .u32s(&[7, 8])
            .build(),
        // GradientFill: two vertices, one horizontal rectangle.
        RecordBuilder::new(118)
            .u32s(&[0, 0, 50, 50])
            .u32s(&[2, 1, 0])
            .u32s(&[0, 0])
            .u16s(&[0xFF00, 0, 0, 0])
            .u32s(&[50, 50])
            .u16s(&[0, 0, 0xFF00, 0])
            .u32s(&[0, 1])
            .build(),
        bit_blt_8bpp(4),
        // A comment with an unaligned payload.
        RecordBuilder::new(70).u32(6).bytes(b"EMF+\x01\x02\0\0").build(),
    ]
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

pub fn drawing_stream() -> Vec<u8> {
    stream(&drawing_records())
}

/// Write `bytes` to `name` inside `dir`, returning the path.
pub fn write_sample(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}
