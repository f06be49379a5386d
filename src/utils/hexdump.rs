use std::fmt::{self, Write};

/// Layout of a hex dump line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HexDisplay {
    /// Sixteen two-column hex bytes followed by their printable characters between `|`.
    Canonical,
    /// Eight 16-bit words per line, each printed in stored byte order.
    Words,
}

/// Render `data` as hex, labelling lines with addresses starting at `base_offset`.
pub fn hexdump(data: &[u8], base_offset: usize, display: HexDisplay) -> String {
    let mut out = String::new();
    // Writing into a `String` cannot fail.
    let _ = write_hexdump(&mut out, data, base_offset, display);
    out
}

pub fn write_hexdump(out: &mut impl Write, data: &[u8], base_offset: usize, display: HexDisplay) -> fmt::Result {
    for (i, line) in data.chunks(16).enumerate() {
        write!(out, "{:08x}:", base_offset + i * 16)?;
        match display {
            HexDisplay::Canonical => {
                for b in line {
                    write!(out, " {:02x}", b)?;
                }
                // Pad short lines so the character column lines up.
                for _ in line.len()..16 {
                    out.write_str("   ")?;
                }
                out.write_str("  |")?;
                for &b in line {
                    out.write_char(if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' })?;
                }
                out.write_char('|')?;
            }
            HexDisplay::Words => {
                for word in line.chunks(2) {
                    match word {
                        [hi, lo] => write!(out, " {:02x}{:02x}", hi, lo)?,
                        [hi] => write!(out, " {:02x}", hi)?,
                        _ => {}
                    }
                }
            }
        }
        out.write_char('\n')?;
    }
    Ok(())
}
