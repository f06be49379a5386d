pub mod bytes;
mod hexdump;
mod record_cursor;

pub use self::hexdump::{HexDisplay, hexdump, write_hexdump};
pub(crate) use self::record_cursor::{Field, RecordBytes, RecordCursor, layout_size};
