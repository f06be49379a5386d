use crate::byte_order::{Endianness, swap2, swap4};
use crate::err::{RecordError, RecordResult};
use crate::utils::bytes;

/// The bytes of one record, either borrowed for inspection or for in-place swapping.
#[derive(Debug)]
pub(crate) enum RecordBytes<'a> {
    Shared(&'a [u8]),
    Exclusive(&'a mut [u8]),
}

impl<'a> RecordBytes<'a> {
    #[inline]
    pub(crate) fn len(&self) -> usize {
        match self {
            RecordBytes::Shared(b) => b.len(),
            RecordBytes::Exclusive(b) => b.len(),
        }
    }

    #[inline]
    pub(crate) fn as_slice(&self) -> &[u8] {
        match self {
            RecordBytes::Shared(b) => b,
            RecordBytes::Exclusive(b) => b,
        }
    }

    /// Reborrow everything from `offset` on, or `None` past the end.
    pub(crate) fn tail(&mut self, offset: usize) -> Option<RecordBytes<'_>> {
        match self {
            RecordBytes::Shared(b) => b.get(offset..).map(RecordBytes::Shared),
            RecordBytes::Exclusive(b) => b.get_mut(offset..).map(RecordBytes::Exclusive),
        }
    }

    /// Restrict to the first `len` bytes, or `None` if there are fewer.
    pub(crate) fn truncate(self, len: usize) -> Option<Self> {
        match self {
            RecordBytes::Shared(b) => b.get(..len).map(RecordBytes::Shared),
            RecordBytes::Exclusive(b) => b.get_mut(..len).map(RecordBytes::Exclusive),
        }
    }
}

/// One piece of a fixed layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    /// `n` consecutive 32-bit fields.
    U32(usize),
    /// `n` consecutive 16-bit fields.
    U16(usize),
    /// `n` bytes that are stored in format order and never swapped.
    Bytes(usize),
}

/// A cursor over a single record that reads every field *before* swapping it.
///
/// Values are always read in the source order of the pass, so a count or offset read through
/// the cursor is the native value whichever direction the pass runs in. Over shared bytes
/// the swaps are skipped and the same walk is a pure validation.
///
/// Offset-addressed blocks (DIBs, strings, spacing arrays) are only accepted at or after the
/// end of the fixed prefix, which the record's family marks with [`RecordCursor::end_fixed`].
#[derive(Debug)]
pub(crate) struct RecordCursor<'a> {
    bytes: RecordBytes<'a>,
    order: Endianness,
    pos: usize,
    fixed_end: usize,
}

impl<'a> RecordCursor<'a> {
    #[inline]
    pub(crate) fn new(bytes: RecordBytes<'a>, order: Endianness) -> Self {
        RecordCursor {
            bytes,
            order,
            pos: 0,
            fixed_end: 0,
        }
    }

    #[inline]
    fn buf(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    /// Record length, which is its declared size.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn seek(&mut self, pos: usize, what: &'static str) -> RecordResult<()> {
        bytes::check_range(pos, 0, 0, self.len(), what)?;
        self.pos = pos;
        Ok(())
    }

    /// Mark everything before the current position as the fixed prefix.
    #[inline]
    pub(crate) fn end_fixed(&mut self) {
        self.fixed_end = self.fixed_end.max(self.pos);
    }

    #[inline]
    pub(crate) fn fixed_end(&self) -> usize {
        self.fixed_end
    }

    /// Read a `u32` at `offset` without moving or swapping.
    #[inline]
    pub(crate) fn u32_at(&self, offset: usize, what: &'static str) -> RecordResult<u32> {
        bytes::read_u32_r(self.buf(), offset, self.order, what)
    }

    /// Read a `u16` at `offset` without moving or swapping.
    #[inline]
    pub(crate) fn u16_at(&self, offset: usize, what: &'static str) -> RecordResult<u16> {
        bytes::read_u16_r(self.buf(), offset, self.order, what)
    }

    /// Check that an offset-addressed block lies between the fixed prefix and the record end.
    #[inline]
    pub(crate) fn block(&self, offset: usize, len: usize, what: &'static str) -> RecordResult<()> {
        bytes::check_range(offset, len, self.fixed_end, self.len(), what)
    }

    fn swap_run(&mut self, offset: usize, count: usize, width: usize, what: &'static str) -> RecordResult<()> {
        let len = count
            .checked_mul(width)
            .ok_or(RecordError::CountOverflow {
                what,
                count: u32::try_from(count).unwrap_or(u32::MAX),
                elem_size: width as u32,
            })?;
        bytes::check_range(offset, len, 0, self.len(), what)?;

        if let RecordBytes::Exclusive(buf) = &mut self.bytes
            && let Some(region) = buf.get_mut(offset..offset + len)
        {
            if width == 2 {
                swap2(region, count);
            } else {
                swap4(region, count);
            }
        }
        Ok(())
    }

    /// Read the `u32` at the cursor, swap it and advance.
    #[inline]
    pub(crate) fn u32(&mut self, what: &'static str) -> RecordResult<u32> {
        let value = self.u32_at(self.pos, what)?;
        self.swap_run(self.pos, 1, 4, what)?;
        self.pos += 4;
        Ok(value)
    }

    /// Read the `u16` at the cursor, swap it and advance.
    #[inline]
    pub(crate) fn u16(&mut self, what: &'static str) -> RecordResult<u16> {
        let value = self.u16_at(self.pos, what)?;
        self.swap_run(self.pos, 1, 2, what)?;
        self.pos += 2;
        Ok(value)
    }

    /// Swap `count` consecutive `u32` fields at the cursor and advance past them.
    #[inline]
    pub(crate) fn u32s(&mut self, count: usize, what: &'static str) -> RecordResult<()> {
        self.swap_run(self.pos, count, 4, what)?;
        self.pos += count * 4;
        Ok(())
    }

    /// Swap `count` consecutive `u16` fields at the cursor and advance past them.
    #[inline]
    pub(crate) fn u16s(&mut self, count: usize, what: &'static str) -> RecordResult<()> {
        self.swap_run(self.pos, count, 2, what)?;
        self.pos += count * 2;
        Ok(())
    }

    /// Step over `len` pre-ordered bytes.
    #[inline]
    pub(crate) fn skip(&mut self, len: usize, what: &'static str) -> RecordResult<()> {
        bytes::check_range(self.pos, len, 0, self.len(), what)?;
        self.pos += len;
        Ok(())
    }

    /// Walk a fixed layout at the cursor.
    pub(crate) fn fields(&mut self, layout: &[Field], what: &'static str) -> RecordResult<()> {
        for field in layout {
            match *field {
                Field::U32(n) => self.u32s(n, what)?,
                Field::U16(n) => self.u16s(n, what)?,
                Field::Bytes(n) => self.skip(n, what)?,
            }
        }
        Ok(())
    }

    /// Swap an inline array of `count` elements, each made of `per_elem` `u32` fields.
    pub(crate) fn u32_array(&mut self, count: u32, per_elem: u32, what: &'static str) -> RecordResult<()> {
        let len = bytes::extent(count, per_elem * 4, what)?;
        bytes::check_range(self.pos, len, 0, self.len(), what)?;
        self.u32s(len / 4, what)
    }

    /// Swap an inline array of `count` elements, each made of `per_elem` `u16` fields.
    pub(crate) fn u16_array(&mut self, count: u32, per_elem: u32, what: &'static str) -> RecordResult<()> {
        let len = bytes::extent(count, per_elem * 2, what)?;
        bytes::check_range(self.pos, len, 0, self.len(), what)?;
        self.u16s(len / 2, what)
    }

    /// Step over an inline array of `count` pre-ordered elements of `elem_size` bytes.
    pub(crate) fn byte_array(&mut self, count: u32, elem_size: u32, what: &'static str) -> RecordResult<()> {
        let len = bytes::extent(count, elem_size, what)?;
        self.skip(len, what)
    }

    /// Walk a fixed layout at an offset-addressed block, leaving the cursor where it was.
    pub(crate) fn fields_at(&mut self, offset: usize, layout: &[Field], what: &'static str) -> RecordResult<()> {
        let len = layout_size(layout);
        self.block(offset, len, what)?;
        let saved = self.pos;
        self.pos = offset;
        let walked = self.fields(layout, what);
        self.pos = saved;
        walked
    }

    /// Swap `count` `u32` fields in an offset-addressed block.
    pub(crate) fn u32s_at(&mut self, offset: usize, count: usize, what: &'static str) -> RecordResult<()> {
        self.block(offset, count.saturating_mul(4), what)?;
        self.swap_run(offset, count, 4, what)
    }
}

/// Byte size of a fixed layout.
pub(crate) const fn layout_size(layout: &[Field]) -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < layout.len() {
        total += match layout[i] {
            Field::U32(n) => n * 4,
            Field::U16(n) => n * 2,
            Field::Bytes(n) => n,
        };
        i += 1;
    }
    total
}
