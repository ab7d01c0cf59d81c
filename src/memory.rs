//! Typed views over the engine's linear memory.
//!
//! The engine keeps the snake body as a packed run of little-endian `u32`
//! cell indices. Both the byte offset of that run and its length are live
//! engine queries: the body grows, and growing may move it. A [`SnakeView`]
//! borrows the engine, so it cannot outlive the next `&mut` engine command.

use std::borrow::Cow;

use crate::engine::Engine;
use crate::error::{MemoryError, SnakeError};
use crate::model::{CellIndex, GridSpec};

const WORD: u32 = 4;

/// Raw byte-addressable memory owned by the engine.
pub trait LinearMemory {
    /// Current size in bytes. May change between calls.
    fn byte_len(&self) -> u64;

    /// `count` consecutive words starting at `byte_offset`.
    fn words(&self, byte_offset: u32, count: u32) -> Result<WordView<'_>, MemoryError>;
}

pub(crate) fn check_range(byte_offset: u32, count: u32, available: u64) -> Result<(), MemoryError> {
    if byte_offset % WORD != 0 {
        return Err(MemoryError::Misaligned(byte_offset));
    }
    let len = count as u64 * WORD as u64;
    if byte_offset as u64 + len > available {
        return Err(MemoryError::OutOfBounds {
            offset: byte_offset,
            len,
            available,
        });
    }
    Ok(())
}

impl LinearMemory for [u8] {
    fn byte_len(&self) -> u64 {
        self.len() as u64
    }

    fn words(&self, byte_offset: u32, count: u32) -> Result<WordView<'_>, MemoryError> {
        check_range(byte_offset, count, self.byte_len())?;
        let start = byte_offset as usize;
        let end = start + count as usize * WORD as usize;
        Ok(WordView::borrowed(&self[start..end]))
    }
}

/// A run of little-endian `u32` words. Borrowed when the memory lives in this
/// module, owned when it had to be copied across a host boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordView<'a> {
    bytes: Cow<'a, [u8]>,
}

impl<'a> WordView<'a> {
    pub fn borrowed(bytes: &'a [u8]) -> Self {
        debug_assert_eq!(bytes.len() % WORD as usize, 0);
        Self {
            bytes: Cow::Borrowed(bytes),
        }
    }

    pub fn owned(bytes: Vec<u8>) -> WordView<'static> {
        debug_assert_eq!(bytes.len() % WORD as usize, 0);
        WordView {
            bytes: Cow::Owned(bytes),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len() / WORD as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<u32> {
        let start = i * WORD as usize;
        let chunk = self.bytes.get(start..start + WORD as usize)?;
        Some(u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = u32> + ExactSizeIterator + '_ {
        self.bytes
            .chunks_exact(WORD as usize)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
    }
}

/// The snake body as read this tick. Element 0 is the head.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnakeView<'a> {
    cells: WordView<'a>,
}

impl<'a> SnakeView<'a> {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn head(&self) -> CellIndex {
        // Non-empty by construction in `read_snake`.
        CellIndex(self.cells.get(0).unwrap_or_default())
    }

    pub fn contains(&self, cell: CellIndex) -> bool {
        self.cells.iter().any(|c| c == cell.0)
    }

    /// Head-first order, as stored by the engine.
    pub fn cells(&self) -> impl DoubleEndedIterator<Item = CellIndex> + '_ {
        self.cells.iter().map(CellIndex)
    }

    /// Tail first, head last, paired with a head flag. Painting in this order
    /// keeps the head on top.
    pub fn paint_order(&self) -> impl Iterator<Item = (CellIndex, bool)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .rev()
            .map(|(i, c)| (CellIndex(c), i == 0))
    }

    pub fn to_vec(&self) -> Vec<CellIndex> {
        self.cells().collect()
    }

    pub fn into_owned(self) -> SnakeView<'static> {
        SnakeView {
            cells: WordView::owned(self.cells.bytes.into_owned()),
        }
    }
}

/// Resolves the snake body from scratch: offset and length are queried again
/// on every call, then every index is checked against the board.
pub fn read_snake<'e, E>(engine: &'e E, grid: &GridSpec) -> Result<SnakeView<'e>, SnakeError>
where
    E: Engine + ?Sized,
{
    let count = engine.snake_len();
    if count == 0 {
        return Err(SnakeError::EmptySnake);
    }
    let offset = engine.snake_offset();
    let cells = engine.memory().words(offset, count)?;
    for raw in cells.iter() {
        grid.cell(raw)?;
    }
    Ok(SnakeView { cells })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeEngine;

    fn bytes(words: &[u32]) -> Vec<u8> {
        words.iter().flat_map(|w| w.to_le_bytes()).collect()
    }

    #[test]
    fn slice_words_are_little_endian_and_borrowed() {
        let mem = bytes(&[7, 0x0102_0304, 9]);
        let view = mem.as_slice().words(4, 2).unwrap();
        assert_eq!(view.len(), 2);
        assert_eq!(view.iter().collect::<Vec<_>>(), vec![0x0102_0304, 9]);
        assert!(matches!(view.bytes, Cow::Borrowed(_)));
    }

    #[test]
    fn slice_rejects_bad_ranges() {
        let mem = bytes(&[1, 2]);
        assert_eq!(mem.as_slice().words(2, 1), Err(MemoryError::Misaligned(2)));
        assert_eq!(
            mem.as_slice().words(4, 2),
            Err(MemoryError::OutOfBounds {
                offset: 4,
                len: 8,
                available: 8
            })
        );
        assert!(mem.as_slice().words(8, 0).unwrap().is_empty());
    }

    #[test]
    fn growth_is_seen_on_next_read() {
        let grid = GridSpec::new(10, 16);
        let mut engine = FakeEngine::new(16);
        engine.set_snake(&[5, 4, 3]);

        let first = read_snake(&engine, &grid).unwrap().to_vec();
        assert_eq!(first, vec![CellIndex(5), CellIndex(4), CellIndex(3)]);

        // Grow and relocate the body, as an engine reallocation would.
        engine.relocate_snake(64);
        engine.set_snake(&[6, 5, 4, 3]);

        let second = read_snake(&engine, &grid).unwrap();
        assert_eq!(second.len(), 4);
        assert_eq!(
            second.to_vec(),
            vec![CellIndex(6), CellIndex(5), CellIndex(4), CellIndex(3)]
        );
    }

    #[test]
    fn shrinking_leaves_no_stale_cells() {
        let grid = GridSpec::new(10, 16);
        let mut engine = FakeEngine::new(16);
        engine.set_snake(&[9, 8, 7, 6]);
        assert_eq!(read_snake(&engine, &grid).unwrap().len(), 4);
        engine.set_snake(&[10]);
        let view = read_snake(&engine, &grid).unwrap();
        assert_eq!(view.to_vec(), vec![CellIndex(10)]);
    }

    #[test]
    fn empty_and_out_of_range_are_protocol_errors() {
        let grid = GridSpec::new(10, 4);
        let mut engine = FakeEngine::new(4);
        engine.set_snake(&[]);
        assert_eq!(read_snake(&engine, &grid), Err(SnakeError::EmptySnake));

        engine.set_snake(&[3, 16]);
        assert_eq!(
            read_snake(&engine, &grid),
            Err(SnakeError::CellOutOfRange { index: 16, width: 4 })
        );
    }

    #[test]
    fn paint_order_ends_with_head() {
        let grid = GridSpec::new(10, 16);
        let mut engine = FakeEngine::new(16);
        engine.set_snake(&[3, 2, 1]);
        let view = read_snake(&engine, &grid).unwrap();
        let order: Vec<_> = view.paint_order().collect();
        assert_eq!(
            order,
            vec![
                (CellIndex(1), false),
                (CellIndex(2), false),
                (CellIndex(3), true)
            ]
        );
        assert_eq!(view.head(), CellIndex(3));
    }
}
