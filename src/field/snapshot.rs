//! Decoded snapshot of the minefield block
//!
//! The game stores the field as one byte per cell inside rows of a fixed
//! 32-byte pitch, with a border ring around the logical grid. Coordinates
//! are 1-based: cell (x, y) lives at byte `x + y * 32`.

use crate::core::types::{MemoryError, MemoryResult};

use super::cell::CellState;

/// Fixed row pitch of the minefield block, independent of logical width
pub const ROW_STRIDE: usize = 32;

/// 1-based column/row of a cell in the logical grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MineLocation {
    pub x: u32,
    pub y: u32,
}

impl MineLocation {
    /// Derives the location from a byte offset into the minefield block
    pub fn from_field_offset(offset: usize) -> Self {
        MineLocation {
            x: (offset % ROW_STRIDE) as u32,
            y: (offset / ROW_STRIDE) as u32,
        }
    }

    /// Byte offset of this cell inside the minefield block
    pub fn field_offset(&self) -> usize {
        self.x as usize + self.y as usize * ROW_STRIDE
    }
}

/// Immutable decoded view of one read of the minefield
#[derive(Debug, Clone)]
pub struct FieldSnapshot {
    width: u8,
    height: u8,
    mine_count: u32,
    raw: Vec<u8>,
}

impl FieldSnapshot {
    /// Wraps one raw block read. The block must cover every logical cell;
    /// bytes past `width` in each row are border padding and stay ignored.
    pub fn decode(raw: Vec<u8>, width: u8, height: u8, mine_count: u32) -> MemoryResult<Self> {
        let needed = height as usize * ROW_STRIDE + width as usize + 1;
        if raw.len() < needed {
            return Err(MemoryError::buffer_too_small(needed, raw.len()));
        }
        Ok(FieldSnapshot {
            width,
            height,
            mine_count,
            raw,
        })
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn mine_count(&self) -> u32 {
        self.mine_count
    }

    /// Decoded state of one logical cell
    pub fn cell(&self, location: MineLocation) -> CellState {
        CellState::decode(self.raw[location.field_offset()])
    }

    /// Row-major iteration over the logical cells
    pub fn cells(&self) -> impl Iterator<Item = (MineLocation, CellState)> + '_ {
        let width = self.width as u32;
        let height = self.height as u32;
        (1..=height)
            .flat_map(move |y| (1..=width).map(move |x| MineLocation { x, y }))
            .map(move |location| (location, self.cell(location)))
    }
}
