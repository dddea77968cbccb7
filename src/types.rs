//! Core data types for the sliding-tile puzzle.
//!
//! The board is a fixed 4x4 grid stored as a flat sequence in row-major
//! layout: `slots[row * GRID_SIZE + col]`. Exactly one slot holds the
//! empty tile (number [`EMPTY`]); every other slot holds a number 1..=15.

use serde::Serialize;

/// Board side length.
pub const GRID_SIZE: usize = 4;

/// Total slot count (`GRID_SIZE * GRID_SIZE`).
pub const SLOT_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Sentinel number carried by the empty slot.
pub const EMPTY: u8 = 16;

/// A single puzzle piece.
///
/// `id` is the stable identity the host binds to a UI node at setup; it
/// never changes. `number` is reassigned only by a shuffle — slides move
/// whole `Tile` values between slots, so identity travels with the piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Tile {
    pub id: u8,
    number: u8,
    visible: bool,
}

impl Tile {
    pub fn new(id: u8, number: u8) -> Self {
        Self {
            id,
            number,
            visible: number != EMPTY,
        }
    }

    #[inline(always)]
    pub fn number(&self) -> u8 {
        self.number
    }

    #[inline(always)]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.number == EMPTY
    }

    /// Assign a new number, hiding the tile when it becomes the empty one.
    pub fn set_number(&mut self, number: u8) {
        self.number = number;
        self.visible = number != EMPTY;
    }
}

/// Grid coordinates derived from a slot index; never stored independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct GridPos {
    pub col: usize,
    pub row: usize,
}

impl GridPos {
    /// Decode a row-major slot index.
    #[inline(always)]
    pub fn from_index(index: usize) -> Self {
        Self {
            col: index % GRID_SIZE,
            row: index / GRID_SIZE,
        }
    }

    /// Re-encode to the row-major slot index.
    #[inline(always)]
    pub fn index(&self) -> usize {
        self.row * GRID_SIZE + self.col
    }

    /// Screen-space position with y growing downward (web convention).
    #[inline(always)]
    pub fn screen(&self, tile_spacing: f32) -> (f32, f32) {
        (self.col as f32 * tile_spacing, self.row as f32 * tile_spacing)
    }
}
