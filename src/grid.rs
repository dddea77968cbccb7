//! Grid engine: slot ownership, shuffle, move validation and win detection.
//!
//! The board is a flat list of 16 tiles, one of them the empty slot,
//! mutated only through [`GridEngine::swap_slots`] one hop at a time so
//! the permutation invariant holds between frames.

use std::fmt;

use crate::rng::PuzzleRng;
use crate::types::{GridPos, Tile, EMPTY, GRID_SIZE, SLOT_COUNT};

/// Unrecoverable setup precondition violations.
///
/// These abort initialization; nothing retries them. Illegal moves are not
/// errors (see [`MoveOutcome`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupError {
    /// The host supplied a number of tile slots other than 16.
    WrongSlotCount(usize),
    /// After a shuffle (or an explicit layout) the grid does not hold
    /// exactly one empty slot, or the numbers are not a permutation of 1..=15.
    BadPermutation,
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::WrongSlotCount(n) => {
                write!(f, "expected {} tile slots, got {}", SLOT_COUNT, n)
            }
            SetupError::BadPermutation => {
                write!(f, "grid is not a permutation of 1..=15 plus one empty slot")
            }
        }
    }
}

impl std::error::Error for SetupError {}

/// One step of a chain slide: the tile at `tile_slot` moves into the
/// adjacent `empty_slot`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hop {
    pub tile_slot: usize,
    pub empty_slot: usize,
}

/// The ordered hops of a legal move, walking the empty slot one step at a
/// time toward the selected tile. Applying them in order shifts the whole
/// row/column segment one cell and leaves the empty slot where the selected
/// tile started.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlidePlan {
    pub hops: Vec<Hop>,
}

impl SlidePlan {
    /// Slot index the empty tile occupies once every hop has been applied.
    pub fn final_empty_slot(&self) -> usize {
        // Plans always carry at least one hop.
        self.hops.last().map(|h| h.tile_slot).unwrap_or(0)
    }
}

/// Result of a move request. Misaligned requests are silently ignored,
/// never errors; `Locked` is produced by the game facade while a slide
/// animation is in flight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Rejected,
    Locked,
    Slide(SlidePlan),
}

/// Owns the 16 tile slots and enforces the grid invariant: the slots are
/// always a permutation of {1..15, EMPTY} with exactly one empty.
pub struct GridEngine {
    slots: Vec<Tile>,
    empty: usize,
    solved_seen: bool,
}

impl GridEngine {
    /// Collect exactly 16 host-supplied tiles into the canonical solved
    /// layout: tile i gets number i+1, the last slot is empty. Any other
    /// slot count is a configuration error.
    pub fn new(mut tiles: Vec<Tile>) -> Result<Self, SetupError> {
        if tiles.len() != SLOT_COUNT {
            return Err(SetupError::WrongSlotCount(tiles.len()));
        }
        for (i, tile) in tiles.iter_mut().enumerate() {
            let number = if i == SLOT_COUNT - 1 { EMPTY } else { (i + 1) as u8 };
            tile.set_number(number);
        }
        Ok(Self {
            slots: tiles,
            empty: SLOT_COUNT - 1,
            solved_seen: false,
        })
    }

    /// Build an engine over an explicit layout, validating the permutation
    /// invariant. Tile ids are assigned from the initial slot order.
    pub fn from_numbers(numbers: [u8; SLOT_COUNT]) -> Result<Self, SetupError> {
        let tiles: Vec<Tile> = numbers
            .iter()
            .enumerate()
            .map(|(i, &n)| Tile::new(i as u8, n))
            .collect();
        let mut engine = Self {
            slots: tiles,
            empty: 0,
            solved_seen: false,
        };
        engine.empty = engine.verify_permutation()?;
        Ok(engine)
    }

    /// Assign a fresh random layout: one uniformly random slot becomes the
    /// empty (and turns invisible), every other slot draws a uniformly
    /// random remaining number from {1..15} without replacement.
    ///
    /// The resulting permutation is uniform and deliberately unchecked for
    /// solvability; [`GridEngine::is_solvable`] answers that question
    /// without enforcing it.
    pub fn shuffle(&mut self, rng: &mut PuzzleRng) -> Result<(), SetupError> {
        let mut pool: Vec<u8> = (1..=(SLOT_COUNT - 1) as u8).collect();
        let empty_index = rng.gen_range(SLOT_COUNT);

        for i in 0..SLOT_COUNT {
            if i == empty_index {
                self.slots[i].set_number(EMPTY);
            } else if let Some(number) = rng.draw(&mut pool) {
                self.slots[i].set_number(number);
            }
        }

        // Defensive: the draw loop cannot leave the pool non-empty or
        // produce a second empty, but a broken layout must never escape.
        self.empty = self.verify_permutation()?;
        self.solved_seen = false;
        Ok(())
    }

    /// New-game entry point: same as a fresh shuffle.
    pub fn reset(&mut self, rng: &mut PuzzleRng) -> Result<(), SetupError> {
        self.shuffle(rng)
    }

    /// Validate the permutation invariant and locate the empty slot.
    fn verify_permutation(&self) -> Result<usize, SetupError> {
        let mut seen = [false; SLOT_COUNT];
        let mut empty = None;
        for (i, tile) in self.slots.iter().enumerate() {
            let n = tile.number() as usize;
            if n < 1 || n > SLOT_COUNT || seen[n - 1] {
                return Err(SetupError::BadPermutation);
            }
            seen[n - 1] = true;
            if tile.is_empty() {
                empty = Some(i);
            }
        }
        empty.ok_or(SetupError::BadPermutation)
    }

    /// Validate a move request against the current empty slot.
    ///
    /// Legal iff the selected slot shares exactly one axis with the empty
    /// slot (same row XOR same column). Misaligned or diagonal selections
    /// are no-ops. Legal requests return the hop sequence; the grid itself
    /// is untouched until each hop is applied via [`GridEngine::swap_slots`].
    pub fn request_move(&self, selected: usize) -> MoveOutcome {
        if selected >= SLOT_COUNT || selected == self.empty {
            return MoveOutcome::Rejected;
        }

        let sel = GridPos::from_index(selected);
        let emp = GridPos::from_index(self.empty);

        let step: isize = if sel.row == emp.row {
            if sel.col > emp.col {
                1
            } else {
                -1
            }
        } else if sel.col == emp.col {
            if sel.row > emp.row {
                GRID_SIZE as isize
            } else {
                -(GRID_SIZE as isize)
            }
        } else {
            return MoveOutcome::Rejected;
        };

        let mut hops = Vec::new();
        let mut cursor = self.empty as isize;
        while cursor != selected as isize {
            let next = cursor + step;
            hops.push(Hop {
                tile_slot: next as usize,
                empty_slot: cursor as usize,
            });
            cursor = next;
        }

        MoveOutcome::Slide(SlidePlan { hops })
    }

    /// Apply one hop: swap the tiles at `a` and `b`, tracking the empty.
    /// One of the two slots must hold the empty tile.
    pub fn swap_slots(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
        if self.empty == a {
            self.empty = b;
        } else if self.empty == b {
            self.empty = a;
        }
    }

    /// True iff slot i holds number i+1 for every non-empty slot, scanned
    /// in row-major order.
    pub fn is_solved(&self) -> bool {
        (0..SLOT_COUNT - 1).all(|i| self.slots[i].number() as usize == i + 1)
    }

    /// Completion latch: true exactly once per solved state, no matter how
    /// often the win check runs. Re-armed by the next shuffle.
    pub fn take_solved_event(&mut self) -> bool {
        if self.is_solved() && !self.solved_seen {
            self.solved_seen = true;
            true
        } else {
            false
        }
    }

    /// Solvability of the current layout by inversion count.
    ///
    /// For an even board width the position is solvable iff the inversion
    /// count plus the empty slot's row index (from the top) is odd. Read-only
    /// diagnostic; the shuffle never consults it.
    pub fn is_solvable(&self) -> bool {
        let numbers: Vec<u8> = self
            .slots
            .iter()
            .filter(|t| !t.is_empty())
            .map(|t| t.number())
            .collect();
        let inversions: usize = numbers
            .iter()
            .enumerate()
            .map(|(i, &n)| numbers[i + 1..].iter().filter(|&&m| m < n).count())
            .sum();
        let empty_row = GridPos::from_index(self.empty).row;
        (inversions + empty_row) % 2 == 1
    }

    /// O(16) linear scan for a tile by identity. `None` only if the id was
    /// never part of the grid; callers must not branch on it for game flow.
    pub fn position_of_tile(&self, id: u8) -> Option<GridPos> {
        self.slots
            .iter()
            .position(|t| t.id == id)
            .map(GridPos::from_index)
    }

    #[inline(always)]
    pub fn position_of_slot(&self, index: usize) -> GridPos {
        GridPos::from_index(index)
    }

    #[inline(always)]
    pub fn empty_slot(&self) -> usize {
        self.empty
    }

    #[inline(always)]
    pub fn tile_at(&self, slot: usize) -> &Tile {
        &self.slots[slot]
    }

    #[inline(always)]
    pub fn slots(&self) -> &[Tile] {
        &self.slots
    }

    /// Current numbers in slot order, mostly for snapshots and tests.
    pub fn numbers(&self) -> [u8; SLOT_COUNT] {
        let mut out = [0u8; SLOT_COUNT];
        for (i, tile) in self.slots.iter().enumerate() {
            out[i] = tile.number();
        }
        out
    }
}
