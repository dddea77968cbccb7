//! Drag-gesture tracking and classification.
//!
//! A gesture is a begin→update→end pointer interaction anchored at the
//! dragged tile's screen position. Nothing is acted on until the gesture
//! ends; the accumulated direction vector is then classified against the
//! empty slot's relative grid position. Coordinates are y-down (web
//! convention).

use crate::types::GridPos;

/// 2D screen-space vector, y growing downward.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// What the host should do with the dragged tile once the gesture ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureOutcome {
    /// The drag pointed at the empty slot; a move request follows.
    TowardEmpty,
    /// Diagonal, misaligned or absent drag: roll the tile's visual back to
    /// the anchor. The grid was never touched.
    Revert,
}

/// Tracks one in-flight drag. Only the direction vector matters; the raw
/// pointer path is never stored.
#[derive(Default)]
pub struct DragGesture {
    anchor: Option<Vec2>,
    direction: Vec2,
}

impl DragGesture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the gesture anchor (the tile's screen position at drag start).
    pub fn begin(&mut self, anchor: Vec2) {
        self.anchor = Some(anchor);
        self.direction = Vec2::default();
    }

    /// Update the stored direction vector; ignored with no active gesture.
    pub fn update(&mut self, pointer: Vec2) {
        if let Some(anchor) = self.anchor {
            self.direction = Vec2::new(pointer.x - anchor.x, pointer.y - anchor.y);
        }
    }

    #[inline(always)]
    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }

    /// Finish the gesture, returning the accumulated direction.
    /// `None` if no gesture was in flight.
    pub fn end(&mut self) -> Option<Vec2> {
        self.anchor.take().map(|_| self.direction)
    }

    /// Drop any in-flight gesture without classifying it.
    pub fn cancel(&mut self) {
        self.anchor = None;
        self.direction = Vec2::default();
    }
}

/// Classify a drag direction against the empty slot's grid position.
///
/// A shared row counts as toward-empty only when the horizontal component
/// points at the empty slot and strictly dominates the vertical one, so a
/// diagonal swipe never triggers a move; the shared-column case is the
/// transposed check. No shared axis classifies as `Revert` outright.
pub fn classify(direction: Vec2, tile: GridPos, empty: GridPos) -> GestureOutcome {
    let toward = if empty.row == tile.row {
        if empty.col > tile.col {
            direction.x > direction.y.abs()
        } else {
            direction.x < -direction.y.abs()
        }
    } else if empty.col == tile.col {
        if empty.row > tile.row {
            direction.y > direction.x.abs()
        } else {
            direction.y < -direction.x.abs()
        }
    } else {
        false
    };

    if toward {
        GestureOutcome::TowardEmpty
    } else {
        GestureOutcome::Revert
    }
}
