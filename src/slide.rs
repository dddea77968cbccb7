//! Per-frame chain-slide animation.
//!
//! Explicit animation state polled by the render loop: the in-flight hop
//! carries its own elapsed time, and [`SlideAnimation::advance`] reports
//! hops the moment they cross [`HOP_DURATION`], carrying leftover frame
//! time into the next hop. Once started a slide always runs to completion;
//! there is no cancellation.

use std::collections::VecDeque;

use crate::grid::{Hop, SlidePlan};

/// Seconds each single-cell hop takes.
pub const HOP_DURATION: f32 = 0.1;

struct ActiveHop {
    hop: Hop,
    elapsed: f32,
}

/// The animation state of one chain slide: hops run strictly in order,
/// exactly one in flight at a time.
pub struct SlideAnimation {
    current: Option<ActiveHop>,
    pending: VecDeque<Hop>,
}

impl SlideAnimation {
    pub fn new(plan: SlidePlan) -> Self {
        let mut pending: VecDeque<Hop> = plan.hops.into();
        let current = pending.pop_front().map(|hop| ActiveHop { hop, elapsed: 0.0 });
        Self { current, pending }
    }

    /// Advance by `dt` seconds, returning every hop that completed.
    ///
    /// A large `dt` may finish several hops in one call; the leftover time
    /// after each completion seeds the next hop so total slide duration is
    /// independent of frame rate.
    pub fn advance(&mut self, dt: f32) -> Vec<Hop> {
        let mut completed = Vec::new();
        let mut budget = dt;

        while let Some(active) = self.current.as_mut() {
            let remaining = HOP_DURATION - active.elapsed;
            if budget < remaining {
                active.elapsed += budget;
                break;
            }
            budget -= remaining;
            completed.push(active.hop);
            self.current = self
                .pending
                .pop_front()
                .map(|hop| ActiveHop { hop, elapsed: 0.0 });
        }

        completed
    }

    /// The in-flight hop and its interpolation parameter in [0, 1).
    ///
    /// The hop's tile travels `tile_slot → empty_slot` while the empty
    /// travels the opposite way; the host lerps both screen positions and
    /// snaps when the hop completes.
    pub fn in_flight(&self) -> Option<(Hop, f32)> {
        self.current
            .as_ref()
            .map(|a| (a.hop, a.elapsed / HOP_DURATION))
    }

    #[inline(always)]
    pub fn is_finished(&self) -> bool {
        self.current.is_none()
    }
}

/// Linear interpolation between two screen positions.
#[inline(always)]
pub fn lerp(from: (f32, f32), to: (f32, f32), t: f32) -> (f32, f32) {
    (from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t)
}
