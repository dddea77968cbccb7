//! WebAssembly sliding-tile (15-puzzle) engine.
//!
//! The host (a browser UI) owns rendering, tile text and raw pointer
//! events; this crate owns the puzzle state: the 4x4 grid, shuffle
//! generation, move validation, the animated chain slide and win
//! detection. State mutates only through the tick-driven [`game::Game`]
//! facade, exported to JavaScript as the `PuzzleHandle` class.

pub mod game;
pub mod gesture;
pub mod grid;
pub mod rng;
pub mod slide;
pub mod types;

// ─── WASM Exports (only compiled for wasm32 target) ─────────────────────────

#[cfg(target_arch = "wasm32")]
mod wasm_exports {
    use wasm_bindgen::prelude::*;

    use crate::game::{Game, GameEvent};
    use crate::gesture::GestureOutcome;
    use crate::grid::MoveOutcome;
    use crate::types::GridPos;

    /// One puzzle session held behind a JS handle.
    #[wasm_bindgen]
    pub struct PuzzleHandle {
        game: Game,
    }

    #[wasm_bindgen]
    impl PuzzleHandle {
        /// Create and shuffle a session. `seed` (a BigInt) makes it
        /// deterministic; omit it for real entropy.
        #[wasm_bindgen(constructor)]
        pub fn new(tile_spacing: f32, seed: Option<u64>) -> Result<PuzzleHandle, JsError> {
            let game = Game::new(tile_spacing, seed).map_err(|e| JsError::new(&e.to_string()))?;
            Ok(PuzzleHandle { game })
        }

        /// Reshuffle. Returns false (and does nothing) while a slide is
        /// still animating.
        #[wasm_bindgen(js_name = "newGame")]
        pub fn new_game(&mut self) -> Result<bool, JsError> {
            self.game.new_game().map_err(|e| JsError::new(&e.to_string()))
        }

        /// Request a move by slot index, bypassing gestures (click input).
        /// Returns `{ status: "slide" | "rejected" | "locked", hops? }`
        /// where `hops` is a flat Uint32Array of (from, to) pairs.
        #[wasm_bindgen(js_name = "requestMove")]
        pub fn request_move(&mut self, slot: usize) -> JsValue {
            let obj = js_sys::Object::new();
            match self.game.request_move(slot) {
                MoveOutcome::Slide(plan) => {
                    js_sys::Reflect::set(&obj, &"status".into(), &"slide".into()).unwrap();
                    let mut flat = Vec::with_capacity(plan.hops.len() * 2);
                    for hop in &plan.hops {
                        flat.push(hop.tile_slot as u32);
                        flat.push(hop.empty_slot as u32);
                    }
                    let arr = js_sys::Uint32Array::new_with_length(flat.len() as u32);
                    arr.copy_from(&flat);
                    js_sys::Reflect::set(&obj, &"hops".into(), &arr.into()).unwrap();
                }
                MoveOutcome::Rejected => {
                    js_sys::Reflect::set(&obj, &"status".into(), &"rejected".into()).unwrap();
                }
                MoveOutcome::Locked => {
                    js_sys::Reflect::set(&obj, &"status".into(), &"locked".into()).unwrap();
                }
            }
            obj.into()
        }

        /// Begin a drag on a tile. False while sliding or for the empty slot.
        #[wasm_bindgen(js_name = "beginDrag")]
        pub fn begin_drag(&mut self, slot: usize) -> bool {
            self.game.begin_drag(slot)
        }

        /// Track the pointer during a drag (screen coordinates, y down).
        #[wasm_bindgen(js_name = "updateDrag")]
        pub fn update_drag(&mut self, x: f32, y: f32) {
            self.game.update_drag(x, y);
        }

        /// Finish the drag. True if a slide started; false means the host
        /// should snap the dragged tile back to its cell.
        #[wasm_bindgen(js_name = "endDrag")]
        pub fn end_drag(&mut self) -> bool {
            self.game.end_drag() == GestureOutcome::TowardEmpty
        }

        /// Advance the animation by `dt` seconds. Returns an array of
        /// `{ type: "tileMoved", from, to } | { type: "slideFinished" } |
        /// { type: "solved" }` objects.
        pub fn tick(&mut self, dt: f32) -> JsValue {
            let out = js_sys::Array::new();
            for event in self.game.tick(dt) {
                let obj = js_sys::Object::new();
                match event {
                    GameEvent::TileMoved { from, to } => {
                        js_sys::Reflect::set(&obj, &"type".into(), &"tileMoved".into()).unwrap();
                        js_sys::Reflect::set(&obj, &"from".into(), &(from as u32).into()).unwrap();
                        js_sys::Reflect::set(&obj, &"to".into(), &(to as u32).into()).unwrap();
                    }
                    GameEvent::SlideFinished => {
                        js_sys::Reflect::set(&obj, &"type".into(), &"slideFinished".into())
                            .unwrap();
                    }
                    GameEvent::Solved => {
                        js_sys::Reflect::set(&obj, &"type".into(), &"solved".into()).unwrap();
                    }
                }
                out.push(&obj);
            }
            out.into()
        }

        /// Full grid view (numbers, visibility, tile ids, flags) as a plain
        /// JS object.
        pub fn snapshot(&self) -> Result<JsValue, JsError> {
            serde_wasm_bindgen::to_value(&self.game.snapshot())
                .map_err(|e| JsError::new(&e.to_string()))
        }

        /// Screen position of the tile in `slot`, interpolated mid-hop.
        #[wasm_bindgen(js_name = "visualPosition")]
        pub fn visual_position(&self, slot: usize) -> JsValue {
            let (x, y) = self.game.visual_position(slot);
            let obj = js_sys::Object::new();
            js_sys::Reflect::set(&obj, &"x".into(), &x.into()).unwrap();
            js_sys::Reflect::set(&obj, &"y".into(), &y.into()).unwrap();
            obj.into()
        }

        /// Resting screen position of a slot (no interpolation).
        #[wasm_bindgen(js_name = "slotPosition")]
        pub fn slot_position(&self, slot: usize) -> JsValue {
            let (x, y) = GridPos::from_index(slot).screen(self.game.tile_spacing());
            let obj = js_sys::Object::new();
            js_sys::Reflect::set(&obj, &"x".into(), &x.into()).unwrap();
            js_sys::Reflect::set(&obj, &"y".into(), &y.into()).unwrap();
            obj.into()
        }

        /// Whether the current layout is solvable (diagnostic only; the
        /// shuffle does not enforce it).
        #[wasm_bindgen(js_name = "isSolvable")]
        pub fn is_solvable(&self) -> bool {
            self.game.engine().is_solvable()
        }

        #[wasm_bindgen(js_name = "isSliding")]
        pub fn is_sliding(&self) -> bool {
            self.game.is_sliding()
        }
    }

    /// Ping function to verify WASM is loaded.
    #[wasm_bindgen(js_name = "ping")]
    pub fn wasm_ping() -> String {
        "WASM puzzle engine ready".to_string()
    }
}
