//! Board engine.
//!
//! Implements the puzzle rules:
//! - 4×4 grid of power-of-two tiles
//! - Slide-and-merge moves in four directions
//! - Random tile spawn after a successful move
//! - Win/loss evaluation
//! - The per-move pipeline tying these together

mod direction;
mod engine;
mod grid;
mod invariants;
mod spawn;
mod state;
mod status;

pub use direction::Direction;
pub use engine::{apply_move, can_move, compact_line, is_stuck, legal_moves, LineResult, MoveResult};
pub use grid::{is_valid_tile, Cells, Grid, MAX_TILE, SIZE};
pub use invariants::{assert_invariants, check_invariants, check_move, InvariantViolation};
pub use spawn::{choose_spawn, spawn_random_tile, SeededRng, Spawn};
pub use state::{GameState, MoveOutcome, Turn};
pub use status::{evaluate_status, evaluate_status_with, GameConfig, GameStatus, Rules, WIN_TILE};
