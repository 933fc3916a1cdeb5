// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Tilemerge: a deterministic engine for the 4×4 sliding-tile merge puzzle.
//!
//! This crate provides:
//! - A pure slide-and-merge move function over a 4×4 grid
//! - Random tile spawn through an injected `rand::Rng`
//! - Win/loss evaluation under standard or classic rules
//! - Seed-based recordings and a replay engine
//! - Strategies and a batch runner for automatic play
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Shells (TUI, run, replay, batch)  │
//! ├─────────────────────────────────────┤
//! │   GameState::advance (pipeline)     │
//! ├─────────────────────────────────────┤
//! │   Board engine (apply_move, spawn)  │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use tilemerge::{apply_move, Direction, Grid};
//!
//! let grid: Grid = "2,2,0,0/0,0,0,0/0,0,0,0/0,0,0,0".parse().unwrap();
//! let result = apply_move(grid, Direction::Left);
//! assert_eq!(result.grid.rows()[0], [4, 0, 0, 0]);
//! assert_eq!(result.score, 4);
//! assert!(result.moved);
//! ```

pub mod batch;
pub mod error;
pub mod game;
pub mod replay;
pub mod strategy;

pub use error::{GridError, ParseDirectionError};

// Re-export key game types at crate root for convenience
pub use game::{
    apply_move, evaluate_status, spawn_random_tile, Direction, GameConfig, GameState, GameStatus,
    Grid, MoveOutcome, MoveResult, Rules, SeededRng,
};
pub use strategy::Strategy;
