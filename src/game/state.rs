//! Game state management.

use crate::game::{
    apply_move, assert_invariants, choose_spawn, evaluate_status_with, Direction, GameConfig,
    GameStatus, Grid, Spawn,
};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

/// Complete state of one game.
///
/// This is the single record a shell owns. [`GameState::advance`] never
/// modifies it; it returns the replacement record instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// Current board.
    pub grid: Grid,
    /// Running score.
    pub score: u64,
    /// Status as of the last evaluation.
    pub status: GameStatus,
    /// Number of moves that changed the board.
    pub moves: u32,
}

/// What happened to a single directional input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MoveOutcome {
    /// The game had already ended; the input was dropped.
    Ignored,
    /// Nothing slid or merged; no tile was spawned.
    Unchanged,
    /// The board changed and a new tile was placed.
    Moved {
        /// Score earned by merges.
        gained: u64,
        /// Tile placed after the move (`None` only if the board was full).
        spawn: Option<Spawn>,
    },
}

/// Replacement state plus what happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    /// The state to hold from now on.
    pub state: GameState,
    /// What the input did.
    pub outcome: MoveOutcome,
}

impl GameState {
    /// Start a new game from the fixed diagonal placement.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self::from_grid(Grid::initial(), 0, config)
    }

    /// Start from an arbitrary grid and score.
    #[must_use]
    pub fn from_grid(grid: Grid, score: u64, config: &GameConfig) -> Self {
        Self {
            grid,
            score,
            status: evaluate_status_with(&grid, score, config),
            moves: 0,
        }
    }

    /// Whether the game has ended.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    /// Run one directional input through the move pipeline.
    ///
    /// Slide and merge; if anything changed, commit the new grid and score,
    /// spawn a tile, then re-evaluate the status. Inputs after the game has
    /// ended, and moves that change nothing, return `self` unchanged and draw
    /// nothing from `rng`.
    #[must_use]
    pub fn advance<R: Rng + ?Sized>(
        &self,
        direction: Direction,
        config: &GameConfig,
        rng: &mut R,
    ) -> Turn {
        if self.is_finished() {
            return Turn {
                state: *self,
                outcome: MoveOutcome::Ignored,
            };
        }

        let result = apply_move(self.grid, direction);
        if !result.moved {
            return Turn {
                state: *self,
                outcome: MoveOutcome::Unchanged,
            };
        }

        let spawn = choose_spawn(&result.grid, rng);
        let grid = match spawn {
            Some(s) => result.grid.with_cell(s.row, s.col, s.value),
            None => result.grid,
        };
        assert_invariants(&grid);

        let score = self.score + result.score;
        let status = evaluate_status_with(&grid, score, config);
        let moves = self.moves + 1;

        debug!(%direction, gained = result.score, score, ?spawn, "move applied");
        if status.is_finished() {
            info!(%status, score, moves, max_tile = grid.max_tile(), "game finished");
        }

        Turn {
            state: Self {
                grid,
                score,
                status,
                moves,
            },
            outcome: MoveOutcome::Moved {
                gained: result.score,
                spawn,
            },
        }
    }
}
