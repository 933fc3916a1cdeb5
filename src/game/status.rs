//! Win/loss evaluation.

use crate::game::{is_stuck, Grid};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default winning tile.
pub const WIN_TILE: u32 = 2048;

/// Where a game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Moves are still accepted.
    InProgress,
    /// The winning condition was reached.
    Won,
    /// No move changes the board.
    Over,
}

impl GameStatus {
    /// Whether the game has ended.
    #[must_use]
    pub const fn is_finished(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// Message shown to the player once the game ends.
    #[must_use]
    pub const fn message(self) -> Option<&'static str> {
        match self {
            GameStatus::InProgress => None,
            GameStatus::Won => Some("Congratulations! You win!"),
            GameStatus::Over => Some("Game Over! Try again."),
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GameStatus::InProgress => "in progress",
            GameStatus::Won => "won",
            GameStatus::Over => "over",
        })
    }
}

/// Which win/loss rules to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rules {
    /// Win on a tile reaching the win tile, lose when no move is possible.
    #[default]
    Standard,
    /// Win only when the running score lands exactly on 2048; never lose.
    ///
    /// Matches the behaviour of the first browser version of the game.
    Classic,
}

impl fmt::Display for Rules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Rules::Standard => "standard",
            Rules::Classic => "classic",
        })
    }
}

/// Game configuration shared by every shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Tile value (standard rules) or score (classic rules) that wins.
    pub win_tile: u32,
    /// Win/loss rule set.
    pub rules: Rules,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            win_tile: WIN_TILE,
            rules: Rules::Standard,
        }
    }
}

/// Evaluate a position under the standard rules with a 2048 win tile.
#[must_use]
pub fn evaluate_status(grid: &Grid, score: u64) -> GameStatus {
    evaluate_status_with(grid, score, &GameConfig::default())
}

/// Evaluate a position under the configured rules.
#[must_use]
pub fn evaluate_status_with(grid: &Grid, score: u64, config: &GameConfig) -> GameStatus {
    match config.rules {
        Rules::Standard => {
            if grid.max_tile() >= config.win_tile {
                GameStatus::Won
            } else if is_stuck(*grid) {
                GameStatus::Over
            } else {
                GameStatus::InProgress
            }
        }
        Rules::Classic => {
            if score == u64::from(config.win_tile) {
                GameStatus::Won
            } else {
                GameStatus::InProgress
            }
        }
    }
}
