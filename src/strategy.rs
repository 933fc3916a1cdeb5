//! Automatic move selection for non-interactive play.

use crate::game::{apply_move, legal_moves, Direction, Grid};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Preference order used to break ties.
const PREFERENCE: [Direction; 4] = [
    Direction::Down,
    Direction::Left,
    Direction::Right,
    Direction::Up,
];

/// A rule for picking the next direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Uniformly random among moves that change the board.
    Random,
    /// Highest immediate score, then most empty cells.
    #[default]
    Greedy,
    /// Keep tiles piled in the bottom-left corner.
    Corner,
}

impl Strategy {
    /// Pick a direction, or `None` if no move changes the board.
    pub fn choose<R: Rng + ?Sized>(self, grid: Grid, rng: &mut R) -> Option<Direction> {
        match self {
            Strategy::Random => {
                let moves = legal_moves(grid);
                if moves.is_empty() {
                    None
                } else {
                    Some(moves[rng.gen_range(0..moves.len())])
                }
            }
            Strategy::Greedy => PREFERENCE
                .into_iter()
                .enumerate()
                .filter_map(|(rank, direction)| {
                    let result = apply_move(grid, direction);
                    result
                        .moved
                        .then(|| ((result.score, result.grid.empty_count(), rank), direction))
                })
                // Lower rank wins ties, so compare it reversed.
                .max_by(|(a, _), (b, _)| a.0.cmp(&b.0).then(a.1.cmp(&b.1)).then(b.2.cmp(&a.2)))
                .map(|(_, direction)| direction),
            Strategy::Corner => PREFERENCE
                .into_iter()
                .find(|&direction| apply_move(grid, direction).moved),
        }
    }

    /// Lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Strategy::Random => "random",
            Strategy::Greedy => "greedy",
            Strategy::Corner => "corner",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
