//! Slide-and-merge move logic.
//!
//! Every direction runs the same one-dimensional transform over four lines;
//! only the line geometry (see [`Direction::line`]) changes.

use crate::game::{Direction, Grid, MAX_TILE, SIZE};
use serde::Serialize;

/// Outcome of applying a direction to a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveResult {
    /// The grid after sliding and merging (no spawn).
    pub grid: Grid,
    /// Sum of every tile produced by a merge during this move.
    pub score: u64,
    /// Whether any cell changed.
    pub moved: bool,
}

/// Result of compacting a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineResult {
    /// Cells after compaction, index 0 at the target edge.
    pub cells: [u32; SIZE],
    /// Score earned by merges in this line.
    pub score: u64,
    /// Whether the line differs from its input.
    pub moved: bool,
}

/// Compact a line toward index 0, merging equal neighbours once.
///
/// Empty cells are skipped. A tile equal to the top of the stack merges into
/// it unless the top was itself produced by a merge in this pass, so
/// `[2, 2, 2, 2]` becomes `[4, 4, 0, 0]` rather than `[8, 0, 0, 0]`.
/// Tiles at [`MAX_TILE`] never merge.
#[must_use]
pub fn compact_line(line: [u32; SIZE]) -> LineResult {
    let mut cells = [0u32; SIZE];
    let mut len = 0;
    // Whether cells[len - 1] came out of a merge.
    let mut top_merged = false;
    let mut score = 0u64;

    for value in line {
        if value == 0 {
            continue;
        }
        if len > 0 && !top_merged && value < MAX_TILE && cells[len - 1] == value {
            cells[len - 1] = value * 2;
            score += u64::from(value) * 2;
            top_merged = true;
        } else {
            cells[len] = value;
            len += 1;
            top_merged = false;
        }
    }

    LineResult {
        cells,
        score,
        moved: cells != line,
    }
}

/// Slide and merge every line of `grid` toward `direction`'s edge.
///
/// Pure: `grid` is taken by value and the caller's copy is unchanged.
#[must_use]
pub fn apply_move(grid: Grid, direction: Direction) -> MoveResult {
    let mut cells = grid.rows();
    let mut score = 0u64;
    let mut moved = false;

    for index in 0..SIZE {
        let positions = direction.line(index);
        let line = positions.map(|(row, col)| cells[row][col]);

        let result = compact_line(line);
        score += result.score;
        moved |= result.moved;

        for ((row, col), value) in positions.into_iter().zip(result.cells) {
            cells[row][col] = value;
        }
    }

    MoveResult {
        grid: Grid::from_cells(cells),
        score,
        moved,
    }
}

/// Whether applying `direction` would change `grid`.
#[must_use]
pub fn can_move(grid: Grid, direction: Direction) -> bool {
    (0..SIZE).any(|index| {
        let line = direction.line(index).map(|(row, col)| grid.get(row, col));
        compact_line(line).moved
    })
}

/// Directions that would change `grid`, in [`Direction::ALL`] order.
#[must_use]
pub fn legal_moves(grid: Grid) -> Vec<Direction> {
    Direction::ALL
        .into_iter()
        .filter(|&direction| can_move(grid, direction))
        .collect()
}

/// Whether no direction changes `grid`.
#[must_use]
pub fn is_stuck(grid: Grid) -> bool {
    !Direction::ALL
        .into_iter()
        .any(|direction| can_move(grid, direction))
}
