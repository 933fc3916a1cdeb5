//! Board invariants - sanity checks that detect bugs.
//!
//! A correct engine never trips these. They back the property tests, the
//! fuzz targets, and the debug-build assertion in
//! [`GameState::advance`](crate::game::GameState::advance).

use crate::game::{apply_move, is_valid_tile, Direction, Grid, MoveResult, MAX_TILE};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check every cell of a grid.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(grid: &Grid) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    for ((row, col), value) in grid.iter() {
        if !is_valid_tile(value) {
            violations.push(InvariantViolation {
                message: format!(
                    "Cell ({row},{col}) holds {value}, not 0 or a power of two up to {MAX_TILE}"
                ),
            });
        }
    }

    violations
}

/// Check a move result against the grid it was computed from.
///
/// Besides the per-cell checks on the result this verifies that the tile
/// sum is unchanged, the score is even, `moved` matches grid equality, and
/// the result equals a fresh recomputation.
#[must_use]
pub fn check_move(before: &Grid, direction: Direction, result: &MoveResult) -> Vec<InvariantViolation> {
    let mut violations = check_invariants(&result.grid);

    if before.tile_sum() != result.grid.tile_sum() {
        violations.push(InvariantViolation {
            message: format!(
                "Moving {direction} changed tile sum {} -> {}",
                before.tile_sum(),
                result.grid.tile_sum()
            ),
        });
    }

    if result.score % 2 != 0 {
        violations.push(InvariantViolation {
            message: format!("Moving {direction} scored odd {}", result.score),
        });
    }

    if result.moved != (result.grid != *before) {
        violations.push(InvariantViolation {
            message: format!(
                "Moving {direction} reported moved={} but grid changed={}",
                result.moved,
                result.grid != *before
            ),
        });
    }

    if !result.moved && result.score != 0 {
        violations.push(InvariantViolation {
            message: format!("Moving {direction} scored {} without moving", result.score),
        });
    }

    if apply_move(*before, direction) != *result {
        violations.push(InvariantViolation {
            message: format!("Moving {direction} is not deterministic"),
        });
    }

    violations
}

/// Assert all grid invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(grid: &Grid) {
    let violations = check_invariants(grid);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Grid invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_grid: &Grid) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_grid_has_no_violations() {
        assert!(check_invariants(&Grid::initial()).is_empty());
        assert!(check_invariants(&Grid::empty()).is_empty());
    }

    #[test]
    fn test_oversized_tile_flagged() {
        let mut cells = Grid::empty().rows();
        cells[0][0] = MAX_TILE * 2;
        let violations = check_invariants(&Grid::from_cells(cells));
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("up to 131072"));
    }

    #[test]
    fn test_check_move_accepts_engine_output() {
        let grid = Grid::from_rows([[2, 2, 4, 4], [0, 8, 0, 8], [2, 0, 0, 2], [16, 16, 16, 0]]).unwrap();
        for direction in Direction::ALL {
            let result = apply_move(grid, direction);
            let violations = check_move(&grid, direction, &result);
            assert!(violations.is_empty(), "{direction}: {violations:?}");
        }
    }

    #[test]
    fn test_check_move_catches_lost_tile() {
        let grid = Grid::from_rows([[2, 2, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]).unwrap();
        let forged = MoveResult {
            grid: Grid::empty().with_cell(0, 0, 2),
            score: 4,
            moved: true,
        };
        let violations = check_move(&grid, Direction::Left, &forged);
        assert!(violations.iter().any(|v| v.message.contains("tile sum")));
        assert!(violations.iter().any(|v| v.message.contains("deterministic")));
    }

    #[test]
    fn test_check_move_catches_false_moved_flag() {
        let grid = Grid::initial();
        let forged = MoveResult {
            grid,
            score: 0,
            moved: true,
        };
        let violations = check_move(&grid, Direction::Up, &forged);
        assert!(violations.iter().any(|v| v.message.contains("moved=true")));
    }

    #[test]
    fn test_violation_display() {
        let v = InvariantViolation {
            message: "bad".to_string(),
        };
        assert_eq!(format!("{v}"), "Invariant violation: bad");
    }
}
