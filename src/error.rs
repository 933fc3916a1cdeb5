//! Error types for the input boundaries of the engine.
//!
//! The move function itself cannot fail. These errors come from turning
//! untrusted text or JSON into a [`Grid`](crate::game::Grid) or a
//! [`Direction`](crate::game::Direction).

use std::fmt;

/// A grid that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// The input did not have exactly four rows.
    RowCount(usize),
    /// A row did not have exactly four cells.
    ColumnCount {
        /// Zero-based row index.
        row: usize,
        /// Number of cells found in that row.
        found: usize,
    },
    /// A cell held something other than 0 or a power of two in `2..=2^17`.
    InvalidTile {
        /// Zero-based row index.
        row: usize,
        /// Zero-based column index.
        col: usize,
        /// The rejected value.
        value: u32,
    },
    /// A cell could not be parsed as a number.
    NotANumber {
        /// Zero-based row index.
        row: usize,
        /// Zero-based column index.
        col: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::RowCount(found) => write!(f, "expected 4 rows, found {found}"),
            GridError::ColumnCount { row, found } => {
                write!(f, "row {row}: expected 4 cells, found {found}")
            }
            GridError::InvalidTile { row, col, value } => {
                write!(f, "cell ({row},{col}): {value} is not a valid tile")
            }
            GridError::NotANumber { row, col } => write!(f, "cell ({row},{col}): not a number"),
        }
    }
}

impl std::error::Error for GridError {}

/// A direction name that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDirectionError {
    /// The rejected input.
    pub input: String,
}

impl fmt::Display for ParseDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown direction '{}' (expected up, down, left, right or u/d/l/r)",
            self.input
        )
    }
}

impl std::error::Error for ParseDirectionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_error_display() {
        let err = GridError::InvalidTile {
            row: 1,
            col: 2,
            value: 3,
        };
        let msg = format!("{err}");
        assert!(msg.contains("(1,2)"));
        assert!(msg.contains('3'));

        assert!(format!("{}", GridError::RowCount(5)).contains("found 5"));
    }

    #[test]
    fn test_parse_direction_error_display() {
        let err = ParseDirectionError {
            input: "sideways".to_string(),
        };
        assert!(format!("{err}").contains("sideways"));
    }
}
