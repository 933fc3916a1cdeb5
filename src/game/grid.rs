//! The 4×4 board.

use crate::error::GridError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Side length of the board.
pub const SIZE: usize = 4;

/// Largest tile a 4×4 board can ever hold (2^17).
pub const MAX_TILE: u32 = 1 << 17;

/// Raw cell storage, row-major.
pub type Cells = [[u32; SIZE]; SIZE];

/// Check whether a value may appear in a cell: 0, or a power of two from 2
/// up to [`MAX_TILE`].
#[must_use]
#[inline]
pub const fn is_valid_tile(value: u32) -> bool {
    value == 0 || (value >= 2 && value <= MAX_TILE && value.is_power_of_two())
}

/// A 4×4 board of tile values.
///
/// `0` marks an empty cell; every other cell holds a power of two between 2
/// and [`MAX_TILE`].
/// Grids are small `Copy` values: every operation returns a new grid and
/// the caller's copy is never touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Cells", into = "Cells")]
pub struct Grid {
    cells: Cells,
}

impl Grid {
    /// A grid with no tiles.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            cells: [[0; SIZE]; SIZE],
        }
    }

    /// The fixed starting placement: 2 and 4 alternating down the diagonal.
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            cells: [[2, 0, 0, 0], [0, 4, 0, 0], [0, 0, 2, 0], [0, 0, 0, 4]],
        }
    }

    /// Build a grid from rows, validating every cell.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidTile`] for the first cell that is not 0
    /// or a power of two in `2..=MAX_TILE`.
    pub fn from_rows(cells: Cells) -> Result<Self, GridError> {
        for (row, line) in cells.iter().enumerate() {
            for (col, &value) in line.iter().enumerate() {
                if !is_valid_tile(value) {
                    return Err(GridError::InvalidTile { row, col, value });
                }
            }
        }
        Ok(Self { cells })
    }

    /// Wrap cells already known to be valid.
    pub(crate) const fn from_cells(cells: Cells) -> Self {
        Self { cells }
    }

    /// Copy of the underlying rows.
    #[must_use]
    pub const fn rows(&self) -> Cells {
        self.cells
    }

    /// Value at `(row, col)`. Panics if either index is >= 4.
    #[must_use]
    #[inline]
    pub const fn get(&self, row: usize, col: usize) -> u32 {
        self.cells[row][col]
    }

    /// Return a copy with one cell replaced.
    ///
    /// # Panics
    ///
    /// Panics if the position is off the board or `value` is not a valid tile.
    #[must_use]
    pub fn with_cell(mut self, row: usize, col: usize, value: u32) -> Self {
        assert!(is_valid_tile(value), "invalid tile value {value}");
        self.cells[row][col] = value;
        self
    }

    /// Iterate over `((row, col), value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), u32)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, line)| {
            line.iter()
                .enumerate()
                .map(move |(col, &value)| ((row, col), value))
        })
    }

    /// Positions of empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.iter()
            .filter(|&(_, value)| value == 0)
            .map(|(pos, _)| pos)
    }

    /// Number of empty cells.
    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.empty_cells().count()
    }

    /// Whether every cell holds a tile.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }

    /// Largest tile on the board (0 for an empty board).
    #[must_use]
    pub fn max_tile(&self) -> u32 {
        self.iter().map(|(_, value)| value).max().unwrap_or(0)
    }

    /// Sum of all tile values.
    #[must_use]
    pub fn tile_sum(&self) -> u64 {
        self.iter().map(|(_, value)| u64::from(value)).sum()
    }
}

impl TryFrom<Cells> for Grid {
    type Error = GridError;

    fn try_from(cells: Cells) -> Result<Self, Self::Error> {
        Self::from_rows(cells)
    }
}

impl From<Grid> for Cells {
    fn from(grid: Grid) -> Self {
        grid.cells
    }
}

impl FromStr for Grid {
    type Err = GridError;

    /// Parse `"2,2,0,0/0,0,0,0/0,0,0,0/0,0,0,0"`.
    ///
    /// Rows are separated by `/` or newlines, cells by `,` or whitespace.
    /// `.` is accepted as an empty cell.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .split(['/', '\n'])
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.len() != SIZE {
            return Err(GridError::RowCount(rows.len()));
        }

        let mut cells = [[0; SIZE]; SIZE];
        for (row, line) in rows.iter().enumerate() {
            let tokens: Vec<&str> = line
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|t| !t.is_empty())
                .collect();
            if tokens.len() != SIZE {
                return Err(GridError::ColumnCount {
                    row,
                    found: tokens.len(),
                });
            }
            for (col, token) in tokens.iter().enumerate() {
                cells[row][col] = if *token == "." {
                    0
                } else {
                    token
                        .parse()
                        .map_err(|_| GridError::NotANumber { row, col })?
                };
            }
        }

        Self::from_rows(cells)
    }
}

impl fmt::Display for Grid {
    /// Compact single-line form, the inverse of [`FromStr`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, line) in self.cells.iter().enumerate() {
            if row > 0 {
                f.write_str("/")?;
            }
            for (col, value) in line.iter().enumerate() {
                if col > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{value}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_placement() {
        let grid = Grid::initial();
        assert_eq!(grid.get(0, 0), 2);
        assert_eq!(grid.get(1, 1), 4);
        assert_eq!(grid.get(2, 2), 2);
        assert_eq!(grid.get(3, 3), 4);
        assert_eq!(grid.empty_count(), 12);
        assert_eq!(grid.tile_sum(), 12);
    }

    #[test]
    fn test_valid_tiles() {
        assert!(is_valid_tile(0));
        assert!(is_valid_tile(2));
        assert!(is_valid_tile(2048));
        assert!(!is_valid_tile(1));
        assert!(!is_valid_tile(3));
        assert!(!is_valid_tile(6));
        assert!(is_valid_tile(MAX_TILE));
        assert!(!is_valid_tile(MAX_TILE * 2));
        assert!(!is_valid_tile(1 << 31));
    }

    #[test]
    fn test_from_rows_rejects_bad_tile() {
        let mut cells = [[0; SIZE]; SIZE];
        cells[2][1] = 12;
        assert_eq!(
            Grid::from_rows(cells),
            Err(GridError::InvalidTile {
                row: 2,
                col: 1,
                value: 12
            })
        );
    }

    #[test]
    fn test_parse_and_display() {
        let grid: Grid = "2,2,0,0/0,0,0,0/0,4,0,0/0,0,0,8".parse().unwrap();
        assert_eq!(grid.get(0, 1), 2);
        assert_eq!(grid.get(2, 1), 4);
        assert_eq!(grid.get(3, 3), 8);
        assert_eq!(grid.to_string(), "2,2,0,0/0,0,0,0/0,4,0,0/0,0,0,8");
    }

    #[test]
    fn test_parse_multiline_with_dots() {
        let grid: Grid = "2 . . .\n. 4 . .\n. . 2 .\n. . . 4\n".parse().unwrap();
        assert_eq!(grid, Grid::initial());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("2,2,0,0".parse::<Grid>(), Err(GridError::RowCount(1)));
        assert_eq!(
            "2,2,0/0,0,0,0/0,0,0,0/0,0,0,0".parse::<Grid>(),
            Err(GridError::ColumnCount { row: 0, found: 3 })
        );
        assert_eq!(
            "2,x,0,0/0,0,0,0/0,0,0,0/0,0,0,0".parse::<Grid>(),
            Err(GridError::NotANumber { row: 0, col: 1 })
        );
        assert!(matches!(
            "2,3,0,0/0,0,0,0/0,0,0,0/0,0,0,0".parse::<Grid>(),
            Err(GridError::InvalidTile { value: 3, .. })
        ));
    }

    #[test]
    fn test_json_validation() {
        let grid: Grid = serde_json::from_str("[[2,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,4]]").unwrap();
        assert_eq!(grid.get(3, 3), 4);
        assert_eq!(
            serde_json::to_string(&grid).unwrap(),
            "[[2,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,4]]"
        );

        assert!(serde_json::from_str::<Grid>("[[5,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,0]]").is_err());
        assert!(serde_json::from_str::<Grid>("[[2,0,0,0],[0,0,0,0]]").is_err());
    }

    #[test]
    fn test_oversized_tiles_rejected() {
        assert_eq!(
            "2147483648,2147483648,0,0/0,0,0,0/0,0,0,0/0,0,0,0".parse::<Grid>(),
            Err(GridError::InvalidTile {
                row: 0,
                col: 0,
                value: 1 << 31
            })
        );
        assert_eq!(
            "2,262144,0,0/0,0,0,0/0,0,0,0/0,0,0,0".parse::<Grid>(),
            Err(GridError::InvalidTile {
                row: 0,
                col: 1,
                value: 262_144
            })
        );
        assert!(
            serde_json::from_str::<Grid>("[[262144,2,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,0]]").is_err()
        );
        assert!(
            serde_json::from_str::<Grid>("[[2147483648,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,0]]")
                .is_err()
        );

        let top: Grid = "131072,0,0,0/0,0,0,0/0,0,0,0/0,0,0,0".parse().unwrap();
        assert_eq!(top.max_tile(), MAX_TILE);
    }

    #[test]
    fn test_empty_cells_row_major() {
        let grid = Grid::initial();
        let empties: Vec<_> = grid.empty_cells().collect();
        assert_eq!(empties.first(), Some(&(0, 1)));
        assert_eq!(empties.last(), Some(&(3, 2)));
        assert!(!empties.contains(&(1, 1)));
    }

    #[test]
    fn test_with_cell_returns_copy() {
        let grid = Grid::empty();
        let updated = grid.with_cell(1, 2, 8);
        assert_eq!(grid.get(1, 2), 0);
        assert_eq!(updated.get(1, 2), 8);
        assert_eq!(updated.max_tile(), 8);
    }
}
