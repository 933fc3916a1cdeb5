//! Move directions and the line geometry they induce.

use crate::error::ParseDirectionError;
use crate::game::grid::SIZE;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The edge tiles slide toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Toward row 0.
    Up,
    /// Toward row 3.
    Down,
    /// Toward column 0.
    Left,
    /// Toward column 3.
    Right,
}

impl Direction {
    /// All four directions in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Board positions of line `index`, starting at the target edge.
    ///
    /// For `Left`/`Right` line `index` is a row, for `Up`/`Down` a column.
    /// Position 0 of the returned array always touches the target edge.
    #[must_use]
    pub const fn line(self, index: usize) -> [(usize, usize); SIZE] {
        let mut cells = [(0, 0); SIZE];
        let mut k = 0;
        while k < SIZE {
            let far = SIZE - 1 - k;
            cells[k] = match self {
                Direction::Up => (k, index),
                Direction::Down => (far, index),
                Direction::Left => (index, k),
                Direction::Right => (index, far),
            };
            k += 1;
        }
        cells
    }

    /// The direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Parse a compact move script such as `"lurd"` or `"left,up down"`.
    ///
    /// # Errors
    ///
    /// Returns the first token that is not a direction.
    pub fn parse_sequence(script: &str) -> Result<Vec<Self>, ParseDirectionError> {
        let tokens: Vec<&str> = script
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .collect();

        // A single run of letters like "lurd" is one direction per letter.
        if let [word] = tokens.as_slice()
            && word.parse::<Self>().is_err()
        {
            return word
                .chars()
                .map(|c| c.to_string().parse())
                .collect();
        }

        tokens.iter().map(|t| t.parse()).collect()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "u" => Ok(Direction::Up),
            "down" | "d" => Ok(Direction::Down),
            "left" | "l" => Ok(Direction::Left),
            "right" | "r" => Ok(Direction::Right),
            _ => Err(ParseDirectionError {
                input: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_starts_at_target_edge() {
        assert_eq!(Direction::Left.line(2), [(2, 0), (2, 1), (2, 2), (2, 3)]);
        assert_eq!(Direction::Right.line(2), [(2, 3), (2, 2), (2, 1), (2, 0)]);
        assert_eq!(Direction::Up.line(1), [(0, 1), (1, 1), (2, 1), (3, 1)]);
        assert_eq!(Direction::Down.line(1), [(3, 1), (2, 1), (1, 1), (0, 1)]);
    }

    #[test]
    fn test_lines_cover_board_once() {
        for direction in Direction::ALL {
            let mut seen = [[false; SIZE]; SIZE];
            for index in 0..SIZE {
                for (row, col) in direction.line(index) {
                    assert!(!seen[row][col], "{direction} visits ({row},{col}) twice");
                    seen[row][col] = true;
                }
            }
            assert!(seen.iter().flatten().all(|&s| s));
        }
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!("Up".parse::<Direction>().unwrap(), Direction::Up);
        assert_eq!("d".parse::<Direction>().unwrap(), Direction::Down);
        assert_eq!(" LEFT ".parse::<Direction>().unwrap(), Direction::Left);
        assert!("north".parse::<Direction>().is_err());
    }

    #[test]
    fn test_parse_sequence() {
        assert_eq!(
            Direction::parse_sequence("lurd").unwrap(),
            vec![
                Direction::Left,
                Direction::Up,
                Direction::Right,
                Direction::Down
            ]
        );
        assert_eq!(
            Direction::parse_sequence("left, up down").unwrap(),
            vec![Direction::Left, Direction::Up, Direction::Down]
        );
        assert_eq!(
            Direction::parse_sequence("down").unwrap(),
            vec![Direction::Down]
        );
        assert!(Direction::parse_sequence("lxr").is_err());
        assert!(Direction::parse_sequence("").unwrap().is_empty());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Direction::Right).unwrap(), "\"right\"");
        let d: Direction = serde_json::from_str("\"up\"").unwrap();
        assert_eq!(d, Direction::Up);
    }

    #[test]
    fn test_opposite() {
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
            assert_ne!(direction.opposite(), direction);
        }
    }
}
