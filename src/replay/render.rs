//! Text renderer for terminal viewing, optionally with ANSI colors.

// Allow format! with push_str for readability
#![allow(clippy::format_push_string)]

use crate::game::{GameState, Grid, SIZE};

/// Width of one cell, wide enough for 131072.
const CELL_WIDTH: usize = 6;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const GRAY: &str = "\x1b[90m";

/// ANSI colors by tile exponent (2 = index 1, 4 = index 2, ...).
const TILE_COLORS: [&str; 12] = [
    GRAY,       // empty
    "\x1b[37m", // 2
    "\x1b[97m", // 4
    "\x1b[33m", // 8
    "\x1b[93m", // 16
    "\x1b[31m", // 32
    "\x1b[91m", // 64
    "\x1b[35m", // 128
    "\x1b[95m", // 256
    "\x1b[34m", // 512
    "\x1b[94m", // 1024
    "\x1b[32m", // 2048
];

/// Render a game state as plain text.
///
/// Output format:
/// ```text
/// Score: 16    Moves: 3
/// ┌──────┬──────┬──────┬──────┐
/// │     2│      │      │      │
/// ├──────┼──────┼──────┼──────┤
/// │      │     4│      │      │
/// ├──────┼──────┼──────┼──────┤
/// │      │      │     2│      │
/// ├──────┼──────┼──────┼──────┤
/// │      │      │      │     4│
/// └──────┴──────┴──────┴──────┘
/// ```
///
/// When the game has ended its message follows on the last line.
#[must_use]
pub fn render_ascii(state: &GameState) -> String {
    render(state, false)
}

/// Render a game state with ANSI colors per tile value.
#[must_use]
pub fn render_ansi(state: &GameState) -> String {
    render(state, true)
}

/// Render just the grid box, without header or message.
#[must_use]
pub fn render_grid(grid: &Grid) -> String {
    let mut output = String::new();
    render_box(&mut output, grid, false);
    output
}

fn render(state: &GameState, color: bool) -> String {
    let mut output = format!("Score: {}    Moves: {}\n", state.score, state.moves);
    render_box(&mut output, &state.grid, color);

    if let Some(message) = state.status.message() {
        if color {
            output.push_str(&format!("{BOLD}{message}{RESET}\n"));
        } else {
            output.push_str(message);
            output.push('\n');
        }
    }
    output
}

fn render_box(output: &mut String, grid: &Grid, color: bool) {
    render_border(output, '┌', '┬', '┐');
    for row in 0..SIZE {
        if row > 0 {
            render_border(output, '├', '┼', '┤');
        }
        output.push('│');
        for col in 0..SIZE {
            render_cell(output, grid.get(row, col), color);
            output.push('│');
        }
        output.push('\n');
    }
    render_border(output, '└', '┴', '┘');
}

fn render_border(output: &mut String, left: char, middle: char, right: char) {
    output.push(left);
    for col in 0..SIZE {
        if col > 0 {
            output.push(middle);
        }
        output.push_str(&"─".repeat(CELL_WIDTH));
    }
    output.push(right);
    output.push('\n');
}

fn render_cell(output: &mut String, value: u32, color: bool) {
    let text = if value == 0 {
        String::new()
    } else {
        value.to_string()
    };
    if color {
        let code = tile_color(value);
        output.push_str(&format!("{code}{text:>CELL_WIDTH$}{RESET}"));
    } else {
        output.push_str(&format!("{text:>CELL_WIDTH$}"));
    }
}

/// ANSI color for a tile; everything past 2048 shares the 2048 color.
fn tile_color(value: u32) -> &'static str {
    let exponent = if value == 0 { 0 } else { value.trailing_zeros() as usize };
    TILE_COLORS
        .get(exponent)
        .copied()
        .unwrap_or(TILE_COLORS[TILE_COLORS.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameStatus};

    #[test]
    fn test_render_ascii_initial() {
        let state = GameState::new(&GameConfig::default());
        let output = render_ascii(&state);

        assert!(output.starts_with("Score: 0    Moves: 0\n"));
        assert!(output.contains("┌"));
        assert!(output.contains("┘"));
        assert!(output.contains("│     2│      │      │      │"));
        assert!(output.contains("│      │      │      │     4│"));
        // Header, 4 rows, 5 borders.
        assert_eq!(output.lines().count(), 10);
    }

    #[test]
    fn test_render_message_when_finished() {
        let grid = Grid::empty().with_cell(0, 0, 2048);
        let state = GameState::from_grid(grid, 20_000, &GameConfig::default());
        assert_eq!(state.status, GameStatus::Won);

        let output = render_ascii(&state);
        assert!(output.trim_end().ends_with("Congratulations! You win!"));
        assert!(output.contains("│  2048│"));
    }

    #[test]
    fn test_render_ansi_has_colors() {
        let state = GameState::new(&GameConfig::default());
        let output = render_ansi(&state);
        assert!(output.contains(RESET));
        assert!(output.contains(TILE_COLORS[1]));
    }

    #[test]
    fn test_tile_color() {
        assert_eq!(tile_color(0), GRAY);
        assert_eq!(tile_color(2), TILE_COLORS[1]);
        assert_eq!(tile_color(2048), TILE_COLORS[11]);
        assert_eq!(tile_color(65536), TILE_COLORS[11]);
    }

    #[test]
    fn test_render_grid_only() {
        let output = render_grid(&Grid::empty());
        assert_eq!(output.lines().count(), 9);
        assert!(!output.contains("Score"));
    }
}
