//! Output formatting utilities for CLI.

// Allow format! with push_str for readability
#![allow(clippy::format_push_string)]

use serde::Serialize;
use tilemerge::batch::{BatchStats, GameResult};
use tilemerge::replay::render_grid;
use tilemerge::{Direction, Grid, MoveResult};

/// JSON-serializable game result.
#[derive(Debug, Serialize)]
pub(super) struct JsonGameResult {
    /// Spawn seed used.
    pub(super) seed: u64,
    /// How moves were chosen ("script" or a strategy name).
    pub(super) driver: String,
    /// Final status.
    pub(super) status: String,
    /// Final score.
    pub(super) score: u64,
    /// Largest tile.
    pub(super) max_tile: u32,
    /// Board-changing moves made.
    pub(super) moves: u32,
    /// Inputs given, including ones that changed nothing.
    pub(super) inputs: usize,
    /// Final board.
    pub(super) grid: Grid,
    /// Whether play stopped with no legal move.
    pub(super) stuck: bool,
}

impl JsonGameResult {
    /// Create from a `GameResult`.
    pub(super) fn from_game_result(result: &GameResult, driver: &str, inputs: usize) -> Self {
        Self {
            seed: result.seed,
            driver: driver.to_string(),
            status: result.status.to_string(),
            score: result.final_score,
            max_tile: result.max_tile,
            moves: result.moves,
            inputs,
            grid: result.grid,
            stuck: result.stuck,
        }
    }
}

/// Format a game result as human-readable text.
pub(super) fn format_text(result: &GameResult, driver: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Game Result (seed: {}, {driver})\n", result.seed));
    output.push_str(&format!("  Status: {}", result.status));
    if result.stuck {
        output.push_str(" (no legal move left)");
    }
    output.push('\n');
    output.push_str(&format!("  Score: {}\n", result.final_score));
    output.push_str(&format!("  Max tile: {}\n", result.max_tile));
    output.push_str(&format!("  Moves: {}\n\n", result.moves));
    output.push_str(&render_grid(&result.grid));
    if let Some(message) = result.status.message() {
        output.push_str(message);
        output.push('\n');
    }

    output
}

/// JSON-serializable single move.
#[derive(Debug, Serialize)]
pub(super) struct JsonShiftResult {
    /// Board before the move.
    pub(super) input: Grid,
    /// Direction applied.
    pub(super) direction: Direction,
    /// Board after the move.
    pub(super) grid: Grid,
    /// Score gained.
    pub(super) score: u64,
    /// Whether anything changed.
    pub(super) moved: bool,
}

impl JsonShiftResult {
    /// Create from a move result.
    pub(super) fn new(input: Grid, direction: Direction, result: &MoveResult) -> Self {
        Self {
            input,
            direction,
            grid: result.grid,
            score: result.score,
            moved: result.moved,
        }
    }
}

/// Format a single move as text.
pub(super) fn format_shift_text(direction: Direction, result: &MoveResult) -> String {
    let mut output = render_grid(&result.grid);
    output.push_str(&format!(
        "Direction: {direction}  Score: +{}  Moved: {}\n",
        result.score,
        if result.moved { "yes" } else { "no" }
    ));
    output.push_str(&format!("Grid: {}\n", result.grid));
    output
}

/// JSON-serializable batch result.
#[derive(Debug, Serialize)]
pub(super) struct JsonBatchResult {
    /// Strategy used.
    strategy: String,
    /// Total games played.
    games_played: u64,
    /// Number of wins.
    wins: u64,
    /// Number of losses.
    losses: u64,
    /// Games stopped while in progress.
    unfinished: u64,
    /// Win rate (0.0-1.0).
    win_rate: f64,
    /// Average score.
    avg_score: f64,
    /// Score standard deviation.
    score_std_dev: f64,
    /// Best score.
    best_score: u64,
    /// Average moves per game.
    avg_moves: f64,
    /// Games per max tile, ascending.
    max_tiles: Vec<JsonTileCount>,
}

/// One row of the max-tile histogram.
#[derive(Debug, Serialize)]
pub(super) struct JsonTileCount {
    /// Tile value.
    tile: u32,
    /// Games ending with this max tile.
    games: u64,
}

impl JsonBatchResult {
    /// Create from stats.
    pub(super) fn from_stats(stats: &BatchStats, strategy: &str) -> Self {
        Self {
            strategy: strategy.to_string(),
            games_played: stats.games_played,
            wins: stats.wins,
            losses: stats.losses,
            unfinished: stats.unfinished,
            win_rate: stats.win_rate(),
            avg_score: stats.avg_score(),
            score_std_dev: stats.score_std_dev(),
            best_score: stats.best_score,
            avg_moves: stats.avg_moves(),
            max_tiles: stats
                .max_tiles
                .iter()
                .map(|(&tile, &games)| JsonTileCount { tile, games })
                .collect(),
        }
    }
}

/// Format batch stats as human-readable text.
#[allow(clippy::cast_precision_loss)]
pub(super) fn format_batch_text(stats: &BatchStats, strategy: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Batch Results ({} games, {strategy})\n",
        stats.games_played
    ));
    output.push_str("========================================\n\n");

    output.push_str(&format!(
        "Won: {} ({:.1}%)  Lost: {}  Unfinished: {}\n",
        stats.wins,
        stats.win_rate() * 100.0,
        stats.losses,
        stats.unfinished
    ));
    output.push_str(&format!(
        "Average Score: {:.1} (+/- {:.1})  Best: {}\n",
        stats.avg_score(),
        stats.score_std_dev(),
        stats.best_score
    ));
    output.push_str(&format!("Average Moves: {:.0}\n\n", stats.avg_moves()));

    output.push_str("Max Tile Reached:\n");
    for (tile, games) in &stats.max_tiles {
        let share = if stats.games_played == 0 {
            0.0
        } else {
            *games as f64 / stats.games_played as f64 * 100.0
        };
        output.push_str(&format!("  {tile:>6}: {games} ({share:.1}%)\n"));
    }

    output
}

/// Format batch stats as CSV, one row per max tile.
pub(super) fn format_batch_csv(stats: &BatchStats, strategy: &str) -> String {
    let mut output = String::new();

    // Header
    output.push_str("strategy,max_tile,games,win_rate,avg_score,score_std_dev\n");

    // Data rows
    for (tile, games) in &stats.max_tiles {
        output.push_str(&format!(
            "{strategy},{tile},{games},{:.4},{:.2},{:.2}\n",
            stats.win_rate(),
            stats.avg_score(),
            stats.score_std_dev()
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilemerge::batch::{run_game, BatchConfig};
    use tilemerge::{apply_move, Strategy};

    #[test]
    fn test_format_text_mentions_score() {
        let result = run_game(1, Strategy::Corner, &BatchConfig::default());
        let text = format_text(&result, "corner");
        assert!(text.contains(&format!("Score: {}", result.final_score)));
        assert!(text.contains("seed: 1"));
    }

    #[test]
    fn test_shift_text() {
        let grid: Grid = "2,2,0,0/0,0,0,0/0,0,0,0/0,0,0,0".parse().unwrap();
        let result = apply_move(grid, Direction::Left);
        let text = format_shift_text(Direction::Left, &result);
        assert!(text.contains("Score: +4"));
        assert!(text.contains("Grid: 4,0,0,0/"));
    }

    #[test]
    fn test_batch_csv_rows() {
        let mut stats = BatchStats::new();
        for seed in 0..4 {
            stats.add_result(&run_game(seed, Strategy::Corner, &BatchConfig::default()));
        }
        let csv = format_batch_csv(&stats, "corner");
        assert_eq!(csv.lines().count(), 1 + stats.max_tiles.len());
        assert!(csv.starts_with("strategy,"));
    }
}
