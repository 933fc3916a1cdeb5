//! Batch runner for automatic games.
//!
//! Provides a pure function interface: `(seed, strategy, config) -> GameResult`
//!
//! Each game owns its own seeded generator, so results depend only on the
//! inputs and games can run on any thread in any order.

// Statistics convert counts to floats
#![allow(clippy::cast_precision_loss)]

use crate::game::{Direction, GameConfig, GameState, GameStatus, Grid, MoveOutcome, SeededRng};
use crate::replay::Recording;
use crate::strategy::Strategy;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Configuration for automatic play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchConfig {
    /// Maximum board-changing moves before a game is abandoned.
    pub max_moves: u32,
    /// Rule set.
    pub game: GameConfig,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_moves: 10_000,
            game: GameConfig::default(),
        }
    }
}

/// Final result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// The seed used for this game.
    pub seed: u64,
    /// Status when play stopped.
    pub status: GameStatus,
    /// Final score.
    pub final_score: u64,
    /// Largest tile on the final board.
    pub max_tile: u32,
    /// Board-changing moves made.
    pub moves: u32,
    /// Final board.
    pub grid: Grid,
    /// Play stopped because no move was possible while the rules still
    /// reported the game in progress.
    pub stuck: bool,
}

/// Play one game to completion.
///
/// # Determinism
///
/// Given the same seed, strategy and config, this function always produces
/// the same `GameResult`.
#[must_use]
pub fn run_game(seed: u64, strategy: Strategy, config: &BatchConfig) -> GameResult {
    play(seed, strategy, config, |_| {})
}

/// Play one game and keep every input, for saving and replay.
#[must_use]
pub fn record_game(seed: u64, strategy: Strategy, config: &BatchConfig) -> (GameResult, Recording) {
    let mut recording = Recording::new(seed, config.game);
    let result = play(seed, strategy, config, |direction| recording.push(direction));
    (result, recording)
}

/// Apply a fixed list of inputs, stopping early if the game ends.
///
/// Inputs that do not change the board are kept in the recording but do not
/// count as moves.
#[must_use]
pub fn run_script(seed: u64, script: &[Direction], config: &GameConfig) -> (GameResult, Recording) {
    let mut rng = SeededRng::new(seed);
    let mut state = GameState::new(config);
    let mut recording = Recording::new(seed, *config);

    for &direction in script {
        let turn = state.advance(direction, config, &mut rng);
        if turn.outcome == MoveOutcome::Ignored {
            break;
        }
        recording.push(direction);
        state = turn.state;
    }

    (result_from(seed, &state, false), recording)
}

fn play(
    seed: u64,
    strategy: Strategy,
    config: &BatchConfig,
    mut on_move: impl FnMut(Direction),
) -> GameResult {
    // Strategy and spawns draw from separate streams so that swapping the
    // strategy does not perturb tile placement.
    let mut spawn_rng = SeededRng::new(seed);
    let mut choice_rng = SeededRng::new(seed ^ 0x9E37_79B9_7F4A_7C15);
    let mut state = GameState::new(&config.game);
    let mut stuck = false;

    while !state.is_finished() && state.moves < config.max_moves {
        let Some(direction) = strategy.choose(state.grid, &mut choice_rng) else {
            stuck = true;
            break;
        };
        on_move(direction);
        state = state.advance(direction, &config.game, &mut spawn_rng).state;
    }

    debug!(seed, %strategy, score = state.score, moves = state.moves, "game complete");
    result_from(seed, &state, stuck)
}

fn result_from(seed: u64, state: &GameState, stuck: bool) -> GameResult {
    GameResult {
        seed,
        status: state.status,
        final_score: state.score,
        max_tile: state.grid.max_tile(),
        moves: state.moves,
        grid: state.grid,
        stuck,
    }
}

/// Aggregated statistics over many games.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchStats {
    /// Total games played.
    pub games_played: u64,
    /// Games that ended `Won`.
    pub wins: u64,
    /// Games that ended `Over`.
    pub losses: u64,
    /// Games that stopped while still in progress.
    pub unfinished: u64,
    /// Highest final score seen.
    pub best_score: u64,
    /// Games reaching each max tile.
    pub max_tiles: BTreeMap<u32, u64>,
    /// Total score across all games.
    total_score: u64,
    /// Score sum of squares for std dev calculation.
    score_sq_sum: f64,
    /// Total moves across all games.
    total_moves: u64,
}

impl BatchStats {
    /// Create empty stats.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a game result to the stats.
    pub fn add_result(&mut self, result: &GameResult) {
        self.games_played += 1;
        match result.status {
            GameStatus::Won => self.wins += 1,
            GameStatus::Over => self.losses += 1,
            GameStatus::InProgress => self.unfinished += 1,
        }
        self.best_score = self.best_score.max(result.final_score);
        *self.max_tiles.entry(result.max_tile).or_insert(0) += 1;
        self.total_score += result.final_score;
        self.score_sq_sum += (result.final_score as f64).powi(2);
        self.total_moves += u64::from(result.moves);
    }

    /// Merge stats gathered on another thread.
    pub fn merge(&mut self, other: &Self) {
        self.games_played += other.games_played;
        self.wins += other.wins;
        self.losses += other.losses;
        self.unfinished += other.unfinished;
        self.best_score = self.best_score.max(other.best_score);
        for (&tile, &count) in &other.max_tiles {
            *self.max_tiles.entry(tile).or_insert(0) += count;
        }
        self.total_score += other.total_score;
        self.score_sq_sum += other.score_sq_sum;
        self.total_moves += other.total_moves;
    }

    /// Fraction of games won (0.0-1.0).
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.wins as f64 / self.games_played as f64
    }

    /// Mean final score.
    #[must_use]
    pub fn avg_score(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_score as f64 / self.games_played as f64
    }

    /// Final score standard deviation.
    #[must_use]
    pub fn score_std_dev(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        let n = self.games_played as f64;
        let mean = self.avg_score();
        let variance = (self.score_sq_sum / n) - (mean * mean);
        if variance < 0.0 { 0.0 } else { variance.sqrt() }
    }

    /// Mean number of moves per game.
    #[must_use]
    pub fn avg_moves(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_moves as f64 / self.games_played as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Rules;
    use crate::replay::ReplayEngine;

    #[test]
    fn test_batch_config_default() {
        let config = BatchConfig::default();
        assert_eq!(config.max_moves, 10_000);
        assert_eq!(config.game, GameConfig::default());
    }

    #[test]
    fn test_run_game_deterministic() {
        let config = BatchConfig::default();
        for strategy in [Strategy::Random, Strategy::Greedy, Strategy::Corner] {
            let a = run_game(7, strategy, &config);
            let b = run_game(7, strategy, &config);
            assert_eq!(a, b, "{strategy}");
        }
    }

    #[test]
    fn test_run_game_ends() {
        let result = run_game(1, Strategy::Corner, &BatchConfig::default());
        assert!(result.status.is_finished());
        assert!(!result.stuck);
        assert!(result.final_score > 0);
        assert_eq!(result.max_tile, result.grid.max_tile());
    }

    #[test]
    fn test_max_moves_cap() {
        let config = BatchConfig {
            max_moves: 5,
            ..BatchConfig::default()
        };
        let result = run_game(3, Strategy::Greedy, &config);
        assert_eq!(result.moves, 5);
        assert_eq!(result.status, GameStatus::InProgress);
    }

    #[test]
    fn test_classic_rules_end_stuck() {
        let config = BatchConfig {
            max_moves: 100_000,
            game: GameConfig {
                rules: Rules::Classic,
                ..GameConfig::default()
            },
        };
        let result = run_game(11, Strategy::Random, &config);
        // Either the score landed on 2048 exactly or the board locked up.
        assert!(result.status == GameStatus::Won || result.stuck);
    }

    #[test]
    fn test_record_game_replays() {
        let config = BatchConfig::default();
        let (result, recording) = record_game(5, Strategy::Greedy, &config);

        let engine = ReplayEngine::new_at_move(recording.clone(), recording.len()).unwrap();
        assert_eq!(engine.state().score, result.final_score);
        assert_eq!(engine.state().grid, result.grid);
        assert_eq!(engine.state().moves, result.moves);
    }

    #[test]
    fn test_run_script_keeps_noop_inputs() {
        let config = GameConfig::default();
        // Up, then Up again: the repeat only moves if the spawn landed low.
        let script = Direction::parse_sequence("uu").unwrap();
        let (result, recording) = run_script(9, &script, &config);
        assert_eq!(recording.len(), 2);
        assert!((1..=2).contains(&result.moves));

        let engine = ReplayEngine::new_at_move(recording, 2).unwrap();
        assert_eq!(engine.state().grid, result.grid);
        assert_eq!(engine.state().moves, result.moves);
    }

    #[test]
    fn test_stats_merge() {
        let config = BatchConfig::default();
        let results: Vec<_> = (0..6).map(|s| run_game(s, Strategy::Corner, &config)).collect();

        let mut all = BatchStats::new();
        for r in &results {
            all.add_result(r);
        }

        let mut left = BatchStats::new();
        let mut right = BatchStats::new();
        for r in &results[..3] {
            left.add_result(r);
        }
        for r in &results[3..] {
            right.add_result(r);
        }
        left.merge(&right);

        assert_eq!(left.games_played, 6);
        assert_eq!(left.wins + left.losses + left.unfinished, 6);
        assert_eq!(left.max_tiles, all.max_tiles);
        assert_eq!(left.best_score, all.best_score);
        assert!((left.avg_score() - all.avg_score()).abs() < 1e-9);
    }

    #[test]
    fn test_empty_stats() {
        let stats = BatchStats::new();
        assert!(stats.win_rate().abs() < f64::EPSILON);
        assert!(stats.avg_score().abs() < f64::EPSILON);
        assert!(stats.score_std_dev().abs() < f64::EPSILON);
    }
}
