//! CLI command implementations for Tilemerge.

pub(crate) mod batch;
pub(crate) mod logging;
pub(crate) mod play;
pub(crate) mod replay;
pub(crate) mod run;
pub(crate) mod shift;

mod output;
mod tui;

use clap::ValueEnum;
use std::error::Error;
use std::fmt;
use tilemerge::{GameConfig, Rules, Strategy};

/// Output format for the `run` and `shift` commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Output format for the `replay` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ReplayFormat {
    /// Interactive TUI.
    Tui,
    /// Plain text output.
    Text,
}

/// Output format for the `batch` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum BatchFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// Strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum StrategyArg {
    /// Random legal move.
    Random,
    /// Best immediate score.
    Greedy,
    /// Bottom-left corner preference.
    Corner,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Random => Strategy::Random,
            StrategyArg::Greedy => Strategy::Greedy,
            StrategyArg::Corner => Strategy::Corner,
        }
    }
}

/// Rule set selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum RulesArg {
    /// Win on a 2048 tile, lose when stuck.
    Standard,
    /// Win when the score lands on 2048, never lose.
    Classic,
}

impl RulesArg {
    /// Game configuration for this rule set.
    pub(crate) fn config(self) -> GameConfig {
        let rules = match self {
            RulesArg::Standard => Rules::Standard,
            RulesArg::Classic => Rules::Classic,
        };
        GameConfig {
            rules,
            ..GameConfig::default()
        }
    }
}

/// Use the given seed or derive one from the clock.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    })
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<tilemerge::replay::ReplayError> for CliError {
    fn from(e: tilemerge::replay::ReplayError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<tilemerge::GridError> for CliError {
    fn from(e: tilemerge::GridError) -> Self {
        Self::new(format!("invalid grid: {e}"))
    }
}

impl From<tilemerge::ParseDirectionError> for CliError {
    fn from(e: tilemerge::ParseDirectionError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON serialization failed: {e}"))
    }
}
