//! Game replay and viewing system.
//!
//! Because games are 100% deterministic given the spawn RNG seed, replay
//! requires only:
//! - `seed: u64` - The seed of the spawn generator
//! - `config: GameConfig` - Rule set the game was played under
//! - `moves: Vec<Direction>` - Every directional input, in order
//!
//! No grid snapshots needed. To view move N, re-run the inputs from move 0
//! to N.
//!
//! # Time Travel
//!
//! - **Forward**: Apply the next recorded input
//! - **Backward**: Re-run from move 0 to (`current` - 1)
//! - **Jump to move N**: Re-run from move 0 to N

mod render;

pub use render::{render_ansi, render_ascii, render_grid};

use crate::game::{Direction, GameConfig, GameState, MoveOutcome, SeededRng};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write as IoWrite};
use std::path::Path;
use tracing::warn;

/// Current recording file format version.
pub const RECORDING_VERSION: u32 = 1;

/// Minimal recording - seed, config and inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recording {
    /// File format version.
    pub version: u32,
    /// Seed of the spawn generator.
    pub seed: u64,
    /// Rule set.
    pub config: GameConfig,
    /// Directional inputs in the order they were given.
    pub moves: Vec<Direction>,
}

impl Recording {
    /// Create an empty recording.
    #[must_use]
    pub fn new(seed: u64, config: GameConfig) -> Self {
        Self {
            version: RECORDING_VERSION,
            seed,
            config,
            moves: Vec::new(),
        }
    }

    /// Create a recording with a known input list.
    #[must_use]
    pub fn with_moves(seed: u64, config: GameConfig, moves: Vec<Direction>) -> Self {
        Self {
            version: RECORDING_VERSION,
            seed,
            config,
            moves,
        }
    }

    /// Append an input.
    pub fn push(&mut self, direction: Direction) {
        self.moves.push(direction);
    }

    /// Number of recorded inputs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Whether no input was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Save recording to a file as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if file operations or serialization fail.
    pub fn save(&self, path: &Path) -> Result<(), ReplayError> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Load recording from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file operations fail, the JSON is malformed, or
    /// the file was written by an unsupported format version.
    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let reader = BufReader::new(File::open(path)?);
        let recording: Self = serde_json::from_reader(reader)?;
        if recording.version != RECORDING_VERSION {
            warn!(
                path = %path.display(),
                version = recording.version,
                "unsupported recording version"
            );
            return Err(ReplayError::UnsupportedVersion(recording.version));
        }
        Ok(recording)
    }
}

/// Error type for replay operations.
#[derive(Debug)]
pub enum ReplayError {
    /// Move index out of bounds.
    MoveOutOfBounds {
        /// Requested move index.
        requested: usize,
        /// Number of recorded moves.
        total: usize,
    },
    /// Every recorded input has been applied.
    Finished,
    /// Reading or writing the recording failed.
    Io(io::Error),
    /// The recording is not valid JSON.
    Json(serde_json::Error),
    /// The recording uses a format version this build cannot read.
    UnsupportedVersion(u32),
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MoveOutOfBounds { requested, total } => {
                write!(f, "Move {requested} out of bounds (recording has {total})")
            }
            Self::Finished => write!(f, "Replay is already at the last move"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Json(e) => write!(f, "Invalid recording: {e}"),
            Self::UnsupportedVersion(v) => write!(
                f,
                "Unsupported recording version {v} (expected {RECORDING_VERSION})"
            ),
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ReplayError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ReplayError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Replay engine - steps through a game deterministically.
///
/// Since games are deterministic, this engine can:
/// - Step forward by applying one recorded input
/// - Step backward by replaying from move 0
/// - Jump to any move by replaying from move 0
#[derive(Debug, Clone)]
pub struct ReplayEngine {
    /// The recording being replayed.
    recording: Recording,
    /// Current game state.
    state: GameState,
    /// Spawn generator, positioned after the inputs applied so far.
    rng: SeededRng,
    /// Number of recorded inputs applied.
    current: usize,
    /// Outcome of the most recent input, if any.
    last_outcome: Option<MoveOutcome>,
}

impl ReplayEngine {
    /// Create a new replay engine from a recording, starting at move 0.
    #[must_use]
    pub fn new(recording: Recording) -> Self {
        let state = GameState::new(&recording.config);
        Self {
            rng: SeededRng::new(recording.seed),
            recording,
            state,
            current: 0,
            last_outcome: None,
        }
    }

    /// Create a new replay engine positioned after `target` inputs.
    ///
    /// # Errors
    ///
    /// Returns an error if `target` exceeds the recording length.
    pub fn new_at_move(recording: Recording, target: usize) -> Result<Self, ReplayError> {
        if target > recording.len() {
            return Err(ReplayError::MoveOutOfBounds {
                requested: target,
                total: recording.len(),
            });
        }

        let mut engine = Self::new(recording);
        while engine.current < target {
            engine.apply_next();
        }
        Ok(engine)
    }

    /// Get the recording.
    #[must_use]
    pub fn recording(&self) -> &Recording {
        &self.recording
    }

    /// Number of inputs applied so far.
    #[must_use]
    pub fn move_index(&self) -> usize {
        self.current
    }

    /// Current game state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Outcome of the most recently applied input.
    #[must_use]
    pub fn last_outcome(&self) -> Option<MoveOutcome> {
        self.last_outcome
    }

    /// Check if every recorded input has been applied.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.current >= self.recording.len()
    }

    /// Step forward one input.
    ///
    /// # Errors
    ///
    /// Returns an error if every input has already been applied.
    pub fn step_forward(&mut self) -> Result<MoveOutcome, ReplayError> {
        if self.is_finished() {
            return Err(ReplayError::Finished);
        }
        Ok(self.apply_next())
    }

    /// Step backward one input.
    ///
    /// This replays from move 0 to (`current` - 1).
    ///
    /// # Errors
    ///
    /// Returns an error if already at move 0.
    pub fn step_backward(&mut self) -> Result<(), ReplayError> {
        if self.current == 0 {
            return Err(ReplayError::MoveOutOfBounds {
                requested: 0,
                total: self.recording.len(),
            });
        }

        self.goto_move(self.current - 1)
    }

    /// Jump to a specific move.
    ///
    /// # Errors
    ///
    /// Returns an error if the move is out of bounds.
    pub fn goto_move(&mut self, target: usize) -> Result<(), ReplayError> {
        let recording = self.recording.clone();
        *self = Self::new_at_move(recording, target)?;
        Ok(())
    }

    /// Render current state to plain text.
    #[must_use]
    pub fn render_ascii(&self) -> String {
        render_ascii(&self.state)
    }

    /// Apply the next recorded input. Caller checks bounds.
    fn apply_next(&mut self) -> MoveOutcome {
        let direction = self.recording.moves[self.current];
        let turn = self
            .state
            .advance(direction, &self.recording.config, &mut self.rng);
        self.state = turn.state;
        self.current += 1;
        self.last_outcome = Some(turn.outcome);
        turn.outcome
    }
}
