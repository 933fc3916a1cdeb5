//! Play command implementation.

use super::tui::{draw_game, restore_terminal, setup_terminal, Term};
use super::{resolve_seed, CliError, RulesArg};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tilemerge::replay::Recording;
use tilemerge::{Direction, GameConfig, GameState, MoveOutcome, SeededRng};

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Move(Direction),
    NewGame,
    Quit,
    None,
}

/// Map a key to an action.
fn action_for(key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'k') => Action::Move(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'j') => Action::Move(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'h') => Action::Move(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'l') => Action::Move(Direction::Right),
        KeyCode::Char('n') => Action::NewGame,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => Action::None,
    }
}

/// One interactive session: the live game plus recordings of earlier games.
#[derive(Debug)]
struct Session {
    config: GameConfig,
    state: GameState,
    rng: SeededRng,
    recording: Recording,
    /// Games left with `n`, oldest first. Games with no input are dropped.
    finished: Vec<Recording>,
}

impl Session {
    fn new(seed: u64, config: GameConfig) -> Self {
        Self {
            config,
            state: GameState::new(&config),
            rng: SeededRng::new(seed),
            recording: Recording::new(seed, config),
            finished: Vec::new(),
        }
    }

    /// Start the next game on seed + 1, keeping the current recording.
    fn new_game(&mut self) {
        let seed = self.recording.seed.wrapping_add(1);
        let previous = std::mem::replace(&mut self.recording, Recording::new(seed, self.config));
        if !previous.is_empty() {
            self.finished.push(previous);
        }
        self.state = GameState::new(&self.config);
        self.rng = SeededRng::new(seed);
        tracing::info!(seed, "new game");
    }

    /// Where each recording goes: earlier games to `FILE-1`, `FILE-2`, ...
    /// and the current game to `FILE`.
    fn save_plan(&self, path: &Path) -> Vec<(PathBuf, &Recording)> {
        self.finished
            .iter()
            .enumerate()
            .map(|(i, recording)| (numbered_path(path, i + 1), recording))
            .chain(std::iter::once((path.to_path_buf(), &self.recording)))
            .collect()
    }

    /// Forward a direction unless the game has ended.
    fn apply(&mut self, direction: Direction) {
        if self.state.is_finished() {
            return;
        }
        let turn = self.state.advance(direction, &self.config, &mut self.rng);
        if turn.outcome != MoveOutcome::Ignored {
            self.recording.push(direction);
        }
        self.state = turn.state;
    }
}

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the terminal cannot be driven or the recording
/// cannot be saved.
#[allow(clippy::needless_pass_by_value)]
pub(crate) fn execute(
    seed: Option<u64>,
    rules: RulesArg,
    save: Option<PathBuf>,
) -> Result<(), CliError> {
    let seed = resolve_seed(seed);
    let mut session = Session::new(seed, rules.config());
    tracing::info!(seed, "starting interactive game");

    let mut terminal = setup_terminal()?;
    let result = run_loop(&mut terminal, &mut session);
    restore_terminal(&mut terminal)?;
    result?;

    if let Some(path) = save {
        for (target, recording) in session.save_plan(&path) {
            recording.save(&target).map_err(|e| {
                CliError::new(format!("Failed to save recording {}: {e}", target.display()))
            })?;
            println!("Recording saved to: {}", target.display());
        }
    }

    Ok(())
}

/// `games.json` with `n = 2` becomes `games-2.json`.
fn numbered_path(path: &Path, n: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map_or_else(String::new, |s| s.to_string_lossy().into_owned());
    let name = match path.extension() {
        Some(ext) => format!("{stem}-{n}.{}", ext.to_string_lossy()),
        None => format!("{stem}-{n}"),
    };
    path.with_file_name(name)
}

fn run_loop(terminal: &mut Term, session: &mut Session) -> Result<(), CliError> {
    let controls = " [←↑↓→/wasd/hjkl] Move  [n] New game  [q] Quit ";

    loop {
        let title = format!("Tilemerge | Seed {}", session.recording.seed);
        terminal
            .draw(|f| draw_game(f, &session.state, &title, controls))
            .map_err(|e| CliError::new(e.to_string()))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match action_for(key) {
            Action::Move(direction) => session.apply(direction),
            Action::NewGame => session.new_game(),
            Action::Quit => return Ok(()),
            Action::None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(action_for(press(KeyCode::Up)), Action::Move(Direction::Up));
        assert_eq!(action_for(press(KeyCode::Char('a'))), Action::Move(Direction::Left));
        assert_eq!(action_for(press(KeyCode::Char('j'))), Action::Move(Direction::Down));
        assert_eq!(action_for(press(KeyCode::Char('l'))), Action::Move(Direction::Right));
        assert_eq!(action_for(press(KeyCode::Char('n'))), Action::NewGame);
        assert_eq!(action_for(press(KeyCode::Esc)), Action::Quit);
        assert_eq!(action_for(press(KeyCode::Char('x'))), Action::None);
        assert_eq!(
            action_for(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
    }

    #[test]
    fn test_session_records_and_replays() {
        let config = GameConfig::default();
        let mut session = Session::new(9, config);
        for direction in [Direction::Down, Direction::Left, Direction::Down, Direction::Right] {
            session.apply(direction);
        }

        let mut engine = tilemerge::replay::ReplayEngine::new(session.recording.clone());
        while engine.step_forward().is_ok() {}
        assert_eq!(engine.state(), &session.state);
    }

    #[test]
    fn test_new_game_keeps_earlier_recordings() {
        let mut session = Session::new(20, GameConfig::default());
        session.apply(Direction::Left);
        session.apply(Direction::Down);
        let first = session.recording.clone();

        session.new_game();
        assert_eq!(session.recording.seed, 21);
        assert!(session.recording.is_empty());
        assert_eq!(session.state, GameState::new(&session.config));

        // A game abandoned before any input is not kept.
        session.new_game();
        session.apply(Direction::Up);

        let plan = session.save_plan(Path::new("out/games.json"));
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].0, PathBuf::from("out/games-1.json"));
        assert_eq!(plan[0].1, &first);
        assert_eq!(plan[1].0, PathBuf::from("out/games.json"));
        assert_eq!(plan[1].1.seed, 22);
        assert_eq!(plan[1].1.len(), 1);
    }

    #[test]
    fn test_numbered_path() {
        assert_eq!(numbered_path(Path::new("a/b.json"), 3), PathBuf::from("a/b-3.json"));
        assert_eq!(numbered_path(Path::new("rec"), 1), PathBuf::from("rec-1"));
    }

    #[test]
    fn test_saved_games_replay() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let mut session = Session::new(5, GameConfig::default());
        session.apply(Direction::Right);
        session.new_game();
        session.apply(Direction::Down);

        for (target, recording) in session.save_plan(&path) {
            recording.save(&target).unwrap();
        }
        let earlier = Recording::load(&dir.path().join("session-1.json")).unwrap();
        let last = Recording::load(&path).unwrap();
        assert_eq!(earlier.seed, 5);
        assert_eq!(last.seed, 6);
        assert_eq!(last, session.recording);
    }
}
