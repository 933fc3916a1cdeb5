//! Replay command implementation.

use super::tui::{draw_game, restore_terminal, setup_terminal, Term};
use super::{CliError, ReplayFormat};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use std::path::PathBuf;
use std::time::Duration;
use tilemerge::replay::{render_ansi, render_ascii, Recording, ReplayEngine};
use tilemerge::MoveOutcome;

/// Execute the replay command.
///
/// # Errors
///
/// Returns an error if the recording cannot be loaded or `at_move` is past
/// its end.
#[allow(clippy::needless_pass_by_value)]
pub(crate) fn execute(
    recording_path: PathBuf,
    format: ReplayFormat,
    at_move: Option<usize>,
    color: bool,
) -> Result<(), CliError> {
    let recording = Recording::load(&recording_path).map_err(|e| {
        CliError::new(format!("Failed to load recording {}: {e}", recording_path.display()))
    })?;

    let engine = if let Some(target) = at_move {
        ReplayEngine::new_at_move(recording, target)?
    } else {
        ReplayEngine::new(recording)
    };

    match format {
        ReplayFormat::Tui => {
            let mut terminal = setup_terminal()?;
            let result = run_replay_tui(&mut terminal, engine);
            restore_terminal(&mut terminal)?;
            result
        }
        ReplayFormat::Text => {
            print!("{}", text_replay(engine, color));
            Ok(())
        }
    }
}

fn run_replay_tui(terminal: &mut Term, mut engine: ReplayEngine) -> Result<(), CliError> {
    let controls = " [q] Quit  [←/→] Step  [Home/End] First/last ";

    loop {
        let total = engine.recording().len();
        let title = format!(
            "Tilemerge Replay | Seed {} | Input {}/{total} | {}",
            engine.recording().seed,
            engine.move_index(),
            describe_last(&engine)
        );
        terminal
            .draw(|f| draw_game(f, engine.state(), &title, controls))
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

        // Stepping past either end is a no-op.
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => break,
            KeyCode::Right | KeyCode::Char('l') => {
                let _ = engine.step_forward();
            }
            KeyCode::Left | KeyCode::Char('h') => {
                let _ = engine.step_backward();
            }
            KeyCode::Home => engine.goto_move(0)?,
            KeyCode::End => engine.goto_move(total)?,
            _ => {}
        }
    }

    Ok(())
}

/// What the most recent input did, for the TUI header.
fn describe_last(engine: &ReplayEngine) -> String {
    let index = engine.move_index();
    let Some(outcome) = engine.last_outcome() else {
        return "start".to_string();
    };
    let direction = engine.recording().moves[index - 1];
    match outcome {
        MoveOutcome::Moved { gained, .. } => format!("{direction} +{gained}"),
        MoveOutcome::Unchanged => format!("{direction} (no change)"),
        MoveOutcome::Ignored => format!("{direction} (ignored)"),
    }
}

/// Render every step of a replay as text, optionally with ANSI colours.
#[allow(clippy::format_push_string)]
fn text_replay(mut engine: ReplayEngine, color: bool) -> String {
    let render = if color { render_ansi } else { render_ascii };
    let recording = engine.recording();
    let mut output = format!("Replay of game (seed: {})\n", recording.seed);
    output.push_str(&format!(
        "Rules: {}, win tile {}\n",
        recording.config.rules, recording.config.win_tile
    ));
    output.push_str(&format!("Inputs: {}\n\n", recording.len()));

    output.push_str(&format!("=== Move {} ===\n", engine.move_index()));
    output.push_str(&render(engine.state()));
    output.push('\n');

    while let Ok(outcome) = engine.step_forward() {
        let index = engine.move_index();
        let direction = engine.recording().moves[index - 1];
        match outcome {
            MoveOutcome::Moved { gained, spawn } => {
                output.push_str(&format!("=== Move {index}: {direction} (+{gained})"));
                if let Some(spawn) = spawn {
                    output.push_str(&format!(
                        ", spawned {} at ({}, {})",
                        spawn.value, spawn.row, spawn.col
                    ));
                }
                output.push_str(" ===\n");
            }
            MoveOutcome::Unchanged => {
                output.push_str(&format!("=== Move {index}: {direction} (no change) ===\n"));
            }
            MoveOutcome::Ignored => {
                output.push_str(&format!("=== Move {index}: {direction} (ignored) ===\n"));
            }
        }
        output.push_str(&render(engine.state()));
        output.push('\n');
    }

    output.push_str("=== END ===\n");
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilemerge::{Direction, GameConfig};

    fn sample() -> ReplayEngine {
        let moves = Direction::parse_sequence("lldr").unwrap();
        ReplayEngine::new(Recording::with_moves(4, GameConfig::default(), moves))
    }

    #[test]
    fn test_text_replay_plain_and_colored() {
        let plain = text_replay(sample(), false);
        assert!(plain.contains("=== Move 1: left"));
        assert!(plain.contains("=== Move 2: left"));
        assert!(plain.contains("=== Move 4: right"));
        assert!(plain.ends_with("=== END ===\n"));
        assert!(!plain.contains('\x1b'));

        let colored = text_replay(sample(), true);
        assert!(colored.contains('\x1b'));
    }

    #[test]
    fn test_describe_last() {
        let mut engine = sample();
        assert_eq!(describe_last(&engine), "start");
        engine.step_forward().unwrap();
        assert!(describe_last(&engine).starts_with("left +"));
        engine.goto_move(4).unwrap();
        assert!(describe_last(&engine).starts_with("right"));
    }
}
