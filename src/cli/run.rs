//! Run command implementation.

use super::output::{format_text, JsonGameResult};
use super::{resolve_seed, CliError, OutputFormat, RulesArg, StrategyArg};
use std::path::PathBuf;
use tilemerge::batch::{record_game, run_script, BatchConfig};
use tilemerge::replay::render_grid;
use tilemerge::{Direction, Strategy};

/// Execute the run command.
///
/// With `moves` the script is played as given; otherwise the strategy picks
/// moves until the game ends or `max_moves` is reached.
///
/// # Errors
///
/// Returns an error if the move script does not parse or the recording
/// cannot be saved.
#[allow(clippy::too_many_arguments)]
#[allow(clippy::needless_pass_by_value)]
pub(crate) fn execute(
    seed: Option<u64>,
    strategy: StrategyArg,
    moves: Option<String>,
    max_moves: u32,
    rules: RulesArg,
    format: OutputFormat,
    save: Option<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    let seed = resolve_seed(seed);
    let game = rules.config();

    let (result, recording, driver) = if let Some(script) = moves.as_deref() {
        let script = Direction::parse_sequence(script)?;
        let (result, recording) = run_script(seed, &script, &game);
        (result, recording, "script".to_string())
    } else {
        let strategy = Strategy::from(strategy);
        let config = BatchConfig { max_moves, game };
        let (result, recording) = record_game(seed, strategy, &config);
        (result, recording, strategy.name().to_string())
    };

    if !quiet && format == OutputFormat::Text {
        println!("Running game with seed {seed} ({driver})...");
        println!();
    }

    if let Some(save_path) = save {
        recording.save(&save_path).map_err(|e| {
            CliError::new(format!("Failed to save recording: {e}"))
        })?;
        if !quiet && format == OutputFormat::Text {
            println!("Recording saved to: {}", save_path.display());
            println!();
        }
    }

    match format {
        OutputFormat::Text if quiet => print!("{}", render_grid(&result.grid)),
        OutputFormat::Text => print!("{}", format_text(&result, &driver)),
        OutputFormat::Json => {
            let json_result = JsonGameResult::from_game_result(&result, &driver, recording.len());
            println!("{}", serde_json::to_string_pretty(&json_result)?);
        }
    }

    Ok(())
}
