//! Shift command: one move on a given board, no spawn.

use super::output::{format_shift_text, JsonShiftResult};
use super::{CliError, OutputFormat};
use tilemerge::{apply_move, Direction, Grid};

/// Execute the shift command.
///
/// # Errors
///
/// Returns an error if the grid or direction does not parse.
pub(crate) fn execute(grid: &str, direction: &str, format: OutputFormat) -> Result<(), CliError> {
    let input: Grid = grid.parse()?;
    let direction: Direction = direction.parse()?;
    let result = apply_move(input, direction);

    match format {
        OutputFormat::Text => print!("{}", format_shift_text(direction, &result)),
        OutputFormat::Json => {
            let json = JsonShiftResult::new(input, direction, &result);
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(())
}
