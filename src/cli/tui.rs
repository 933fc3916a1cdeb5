//! Shared ratatui drawing and terminal setup for `play` and `replay`.

use super::CliError;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io::{stdout, Stdout};
use tilemerge::game::SIZE;
use tilemerge::{GameState, GameStatus, Grid};

/// Terminal type used by the CLI.
pub(super) type Term = Terminal<CrosstermBackend<Stdout>>;

/// Width of one cell in columns.
const CELL_WIDTH: u16 = 8;
/// Height of one cell in rows.
const CELL_HEIGHT: u16 = 3;

/// Enter raw mode and the alternate screen.
pub(super) fn setup_terminal() -> Result<Term, CliError> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| CliError::new(e.to_string()))
}

/// Leave the alternate screen and restore the cursor.
pub(super) fn restore_terminal(terminal: &mut Term) -> Result<(), CliError> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Background and foreground for a tile.
const fn tile_style(value: u32) -> (Color, Color) {
    match value {
        0 => (Color::Rgb(205, 193, 180), Color::Rgb(205, 193, 180)),
        2 => (Color::Rgb(238, 228, 218), Color::Rgb(119, 110, 101)),
        4 => (Color::Rgb(237, 224, 200), Color::Rgb(119, 110, 101)),
        8 => (Color::Rgb(242, 177, 121), Color::White),
        16 => (Color::Rgb(245, 149, 99), Color::White),
        32 => (Color::Rgb(246, 124, 95), Color::White),
        64 => (Color::Rgb(246, 94, 59), Color::White),
        128 => (Color::Rgb(237, 207, 114), Color::White),
        256 => (Color::Rgb(237, 204, 97), Color::White),
        512 => (Color::Rgb(237, 200, 80), Color::White),
        1024 => (Color::Rgb(237, 197, 63), Color::White),
        2048 => (Color::Rgb(237, 194, 46), Color::White),
        _ => (Color::Rgb(60, 58, 50), Color::White),
    }
}

/// Board lines: each cell is a colored block with its value centered.
fn grid_lines(grid: &Grid) -> Vec<Line<'static>> {
    let width = usize::from(CELL_WIDTH);
    let mut lines = Vec::with_capacity(SIZE * usize::from(CELL_HEIGHT));

    for row in grid.rows() {
        for band in 0..CELL_HEIGHT {
            let spans: Vec<Span<'static>> = row
                .iter()
                .map(|&value| {
                    let (bg, fg) = tile_style(value);
                    let text = if band == CELL_HEIGHT / 2 && value != 0 {
                        format!("{value:^width$}")
                    } else {
                        " ".repeat(width)
                    };
                    Span::styled(
                        text,
                        Style::default().bg(bg).fg(fg).add_modifier(Modifier::BOLD),
                    )
                })
                .collect();
            lines.push(Line::from(spans));
        }
    }

    lines
}

/// Center a fixed-size rectangle inside `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Draw a full game screen: header, board, status message and footer.
pub(super) fn draw_game(f: &mut Frame<'_>, state: &GameState, title: &str, controls: &str) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(14),
        Constraint::Length(1),
        Constraint::Length(3),
    ])
    .split(f.area());

    // Header
    let header = Paragraph::new(format!(
        " {title} | Score: {} | Moves: {} ",
        state.score, state.moves
    ))
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    // Board
    #[allow(clippy::cast_possible_truncation)]
    let side = SIZE as u16;
    let board_area = centered(chunks[1], CELL_WIDTH * side + 2, CELL_HEIGHT * side + 2);
    let board = Paragraph::new(grid_lines(&state.grid)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(187, 173, 160))),
    );
    f.render_widget(board, board_area);

    // Status message, only once the game has ended
    if let Some(message) = state.status.message() {
        let color = match state.status {
            GameStatus::Won => Color::Green,
            _ => Color::Red,
        };
        let status = Paragraph::new(message)
            .alignment(Alignment::Center)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD));
        f.render_widget(status, chunks[2]);
    }

    // Footer
    let footer = Paragraph::new(controls)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_lines_shape() {
        let lines = grid_lines(&Grid::initial());
        assert_eq!(lines.len(), SIZE * usize::from(CELL_HEIGHT));
        assert!(lines.iter().all(|line| line.spans.len() == SIZE));
    }

    #[test]
    fn test_centered_fits() {
        let area = Rect::new(0, 0, 10, 4);
        let rect = centered(area, 40, 20);
        assert_eq!(rect, area);

        let rect = centered(Rect::new(0, 0, 20, 10), 10, 4);
        assert_eq!((rect.x, rect.y), (5, 3));
    }
}
