use console::Term;
use std::io::{self, Write};
use crate::core::{Board, GameEvent, Mark, Phase};
use crate::ui::ThemeManager;

const CELL_WIDTH: usize = 3;

/// How an event changes the status line under the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusUpdate {
    Keep,
    Clear,
    Show(String),
}

/// Severity of the status line, mapped onto theme style names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Status,
    Success,
    Warning,
    Error,
}

impl StatusKind {
    pub fn style_name(self) -> &'static str {
        match self {
            StatusKind::Status => "status",
            StatusKind::Success => "success",
            StatusKind::Warning => "warning",
            StatusKind::Error => "error",
        }
    }
}

pub fn status_for_event(event: &GameEvent) -> StatusUpdate {
    match event {
        GameEvent::PhaseChanged(Phase::Resumed) => StatusUpdate::Clear,
        GameEvent::PhaseChanged(_) => StatusUpdate::Keep,
        GameEvent::TurnChanged(player) => {
            StatusUpdate::Show(format!("Player {}'s move", player.id.number()))
        }
        GameEvent::GameFinished { winner: Some(player) } => {
            StatusUpdate::Show(format!("Player {} wins", player.id.number()))
        }
        GameEvent::GameFinished { winner: None } => StatusUpdate::Show("Draw".to_string()),
    }
}

/// Lays the board out as text. `style` receives each fragment and a
/// style name (`cross`, `circle`, `grid`, `coordinates`).
pub fn format_board<F>(board: &Board, show_coordinates: bool, style: F) -> String
where
    F: Fn(&str, &str) -> String,
{
    let margin = if show_coordinates { " ".repeat(CELL_WIDTH) } else { String::new() };
    let mut lines = Vec::with_capacity(board.rows() * 2 + 1);

    if show_coordinates {
        let header: Vec<String> = (1..=board.columns())
            .map(|col| format!("{:^width$}", col, width = CELL_WIDTH))
            .collect();
        let header = format!("{}{}", margin, header.join(" "));
        lines.push(style(header.trim_end(), "coordinates"));
    }

    let separator = vec!["─".repeat(CELL_WIDTH); board.columns()].join("┼");
    let divider = style("│", "grid");

    for (index, row) in board.cells().iter().enumerate() {
        if index > 0 {
            lines.push(format!("{}{}", margin, style(&separator, "grid")));
        }

        let cells: Vec<String> = row
            .iter()
            .map(|cell| {
                let symbol = cell.mark().symbol().to_string();
                let symbol = match cell.mark() {
                    Mark::Cross => style(&symbol, "cross"),
                    Mark::Circle => style(&symbol, "circle"),
                    Mark::Empty => symbol,
                };
                format!(" {} ", symbol)
            })
            .collect();

        let prefix = if show_coordinates {
            style(&format!("{:>2} ", index + 1), "coordinates")
        } else {
            String::new()
        };
        lines.push(format!("{}{}", prefix, cells.join(&divider)));
    }

    lines.join("\n")
}

pub struct Display {
    term: Term,
    theme_manager: ThemeManager,
    show_coordinates: bool,
}

impl Display {
    pub fn new(theme_manager: ThemeManager, show_coordinates: bool) -> Self {
        Self {
            term: Term::stdout(),
            theme_manager,
            show_coordinates,
        }
    }

    pub fn clear_screen(&self) -> io::Result<()> {
        self.term.clear_screen()
    }

    pub fn show_title(&self, title: &str) -> io::Result<()> {
        let styled_title = self.theme_manager.apply_style(title, "title");
        writeln!(io::stdout(), "{}", styled_title)?;
        writeln!(io::stdout())?;
        Ok(())
    }

    pub fn render_board(&self, board: &Board) -> String {
        format_board(board, self.show_coordinates, |text, style| {
            self.theme_manager.apply_style(text, style)
        })
    }

    pub fn show_board(&self, board: &Board) -> io::Result<()> {
        writeln!(io::stdout(), "{}", self.render_board(board))?;
        writeln!(io::stdout())?;
        Ok(())
    }

    pub fn show_message(&self, message: &str, style: &str) -> io::Result<()> {
        let styled_message = self.theme_manager.apply_style(message, style);
        writeln!(io::stdout(), "{}", styled_message)?;
        Ok(())
    }

    pub fn show_error(&self, error: &str) -> io::Result<()> {
        self.show_message(&format!("❌ {}", error), "error")
    }

    pub fn show_success(&self, message: &str) -> io::Result<()> {
        self.show_message(&format!("✅ {}", message), "success")
    }

    pub fn show_warning(&self, message: &str) -> io::Result<()> {
        self.show_message(&format!("⚠️ {}", message), "warning")
    }

    pub fn show_status(&self, message: &str, kind: StatusKind) -> io::Result<()> {
        match kind {
            StatusKind::Status => self.show_message(message, kind.style_name()),
            StatusKind::Success => self.show_success(message),
            StatusKind::Warning => self.show_warning(message),
            StatusKind::Error => self.show_error(message),
        }
    }

    pub fn set_theme(&mut self, theme_name: &str) -> bool {
        self.theme_manager.set_theme(theme_name)
    }

    pub fn get_available_themes(&self) -> Vec<String> {
        self.theme_manager.list_themes()
    }
}
