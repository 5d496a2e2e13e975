pub mod components;
pub mod interface;
pub mod theme;

pub use components::{format_board, status_for_event, Display, StatusKind, StatusUpdate};
pub use interface::{parse_command, Command, GameInterface};
pub use theme::{Theme, ThemeManager};
