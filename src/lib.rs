pub mod core;
pub mod ui;
pub mod config;
pub mod utils;

pub use self::core::{Board, Cell, GameEngine, GameEvent, GameEventHandler, Mark, Phase, Player, Position};
pub use self::ui::GameInterface;
pub use self::config::Config;
pub use self::utils::{GameError, GameResult};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
