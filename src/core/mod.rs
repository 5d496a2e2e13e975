pub mod board;
pub mod cell;
pub mod engine;
pub mod events;
pub mod game_state;
pub mod player;

pub use board::Board;
pub use cell::{Cell, Mark, Position};
pub use engine::GameEngine;
pub use events::{
    ChannelEventHandler, CompositeEventHandler, EventLogger, EventRecord, GameEvent,
    GameEventHandler, GameEventKind,
};
pub use game_state::{GameState, Phase};
pub use player::{Player, PlayerId, Players};
