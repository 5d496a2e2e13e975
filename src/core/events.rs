use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use tokio::sync::mpsc::UnboundedSender;
use crate::core::{Board, Phase, Player};

/// Notifications published by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged(Phase),
    TurnChanged(Player),
    /// `winner` is `None` on a draw.
    GameFinished { winner: Option<Player> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameEventKind {
    PhaseChanged,
    TurnChanged,
    GameFinished,
}

impl GameEvent {
    pub fn kind(&self) -> GameEventKind {
        match self {
            GameEvent::PhaseChanged(_) => GameEventKind::PhaseChanged,
            GameEvent::TurnChanged(_) => GameEventKind::TurnChanged,
            GameEvent::GameFinished { .. } => GameEventKind::GameFinished,
        }
    }
}

/// Subscriber to engine notifications.
///
/// The board is lent for the duration of the call only; handlers that
/// need it later must re-read it on the next notification.
pub trait GameEventHandler {
    fn handle_event(&mut self, event: &GameEvent, board: &Board);
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub event: GameEvent,
    pub timestamp: DateTime<Utc>,
}

/// Bounded, timestamped history of events.
pub struct EventLogger {
    events: Vec<EventRecord>,
    max_events: usize,
}

impl EventLogger {
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
        }
    }

    pub fn record(&mut self, event: &GameEvent) {
        self.events.push(EventRecord {
            event: *event,
            timestamp: Utc::now(),
        });

        if self.events.len() > self.max_events {
            self.events.remove(0);
        }
    }

    pub fn get_events(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn get_recent_events(&self, count: usize) -> Vec<&EventRecord> {
        self.events
            .iter()
            .rev()
            .take(count)
            .collect()
    }

    pub fn export_events(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.events)
    }
}

impl Default for EventLogger {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl GameEventHandler for EventLogger {
    fn handle_event(&mut self, event: &GameEvent, _board: &Board) {
        self.record(event);
    }
}

/// Ordered registry; each handler sees each event once, in the order
/// it was added.
pub struct CompositeEventHandler {
    handlers: Vec<Box<dyn GameEventHandler>>,
}

impl CompositeEventHandler {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler<H: GameEventHandler + 'static>(&mut self, handler: H) {
        self.handlers.push(Box::new(handler));
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for CompositeEventHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEventHandler for CompositeEventHandler {
    fn handle_event(&mut self, event: &GameEvent, board: &Board) {
        for handler in &mut self.handlers {
            handler.handle_event(event, board);
        }
    }
}

/// Forwards events to a channel for renderers that poll.
pub struct ChannelEventHandler {
    sender: UnboundedSender<GameEvent>,
}

impl ChannelEventHandler {
    pub fn new(sender: UnboundedSender<GameEvent>) -> Self {
        Self { sender }
    }
}

impl GameEventHandler for ChannelEventHandler {
    fn handle_event(&mut self, event: &GameEvent, _board: &Board) {
        // A closed receiver just means nobody is rendering any more.
        let _ = self.sender.send(*event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Players;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder {
        name: &'static str,
        seen: Rc<RefCell<Vec<(&'static str, GameEvent)>>>,
    }

    impl GameEventHandler for Recorder {
        fn handle_event(&mut self, event: &GameEvent, _board: &Board) {
            self.seen.borrow_mut().push((self.name, *event));
        }
    }

    #[test]
    fn test_event_kind() {
        let players = Players::default();

        assert_eq!(GameEvent::PhaseChanged(Phase::Resumed).kind(), GameEventKind::PhaseChanged);
        assert_eq!(GameEvent::TurnChanged(players.second()).kind(), GameEventKind::TurnChanged);
        assert_eq!(GameEvent::GameFinished { winner: None }.kind(), GameEventKind::GameFinished);
    }

    #[test]
    fn test_event_logger_drops_oldest() {
        let mut logger = EventLogger::new(2);

        logger.record(&GameEvent::PhaseChanged(Phase::Stopped));
        logger.record(&GameEvent::PhaseChanged(Phase::Resumed));
        logger.record(&GameEvent::PhaseChanged(Phase::Finished));

        assert_eq!(logger.get_events().len(), 2);
        assert_eq!(logger.get_events()[0].event, GameEvent::PhaseChanged(Phase::Resumed));
        assert_eq!(
            logger.get_recent_events(1)[0].event,
            GameEvent::PhaseChanged(Phase::Finished)
        );
    }

    #[test]
    fn test_export_events_as_json() {
        let players = Players::default();
        let mut logger = EventLogger::default();

        logger.record(&GameEvent::TurnChanged(players.second()));
        logger.record(&GameEvent::GameFinished { winner: Some(players.first()) });

        let json = logger.export_events().unwrap();
        let records: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(records.as_array().map(Vec::len), Some(2));
        assert!(json.contains("GameFinished"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_composite_handler_preserves_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut composite = CompositeEventHandler::new();
        composite.add_handler(Recorder { name: "renderer", seen: Rc::clone(&seen) });
        composite.add_handler(Recorder { name: "audit", seen: Rc::clone(&seen) });

        let board = Board::square(3);
        let event = GameEvent::PhaseChanged(Phase::Resumed);
        composite.handle_event(&event, &board);

        assert_eq!(composite.len(), 2);
        assert_eq!(*seen.borrow(), vec![("renderer", event), ("audit", event)]);
    }

    #[test]
    fn test_channel_handler_forwards() {
        let (sender, mut receiver) = tokio::sync::mpsc::unbounded_channel();
        let mut handler = ChannelEventHandler::new(sender);
        let board = Board::square(3);

        handler.handle_event(&GameEvent::GameFinished { winner: None }, &board);

        assert_eq!(receiver.try_recv().unwrap(), GameEvent::GameFinished { winner: None });
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn test_channel_handler_ignores_closed_receiver() {
        let (sender, receiver) = tokio::sync::mpsc::unbounded_channel();
        drop(receiver);
        let mut handler = ChannelEventHandler::new(sender);

        handler.handle_event(&GameEvent::PhaseChanged(Phase::Stopped), &Board::square(1));
    }
}
