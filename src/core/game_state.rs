use serde::{Deserialize, Serialize};
use std::fmt;
use crate::core::Player;

/// Engine lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Stopped,
    Resumed,
    Finished,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Stopped => "stopped",
            Phase::Resumed => "resumed",
            Phase::Finished => "finished",
        };
        write!(f, "{}", name)
    }
}

/// Mutable turn state owned by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    current_player: Player,
    remaining_empty: usize,
    phase: Phase,
}

impl GameState {
    pub fn new(first_player: Player, capacity: usize) -> Self {
        Self {
            current_player: first_player,
            remaining_empty: capacity,
            phase: Phase::Resumed,
        }
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn remaining_empty(&self) -> usize {
        self.remaining_empty
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn accepts_moves(&self) -> bool {
        self.phase == Phase::Resumed
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub(crate) fn record_placement(&mut self) {
        self.remaining_empty = self.remaining_empty.saturating_sub(1);
    }

    pub(crate) fn set_current_player(&mut self, player: Player) {
        self.current_player = player;
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn restart(&mut self, first_player: Player, capacity: usize) {
        *self = Self::new(first_player, capacity);
    }
}
