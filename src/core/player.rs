use serde::{Deserialize, Serialize};
use std::fmt;
use crate::core::Mark;
use crate::utils::{GameError, GameResult};

/// Which of the two seats a player occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    First,
    Second,
}

impl PlayerId {
    pub fn other(self) -> Self {
        match self {
            PlayerId::First => PlayerId::Second,
            PlayerId::Second => PlayerId::First,
        }
    }

    /// 1-based seat number, as shown to users.
    pub fn number(self) -> u8 {
        match self {
            PlayerId::First => 1,
            PlayerId::Second => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub mark: Mark,
}

impl Player {
    pub fn new(id: PlayerId, mark: Mark) -> GameResult<Self> {
        if mark.is_empty() {
            return Err(GameError::invalid_players(format!(
                "Player {} cannot use the empty mark",
                id.number()
            )));
        }
        Ok(Self { id, mark })
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {} ({})", self.id.number(), self.mark.symbol())
    }
}

/// The two registered players, first seat moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Players {
    first: Player,
    second: Player,
}

impl Players {
    pub fn new(first: Player, second: Player) -> GameResult<Self> {
        if first.id != PlayerId::First || second.id != PlayerId::Second {
            return Err(GameError::invalid_players(
                "Players must occupy the first and second seats in order",
            ));
        }
        if first.mark.is_empty() || second.mark.is_empty() {
            return Err(GameError::invalid_players("Both players need a non-empty mark"));
        }
        if first.mark == second.mark {
            return Err(GameError::invalid_players(format!(
                "Both players cannot use the {} mark",
                first.mark
            )));
        }
        Ok(Self { first, second })
    }

    /// Builds both seats from the first player's mark.
    pub fn starting_with(mark: Mark) -> GameResult<Self> {
        let second_mark = mark
            .opponent()
            .ok_or_else(|| GameError::invalid_players("The first player needs a non-empty mark"))?;

        Self::new(
            Player::new(PlayerId::First, mark)?,
            Player::new(PlayerId::Second, second_mark)?,
        )
    }

    pub fn first(&self) -> Player {
        self.first
    }

    pub fn second(&self) -> Player {
        self.second
    }

    pub fn get(&self, id: PlayerId) -> Player {
        match id {
            PlayerId::First => self.first,
            PlayerId::Second => self.second,
        }
    }

    pub fn other(&self, player: Player) -> Player {
        self.get(player.id.other())
    }
}

impl Default for Players {
    fn default() -> Self {
        Self {
            first: Player { id: PlayerId::First, mark: Mark::Cross },
            second: Player { id: PlayerId::Second, mark: Mark::Circle },
        }
    }
}
