use serde::{Deserialize, Serialize};
use std::fmt;

/// The symbol held by a board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    #[default]
    Empty,
    Cross,
    Circle,
}

impl Mark {
    pub fn is_empty(self) -> bool {
        matches!(self, Mark::Empty)
    }

    /// The other player mark. `Empty` has no opponent.
    pub fn opponent(self) -> Option<Mark> {
        match self {
            Mark::Cross => Some(Mark::Circle),
            Mark::Circle => Some(Mark::Cross),
            Mark::Empty => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Mark::Empty => ' ',
            Mark::Cross => 'X',
            Mark::Circle => 'O',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mark::Empty => "empty",
            Mark::Cross => "cross",
            Mark::Circle => "circle",
        };
        write!(f, "{}", name)
    }
}

/// A 0-indexed grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Immutable cell value. Changing a cell means replacing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    row: usize,
    col: usize,
    mark: Mark,
}

impl Cell {
    pub fn new(position: Position, mark: Mark) -> Self {
        Self {
            row: position.row,
            col: position.col,
            mark,
        }
    }

    pub fn empty(position: Position) -> Self {
        Self::new(position, Mark::Empty)
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn mark(&self) -> Mark {
        self.mark
    }

    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }

    pub fn is_empty(&self) -> bool {
        self.mark.is_empty()
    }

    /// Returns a copy of this cell carrying `mark`.
    pub fn with_mark(self, mark: Mark) -> Self {
        Self { mark, ..self }
    }
}
