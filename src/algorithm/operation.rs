//! Board transitions as values
//!
//! Operations are what batch-edit scripts are made of. Their text form is a
//! keyword followed by the `x` and `y` coordinates, e.g. `obstacle 2 4`.

use std::fmt;
use std::str::FromStr;

use crate::algorithm::board::Board;
use crate::io::error::{BoardError, Result, script_error};
use crate::spatial::Position;

/// A single transition applied to one cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Make the cell an exit
    AddExit(Position),
    /// Stop treating the cell as an exit
    RemoveExit(Position),
    /// Block the cell
    AddObstacle(Position),
    /// Unblock the cell
    RemoveObstacle(Position),
}

impl Operation {
    /// Cell the operation targets
    pub const fn position(&self) -> Position {
        match *self {
            Self::AddExit(pos)
            | Self::RemoveExit(pos)
            | Self::AddObstacle(pos)
            | Self::RemoveObstacle(pos) => pos,
        }
    }

    /// Script keyword for this kind of operation
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::AddExit(_) => "exit",
            Self::RemoveExit(_) => "remove-exit",
            Self::AddObstacle(_) => "obstacle",
            Self::RemoveObstacle(_) => "remove-obstacle",
        }
    }

    /// Operation undoing this one on the same cell
    ///
    /// Applying an operation and then its inverse restores the field, as long
    /// as the first application was not redundant.
    #[must_use]
    pub const fn inverse(&self) -> Self {
        match *self {
            Self::AddExit(pos) => Self::RemoveExit(pos),
            Self::RemoveExit(pos) => Self::AddExit(pos),
            Self::AddObstacle(pos) => Self::RemoveObstacle(pos),
            Self::RemoveObstacle(pos) => Self::AddObstacle(pos),
        }
    }

    /// Apply the operation to a board
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the position lies outside the board
    pub fn apply(&self, board: &mut Board) -> Result<bool> {
        board.apply(self)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y] = self.position();
        write!(f, "{} {x} {y}", self.keyword())
    }
}

fn parse_coordinate(token: Option<&str>, axis: &str) -> Result<usize> {
    let token = token.ok_or_else(|| script_error(&format!("missing {axis} coordinate")))?;
    token
        .parse()
        .map_err(|e| script_error(&format!("invalid {axis} coordinate '{token}': {e}")))
}

impl FromStr for Operation {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self> {
        let mut tokens = s.split_whitespace();
        let keyword = tokens
            .next()
            .ok_or_else(|| script_error(&"empty operation"))?;
        let x = parse_coordinate(tokens.next(), "x")?;
        let y = parse_coordinate(tokens.next(), "y")?;
        if let Some(extra) = tokens.next() {
            return Err(script_error(&format!("unexpected token '{extra}'")));
        }

        let pos = [x, y];
        match keyword {
            "exit" => Ok(Self::AddExit(pos)),
            "remove-exit" => Ok(Self::RemoveExit(pos)),
            "obstacle" => Ok(Self::AddObstacle(pos)),
            "remove-obstacle" => Ok(Self::RemoveObstacle(pos)),
            other => Err(script_error(&format!("unknown operation '{other}'"))),
        }
    }
}
