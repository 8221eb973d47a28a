// Fixed game configuration: board size, member cap and villager sight.

use serde::Deserialize;
use std::fmt;

pub const DEFAULT_BOARD_SIZE: usize = 10;
pub const DEFAULT_MAX_PLAYERS: usize = 8;
pub const DEFAULT_VISIBILITY_RADIUS: usize = 2;

/// Rules shared by every game the registry creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameRules {
    /// Side length of the square board.
    pub board_size: usize,
    /// Maximum members per game; reaching it starts the game.
    pub max_players: usize,
    /// Chebyshev radius a Villager can see around itself.
    pub visibility_radius: usize,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            max_players: DEFAULT_MAX_PLAYERS,
            visibility_radius: DEFAULT_VISIBILITY_RADIUS,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum RulesError {
    EmptyBoard,
    BoardTooLarge { board_size: usize },
    TooFewPlayers { max_players: usize },
    TooManyPlayers { max_players: usize, cells: usize },
}

impl fmt::Display for RulesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RulesError::EmptyBoard => write!(f, "board_size must be at least 1"),
            RulesError::BoardTooLarge { board_size } => {
                write!(f, "board_size {board_size} has too many cells to address")
            }
            RulesError::TooFewPlayers { max_players } => {
                write!(f, "max_players must be at least 2 (got {max_players})")
            }
            RulesError::TooManyPlayers { max_players, cells } => write!(
                f,
                "max_players ({max_players}) exceeds the number of board cells ({cells})"
            ),
        }
    }
}

impl std::error::Error for RulesError {}

impl GameRules {
    /// `None` when the cell count does not fit a `usize`.
    pub fn cell_count(&self) -> Option<usize> {
        self.board_size.checked_mul(self.board_size)
    }

    // Every member must be able to spawn on a vacant cell.
    pub fn validate(self) -> Result<Self, RulesError> {
        if self.board_size == 0 {
            return Err(RulesError::EmptyBoard);
        }
        if self.max_players < 2 {
            return Err(RulesError::TooFewPlayers {
                max_players: self.max_players,
            });
        }
        let cells = self.cell_count().ok_or(RulesError::BoardTooLarge {
            board_size: self.board_size,
        })?;
        if self.max_players > cells {
            return Err(RulesError::TooManyPlayers {
                max_players: self.max_players,
                cells,
            });
        }
        Ok(self)
    }
}
