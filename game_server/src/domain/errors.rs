// Domain-level rejections. These are normal outcomes, not failures.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinError {
    UnknownGame,
    GameFull,
    AlreadyStarted,
    GameOver,
    InvalidName,
}

impl fmt::Display for JoinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            JoinError::UnknownGame => "game not found",
            JoinError::GameFull => "game is full",
            JoinError::AlreadyStarted => "game already started",
            JoinError::GameOver => "game is over",
            JoinError::InvalidName => "invalid player_name",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartError {
    UnknownGame,
    AlreadyStarted,
    GameOver,
    // Both factions need at least one member.
    NotEnoughPlayers,
}

impl fmt::Display for StartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StartError::UnknownGame => "game not found",
            StartError::AlreadyStarted => "game already started",
            StartError::GameOver => "game is over",
            StartError::NotEnoughPlayers => "a wolf and a villager are required to start",
        })
    }
}

/// Rejections for status and board-view reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryError {
    UnknownGame,
    // Unknown id, or a player who belongs to another game.
    UnknownPlayer,
    PlayerDead,
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            QueryError::UnknownGame => "game not found",
            QueryError::UnknownPlayer => "player not found in game",
            QueryError::PlayerDead => "player is dead",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejection {
    UnknownGame,
    UnknownPlayer,
    PlayerDead,
    RoundInactive,
    InvalidToken,
    ZeroDelta,
    OutOfBounds,
    SameFaction,
}

impl fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MoveRejection::UnknownGame => "game not found",
            MoveRejection::UnknownPlayer => "player not found in game",
            MoveRejection::PlayerDead => "player is dead",
            MoveRejection::RoundInactive => "no round in progress",
            MoveRejection::InvalidToken => "invalid move token",
            MoveRejection::ZeroDelta => "move must change position",
            MoveRejection::OutOfBounds => "target cell is off the board",
            MoveRejection::SameFaction => "target cell holds an ally",
        })
    }
}
