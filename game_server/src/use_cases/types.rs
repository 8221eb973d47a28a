// Use-case level inputs/outputs for the game registry.

use crate::domain::ports::{GameRecord, MembershipRecord, MoveRecord, PlayerRecord};
use crate::domain::{Faction, GameId, PlayerId, Position, Role};

/// Immutable notification published after a state change. `at` is epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    GameCreated {
        game_id: GameId,
        title: String,
        at: u64,
    },
    PlayerJoined {
        game_id: GameId,
        player_id: PlayerId,
        name: String,
        role: Role,
        position: Position,
        at: u64,
    },
    GameStarted {
        game_id: GameId,
        at: u64,
    },
    PlayerMoved {
        game_id: GameId,
        player_id: PlayerId,
        from: Position,
        to: Position,
        round: i64,
        at: u64,
    },
    PlayerDied {
        game_id: GameId,
        player_id: PlayerId,
        position: Position,
        killed_by: PlayerId,
        at: u64,
    },
    GameEnded {
        game_id: GameId,
        winner: Faction,
        at: u64,
    },
}

/// Write queued for the storage mirror.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreWrite {
    Game(GameRecord),
    Player(PlayerRecord),
    Membership(MembershipRecord),
    Move(MoveRecord),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedPlayer {
    pub player_id: PlayerId,
    pub role: Role,
    pub position: Position,
    pub game_started: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameStatus {
    pub started: bool,
    pub round_in_progress: i64,
    pub winner: Option<Faction>,
    pub alive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub size: usize,
    pub cells: String,
}
