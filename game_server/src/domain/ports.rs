use async_trait::async_trait;

use crate::domain::entities::{Faction, GameId, PlayerId, Position, Role};

// Mirror of a game's lifecycle fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub game_id: GameId,
    pub title: String,
    pub started: bool,
    /// `IDLE_ROUND` while no round is open.
    pub round_in_progress: i64,
    /// Once stored, the row is final.
    pub winner: Option<Faction>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRecord {
    pub player_id: PlayerId,
    pub name: String,
}

// A player's seat in a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipRecord {
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub role: Role,
    pub alive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Relocated,
    Captured,
    Perished,
}

impl MoveKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MoveKind::Relocated => "relocated",
            MoveKind::Captured => "captured",
            MoveKind::Perished => "perished",
        }
    }
}

// One accepted move; `to` is empty when the mover died.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub round: i64,
    pub kind: MoveKind,
    pub from: Position,
    pub to: Option<Position>,
    pub recorded_at: u64,
}

// Game shell restored on startup. A stored winner keeps the game closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredGame {
    pub game_id: GameId,
    pub title: String,
    pub winner: Option<Faction>,
}

// Port for the best-effort storage mirror used by the write-behind worker.
#[async_trait]
pub trait GameStore: Send + Sync {
    async fn upsert_game(&self, game: &GameRecord) -> Result<(), String>;
    async fn upsert_player(&self, player: &PlayerRecord) -> Result<(), String>;
    async fn upsert_membership(&self, membership: &MembershipRecord) -> Result<(), String>;
    async fn record_move(&self, record: &MoveRecord) -> Result<(), String>;
    async fn load_games(&self) -> Result<Vec<StoredGame>, String>;
    async fn max_player_id(&self) -> Result<Option<PlayerId>, String>;
}

// Port for retrieving the current time.
pub trait Clock: Send + Sync {
    fn now_epoch_millis(&self) -> u64;
}
