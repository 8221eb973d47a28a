// JSON request/response payloads for the public game routes.

use crate::domain::systems::movement::{MoveOutcome, MoveResolution};
use crate::domain::{Faction, GameId, IDLE_ROUND, PlayerId, Position, Role};
use crate::use_cases::{BoardView, GameStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionDto {
    pub row: usize,
    pub col: usize,
}

impl From<Position> for PositionDto {
    fn from(position: Position) -> Self {
        Self {
            row: position.row,
            col: position.col,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleDto {
    Wolf,
    Villager,
}

impl From<Role> for RoleDto {
    fn from(role: Role) -> Self {
        match role {
            Role::Wolf => RoleDto::Wolf,
            Role::Villager => RoleDto::Villager,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FactionDto {
    Wolves,
    Villagers,
}

impl From<Faction> for FactionDto {
    fn from(faction: Faction) -> Self {
        match faction {
            Faction::Wolves => FactionDto::Wolves,
            Faction::Villagers => FactionDto::Villagers,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListGamesResponse {
    pub status: bool,
    pub game_ids: Vec<GameId>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateGameResponse {
    pub game_id: GameId,
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct JoinGameRequest {
    pub player_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JoinGameResponse {
    pub player_id: PlayerId,
    pub role: RoleDto,
    pub position: PositionDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StartGameResponse {
    pub started: bool,
    pub round_in_progress: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GameStatusResponse {
    pub started: bool,
    pub round_in_progress: i64,
    pub winner: Option<FactionDto>,
    pub alive: bool,
}

impl From<GameStatus> for GameStatusResponse {
    fn from(status: GameStatus) -> Self {
        Self {
            started: status.started,
            round_in_progress: status.round_in_progress,
            winner: status.winner.map(FactionDto::from),
            alive: status.alive,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BoardViewResponse {
    pub size: usize,
    // Row-major, one glyph per cell.
    pub visible_cells: String,
}

impl From<BoardView> for BoardViewResponse {
    fn from(view: BoardView) -> Self {
        Self {
            size: view.size,
            visible_cells: view.cells,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SubmitMoveRequest {
    pub token: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveOutcomeDto {
    Moved,
    Captured,
    Died,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitMoveResponse {
    pub accepted: bool,
    pub round_in_progress: i64,
    pub outcome: Option<MoveOutcomeDto>,
    pub position: Option<PositionDto>,
    pub reason: Option<String>,
}

impl SubmitMoveResponse {
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            accepted: false,
            round_in_progress: IDLE_ROUND,
            outcome: None,
            position: None,
            reason: Some(reason.into()),
        }
    }
}

impl From<MoveOutcome> for SubmitMoveResponse {
    fn from(outcome: MoveOutcome) -> Self {
        let kind = match outcome.resolution {
            MoveResolution::Relocated { .. } => MoveOutcomeDto::Moved,
            MoveResolution::Captured { .. } => MoveOutcomeDto::Captured,
            MoveResolution::Perished { .. } => MoveOutcomeDto::Died,
        };
        Self {
            accepted: true,
            round_in_progress: outcome.round_in_progress,
            outcome: Some(kind),
            position: outcome.resolution.new_position().map(PositionDto::from),
            reason: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

// Simple error envelope for JSON responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}
