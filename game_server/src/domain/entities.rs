// Domain-level game entities: ids, factions, positions and the records the registry owns.

use super::board::Board;
use std::fmt;

pub type GameId = u64;
pub type PlayerId = u64;

/// Round counter value while no round is active.
pub const IDLE_ROUND: i64 = -1;

/// Role assigned at join time; the first entrant of a game is the Wolf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Wolf,
    Villager,
}

impl Role {
    pub fn faction(self) -> Faction {
        match self {
            Role::Wolf => Faction::Wolves,
            Role::Villager => Faction::Villagers,
        }
    }

    pub fn marker(self) -> Marker {
        match self {
            Role::Wolf => Marker::Wolf,
            Role::Villager => Marker::Villager,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Wolf => "Wolf",
            Role::Villager => "Villager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side that can win a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Faction {
    Wolves,
    Villagers,
}

impl Faction {
    pub fn as_str(self) -> &'static str {
        match self {
            Faction::Wolves => "Wolves",
            Faction::Villagers => "Villagers",
        }
    }

    /// Inverse of `as_str`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Wolves" => Some(Faction::Wolves),
            "Villagers" => Some(Faction::Villagers),
            _ => None,
        }
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cell coordinates, row first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Chebyshev distance: the number of king moves between two cells.
    pub fn chebyshev_distance(self, other: Position) -> usize {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Per-cell occupant marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Marker {
    #[default]
    Empty,
    Wolf,
    Villager,
    Dead,
}

impl Marker {
    /// Empty and dead cells hold no living occupant.
    pub fn is_vacant(self) -> bool {
        matches!(self, Marker::Empty | Marker::Dead)
    }
}

/// A game record. Membership order is join order.
#[derive(Debug, Clone)]
pub struct Game {
    /// Registry-assigned id, never reused.
    pub id: GameId,
    /// Display title, `Game <id>`.
    pub title: String,
    /// Members in join order; the first one is the Wolf.
    pub member_ids: Vec<PlayerId>,
    /// True from start until the game is decided.
    pub started: bool,
    /// Current round, or `IDLE_ROUND` when no round is open.
    pub round_in_progress: i64,
    /// Cell markers for every member, alive or dead.
    pub board: Board,
    /// Set once when a faction is wiped out; never cleared.
    pub winner: Option<Faction>,
}

impl Game {
    pub fn new(id: GameId, title: impl Into<String>, board_size: usize) -> Self {
        Self {
            id,
            title: title.into(),
            member_ids: Vec::new(),
            started: false,
            round_in_progress: IDLE_ROUND,
            board: Board::empty(board_size),
            winner: None,
        }
    }

    /// True while moves may be accepted.
    pub fn round_active(&self) -> bool {
        self.started && self.round_in_progress >= 0
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }
}

/// A player record; `game_id` and `role` never change after join.
#[derive(Debug, Clone)]
pub struct Player {
    /// Registry-wide id, unique across games.
    pub id: PlayerId,
    /// Trimmed display name.
    pub name: String,
    /// The single game this player belongs to.
    pub game_id: GameId,
    pub role: Role,
    /// Current cell; for a dead player, the cell where it died.
    pub position: Position,
    pub alive: bool,
}
