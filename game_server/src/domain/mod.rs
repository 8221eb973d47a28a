// Domain layer: game entities, rules and the ports the use cases depend on.

pub mod board;
pub mod entities;
pub mod errors;
pub mod ports;
pub mod rules;
pub mod state;
pub mod systems;

pub use board::Board;
pub use entities::{Faction, Game, GameId, IDLE_ROUND, Marker, Player, PlayerId, Position, Role};
pub use errors::{JoinError, MoveRejection, QueryError, StartError};
pub use rules::{GameRules, RulesError};
pub use state::{Admission, GameState};
