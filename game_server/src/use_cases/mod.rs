// Use cases layer: the game registry and its background workers.

pub mod events;
pub mod persistence;
pub mod registry;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use events::spawn_event_logger;
pub use persistence::spawn_store_writer;
pub use registry::{GameRegistry, RegistrySettings};
pub use types::{BoardView, GameEvent, GameStatus, JoinedPlayer, StoreWrite};
