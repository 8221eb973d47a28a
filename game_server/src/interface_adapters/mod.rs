// Interface adapters: HTTP surface, storage adapters and shared handler state.

pub mod handlers;
pub mod protocol;
pub mod routes;
pub mod state;
pub mod store;
