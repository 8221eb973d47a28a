// Write-behind worker mirroring registry changes into the game store.

use super::types::StoreWrite;
use crate::domain::ports::GameStore;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Applies queued writes in order until every sender is gone. A failed write
/// is logged and skipped; it never reaches the caller that queued it.
pub async fn drain_store_writes(
    store: Arc<dyn GameStore>,
    mut writes_rx: mpsc::Receiver<StoreWrite>,
) {
    while let Some(write) = writes_rx.recv().await {
        if let Err(error) = apply(store.as_ref(), &write).await {
            warn!(error = %error, ?write, "store write failed; skipping");
        }
    }
    debug!("store write channel closed; writer exiting");
}

pub fn spawn_store_writer(
    store: Arc<dyn GameStore>,
    writes_rx: mpsc::Receiver<StoreWrite>,
) -> JoinHandle<()> {
    tokio::spawn(drain_store_writes(store, writes_rx))
}

async fn apply(store: &dyn GameStore, write: &StoreWrite) -> Result<(), String> {
    match write {
        StoreWrite::Game(game) => store.upsert_game(game).await,
        StoreWrite::Player(player) => store.upsert_player(player).await,
        StoreWrite::Membership(membership) => store.upsert_membership(membership).await,
        StoreWrite::Move(record) => store.record_move(record).await,
    }
}
