// Event-log consumer: turns game events into structured log records.

use super::types::GameEvent;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{info, warn};

pub async fn log_events(mut events_rx: broadcast::Receiver<GameEvent>) {
    loop {
        match events_rx.recv().await {
            Ok(event) => log_event(&event),
            Err(broadcast::error::RecvError::Lagged(n)) => {
                warn!(missed = n, "event logger lagged; skipping missed events");
            }
            Err(broadcast::error::RecvError::Closed) => {
                info!("event channel closed; event logger exiting");
                break;
            }
        }
    }
}

pub fn spawn_event_logger(events_rx: broadcast::Receiver<GameEvent>) -> JoinHandle<()> {
    tokio::spawn(log_events(events_rx))
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::GameCreated { game_id, title, at } => {
            info!(game_id, title = %title, at, "game created");
        }
        GameEvent::PlayerJoined {
            game_id,
            player_id,
            name,
            role,
            position,
            at,
        } => {
            info!(
                game_id,
                player_id,
                name = %name,
                role = %role,
                position = %position,
                at,
                "player joined"
            );
        }
        GameEvent::GameStarted { game_id, at } => {
            info!(game_id, at, "game started");
        }
        GameEvent::PlayerMoved {
            game_id,
            player_id,
            from,
            to,
            round,
            at,
        } => {
            info!(
                game_id,
                player_id,
                from = %from,
                to = %to,
                round,
                at,
                "player moved"
            );
        }
        GameEvent::PlayerDied {
            game_id,
            player_id,
            position,
            killed_by,
            at,
        } => {
            info!(
                game_id,
                player_id,
                position = %position,
                killed_by,
                at,
                "player died"
            );
        }
        GameEvent::GameEnded {
            game_id,
            winner,
            at,
        } => {
            info!(game_id, winner = %winner, at, "game ended");
        }
    }
}
