use crate::domain::ports::Clock;
use crate::use_cases::GameRegistry;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

// Shared handler state; the registry is the only authority over games.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<GameRegistry>,
}

// System clock adapter used for event and move timestamps.
#[derive(Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_millis(&self) -> u64 {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        u64::try_from(millis).unwrap_or(u64::MAX)
    }
}
