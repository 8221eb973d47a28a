use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::PlayerId;
use crate::domain::ports::{
    Clock, GameRecord, GameStore, MembershipRecord, MoveRecord, PlayerRecord, StoredGame,
};

// Shared fixed time source for deterministic use-case tests.
pub(crate) struct FixedClock(pub(crate) u64);

impl Clock for FixedClock {
    fn now_epoch_millis(&self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Default)]
pub(crate) struct FailureFlags {
    pub game: bool,
    pub player: bool,
    pub membership: bool,
    pub moves: bool,
    pub load: bool,
}

// Everything the store was asked to write, in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Recorded {
    pub games: Vec<GameRecord>,
    pub players: Vec<PlayerRecord>,
    pub memberships: Vec<MembershipRecord>,
    pub moves: Vec<MoveRecord>,
}

#[derive(Clone)]
pub(crate) struct RecordingStore {
    recorded: Arc<Mutex<Recorded>>,
    stored_games: Vec<StoredGame>,
    max_player_id: Option<PlayerId>,
    failures: FailureFlags,
}

impl RecordingStore {
    pub(crate) fn new() -> Self {
        Self {
            recorded: Arc::new(Mutex::new(Recorded::default())),
            stored_games: Vec::new(),
            max_player_id: None,
            failures: FailureFlags::default(),
        }
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn with_stored(
        mut self,
        stored_games: Vec<StoredGame>,
        max_player_id: Option<PlayerId>,
    ) -> Self {
        self.stored_games = stored_games;
        self.max_player_id = max_player_id;
        self
    }

    pub(crate) fn recorded(&self) -> Recorded {
        self.recorded.lock().expect("recorded mutex poisoned").clone()
    }
}

#[async_trait]
impl GameStore for RecordingStore {
    async fn upsert_game(&self, game: &GameRecord) -> Result<(), String> {
        if self.failures.game {
            return Err("upsert_game failed".to_string());
        }
        let mut guard = self.recorded.lock().expect("recorded mutex poisoned");
        guard.games.push(game.clone());
        Ok(())
    }

    async fn upsert_player(&self, player: &PlayerRecord) -> Result<(), String> {
        if self.failures.player {
            return Err("upsert_player failed".to_string());
        }
        let mut guard = self.recorded.lock().expect("recorded mutex poisoned");
        guard.players.push(player.clone());
        Ok(())
    }

    async fn upsert_membership(&self, membership: &MembershipRecord) -> Result<(), String> {
        if self.failures.membership {
            return Err("upsert_membership failed".to_string());
        }
        let mut guard = self.recorded.lock().expect("recorded mutex poisoned");
        guard.memberships.push(membership.clone());
        Ok(())
    }

    async fn record_move(&self, record: &MoveRecord) -> Result<(), String> {
        if self.failures.moves {
            return Err("record_move failed".to_string());
        }
        let mut guard = self.recorded.lock().expect("recorded mutex poisoned");
        guard.moves.push(record.clone());
        Ok(())
    }

    async fn load_games(&self) -> Result<Vec<StoredGame>, String> {
        if self.failures.load {
            return Err("load_games failed".to_string());
        }
        Ok(self.stored_games.clone())
    }

    async fn max_player_id(&self) -> Result<Option<PlayerId>, String> {
        if self.failures.load {
            return Err("max_player_id failed".to_string());
        }
        Ok(self.max_player_id)
    }
}
