// Authoritative registry of games and players.

use super::types::{BoardView, GameEvent, GameStatus, JoinedPlayer, StoreWrite};
use crate::domain::ports::{
    Clock, GameRecord, MembershipRecord, MoveKind, MoveRecord, PlayerRecord, StoredGame,
};
use crate::domain::systems::movement::{self, MoveOutcome, MoveResolution};
use crate::domain::systems::visibility;
use crate::domain::{
    Faction, Game, GameId, GameRules, GameState, JoinError, MoveRejection, PlayerId, Position,
    QueryError, Role, StartError,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{RwLock, broadcast, mpsc};
use tracing::{debug, info, warn};

/// Settings applied to every game the registry creates.
#[derive(Debug, Clone, Copy)]
pub struct RegistrySettings {
    /// Board size, member cap and villager sight for new games.
    pub rules: GameRules,
    /// Fixed seed for spawn sampling; `None` seeds each game from entropy.
    pub rng_seed: Option<u64>,
}

// One game's state and its spawn RNG, guarded together by the per-game lock.
struct GameSlot {
    state: GameState,
    rng: StdRng,
}

type SharedSlot = Arc<RwLock<GameSlot>>;

/// Owns all games and players. The map lock is only held to find or insert a
/// slot. Rule work runs under the game's own lock, and the game's events and
/// storage writes are queued before that lock is released so they keep the
/// order in which the game changed.
pub struct GameRegistry {
    settings: RegistrySettings,
    /// Game slots by id; held only to look up or insert.
    games: RwLock<BTreeMap<GameId, SharedSlot>>,
    /// Next id handed to `create_game`.
    next_game_id: AtomicU64,
    /// Next id handed to an admitted player, shared by all games.
    next_player_id: AtomicU64,
    clock: Arc<dyn Clock>,
    /// Fan-out of game events to the logger and any other subscriber.
    events_tx: broadcast::Sender<GameEvent>,
    /// Queue drained by the write-behind store worker.
    writes_tx: mpsc::Sender<StoreWrite>,
}

impl GameRegistry {
    pub fn new(
        settings: RegistrySettings,
        clock: Arc<dyn Clock>,
        events_tx: broadcast::Sender<GameEvent>,
        writes_tx: mpsc::Sender<StoreWrite>,
    ) -> Self {
        Self {
            settings,
            games: RwLock::new(BTreeMap::new()),
            next_game_id: AtomicU64::new(1),
            next_player_id: AtomicU64::new(1),
            clock,
            events_tx,
            writes_tx,
        }
    }

    /// New receiver for game events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.events_tx.subscribe()
    }

    /// Re-creates persisted games as unstarted shells and moves both id counters
    /// past every persisted id. A game stored with a winner stays decided.
    pub async fn restore(&self, stored: Vec<StoredGame>, max_player_id: Option<PlayerId>) {
        let mut games = self.games.write().await;
        for entry in stored {
            self.next_game_id
                .fetch_max(entry.game_id + 1, Ordering::Relaxed);
            games.entry(entry.game_id).or_insert_with(|| {
                let mut game =
                    Game::new(entry.game_id, entry.title, self.settings.rules.board_size);
                game.winner = entry.winner;
                Arc::new(RwLock::new(self.new_slot(game)))
            });
        }
        if let Some(max_player_id) = max_player_id {
            self.next_player_id
                .fetch_max(max_player_id + 1, Ordering::Relaxed);
        }
        info!(
            games = games.len(),
            next_game_id = self.next_game_id.load(Ordering::Relaxed),
            next_player_id = self.next_player_id.load(Ordering::Relaxed),
            "registry restored"
        );
    }

    /// Ids of every known game, ascending.
    pub async fn list_games(&self) -> Vec<GameId> {
        self.games.read().await.keys().copied().collect()
    }

    pub async fn create_game(&self) -> GameId {
        let game_id = self.next_game_id.fetch_add(1, Ordering::Relaxed);
        let title = format!("Game {game_id}");
        let slot = self.new_slot(Game::new(
            game_id,
            title.clone(),
            self.settings.rules.board_size,
        ));
        // Queued before the game is reachable, so its record precedes any join.
        self.persist(StoreWrite::Game(game_record(&slot.state)));
        self.publish(GameEvent::GameCreated {
            game_id,
            title,
            at: self.clock.now_epoch_millis(),
        });

        self.games
            .write()
            .await
            .insert(game_id, Arc::new(RwLock::new(slot)));
        game_id
    }

    pub async fn join_game(
        &self,
        player_name: &str,
        game_id: GameId,
    ) -> Result<JoinedPlayer, JoinError> {
        let slot = self.slot(game_id).await.ok_or(JoinError::UnknownGame)?;

        let mut guard = slot.write().await;
        let GameSlot { state, rng } = &mut *guard;
        let admission = state.admit(player_name, &self.settings.rules, rng, || {
            self.next_player_id.fetch_add(1, Ordering::Relaxed)
        })?;

        let player = &admission.player;
        let at = self.clock.now_epoch_millis();
        self.persist(StoreWrite::Player(PlayerRecord {
            player_id: player.id,
            name: player.name.clone(),
        }));
        self.persist(StoreWrite::Membership(MembershipRecord {
            game_id,
            player_id: player.id,
            role: player.role,
            alive: true,
        }));
        self.publish(GameEvent::PlayerJoined {
            game_id,
            player_id: player.id,
            name: player.name.clone(),
            role: player.role,
            position: player.position,
            at,
        });
        if admission.started {
            self.persist(StoreWrite::Game(game_record(state)));
            self.publish(GameEvent::GameStarted { game_id, at });
        }

        Ok(JoinedPlayer {
            player_id: player.id,
            role: player.role,
            position: player.position,
            game_started: admission.started,
        })
    }

    /// Starts a game before it fills up. Returns the opening round.
    pub async fn start_game(&self, game_id: GameId) -> Result<i64, StartError> {
        let slot = self.slot(game_id).await.ok_or(StartError::UnknownGame)?;

        let mut guard = slot.write().await;
        guard.state.start()?;
        let record = game_record(&guard.state);

        let round = record.round_in_progress;
        self.persist(StoreWrite::Game(record));
        self.publish(GameEvent::GameStarted {
            game_id,
            at: self.clock.now_epoch_millis(),
        });
        Ok(round)
    }

    pub async fn game_status(
        &self,
        game_id: GameId,
        player_id: PlayerId,
    ) -> Result<GameStatus, QueryError> {
        let slot = self.slot(game_id).await.ok_or(QueryError::UnknownGame)?;
        let guard = slot.read().await;
        let player = guard
            .state
            .member(player_id)
            .ok_or(QueryError::UnknownPlayer)?;

        Ok(GameStatus {
            started: guard.state.game.started,
            round_in_progress: guard.state.game.round_in_progress,
            winner: guard.state.game.winner,
            alive: player.alive,
        })
    }

    /// The board as the requesting player is allowed to see it.
    pub async fn board_view(
        &self,
        game_id: GameId,
        player_id: PlayerId,
    ) -> Result<BoardView, QueryError> {
        let slot = self.slot(game_id).await.ok_or(QueryError::UnknownGame)?;
        let guard = slot.read().await;
        let viewer = guard
            .state
            .member(player_id)
            .ok_or(QueryError::UnknownPlayer)?;
        if !viewer.alive {
            return Err(QueryError::PlayerDead);
        }

        let board = &guard.state.game.board;
        Ok(BoardView {
            size: board.size(),
            cells: visibility::visible_cells(board, viewer, self.settings.rules.visibility_radius),
        })
    }

    pub async fn submit_move(
        &self,
        game_id: GameId,
        player_id: PlayerId,
        token: &str,
    ) -> Result<MoveOutcome, MoveRejection> {
        let slot = self.slot(game_id).await.ok_or(MoveRejection::UnknownGame)?;

        let mut guard = slot.write().await;
        let outcome = movement::attempt_move(&mut guard.state, player_id, token)?;

        let at = self.clock.now_epoch_millis();
        self.report_move(game_id, player_id, &outcome, at);
        self.persist(StoreWrite::Game(game_record(&guard.state)));
        if let Some(winner) = outcome.winner {
            info!(game_id, winner = %winner, "game ended");
            self.publish(GameEvent::GameEnded { game_id, winner, at });
        }

        Ok(outcome)
    }

    pub async fn game_exists(&self, game_id: GameId) -> bool {
        self.games.read().await.contains_key(&game_id)
    }

    pub async fn game_title(&self, game_id: GameId) -> Option<String> {
        let slot = self.slot(game_id).await?;
        let guard = slot.read().await;
        Some(guard.state.game.title.clone())
    }

    pub async fn is_member(&self, game_id: GameId, player_id: PlayerId) -> bool {
        let Some(slot) = self.slot(game_id).await else {
            return false;
        };
        let guard = slot.read().await;
        guard.state.member(player_id).is_some()
    }

    /// Alive flag of a member, `None` for unknown games or non-members.
    pub async fn is_alive(&self, game_id: GameId, player_id: PlayerId) -> Option<bool> {
        let slot = self.slot(game_id).await?;
        let guard = slot.read().await;
        guard.state.member(player_id).map(|player| player.alive)
    }

    pub async fn winner(&self, game_id: GameId) -> Option<Faction> {
        let slot = self.slot(game_id).await?;
        let guard = slot.read().await;
        guard.state.game.winner
    }

    async fn slot(&self, game_id: GameId) -> Option<SharedSlot> {
        self.games.read().await.get(&game_id).cloned()
    }

    fn new_slot(&self, game: Game) -> GameSlot {
        let rng = match self.settings.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed ^ game.id.wrapping_mul(0x9E37_79B9_7F4A_7C15)),
            None => StdRng::from_entropy(),
        };
        GameSlot {
            state: GameState::new(game),
            rng,
        }
    }

    fn report_move(
        &self,
        game_id: GameId,
        player_id: PlayerId,
        outcome: &MoveOutcome,
        at: u64,
    ) {
        let round = outcome.round;
        let (kind, from, to) = match outcome.resolution {
            MoveResolution::Relocated { from, to } => (MoveKind::Relocated, from, Some(to)),
            MoveResolution::Captured { from, to, victim } => {
                self.report_death(game_id, victim, to, player_id, at);
                (MoveKind::Captured, from, Some(to))
            }
            MoveResolution::Perished { at: cell, killer } => {
                self.report_death(game_id, player_id, cell, killer, at);
                (MoveKind::Perished, cell, None)
            }
        };

        if let Some(to) = to {
            self.publish(GameEvent::PlayerMoved {
                game_id,
                player_id,
                from,
                to,
                round,
                at,
            });
        }
        self.persist(StoreWrite::Move(MoveRecord {
            game_id,
            player_id,
            round,
            kind,
            from,
            to,
            recorded_at: at,
        }));
    }

    fn report_death(
        &self,
        game_id: GameId,
        player_id: PlayerId,
        position: Position,
        killed_by: PlayerId,
        at: u64,
    ) {
        // Only villagers can die.
        self.persist(StoreWrite::Membership(MembershipRecord {
            game_id,
            player_id,
            role: Role::Villager,
            alive: false,
        }));
        self.publish(GameEvent::PlayerDied {
            game_id,
            player_id,
            position,
            killed_by,
            at,
        });
    }

    fn publish(&self, event: GameEvent) {
        // No subscribers is fine; the event is simply dropped.
        if self.events_tx.send(event).is_err() {
            debug!("no event subscribers; event dropped");
        }
    }

    fn persist(&self, write: StoreWrite) {
        match self.writes_tx.try_send(write) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(write)) => {
                warn!(?write, "store write queue full; dropping write");
            }
            Err(mpsc::error::TrySendError::Closed(write)) => {
                warn!(?write, "store writer stopped; dropping write");
            }
        }
    }
}

fn game_record(state: &GameState) -> GameRecord {
    GameRecord {
        game_id: state.game.id,
        title: state.game.title.clone(),
        started: state.game.started,
        round_in_progress: state.game.round_in_progress,
        winner: state.game.winner,
    }
}
