// GameStore adapters: PostgreSQL for deployments, in-memory when no database is configured.

use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::ports::{
    GameRecord, GameStore, MembershipRecord, MoveRecord, PlayerRecord, StoredGame,
};
use crate::domain::{Faction, GameId, PlayerId};

// PostgreSQL-backed mirror of games, players, memberships and moves.
#[derive(Clone)]
pub struct PostgresGameStore {
    pub db: PgPool,
}

fn to_db_id(value: u64) -> Result<i64, String> {
    i64::try_from(value).map_err(|_| format!("id {value} does not fit a BIGINT"))
}

fn to_db_coord(value: usize) -> Result<i64, String> {
    i64::try_from(value).map_err(|_| format!("coordinate {value} does not fit a BIGINT"))
}

fn from_db_id(value: i64) -> Result<u64, String> {
    u64::try_from(value).map_err(|_| format!("stored id {value} is negative"))
}

fn from_db_faction(value: &str) -> Result<Faction, String> {
    Faction::parse(value).ok_or_else(|| format!("stored winner {value:?} is not a faction"))
}

#[async_trait]
impl GameStore for PostgresGameStore {
    async fn upsert_game(&self, game: &GameRecord) -> Result<(), String> {
        sqlx::query(
            r#"
            INSERT INTO games (game_id, title, started, round_in_progress, winner)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (game_id) DO UPDATE SET
                title = EXCLUDED.title,
                started = EXCLUDED.started,
                round_in_progress = EXCLUDED.round_in_progress,
                winner = EXCLUDED.winner,
                updated_at = NOW()
            WHERE games.winner IS NULL
            "#,
        )
        .bind(to_db_id(game.game_id)?)
        .bind(&game.title)
        .bind(game.started)
        .bind(game.round_in_progress)
        .bind(game.winner.map(|winner| winner.as_str()))
        .execute(&self.db)
        .await
        .map_err(|err| err.to_string())?;

        Ok(())
    }

    async fn upsert_player(&self, player: &PlayerRecord) -> Result<(), String> {
        sqlx::query(
            r#"
            INSERT INTO players (player_id, name)
            VALUES ($1, $2)
            ON CONFLICT (player_id) DO UPDATE SET
                name = EXCLUDED.name
            "#,
        )
        .bind(to_db_id(player.player_id)?)
        .bind(&player.name)
        .execute(&self.db)
        .await
        .map_err(|err| err.to_string())?;

        Ok(())
    }

    async fn upsert_membership(&self, membership: &MembershipRecord) -> Result<(), String> {
        sqlx::query(
            r#"
            INSERT INTO game_members (game_id, player_id, role, alive)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (game_id, player_id) DO UPDATE SET
                role = EXCLUDED.role,
                alive = EXCLUDED.alive
            "#,
        )
        .bind(to_db_id(membership.game_id)?)
        .bind(to_db_id(membership.player_id)?)
        .bind(membership.role.as_str())
        .bind(membership.alive)
        .execute(&self.db)
        .await
        .map_err(|err| err.to_string())?;

        Ok(())
    }

    async fn record_move(&self, record: &MoveRecord) -> Result<(), String> {
        let to_row = record.to.map(|to| to_db_coord(to.row)).transpose()?;
        let to_col = record.to.map(|to| to_db_coord(to.col)).transpose()?;

        sqlx::query(
            r#"
            INSERT INTO moves
                (game_id, player_id, round, kind, from_row, from_col, to_row, to_col, recorded_at_ms)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(to_db_id(record.game_id)?)
        .bind(to_db_id(record.player_id)?)
        .bind(record.round)
        .bind(record.kind.as_str())
        .bind(to_db_coord(record.from.row)?)
        .bind(to_db_coord(record.from.col)?)
        .bind(to_row)
        .bind(to_col)
        .bind(to_db_id(record.recorded_at)?)
        .execute(&self.db)
        .await
        .map_err(|err| err.to_string())?;

        Ok(())
    }

    async fn load_games(&self) -> Result<Vec<StoredGame>, String> {
        let rows: Vec<(i64, String, Option<String>)> =
            sqlx::query_as("SELECT game_id, title, winner FROM games ORDER BY game_id")
                .fetch_all(&self.db)
                .await
                .map_err(|err| err.to_string())?;

        rows.into_iter()
            .map(|(game_id, title, winner)| {
                Ok(StoredGame {
                    game_id: from_db_id(game_id)?,
                    title,
                    winner: winner.as_deref().map(from_db_faction).transpose()?,
                })
            })
            .collect()
    }

    async fn max_player_id(&self) -> Result<Option<PlayerId>, String> {
        let max: Option<i64> = sqlx::query_scalar("SELECT MAX(player_id) FROM players")
            .fetch_one(&self.db)
            .await
            .map_err(|err| err.to_string())?;

        max.map(from_db_id).transpose()
    }
}

#[derive(Debug, Default)]
struct MemoryTables {
    games: BTreeMap<GameId, GameRecord>,
    players: BTreeMap<PlayerId, PlayerRecord>,
    members: BTreeMap<(GameId, PlayerId), MembershipRecord>,
    moves: Vec<MoveRecord>,
}

// Process-local store used when DATABASE_URL is unset. Nothing survives a restart.
#[derive(Clone, Default)]
pub struct InMemoryGameStore {
    tables: Arc<Mutex<MemoryTables>>,
}

impl InMemoryGameStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn move_count(&self, game_id: GameId) -> usize {
        let tables = self.tables.lock().await;
        tables
            .moves
            .iter()
            .filter(|record| record.game_id == game_id)
            .count()
    }

    pub async fn membership(
        &self,
        game_id: GameId,
        player_id: PlayerId,
    ) -> Option<MembershipRecord> {
        let tables = self.tables.lock().await;
        tables.members.get(&(game_id, player_id)).cloned()
    }
}

#[async_trait]
impl GameStore for InMemoryGameStore {
    // A decided game is never overwritten, matching the Postgres upsert.
    async fn upsert_game(&self, game: &GameRecord) -> Result<(), String> {
        let mut tables = self.tables.lock().await;
        let decided = tables
            .games
            .get(&game.game_id)
            .is_some_and(|stored| stored.winner.is_some());
        if !decided {
            tables.games.insert(game.game_id, game.clone());
        }
        Ok(())
    }

    async fn upsert_player(&self, player: &PlayerRecord) -> Result<(), String> {
        let mut tables = self.tables.lock().await;
        tables.players.insert(player.player_id, player.clone());
        Ok(())
    }

    async fn upsert_membership(&self, membership: &MembershipRecord) -> Result<(), String> {
        let mut tables = self.tables.lock().await;
        tables
            .members
            .insert((membership.game_id, membership.player_id), membership.clone());
        Ok(())
    }

    async fn record_move(&self, record: &MoveRecord) -> Result<(), String> {
        let mut tables = self.tables.lock().await;
        tables.moves.push(record.clone());
        Ok(())
    }

    async fn load_games(&self) -> Result<Vec<StoredGame>, String> {
        let tables = self.tables.lock().await;
        Ok(tables
            .games
            .values()
            .map(|game| StoredGame {
                game_id: game.game_id,
                title: game.title.clone(),
                winner: game.winner,
            })
            .collect())
    }

    async fn max_player_id(&self) -> Result<Option<PlayerId>, String> {
        let tables = self.tables.lock().await;
        Ok(tables.players.keys().next_back().copied())
    }
}
