// Framework bootstrap for the game server runtime.

use crate::domain::ports::GameStore;
use crate::frameworks::{config, db};
use crate::interface_adapters::routes::app;
use crate::interface_adapters::state::{AppState, SystemClock};
use crate::interface_adapters::store::{InMemoryGameStore, PostgresGameStore};
use crate::use_cases::{GameRegistry, RegistrySettings, spawn_event_logger, spawn_store_writer};

use std::io::{Error, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub async fn run(listener: tokio::net::TcpListener, state: AppState) -> Result<()> {
    let address = listener.local_addr()?;
    let app = app(state);

    tracing::info!(%address, "listening");

    // Serve app and report errors rather than panicking
    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let rules = config::load_rules().map_err(|e| {
        tracing::error!(error = %e, "failed to load game rules");
        Error::other(e)
    })?;
    tracing::info!(
        board_size = rules.board_size,
        max_players = rules.max_players,
        visibility_radius = rules.visibility_radius,
        "game rules loaded"
    );

    let store = build_store().await?;
    let settings = RegistrySettings {
        rules,
        rng_seed: config::rng_seed(),
    };
    let state = build_state(settings, store).await?;

    let address = SocketAddr::new(config::http_host(), config::http_port());

    // Bind TCP listener with error handling
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener, state).await
}

/// Wires the registry to its event logger and store writer, then restores
/// persisted games from `store`.
pub async fn build_state(settings: RegistrySettings, store: Arc<dyn GameStore>) -> Result<AppState> {
    let (events_tx, _) = broadcast::channel(config::EVENT_BROADCAST_CAPACITY);
    let (writes_tx, writes_rx) = mpsc::channel(config::STORE_WRITE_CAPACITY);

    let stored_games = store
        .load_games()
        .await
        .map_err(|e| Error::other(format!("failed to load stored games: {e}")))?;
    let max_player_id = store
        .max_player_id()
        .await
        .map_err(|e| Error::other(format!("failed to load stored player ids: {e}")))?;

    spawn_store_writer(store, writes_rx);

    let registry = GameRegistry::new(settings, Arc::new(SystemClock), events_tx, writes_tx);
    spawn_event_logger(registry.subscribe());
    registry.restore(stored_games, max_player_id).await;

    Ok(AppState {
        registry: Arc::new(registry),
    })
}

async fn build_store() -> Result<Arc<dyn GameStore>> {
    let Some(database_url) = config::database_url() else {
        tracing::info!("DATABASE_URL not set; using in-memory game store");
        return Ok(Arc::new(InMemoryGameStore::new()));
    };

    let pool = db::connect_with_retry(
        &database_url,
        config::db_connect_attempts(),
        config::db_connect_backoff(),
    )
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "database unreachable; giving up");
        Error::other(e)
    })?;
    db::run_migrations(&pool).await.map_err(|e| {
        tracing::error!(error = %e, "failed to run migrations");
        Error::other(e)
    })?;

    Ok(Arc::new(PostgresGameStore { db: pool }))
}
