use crate::interface_adapters::handlers::{
    board_view, create_game, game_status, health, join_game, list_games, start_game, submit_move,
};
use crate::interface_adapters::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/games", get(list_games).post(create_game))
        .route("/games/{game_id}/players", post(join_game))
        .route("/games/{game_id}/start", post(start_game))
        .route(
            "/games/{game_id}/players/{player_id}/status",
            get(game_status),
        )
        .route("/games/{game_id}/players/{player_id}/board", get(board_view))
        .route(
            "/games/{game_id}/players/{player_id}/moves",
            post(submit_move),
        )
        .with_state(state)
}
