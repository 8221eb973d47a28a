use crate::domain::{GameId, JoinError, PlayerId, QueryError, StartError};
use crate::interface_adapters::protocol::{
    BoardViewResponse, CreateGameResponse, ErrorResponse, GameStatusResponse, HealthResponse,
    JoinGameRequest, JoinGameResponse, ListGamesResponse, StartGameResponse, SubmitMoveRequest,
    SubmitMoveResponse,
};
use crate::interface_adapters::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::{debug, info};

type ApiError = (StatusCode, Json<ErrorResponse>);

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

pub async fn list_games(State(state): State<AppState>) -> Json<ListGamesResponse> {
    Json(ListGamesResponse {
        status: true,
        game_ids: state.registry.list_games().await,
    })
}

pub async fn create_game(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<CreateGameResponse>), ApiError> {
    let game_id = state.registry.create_game().await;
    let title = state
        .registry
        .game_title(game_id)
        .await
        .ok_or_else(|| error_response(StatusCode::INTERNAL_SERVER_ERROR, "game vanished"))?;

    Ok((
        StatusCode::CREATED,
        Json(CreateGameResponse { game_id, title }),
    ))
}

pub async fn join_game(
    State(state): State<AppState>,
    Path(game_id): Path<GameId>,
    Json(payload): Json<JoinGameRequest>,
) -> Result<Json<JoinGameResponse>, ApiError> {
    let joined = state
        .registry
        .join_game(&payload.player_name, game_id)
        .await
        .map_err(|err| {
            debug!(game_id, error = %err, "join rejected");
            map_join_error(err)
        })?;

    info!(
        game_id,
        player_id = joined.player_id,
        role = %joined.role,
        started = joined.game_started,
        "player admitted"
    );
    Ok(Json(JoinGameResponse {
        player_id: joined.player_id,
        role: joined.role.into(),
        position: joined.position.into(),
    }))
}

pub async fn start_game(
    State(state): State<AppState>,
    Path(game_id): Path<GameId>,
) -> Result<Json<StartGameResponse>, ApiError> {
    let round_in_progress = state
        .registry
        .start_game(game_id)
        .await
        .map_err(map_start_error)?;

    Ok(Json(StartGameResponse {
        started: true,
        round_in_progress,
    }))
}

pub async fn game_status(
    State(state): State<AppState>,
    Path((game_id, player_id)): Path<(GameId, PlayerId)>,
) -> Result<Json<GameStatusResponse>, ApiError> {
    let status = state
        .registry
        .game_status(game_id, player_id)
        .await
        .map_err(map_query_error)?;

    Ok(Json(status.into()))
}

pub async fn board_view(
    State(state): State<AppState>,
    Path((game_id, player_id)): Path<(GameId, PlayerId)>,
) -> Result<Json<BoardViewResponse>, ApiError> {
    let view = state
        .registry
        .board_view(game_id, player_id)
        .await
        .map_err(map_query_error)?;

    Ok(Json(view.into()))
}

// Rejected moves are ordinary results, so this handler always answers 200.
pub async fn submit_move(
    State(state): State<AppState>,
    Path((game_id, player_id)): Path<(GameId, PlayerId)>,
    Json(payload): Json<SubmitMoveRequest>,
) -> Json<SubmitMoveResponse> {
    match state
        .registry
        .submit_move(game_id, player_id, &payload.token)
        .await
    {
        Ok(outcome) => Json(outcome.into()),
        Err(rejection) => {
            debug!(game_id, player_id, reason = %rejection, "move rejected");
            Json(SubmitMoveResponse::rejected(rejection.to_string()))
        }
    }
}

// Helper to build a JSON error response.
fn error_response(status: StatusCode, message: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            message: message.to_string(),
        }),
    )
}

fn map_join_error(err: JoinError) -> ApiError {
    let status = match err {
        JoinError::UnknownGame => StatusCode::NOT_FOUND,
        JoinError::InvalidName => StatusCode::BAD_REQUEST,
        JoinError::GameFull | JoinError::AlreadyStarted | JoinError::GameOver => {
            StatusCode::CONFLICT
        }
    };
    error_response(status, &err.to_string())
}

fn map_start_error(err: StartError) -> ApiError {
    let status = match err {
        StartError::UnknownGame => StatusCode::NOT_FOUND,
        StartError::AlreadyStarted | StartError::GameOver | StartError::NotEnoughPlayers => {
            StatusCode::CONFLICT
        }
    };
    error_response(status, &err.to_string())
}

fn map_query_error(err: QueryError) -> ApiError {
    let status = match err {
        QueryError::UnknownGame | QueryError::UnknownPlayer => StatusCode::NOT_FOUND,
        QueryError::PlayerDead => StatusCode::CONFLICT,
    };
    error_response(status, &err.to_string())
}
