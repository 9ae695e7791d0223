use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::dto::{
    ControlRequest, ControlResponse, EndGameRequest, MatchResponse, MatchUpdateResponse,
    ScoreRequest, StartGameRequest, StartGameResponse,
};
use crate::error::AppError;
use crate::services::{MatchService, ScoreUpdate};
use crate::state::AppState;
use crate::status::GameStatus;

// ─────────────────────────────────────────────────────────────────────────────
// Router
// ─────────────────────────────────────────────────────────────────────────────

/// Build the game route group: `/game/...`
///
/// `/status` is a static segment, so it always wins over `/{game_id}`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/start", post(start_game))
        .route("/score", post(report_score))
        .route("/end", post(end_game))
        .route("/status", get(game_status))
        .route("/control", post(control_game))
        .route("/{game_id}", get(get_game))
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Treat a missing or blank string field as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// `POST /game/start` — Create a new in-progress match.
async fn start_game(
    State(state): State<AppState>,
    payload: Result<Json<StartGameRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<StartGameResponse>), AppError> {
    let Json(body) = payload?;

    let (Some(player1_name), Some(player2_name)) =
        (non_blank(body.player1_name), non_blank(body.player2_name))
    else {
        return Err(AppError::Validation(
            "player1Name and player2Name are required".to_string(),
        ));
    };

    let created = MatchService::create_match(&state.db, &player1_name, &player2_name).await?;

    Ok((
        StatusCode::CREATED,
        Json(StartGameResponse {
            game_id: created.game_id,
            match_id: created.id,
        }),
    ))
}

/// `POST /game/score` — Update one or both scores of a match.
async fn report_score(
    State(state): State<AppState>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Result<Json<MatchUpdateResponse>, AppError> {
    let Json(body) = payload?;

    let game_id = non_blank(body.game_id)
        .ok_or_else(|| AppError::Validation("gameId is required".to_string()))?;

    let updated = MatchService::update_score(
        &state.db,
        state.config.match_policy,
        &game_id,
        ScoreUpdate::new(body.player1_score, body.player2_score),
    )
    .await?;

    Ok(Json(MatchUpdateResponse {
        ok: true,
        match_: updated.into(),
    }))
}

/// `POST /game/end` — Finish a match and release the status slot if it was running.
async fn end_game(
    State(state): State<AppState>,
    payload: Result<Json<EndGameRequest>, JsonRejection>,
) -> Result<Json<MatchUpdateResponse>, AppError> {
    let Json(body) = payload?;

    let (Some(game_id), Some(winner)) = (non_blank(body.game_id), non_blank(body.winner)) else {
        return Err(AppError::Validation(
            "gameId and winner are required".to_string(),
        ));
    };

    let ended = MatchService::end_match(
        &state.db,
        state.config.match_policy,
        &game_id,
        &winner,
        ScoreUpdate::new(body.player1_score, body.player2_score),
    )
    .await?;

    state.game_status.release(&game_id).await;

    Ok(Json(MatchUpdateResponse {
        ok: true,
        match_: ended.into(),
    }))
}

/// `GET /game/status` — Current game status, polled by the rig.
async fn game_status(State(state): State<AppState>) -> Json<GameStatus> {
    Json(state.game_status.get_status().await)
}

/// `POST /game/control` — Start or stop the running game.
async fn control_game(
    State(state): State<AppState>,
    payload: Result<Json<ControlRequest>, JsonRejection>,
) -> Result<Json<ControlResponse>, AppError> {
    let Json(body) = payload?;

    let (message, game_status) = match body.action.as_deref().map(str::trim) {
        Some("start") => {
            let game_id = body.game_id.unwrap_or_default();
            let status = state.game_status.start(&game_id).await?;
            ("Game started".to_string(), status)
        }
        Some("stop") => {
            let status = state
                .game_status
                .stop(&state.db, body.game_id.as_deref())
                .await;
            ("Game stopped".to_string(), status)
        }
        _ => {
            return Err(AppError::Validation(
                "action must be \"start\" or \"stop\"".to_string(),
            ));
        }
    };

    Ok(Json(ControlResponse {
        ok: true,
        message,
        game_status,
    }))
}

/// `GET /game/{gameId}` — Live view of a single match.
async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<MatchResponse>, AppError> {
    let found = MatchService::get_by_game_id(&state.db, &game_id).await?;
    Ok(Json(found.into()))
}
