use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::dto::MatchResponse;
use crate::error::AppError;
use crate::services::MatchService;
use crate::state::AppState;

/// Build the history route: `/matches`
pub fn router() -> Router<AppState> {
    Router::new().route("/matches", get(list_matches))
}

/// `GET /matches` — Finished matches, newest first.
async fn list_matches(State(state): State<AppState>) -> Result<Json<Vec<MatchResponse>>, AppError> {
    let matches = MatchService::list_finished(&state.db).await?;
    Ok(Json(matches.into_iter().map(MatchResponse::from).collect()))
}
