mod game;
mod health;
mod matches;

use axum::Router;

use crate::state::AppState;

/// Build the complete application router.
///
/// Structure:
/// - `GET /health` — liveness check
/// - `GET /matches` — finished match history
/// - `/game/...` — match lifecycle and the polled game status
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(matches::router())
        .nest("/game", game::router())
}
