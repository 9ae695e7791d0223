use sea_orm::DatabaseConnection;

use crate::config::Config;
use crate::status::GameStatusController;

/// Shared application state available to all request handlers via Axum's `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Config,
    pub game_status: GameStatusController,
}

impl AppState {
    /// Build state with a fresh `IDLE` status controller using the configured policy.
    #[must_use]
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        let game_status = GameStatusController::new(config.match_policy);
        Self {
            db,
            config,
            game_status,
        }
    }
}
