//! Process-wide game status polled by the wearable rig.
//!
//! A single slot holding `IDLE` or `RUNNING` plus the running game's id. The slot
//! lives in memory only: it starts `IDLE` with every process and is never written
//! to the database. Each instance has its own slot.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::config::MatchPolicy;
use crate::error::AppError;
use crate::services::MatchService;

/// Whether a physical session is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum GameState {
    #[default]
    Idle,
    Running,
}

/// Snapshot of the status slot. `game_id` is set iff `status` is `Running`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GameStatus {
    pub status: GameState,
    pub game_id: Option<String>,
}

impl GameStatus {
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            status: GameState::Idle,
            game_id: None,
        }
    }

    #[must_use]
    pub fn running(game_id: impl Into<String>) -> Self {
        Self {
            status: GameState::Running,
            game_id: Some(game_id.into()),
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status == GameState::Running
    }
}

/// Owner of the status slot, cloned into every request handler through `AppState`.
#[derive(Debug, Clone, Default)]
pub struct GameStatusController {
    state: Arc<RwLock<GameStatus>>,
    policy: MatchPolicy,
}

impl GameStatusController {
    /// Create a controller in the `IDLE` state.
    #[must_use]
    pub fn new(policy: MatchPolicy) -> Self {
        Self {
            state: Arc::new(RwLock::new(GameStatus::idle())),
            policy,
        }
    }

    /// Current snapshot.
    pub async fn get_status(&self) -> GameStatus {
        self.state.read().await.clone()
    }

    /// Mark `game_id` as the running game.
    ///
    /// A running game is overwritten under the permissive policy. Under the strict
    /// policy a different running game is a conflict; restarting the same id is accepted.
    ///
    /// # Errors
    ///
    /// `Validation` for a blank id, `Conflict` as described above.
    pub async fn start(&self, game_id: &str) -> Result<GameStatus, AppError> {
        let game_id = game_id.trim();
        if game_id.is_empty() {
            return Err(AppError::Validation(
                "gameId is required to start the game".to_string(),
            ));
        }

        let mut state = self.state.write().await;

        if state.is_running()
            && let Some(active) = state.game_id.as_deref()
            && active != game_id
        {
            if self.policy.is_strict() {
                return Err(AppError::Conflict(format!(
                    "Game {active} is already running"
                )));
            }
            tracing::warn!(previous = %active, next = %game_id, "Overwriting running game");
        }

        *state = GameStatus::running(game_id);
        tracing::info!(game_id = %game_id, "Game status RUNNING");

        Ok(state.clone())
    }

    /// Reset to `IDLE` whatever the current state.
    ///
    /// When `game_id` is given the match is also marked finished in the store. That
    /// write happens after the reset and its failure is only logged.
    pub async fn stop(&self, db: &DatabaseConnection, game_id: Option<&str>) -> GameStatus {
        let snapshot = {
            let mut state = self.state.write().await;
            *state = GameStatus::idle();
            state.clone()
        };
        tracing::info!("Game status IDLE");

        if let Some(game_id) = game_id.map(str::trim).filter(|id| !id.is_empty())
            && let Err(err) = MatchService::mark_finished(db, game_id).await
        {
            tracing::warn!(
                game_id = %game_id,
                error = %err,
                "Could not mark match finished after stop; status and store may diverge"
            );
        }

        snapshot
    }

    /// Reset to `IDLE` only if `game_id` is the running game. Returns whether it was.
    pub async fn release(&self, game_id: &str) -> bool {
        let mut state = self.state.write().await;
        if state.game_id.as_deref() != Some(game_id) {
            return false;
        }

        *state = GameStatus::idle();
        tracing::info!(game_id = %game_id, "Game status IDLE after match end");
        true
    }
}
