use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::config::MatchPolicy;
use crate::entities::{MatchStatus, match_record};
use crate::error::AppError;
use crate::utils::generate_game_id;

/// Maximum attempts to generate a unique game id
const MAX_GAME_ID_GENERATION_ATTEMPTS: u32 = 10;

/// Optional score overrides. `None` leaves the stored value untouched; `Some(0)` writes 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreUpdate {
    pub player1_score: Option<i32>,
    pub player2_score: Option<i32>,
}

impl ScoreUpdate {
    #[must_use]
    pub const fn new(player1_score: Option<i32>, player2_score: Option<i32>) -> Self {
        Self {
            player1_score,
            player2_score,
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.player1_score.is_none() && self.player2_score.is_none()
    }

    fn apply(self, active: &mut match_record::ActiveModel) {
        if let Some(score) = self.player1_score {
            active.player1_score = Set(score);
        }
        if let Some(score) = self.player2_score {
            active.player2_score = Set(score);
        }
    }
}

/// Match lifecycle operations over the `matches` table.
pub struct MatchService;

impl MatchService {
    /// Create a new in-progress match for two players.
    ///
    /// # Errors
    ///
    /// `Validation` if either name is blank, `Store` on persistence failure.
    pub async fn create_match(
        db: &DatabaseConnection,
        player1_name: &str,
        player2_name: &str,
    ) -> Result<match_record::Model, AppError> {
        let player1_name = player1_name.trim();
        let player2_name = player2_name.trim();
        if player1_name.is_empty() || player2_name.is_empty() {
            return Err(AppError::Validation(
                "player1Name and player2Name are required".to_string(),
            ));
        }

        let game_id = Self::generate_unique_game_id(db).await?;

        let record = match_record::ActiveModel {
            id: Set(Uuid::new_v4()),
            game_id: Set(game_id),
            player1_name: Set(player1_name.to_string()),
            player2_name: Set(player2_name.to_string()),
            player1_score: Set(0),
            player2_score: Set(0),
            winner: Set(None),
            status: Set(MatchStatus::InProgress.as_str().to_string()),
            started_at: Set(Utc::now().fixed_offset()),
            ended_at: Set(None),
        };

        let inserted = record.insert(db).await?;

        tracing::info!(
            game_id = %inserted.game_id,
            match_id = %inserted.id,
            "Match created"
        );

        Ok(inserted)
    }

    /// Generate a game id not yet present in the store
    async fn generate_unique_game_id(db: &DatabaseConnection) -> Result<String, AppError> {
        for _ in 0..MAX_GAME_ID_GENERATION_ATTEMPTS {
            let game_id = generate_game_id();

            let existing = match_record::Entity::find()
                .filter(match_record::Column::GameId.eq(&game_id))
                .one(db)
                .await?;

            if existing.is_none() {
                return Ok(game_id);
            }
        }

        Err(AppError::Internal(anyhow::anyhow!(
            "Failed to generate unique game id after {MAX_GAME_ID_GENERATION_ATTEMPTS} attempts"
        )))
    }

    /// Apply the supplied scores to a match.
    ///
    /// Under [`MatchPolicy::Permissive`] a finished match still accepts score writes.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown game id, `Conflict` for a finished match under the strict policy.
    pub async fn update_score(
        db: &DatabaseConnection,
        policy: MatchPolicy,
        game_id: &str,
        scores: ScoreUpdate,
    ) -> Result<match_record::Model, AppError> {
        let existing = Self::get_by_game_id(db, game_id).await?;
        Self::guard_finished(policy, &existing)?;

        if scores.is_empty() {
            return Ok(existing);
        }

        let mut active: match_record::ActiveModel = existing.into();
        scores.apply(&mut active);
        let updated = active.update(db).await?;

        tracing::debug!(
            game_id = %updated.game_id,
            player1_score = updated.player1_score,
            player2_score = updated.player2_score,
            "Score updated"
        );

        Ok(updated)
    }

    /// Finish a match with a winner and optional final scores.
    ///
    /// Under [`MatchPolicy::Permissive`] ending twice overwrites winner, scores and end time.
    ///
    /// # Errors
    ///
    /// `Validation` for a blank winner, `NotFound` for an unknown game id, `Conflict` for an
    /// already finished match under the strict policy.
    pub async fn end_match(
        db: &DatabaseConnection,
        policy: MatchPolicy,
        game_id: &str,
        winner: &str,
        scores: ScoreUpdate,
    ) -> Result<match_record::Model, AppError> {
        let winner = winner.trim();
        if winner.is_empty() {
            return Err(AppError::Validation("winner is required".to_string()));
        }

        let existing = Self::get_by_game_id(db, game_id).await?;
        Self::guard_finished(policy, &existing)?;

        let mut active: match_record::ActiveModel = existing.into();
        scores.apply(&mut active);
        active.winner = Set(Some(winner.to_string()));
        active.status = Set(MatchStatus::Finished.as_str().to_string());
        active.ended_at = Set(Some(Utc::now().fixed_offset()));
        let updated = active.update(db).await?;

        tracing::info!(
            game_id = %updated.game_id,
            winner = %winner,
            player1_score = updated.player1_score,
            player2_score = updated.player2_score,
            "Match ended"
        );

        Ok(updated)
    }

    /// Mark a match finished without recording a winner. Already finished matches are
    /// returned unchanged.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown game id, `Store` on persistence failure.
    pub async fn mark_finished(
        db: &DatabaseConnection,
        game_id: &str,
    ) -> Result<match_record::Model, AppError> {
        let existing = Self::get_by_game_id(db, game_id).await?;
        if existing.is_finished() {
            return Ok(existing);
        }

        let mut active: match_record::ActiveModel = existing.into();
        active.status = Set(MatchStatus::Finished.as_str().to_string());
        active.ended_at = Set(Some(Utc::now().fixed_offset()));
        let updated = active.update(db).await?;

        tracing::info!(game_id = %updated.game_id, "Match marked finished");

        Ok(updated)
    }

    /// All finished matches, newest start first.
    ///
    /// # Errors
    ///
    /// `Store` on persistence failure.
    pub async fn list_finished(
        db: &DatabaseConnection,
    ) -> Result<Vec<match_record::Model>, AppError> {
        let matches = match_record::Entity::find()
            .filter(match_record::Column::Status.eq(MatchStatus::Finished.as_str()))
            .order_by_desc(match_record::Column::StartedAt)
            .all(db)
            .await?;

        Ok(matches)
    }

    /// Look a match up by its external game id.
    ///
    /// # Errors
    ///
    /// `NotFound` if no match has this game id.
    pub async fn get_by_game_id(
        db: &DatabaseConnection,
        game_id: &str,
    ) -> Result<match_record::Model, AppError> {
        match_record::Entity::find()
            .filter(match_record::Column::GameId.eq(game_id))
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Match not found".to_string()))
    }

    fn guard_finished(policy: MatchPolicy, existing: &match_record::Model) -> Result<(), AppError> {
        if policy.is_strict() && existing.is_finished() {
            return Err(AppError::Conflict(format!(
                "Match {} is already finished",
                existing.game_id
            )));
        }
        Ok(())
    }
}
