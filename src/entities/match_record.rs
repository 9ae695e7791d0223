use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One row per played game.
#[derive(Clone, Debug, Default, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "matches")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub game_id: String,
    pub player1_name: String,
    pub player2_name: String,
    pub player1_score: i32,
    pub player2_score: i32,
    pub winner: Option<String>,
    pub status: String,
    pub started_at: DateTimeWithTimeZone,
    pub ended_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Whether the match has reached its terminal state.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        super::MatchStatus::from_str(&self.status) == Some(super::MatchStatus::Finished)
    }
}
