use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::match_record;

/// Wire representation of a match row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    pub id: Uuid,
    pub game_id: String,
    pub player1_name: String,
    pub player2_name: String,
    pub player1_score: i32,
    pub player2_score: i32,
    pub winner: Option<String>,
    pub status: String,
    pub started_at: String,
    pub ended_at: Option<String>,
}

impl MatchResponse {
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status == crate::entities::MatchStatus::Finished.as_str()
    }
}

impl From<match_record::Model> for MatchResponse {
    fn from(m: match_record::Model) -> Self {
        Self {
            id: m.id,
            game_id: m.game_id,
            player1_name: m.player1_name,
            player2_name: m.player2_name,
            player1_score: m.player1_score,
            player2_score: m.player2_score,
            winner: m.winner,
            status: m.status,
            started_at: m.started_at.to_rfc3339(),
            ended_at: m.ended_at.map(|t| t.to_rfc3339()),
        }
    }
}
