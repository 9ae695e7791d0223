use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::MatchResponse;
use crate::status::GameStatus;

// ============ Request DTOs ============
//
// Required fields are optional here so that a missing field is reported as a
// 400 with a readable message instead of a deserialisation rejection.

/// POST /game/start
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartGameRequest {
    pub player1_name: Option<String>,
    pub player2_name: Option<String>,
}

/// POST /game/score
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    pub game_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player1_score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player2_score: Option<i32>,
}

/// POST /game/end
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndGameRequest {
    pub game_id: Option<String>,
    pub winner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player1_score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player2_score: Option<i32>,
}

/// POST /game/control
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlRequest {
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_id: Option<String>,
}

// ============ Response DTOs ============

/// Match creation response
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StartGameResponse {
    pub game_id: String,
    pub match_id: Uuid,
}

/// Score / end acknowledgement carrying the updated match
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MatchUpdateResponse {
    pub ok: bool,
    #[serde(rename = "match")]
    pub match_: MatchResponse,
}

/// Game status control acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ControlResponse {
    pub ok: bool,
    pub message: String,
    pub game_status: GameStatus,
}
