//! Typed HTTP client for the match API.
//!
//! Covers what the operator screens need (start a match, follow it live, browse
//! history) and what the rig needs (poll the game status, report scores).

use std::time::Duration;

use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::dto::{
    ControlRequest, ControlResponse, EndGameRequest, MatchResponse, MatchUpdateResponse,
    ScoreRequest, StartGameRequest, StartGameResponse,
};
use crate::services::ScoreUpdate;
use crate::status::GameStatus;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Errors returned by [`MatchClient`].
#[derive(Debug)]
pub enum ClientError {
    /// The server answered with a non-success status and an `{ "error": ... }` body.
    Api { status: StatusCode, message: String },
    /// The request never produced a usable response.
    Transport(reqwest::Error),
}

impl ClientError {
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(_) => None,
        }
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Api { status, message } => write!(f, "API error {status}: {message}"),
            Self::Transport(err) => write!(f, "Network error: {err}"),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api { .. } => None,
            Self::Transport(err) => Some(err),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err)
    }
}

/// `action` values accepted by `POST /game/control`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    Start,
    Stop,
}

impl ControlAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchClient {
    http: reqwest::Client,
    base_url: String,
    poll_interval: Duration,
}

impl MatchClient {
    /// Create a client for the API rooted at `base_url` (e.g. `http://localhost:3000`).
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            http,
            base_url,
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    /// Override the live-scoreboard polling interval.
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.http.get(self.url(path)).send().await?;
        decode(response).await
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        decode(response).await
    }

    /// `POST /game/start`
    ///
    /// # Errors
    ///
    /// `Api` with 400 when a name is blank.
    pub async fn start_game(
        &self,
        player1_name: &str,
        player2_name: &str,
    ) -> Result<StartGameResponse, ClientError> {
        let body = StartGameRequest {
            player1_name: Some(player1_name.to_string()),
            player2_name: Some(player2_name.to_string()),
        };
        self.post_json("/game/start", &body).await
    }

    /// `GET /game/{gameId}`
    ///
    /// # Errors
    ///
    /// `Api` with 404 for an unknown game.
    pub async fn get_game(&self, game_id: &str) -> Result<MatchResponse, ClientError> {
        self.get_json(&format!("/game/{game_id}")).await
    }

    /// `GET /matches`
    ///
    /// # Errors
    ///
    /// `Api` with 500 on a store failure.
    pub async fn list_matches(&self) -> Result<Vec<MatchResponse>, ClientError> {
        self.get_json("/matches").await
    }

    /// `GET /game/status`
    ///
    /// # Errors
    ///
    /// Only transport failures.
    pub async fn game_status(&self) -> Result<GameStatus, ClientError> {
        self.get_json("/game/status").await
    }

    /// `POST /game/control`
    ///
    /// # Errors
    ///
    /// `Api` with 400 when starting without a game id, 409 on a strict-policy conflict.
    pub async fn control(
        &self,
        action: ControlAction,
        game_id: Option<&str>,
    ) -> Result<ControlResponse, ClientError> {
        let body = ControlRequest {
            action: Some(action.as_str().to_string()),
            game_id: game_id.map(str::to_string),
        };
        self.post_json("/game/control", &body).await
    }

    /// `POST /game/score`
    ///
    /// # Errors
    ///
    /// `Api` with 404 for an unknown game.
    pub async fn report_score(
        &self,
        game_id: &str,
        scores: ScoreUpdate,
    ) -> Result<MatchResponse, ClientError> {
        let body = ScoreRequest {
            game_id: Some(game_id.to_string()),
            player1_score: scores.player1_score,
            player2_score: scores.player2_score,
        };
        let ack: MatchUpdateResponse = self.post_json("/game/score", &body).await?;
        Ok(ack.match_)
    }

    /// `POST /game/end`
    ///
    /// # Errors
    ///
    /// `Api` with 400 for a blank winner, 404 for an unknown game.
    pub async fn end_game(
        &self,
        game_id: &str,
        winner: &str,
        scores: ScoreUpdate,
    ) -> Result<MatchResponse, ClientError> {
        let body = EndGameRequest {
            game_id: Some(game_id.to_string()),
            winner: Some(winner.to_string()),
            player1_score: scores.player1_score,
            player2_score: scores.player2_score,
        };
        let ack: MatchUpdateResponse = self.post_json("/game/end", &body).await?;
        Ok(ack.match_)
    }

    /// Poll a match until it is finished, handing every snapshot to `on_update`.
    ///
    /// Failed polls are retried after twice the normal interval. An unknown game
    /// ends the watch with the 404 error.
    ///
    /// # Errors
    ///
    /// `Api` with 404 if the game does not exist.
    pub async fn watch_game<F>(
        &self,
        game_id: &str,
        mut on_update: F,
    ) -> Result<MatchResponse, ClientError>
    where
        F: FnMut(&MatchResponse) + Send,
    {
        loop {
            let delay = match self.get_game(game_id).await {
                Ok(snapshot) => {
                    on_update(&snapshot);
                    if snapshot.is_finished() {
                        return Ok(snapshot);
                    }
                    self.poll_interval
                }
                Err(err) if err.status() == Some(StatusCode::NOT_FOUND) => return Err(err),
                Err(err) => {
                    tracing::warn!(game_id = %game_id, error = %err, "Failed to fetch game status");
                    self.poll_interval * 2
                }
            };

            tokio::time::sleep(delay).await;
        }
    }
}

/// Decode a success body as `T`, or turn an error response into [`ClientError::Api`].
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let message = response
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|body| body["error"].as_str().map(str::to_string))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());

    Err(ClientError::Api { status, message })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let url = MatchClient::new("http://localhost:3000/")
            .map(|client| client.url("/matches"))
            .unwrap_or_default();
        assert_eq!(url, "http://localhost:3000/matches");
    }

    #[test]
    fn test_control_action_names() {
        assert_eq!(ControlAction::Start.as_str(), "start");
        assert_eq!(ControlAction::Stop.as_str(), "stop");
    }

    #[test]
    fn test_api_error_display() {
        let err = ClientError::Api {
            status: StatusCode::NOT_FOUND,
            message: "Match not found".to_string(),
        };
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(err.to_string(), "API error 404 Not Found: Match not found");
    }
}
