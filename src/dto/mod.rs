pub mod game;
pub mod matches;

pub use game::{
    ControlRequest, ControlResponse, EndGameRequest, MatchUpdateResponse, ScoreRequest,
    StartGameRequest, StartGameResponse,
};
pub use matches::MatchResponse;
