pub mod match_record;
pub mod match_status;

pub use match_status::MatchStatus;
