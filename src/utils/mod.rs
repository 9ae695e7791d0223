pub mod game_id;

pub use game_id::{generate_game_id, is_valid_game_id};
