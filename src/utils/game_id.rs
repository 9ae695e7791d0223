use rand::Rng;

const GAME_ID_PREFIX: &str = "game_";
/// Upper bound (exclusive) of the random suffix
const GAME_ID_SUFFIX_RANGE: u32 = 1_000_000;

/// Generate a game identifier of the form `game_<unix-millis>_<random>`.
pub fn generate_game_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix = rand::thread_rng().gen_range(0..GAME_ID_SUFFIX_RANGE);
    format!("{GAME_ID_PREFIX}{millis}_{suffix}")
}

/// Check that a string has the `game_<digits>_<digits>` shape.
pub fn is_valid_game_id(id: &str) -> bool {
    let Some(rest) = id.strip_prefix(GAME_ID_PREFIX) else {
        return false;
    };
    let Some((millis, suffix)) = rest.split_once('_') else {
        return false;
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(millis) && all_digits(suffix)
}
