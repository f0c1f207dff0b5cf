/// Letters of the game, in the order they are handed out.
pub const LETTERS: [&str; 5] = ["S", "K", "A", "T", "E"];

/// Number of letters that ends the game for whoever collects them all.
pub const LETTERS_TOTAL: u8 = LETTERS.len() as u8;

/// Prefix marking an attempt as made by the simulated past self of a user.
pub const PAST_USER_PREFIX: &str = "past_";

/// Most recent attempts per trick considered when computing landing rates.
pub const STATS_WINDOW: usize = 10;

/// Maximum user name length.
pub const MAX_USER_NAME_LENGTH: usize = 32;

/// Probability the opponent passes over a candidate trick.
pub const DEFAULT_SKIP_PROBABILITY: f64 = 0.5;

/// Letters collected so far for a score (e.g. 3 -> "SKA").
pub fn letters_for(score: u8) -> String {
    LETTERS
        .iter()
        .take(score.min(LETTERS_TOTAL) as usize)
        .copied()
        .collect()
}
