use serde::{Deserialize, Serialize};

/// Identifier of a trick definition (not of a specific attempt of one).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TrickId(pub u32);

impl std::fmt::Display for TrickId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for TrickId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Identifier of a game.
pub type GameId = u64;

/// A single recorded trick attempt.
///
/// Attempts are immutable once recorded. Turn order within a game is established by
/// `time_of_attempt_ms` alone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    pub trick_id: TrickId,
    /// Acting party. Past-self attempts carry the [`PAST_USER_PREFIX`](super::PAST_USER_PREFIX).
    pub user: String,
    pub landed: bool,
    pub time_of_attempt_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_id: Option<GameId>,
}

impl Attempt {
    pub fn new(
        trick_id: TrickId,
        user: impl Into<String>,
        landed: bool,
        time_of_attempt_ms: u64,
    ) -> Self {
        Self {
            trick_id,
            user: user.into(),
            landed,
            time_of_attempt_ms,
            game_id: None,
        }
    }

    pub fn in_game(mut self, game_id: GameId) -> Self {
        self.game_id = Some(game_id);
        self
    }
}
