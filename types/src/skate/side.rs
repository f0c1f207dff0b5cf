use serde::{Deserialize, Serialize};

/// The two parties of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    /// The live user.
    User,
    /// The statistically simulated past self of the user.
    PastSelf,
}

impl Side {
    /// Name used in game narration.
    pub fn display_name(self) -> &'static str {
        match self {
            Side::User => "New you",
            Side::PastSelf => "Past you",
        }
    }

    pub fn other(self) -> Side {
        match self {
            Side::User => Side::PastSelf,
            Side::PastSelf => Side::User,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
