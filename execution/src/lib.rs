//! Skrate execution layer.
//!
//! This crate contains the game of SKATE rules engine ([`game`]), the per-trick statistics query
//! the past-self opponent draws on ([`stats`]) and an in-memory attempt [`Ledger`] that records
//! attempts and games the way the surrounding application would.
//!
//! ## Determinism requirements
//! - Game state is a pure function of a game's attempts; replaying them twice yields identical
//!   scores and narration.
//! - Turn order comes from attempt timestamps only.
//! - Avoid iteration order of hash-based collections influencing outputs.
//!
//! ## Minimal replay (example)
//! ```rust,ignore
//! use skrate_execution::{replay, Ledger};
//! use skrate_types::{past_self_name, TrickCatalog};
//!
//! let mut ledger = Ledger::new(TrickCatalog::standard());
//! let game_id = ledger.start_game("janedoe")?;
//! let kickflip = ledger.catalog().by_name("Kickflip").unwrap().id;
//! ledger.record_attempt("janedoe", kickflip, true, Some(game_id))?;
//! ledger.record_attempt(&past_self_name("janedoe"), kickflip, false, Some(game_id))?;
//! let state = ledger.game_state(game_id)?;
//! assert_eq!(state.opponent_score, 1);
//! ```

pub mod game;
pub mod ledger;
pub mod stats;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;


pub use game::{
    replay, replay_with_catalog, ForcedMiss, GameError, GameState, Ruling, Turn,
    REPEAT_TRICK_MESSAGE,
};
pub use ledger::{Game, Ledger, LedgerError, Recorded};
pub use stats::{windowed_stats, StatsSource};
