//! In-memory attempt ledger.
//!
//! Holds the trick catalogue, every recorded attempt and the games they belong to. A ledger is
//! an explicit context owned by the caller; nothing here is global. Recording an attempt into a
//! game replays that game, and a game is marked complete (with its winner) as soon as the replay
//! reports termination.
//!
//! Timestamps come from a logical millisecond clock that only moves forward, so attempts recorded
//! through one ledger always replay in recording order.

use std::collections::BTreeMap;

use skrate_types::{
    side_of, validate_user_name, Attempt, GameId, Side, TrickCatalog, TrickId, TrickStats,
    UserNameError,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::game::{replay_with_catalog, GameError, GameState};
use crate::stats::{windowed_stats, StatsSource};

/// Error while recording or querying the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("unknown trick {0}")]
    UnknownTrick(TrickId),
    #[error("unknown game {0}")]
    UnknownGame(GameId),
    #[error("game {0} is already complete")]
    GameComplete(GameId),
    #[error("{user:?} is not playing game {game_id}")]
    NotAParticipant { user: String, game_id: GameId },
    #[error("invalid user: {0}")]
    InvalidUser(#[from] UserNameError),
    #[error("replay failed: {0}")]
    Replay(#[from] GameError),
    #[error("ledger clock exhausted at {0} ms")]
    ClockExhausted(u64),
    #[error("no game ids left")]
    GameIdsExhausted,
}

/// A game of SKATE between a user and their past self.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    pub id: GameId,
    pub user: String,
    pub started_at_ms: u64,
    pub complete: bool,
    pub winner: Option<Side>,
}

/// Result of recording one attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recorded {
    pub attempt: Attempt,
    /// Game state after this attempt, when it was part of a game.
    pub game_state: Option<GameState>,
}

#[derive(Clone, Debug)]
pub struct Ledger {
    catalog: TrickCatalog,
    attempts: Vec<Attempt>,
    games: BTreeMap<GameId, Game>,
    clock_ms: u64,
    next_game_id: GameId,
}

impl Ledger {
    pub fn new(catalog: TrickCatalog) -> Self {
        Self {
            catalog,
            attempts: Vec::new(),
            games: BTreeMap::new(),
            clock_ms: 0,
            next_game_id: 1,
        }
    }

    /// Ledger preloaded with attempt history.
    ///
    /// The clock resumes after the latest history timestamp. Game ids continue past any id
    /// referenced by the history, so a new game never picks up an earlier game's attempts.
    pub fn with_history(catalog: TrickCatalog, history: Vec<Attempt>) -> Self {
        let clock_ms = history
            .iter()
            .map(|attempt| attempt.time_of_attempt_ms)
            .max()
            .unwrap_or(0);
        let next_game_id = history
            .iter()
            .filter_map(|attempt| attempt.game_id)
            .max()
            .map_or(1, |id| id.saturating_add(1));
        Self {
            clock_ms,
            next_game_id,
            attempts: history,
            ..Self::new(catalog)
        }
    }

    pub fn catalog(&self) -> &TrickCatalog {
        &self.catalog
    }

    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }

    fn tick(&mut self) -> Result<u64, LedgerError> {
        self.clock_ms = self
            .clock_ms
            .checked_add(1)
            .ok_or(LedgerError::ClockExhausted(self.clock_ms))?;
        Ok(self.clock_ms)
    }

    pub fn start_game(&mut self, user: &str) -> Result<GameId, LedgerError> {
        validate_user_name(user)?;
        let started_at_ms = self.tick()?;
        let id = self.next_game_id;
        self.next_game_id = id.checked_add(1).ok_or(LedgerError::GameIdsExhausted)?;
        self.games.insert(
            id,
            Game {
                id,
                user: user.to_string(),
                started_at_ms,
                complete: false,
                winner: None,
            },
        );
        info!(user, game_id = id, "game started");
        Ok(id)
    }

    pub fn game(&self, game_id: GameId) -> Result<&Game, LedgerError> {
        self.games
            .get(&game_id)
            .ok_or(LedgerError::UnknownGame(game_id))
    }

    /// Attempts of a game in recording order.
    pub fn game_attempts(&self, game_id: GameId) -> Result<Vec<&Attempt>, LedgerError> {
        self.game(game_id)?;
        Ok(self
            .attempts
            .iter()
            .filter(|attempt| attempt.game_id == Some(game_id))
            .collect())
    }

    /// Reconstruct where a game stands.
    pub fn game_state(&self, game_id: GameId) -> Result<GameState, LedgerError> {
        let game = self.game(game_id)?;
        let attempts: Vec<Attempt> = self
            .game_attempts(game_id)?
            .into_iter()
            .cloned()
            .collect();
        Ok(replay_with_catalog(&attempts, &game.user, &self.catalog)?)
    }

    /// Record an attempt, optionally as a turn of a game.
    ///
    /// Attempts outside a game must come from a plain user name; past-self attempts only exist
    /// inside games. An attempt the game rejects (wrong turn order, game over) is not kept.
    pub fn record_attempt(
        &mut self,
        user: &str,
        trick_id: TrickId,
        landed: bool,
        game_id: Option<GameId>,
    ) -> Result<Recorded, LedgerError> {
        if !self.catalog.contains(trick_id) {
            return Err(LedgerError::UnknownTrick(trick_id));
        }

        let Some(game_id) = game_id else {
            validate_user_name(user)?;
            let attempt = Attempt::new(trick_id, user, landed, self.tick()?);
            debug!(user, %trick_id, landed, "recorded practice attempt");
            self.attempts.push(attempt.clone());
            return Ok(Recorded {
                attempt,
                game_state: None,
            });
        };

        let game = self.game(game_id)?;
        if game.complete {
            return Err(LedgerError::GameComplete(game_id));
        }
        if side_of(user, &game.user).is_none() {
            return Err(LedgerError::NotAParticipant {
                user: user.to_string(),
                game_id,
            });
        }

        let attempt = Attempt::new(trick_id, user, landed, self.tick()?).in_game(game_id);
        self.attempts.push(attempt.clone());
        let game_state = match self.game_state(game_id) {
            Ok(state) => state,
            Err(err) => {
                self.attempts.pop();
                return Err(err);
            }
        };
        debug!(user, game_id, %trick_id, landed, "recorded game attempt");

        if let Some(winner) = game_state.winner() {
            if let Some(game) = self.games.get_mut(&game_id) {
                game.complete = true;
                game.winner = Some(winner);
            }
            info!(game_id, ?winner, "game complete");
        }

        Ok(Recorded {
            attempt,
            game_state: Some(game_state),
        })
    }

    /// All-time attempt and land counts of one trick by `user`.
    pub fn trick_totals(&self, user: &str, trick_id: TrickId) -> TrickStats {
        let mut stats = TrickStats::new(trick_id);
        for attempt in self
            .attempts
            .iter()
            .filter(|a| a.user == user && a.trick_id == trick_id)
        {
            stats.record(attempt.landed);
        }
        stats
    }
}

impl StatsSource for Ledger {
    fn windowed_stats(&self, user: &str, window: usize) -> Vec<TrickStats> {
        windowed_stats(&self.attempts, user, window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{practice, trick, TEST_USER};
    use skrate_types::past_self_name;

    fn ledger() -> Ledger {
        Ledger::new(TrickCatalog::standard())
    }

    #[test]
    fn test_practice_attempt_updates_totals() {
        let mut ledger = ledger();
        let kickflip = ledger.catalog().by_name("Kickflip").unwrap().id;

        let recorded = ledger
            .record_attempt(TEST_USER, kickflip, false, None)
            .unwrap();
        assert_eq!(recorded.game_state, None);
        assert_eq!(recorded.attempt.user, TEST_USER);

        let totals = ledger.trick_totals(TEST_USER, kickflip);
        assert_eq!(totals.attempts, 1);
        assert_eq!(totals.lands, 0);

        ledger.record_attempt(TEST_USER, kickflip, true, None).unwrap();
        let totals = ledger.trick_totals(TEST_USER, kickflip);
        assert_eq!(totals.attempts, 2);
        assert_eq!(totals.lands, 1);
    }

    #[test]
    fn test_rejects_unknown_trick_and_reserved_names() {
        let mut ledger = ledger();
        assert_eq!(
            ledger.record_attempt(TEST_USER, trick(999), true, None),
            Err(LedgerError::UnknownTrick(trick(999)))
        );
        assert!(matches!(
            ledger.record_attempt("past_janedoe", trick(1), true, None),
            Err(LedgerError::InvalidUser(UserNameError::ReservedPrefix { .. }))
        ));
        assert!(matches!(
            ledger.start_game(""),
            Err(LedgerError::InvalidUser(UserNameError::Empty))
        ));
        assert!(ledger.attempts().is_empty());
    }

    #[test]
    fn test_game_attempts_are_replayed() {
        let mut ledger = ledger();
        let past = past_self_name(TEST_USER);
        let game_id = ledger.start_game(TEST_USER).unwrap();

        ledger
            .record_attempt(TEST_USER, trick(1), true, Some(game_id))
            .unwrap();
        let recorded = ledger
            .record_attempt(&past, trick(1), false, Some(game_id))
            .unwrap();

        let state = recorded.game_state.unwrap();
        assert_eq!(state.opponent_score, 1);
        assert_eq!(ledger.game_state(game_id).unwrap(), state);
        assert_eq!(ledger.game_attempts(game_id).unwrap().len(), 2);
        assert!(!ledger.game(game_id).unwrap().complete);
    }

    #[test]
    fn test_out_of_turn_attempt_is_not_kept() {
        let mut ledger = ledger();
        let past = past_self_name(TEST_USER);
        let game_id = ledger.start_game(TEST_USER).unwrap();

        let err = ledger
            .record_attempt(&past, trick(1), true, Some(game_id))
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Replay(GameError::InconsistentTurnOrder { index: 0, .. })
        ));
        assert!(ledger.game_attempts(game_id).unwrap().is_empty());
    }

    #[test]
    fn test_outsider_cannot_join_game() {
        let mut ledger = ledger();
        let game_id = ledger.start_game(TEST_USER).unwrap();
        assert_eq!(
            ledger.record_attempt("johndoe", trick(1), true, Some(game_id)),
            Err(LedgerError::NotAParticipant {
                user: "johndoe".to_string(),
                game_id,
            })
        );
        assert_eq!(
            ledger.record_attempt(TEST_USER, trick(1), true, Some(42)),
            Err(LedgerError::UnknownGame(42))
        );
    }

    #[test]
    fn test_game_completes_with_winner() {
        let mut ledger = ledger();
        let past = past_self_name(TEST_USER);
        let game_id = ledger.start_game(TEST_USER).unwrap();

        // Past self lands five tricks, user misses every one
        for id in 1..=5 {
            ledger
                .record_attempt(TEST_USER, trick(10 + id), false, Some(game_id))
                .unwrap();
            ledger
                .record_attempt(&past, trick(id), true, Some(game_id))
                .unwrap();
            ledger
                .record_attempt(TEST_USER, trick(id), false, Some(game_id))
                .unwrap();
            if id < 5 {
                ledger
                    .record_attempt(&past, trick(10 + id), false, Some(game_id))
                    .unwrap();
            }
        }

        let game = ledger.game(game_id).unwrap();
        assert!(game.complete);
        assert_eq!(game.winner, Some(Side::PastSelf));
        assert_eq!(
            ledger.record_attempt(TEST_USER, trick(1), true, Some(game_id)),
            Err(LedgerError::GameComplete(game_id))
        );
    }

    #[test]
    fn test_stats_include_game_and_practice_attempts() {
        let history = practice(TEST_USER, trick(2), &[true, true, false], 10);
        let mut ledger = Ledger::with_history(TrickCatalog::standard(), history);
        let game_id = ledger.start_game(TEST_USER).unwrap();
        let recorded = ledger
            .record_attempt(TEST_USER, trick(2), true, Some(game_id))
            .unwrap();
        assert!(recorded.attempt.time_of_attempt_ms > 12);

        let stats = ledger.windowed_stats(TEST_USER, 10);
        assert_eq!(stats, vec![TrickStats { trick_id: trick(2), attempts: 4, lands: 3 }]);
        assert!(ledger.windowed_stats(&past_self_name(TEST_USER), 10).is_empty());
    }

    #[test]
    fn test_new_game_ids_skip_history_games() {
        let history = vec![Attempt::new(trick(1), TEST_USER, true, 5).in_game(1)];
        let mut ledger = Ledger::with_history(TrickCatalog::standard(), history);

        let game_id = ledger.start_game(TEST_USER).unwrap();
        assert_eq!(game_id, 2);
        assert!(ledger.game_attempts(game_id).unwrap().is_empty());

        // The new game opens with the user, untouched by the old game's attempt
        let recorded = ledger
            .record_attempt(TEST_USER, trick(2), true, Some(game_id))
            .unwrap();
        let state = recorded.game_state.unwrap();
        assert_eq!(state.turns().len(), 1);
        assert_eq!(state.challenging_move_id, Some(trick(2)));
        assert_eq!((state.user_score, state.opponent_score), (0, 0));
        assert_eq!(ledger.game(1), Err(LedgerError::UnknownGame(1)));
    }

    #[test]
    fn test_clock_exhaustion_is_an_error() {
        let history = vec![Attempt::new(trick(1), TEST_USER, true, u64::MAX)];
        let mut ledger = Ledger::with_history(TrickCatalog::standard(), history);

        assert_eq!(
            ledger.record_attempt(TEST_USER, trick(1), true, None),
            Err(LedgerError::ClockExhausted(u64::MAX))
        );
        assert_eq!(
            ledger.start_game(TEST_USER),
            Err(LedgerError::ClockExhausted(u64::MAX))
        );
        assert_eq!(ledger.attempts().len(), 1);
    }
}
