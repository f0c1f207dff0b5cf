//! Game of SKATE rules engine.
//!
//! A game is reconstructed by replaying its attempts in timestamp order. Turns alternate
//! between the live user (who goes first) and their past self. A landed trick that is not a
//! response becomes a challenge; the other side must land the same trick on their next turn or
//! take the next letter of `S-K-A-T-E`. Collecting all five letters loses the game.
//!
//! ## Rules enforced as forced misses
//! - A trick that was already consumed as a challenge response cannot land again, unless it is
//!   the trick currently being challenged.
//! - Responding to a challenge with a different trick counts as a miss.
//!
//! Forced misses are ordinary game events: they are narrated, never rejected. The recorded
//! [`Attempt`] is left untouched; the rules' view of it is kept in [`Turn::effective_landed`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use skrate_execution::game::replay;
//!
//! let state = replay(&attempts, "janedoe")?;
//! println!("{} - {}", state.letters(Side::User), state.letters(Side::PastSelf));
//! for line in state.latest_first() {
//!     println!("{line}");
//! }
//! ```

use std::collections::BTreeSet;

use skrate_types::{
    actor_name, letters_for, side_of, Attempt, Side, TrickCatalog, TrickId, LETTERS,
    LETTERS_TOTAL,
};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Narration for a used-up trick attempted outside of its own challenge.
pub const REPEAT_TRICK_MESSAGE: &str = "Trick already used! Treating as miss for game purposes.";

/// Error during game replay.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Attempts do not alternate between the user and their past self, user first.
    #[error("inconsistent turn order at attempt {index}: expected {expected:?}, found {found:?}")]
    InconsistentTurnOrder {
        index: usize,
        expected: String,
        found: String,
    },
    /// An attempt was applied after one side collected every letter.
    #[error("game is already complete")]
    GameAlreadyComplete,
}

/// Why the rules counted an attempt as a miss regardless of what was recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForcedMiss {
    /// The trick was already used up.
    RepeatTrick,
    /// A challenge was answered with a different trick.
    WrongTrick { expected: TrickId },
}

/// What a turn did to the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ruling {
    /// Landed with no challenge pending; the other side must match it.
    Challenge,
    /// Pending challenge answered successfully.
    Matched,
    /// Pending challenge missed; the responder took `letter`.
    MissedChallenge { letter: &'static str },
    /// Missed with no challenge pending.
    NoOp,
}

/// One applied attempt, as the rules saw it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    pub side: Side,
    pub trick_id: TrickId,
    pub recorded_landed: bool,
    pub effective_landed: bool,
    pub forced_misses: Vec<ForcedMiss>,
    pub ruling: Ruling,
}

/// Score, pending challenge and narration of one game.
///
/// Built fresh per replay and discarded once read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub user_name: String,
    /// Letters held by the live user.
    pub user_score: u8,
    /// Letters held by the past self.
    pub opponent_score: u8,
    /// Trick the next player must match, if the previous turn set a challenge.
    pub challenging_move_id: Option<TrickId>,
    /// Tricks consumed as challenge responses.
    pub used_up_trick_ids: BTreeSet<TrickId>,
    /// Narration in the order it happened. See [`GameState::latest_first`].
    pub status_feed: Vec<String>,
    turns: Vec<Turn>,
}

impl GameState {
    pub fn new(user_name: &str) -> Self {
        Self {
            user_name: user_name.to_string(),
            user_score: 0,
            opponent_score: 0,
            challenging_move_id: None,
            used_up_trick_ids: BTreeSet::new(),
            status_feed: vec![format!("Starting game! {user_name} to go first.")],
            turns: Vec::new(),
        }
    }

    fn say(&mut self, message: impl Into<String>) {
        self.status_feed.push(message.into());
    }

    pub fn score(&self, side: Side) -> u8 {
        match side {
            Side::User => self.user_score,
            Side::PastSelf => self.opponent_score,
        }
    }

    fn score_mut(&mut self, side: Side) -> &mut u8 {
        match side {
            Side::User => &mut self.user_score,
            Side::PastSelf => &mut self.opponent_score,
        }
    }

    /// Letters collected by `side`, e.g. "SK".
    pub fn letters(&self, side: Side) -> String {
        letters_for(self.score(side))
    }

    pub fn is_ongoing(&self) -> bool {
        self.user_score < LETTERS_TOTAL && self.opponent_score < LETTERS_TOTAL
    }

    pub fn is_over(&self) -> bool {
        !self.is_ongoing()
    }

    pub fn winner(&self) -> Option<Side> {
        if self.user_score >= LETTERS_TOTAL {
            Some(Side::PastSelf)
        } else if self.opponent_score >= LETTERS_TOTAL {
            Some(Side::User)
        } else {
            None
        }
    }

    /// Side whose turn it is.
    pub fn next_side(&self) -> Side {
        if self.turns.len() % 2 == 0 {
            Side::User
        } else {
            Side::PastSelf
        }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Narration, most recent first.
    pub fn latest_first(&self) -> impl Iterator<Item = &str> {
        self.status_feed.iter().rev().map(String::as_str)
    }

    /// Apply the next attempt of the game.
    ///
    /// Returns whether this attempt ended the game. An attempt out of turn is an
    /// [`GameError::InconsistentTurnOrder`]. Callers must not feed attempts past the end of the
    /// game; doing so is checked and reported as [`GameError::GameAlreadyComplete`] since a sixth
    /// letter does not exist in [`LETTERS`].
    pub fn apply_attempt(
        &mut self,
        attempt: &Attempt,
        catalog: &TrickCatalog,
    ) -> Result<bool, GameError> {
        if self.is_over() {
            return Err(GameError::GameAlreadyComplete);
        }

        let attempter = self.next_side();
        if side_of(&attempt.user, &self.user_name) != Some(attempter) {
            return Err(GameError::InconsistentTurnOrder {
                index: self.turns.len(),
                expected: actor_name(attempter, &self.user_name),
                found: attempt.user.clone(),
            });
        }
        let opponent = attempter.other();
        let trick_id = attempt.trick_id;
        let mut landed = attempt.landed;
        let mut forced_misses = Vec::new();

        // A used-up trick only counts when it is the one being challenged
        if self.used_up_trick_ids.contains(&trick_id) && self.challenging_move_id != Some(trick_id)
        {
            self.say(REPEAT_TRICK_MESSAGE);
            warn!(side = ?attempter, %trick_id, "used-up trick treated as miss");
            landed = false;
            forced_misses.push(ForcedMiss::RepeatTrick);
        }

        let mut game_over = false;
        let ruling = if let Some(expected) = self.challenging_move_id.take() {
            if trick_id != expected {
                self.say(format!(
                    "Wrong trick, treating as a miss for game purposes. {attempter} was supposed to try a {}",
                    catalog.name_or_fallback(expected)
                ));
                warn!(side = ?attempter, %trick_id, %expected, "wrong trick treated as miss");
                landed = false;
                forced_misses.push(ForcedMiss::WrongTrick { expected });
            }
            self.used_up_trick_ids.insert(trick_id);

            if landed {
                self.say(format!("{attempter} matched the challenge."));
                Ruling::Matched
            } else {
                // Only the responder ever takes a letter
                let score = self.score_mut(attempter);
                let letter = LETTERS[*score as usize];
                *score += 1;
                self.say(format!("Missed challenge! {attempter} gains a {letter}"));

                if self.is_over() {
                    self.say(format!("{opponent} wins!"));
                    info!(
                        user = %self.user_name,
                        winner = ?opponent,
                        user_score = self.user_score,
                        opponent_score = self.opponent_score,
                        "game over"
                    );
                    game_over = true;
                }
                Ruling::MissedChallenge { letter }
            }
        } else if landed {
            self.say(format!(
                "{attempter} landed a {}! Can {opponent} match it?",
                catalog.name_or_fallback(trick_id)
            ));
            self.challenging_move_id = Some(trick_id);
            Ruling::Challenge
        } else {
            Ruling::NoOp
        };

        debug!(
            turn = self.turns.len(),
            side = ?attempter,
            %trick_id,
            recorded_landed = attempt.landed,
            effective_landed = landed,
            ?ruling,
            "applied attempt"
        );
        self.turns.push(Turn {
            side: attempter,
            trick_id,
            recorded_landed: attempt.landed,
            effective_landed: landed,
            forced_misses,
            ruling,
        });

        Ok(game_over)
    }
}

/// Replay a game's attempts using the standard trick catalogue for narration.
pub fn replay(attempts: &[Attempt], user_name: &str) -> Result<GameState, GameError> {
    replay_with_catalog(attempts, user_name, &TrickCatalog::standard())
}

/// Replay a game's attempts in timestamp order.
///
/// Attempts sharing a timestamp keep their input order. The ordered attempts must alternate
/// between `user_name` and its past self, starting with `user_name`, and must not continue past
/// the end of the game.
pub fn replay_with_catalog(
    attempts: &[Attempt],
    user_name: &str,
    catalog: &TrickCatalog,
) -> Result<GameState, GameError> {
    let mut ordered: Vec<&Attempt> = attempts.iter().collect();
    ordered.sort_by_key(|attempt| attempt.time_of_attempt_ms);

    let mut state = GameState::new(user_name);
    for attempt in ordered {
        state.apply_attempt(attempt, catalog)?;
    }
    Ok(state)
}
