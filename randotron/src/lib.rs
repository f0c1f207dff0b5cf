//! Simulated past-self opponent for skrate.
//!
//! [`policy`] picks the trick the past self goes for next, [`Planner`] turns that into a full
//! attempt (trick plus landed or not) and [`Engine`] plays whole seeded games on a [`Ledger`].

pub mod policy;
mod state_machine;

use std::path::PathBuf;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use skrate_execution::{Ledger, LedgerError};
use skrate_types::{
    actor_name, validate_user_name, Attempt, GameId, Side, TrickCatalog, UserNameError,
    DEFAULT_SKIP_PROBABILITY, STATS_WINDOW,
};
use thiserror::Error;
use tracing::info;

pub use policy::{
    choose_next_trick, rank_tricks, FixedDraw, PolicyConfig, PolicyError, ScriptedDraws, UnitDraw,
};
pub use state_machine::{PlannedAttempt, Planner};

/// Default cap on turns in one simulated game.
pub const DEFAULT_MAX_TURNS: usize = 200;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid user: {0}")]
    InvalidUser(#[from] UserNameError),
    #[error("policy failed: {0}")]
    Policy(#[from] PolicyError),
    #[error("ledger rejected attempt: {0}")]
    Ledger(#[from] LedgerError),
    #[error("game {game_id} undecided after {max_turns} turns")]
    TurnLimit { game_id: GameId, max_turns: usize },
}

/// Configuration for the simulation engine
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    pub user: String,
    /// Policy of the past self.
    pub past_self: PolicyConfig,
    /// Policy standing in for the live user.
    pub live: PolicyConfig,
    pub max_turns: usize,
}

/// Practice history for one trick, oldest outcome first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeLog {
    pub trick: String,
    pub outcomes: Vec<bool>,
}

/// Configuration for randotron runs (from config file)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub user: String,
    pub seed: u64,
    pub log_level: String,
    pub history_file: PathBuf,
    #[serde(default = "default_skip_probability")]
    pub skip_probability: f64,
    #[serde(default)]
    pub live_skip_probability: f64,
    #[serde(default = "default_window")]
    pub window: usize,
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,
    #[serde(default = "default_games")]
    pub games: usize,
}

fn default_skip_probability() -> f64 {
    DEFAULT_SKIP_PROBABILITY
}

fn default_window() -> usize {
    STATS_WINDOW
}

fn default_max_turns() -> usize {
    DEFAULT_MAX_TURNS
}

fn default_games() -> usize {
    1
}

impl Config {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            user: self.user.clone(),
            past_self: PolicyConfig {
                skip_probability: self.skip_probability,
                window: self.window,
            },
            live: PolicyConfig {
                skip_probability: self.live_skip_probability,
                window: self.window,
            },
            max_turns: self.max_turns,
        }
    }
}

/// Turn practice logs into attempts by `user`, adding unknown trick names to `catalog`.
///
/// Logs are laid out one after another on the timeline, so the last outcome of the last log is
/// the most recent attempt.
pub fn load_history(logs: &[PracticeLog], user: &str, catalog: &mut TrickCatalog) -> Vec<Attempt> {
    let mut time_ms = 0;
    let mut attempts = Vec::new();
    for log in logs {
        let trick_id = catalog.insert(&log.trick);
        for landed in &log.outcomes {
            time_ms += 1;
            attempts.push(Attempt::new(trick_id, user, *landed, time_ms));
        }
    }
    attempts
}

/// Outcome of one simulated game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSummary {
    pub game_id: GameId,
    pub winner: Side,
    pub user_letters: String,
    pub past_self_letters: String,
    pub turns: usize,
    /// Narration in the order it happened.
    pub status_feed: Vec<String>,
}

/// Plays games of SKATE between a user and their past self.
pub struct Engine<D: UnitDraw> {
    config: EngineConfig,
    ledger: Ledger,
    rng: D,
}

impl Engine<ChaCha20Rng> {
    /// Engine drawing from a ChaCha20 stream seeded with `seed`.
    pub fn seeded(config: EngineConfig, ledger: Ledger, seed: u64) -> Result<Self, EngineError> {
        Self::new(config, ledger, ChaCha20Rng::seed_from_u64(seed))
    }
}

impl<D: UnitDraw> Engine<D> {
    pub fn new(config: EngineConfig, ledger: Ledger, rng: D) -> Result<Self, EngineError> {
        validate_user_name(&config.user)?;
        config.past_self.validate()?;
        config.live.validate()?;
        Ok(Self {
            config,
            ledger,
            rng,
        })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    fn planner(&self, side: Side) -> Planner {
        match side {
            Side::User => Planner::new(self.config.live),
            Side::PastSelf => Planner::new(self.config.past_self),
        }
    }

    /// Play one game to completion.
    pub fn play_game(&mut self) -> Result<GameSummary, EngineError> {
        let user = self.config.user.clone();
        let game_id = self.ledger.start_game(&user)?;

        for _ in 0..self.config.max_turns {
            let state = self.ledger.game_state(game_id)?;
            let planner = self.planner(state.next_side());
            let planned = planner.plan(&state, &user, &self.ledger, &mut self.rng)?;
            let recorded = self.ledger.record_attempt(
                &actor_name(planned.side, &user),
                planned.trick_id,
                planned.landed,
                Some(game_id),
            )?;

            let Some(state) = recorded.game_state else {
                continue;
            };
            if let Some(winner) = state.winner() {
                info!(
                    game_id,
                    ?winner,
                    user_letters = %state.letters(Side::User),
                    past_self_letters = %state.letters(Side::PastSelf),
                    turns = state.turns().len(),
                    "simulated game finished"
                );
                return Ok(GameSummary {
                    game_id,
                    winner,
                    user_letters: state.letters(Side::User),
                    past_self_letters: state.letters(Side::PastSelf),
                    turns: state.turns().len(),
                    status_feed: state.status_feed,
                });
            }
        }

        Err(EngineError::TurnLimit {
            game_id,
            max_turns: self.config.max_turns,
        })
    }
}
