//! Past-self trick selection.
//!
//! Tricks are ranked by landing rate over each trick's most recent attempts. The ranking is
//! walked from the top and every allowed candidate is passed over with `skip_probability`, so the
//! past self usually goes for its best trick but not always.

use std::collections::{BTreeSet, VecDeque};

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use skrate_execution::StatsSource;
use skrate_types::{TrickId, TrickStats, DEFAULT_SKIP_PROBABILITY, STATS_WINDOW};
use thiserror::Error;
use tracing::{debug, info};

/// Error while choosing a trick.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolicyError {
    /// Every ranked trick was prohibited or skipped.
    #[error("no trick chosen for {user:?} ({candidates} ranked, {prohibited} prohibited)")]
    ExhaustedChoices {
        user: String,
        candidates: usize,
        prohibited: usize,
    },
    #[error("skip probability must be within [0, 1] (got {0})")]
    InvalidSkipProbability(f64),
    #[error("stats window must be positive")]
    InvalidWindow,
}

/// Source of uniform draws in `[0, 1)`.
pub trait UnitDraw {
    fn draw(&mut self) -> f64;
}

impl<R: RngCore + ?Sized> UnitDraw for R {
    fn draw(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Always returns the same value.
#[derive(Clone, Copy, Debug)]
pub struct FixedDraw(pub f64);

impl UnitDraw for FixedDraw {
    fn draw(&mut self) -> f64 {
        self.0
    }
}

/// Returns scripted values in order, then `fallback` forever.
#[derive(Clone, Debug)]
pub struct ScriptedDraws {
    values: VecDeque<f64>,
    fallback: f64,
}

impl ScriptedDraws {
    pub fn new(values: impl IntoIterator<Item = f64>, fallback: f64) -> Self {
        Self {
            values: values.into_iter().collect(),
            fallback,
        }
    }

    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl UnitDraw for ScriptedDraws {
    fn draw(&mut self) -> f64 {
        self.values.pop_front().unwrap_or(self.fallback)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Probability of passing over an allowed candidate.
    pub skip_probability: f64,
    /// Most recent attempts per trick used for landing rates.
    pub window: usize,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            skip_probability: DEFAULT_SKIP_PROBABILITY,
            window: STATS_WINDOW,
        }
    }
}

impl PolicyConfig {
    pub fn validate(&self) -> Result<(), PolicyError> {
        if !(0.0..=1.0).contains(&self.skip_probability) {
            return Err(PolicyError::InvalidSkipProbability(self.skip_probability));
        }
        if self.window == 0 {
            return Err(PolicyError::InvalidWindow);
        }
        Ok(())
    }
}

/// Order tricks by descending landing rate. Ties keep their input order.
pub fn rank_tricks(mut stats: Vec<TrickStats>) -> Vec<TrickStats> {
    stats.sort_by(|a, b| b.landing_rate().total_cmp(&a.landing_rate()));
    stats
}

/// Pick the trick the past self of `user` attempts next.
///
/// Never returns a trick in `prohibited`.
pub fn choose_next_trick<S, D>(
    user: &str,
    prohibited: &BTreeSet<TrickId>,
    stats: &S,
    config: &PolicyConfig,
    rng: &mut D,
) -> Result<TrickId, PolicyError>
where
    S: StatsSource + ?Sized,
    D: UnitDraw + ?Sized,
{
    config.validate()?;
    let ranked = rank_tricks(stats.windowed_stats(user, config.window));

    for candidate in &ranked {
        if prohibited.contains(&candidate.trick_id) {
            continue;
        }
        let draw = rng.draw();
        if draw < config.skip_probability {
            debug!(user, trick_id = %candidate.trick_id, draw, "skipped candidate");
            continue;
        }
        info!(
            user,
            trick_id = %candidate.trick_id,
            landing_rate = candidate.landing_rate(),
            "chose trick"
        );
        return Ok(candidate.trick_id);
    }

    Err(PolicyError::ExhaustedChoices {
        user: user.to_string(),
        candidates: ranked.len(),
        prohibited: prohibited.len(),
    })
}
