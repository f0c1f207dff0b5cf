//! Per-trick landing statistics.
//!
//! The opponent policy only needs one query: for a user, how did each trick go over its most
//! recent attempts. [`StatsSource`] is that query; the [`Ledger`](crate::ledger::Ledger) and plain
//! attempt slices both answer it.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use skrate_types::{Attempt, TrickId, TrickStats};

/// Source of windowed per-trick statistics.
pub trait StatsSource {
    /// Stats for every trick `user` attempted at least once, each counted over at most the
    /// `window` most recent attempts of that trick by exactly `user`.
    ///
    /// Results are ordered by ascending trick id.
    fn windowed_stats(&self, user: &str, window: usize) -> Vec<TrickStats>;
}

/// Compute windowed stats over any attempt log.
pub fn windowed_stats<'a>(
    attempts: impl IntoIterator<Item = &'a Attempt>,
    user: &str,
    window: usize,
) -> Vec<TrickStats> {
    let mut by_trick: BTreeMap<TrickId, Vec<(u64, bool)>> = BTreeMap::new();
    for attempt in attempts.into_iter().filter(|a| a.user == user) {
        by_trick
            .entry(attempt.trick_id)
            .or_default()
            .push((attempt.time_of_attempt_ms, attempt.landed));
    }

    by_trick
        .into_iter()
        .map(|(trick_id, mut history)| {
            // Among equal timestamps the later entry is the more recent
            history.reverse();
            history.sort_by_key(|(time, _)| Reverse(*time));
            let mut stats = TrickStats::new(trick_id);
            for (_, landed) in history.into_iter().take(window) {
                stats.record(landed);
            }
            stats
        })
        .collect()
}

impl StatsSource for [Attempt] {
    fn windowed_stats(&self, user: &str, window: usize) -> Vec<TrickStats> {
        windowed_stats(self, user, window)
    }
}

impl StatsSource for Vec<Attempt> {
    fn windowed_stats(&self, user: &str, window: usize) -> Vec<TrickStats> {
        windowed_stats(self, user, window)
    }
}
