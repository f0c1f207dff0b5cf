use skrate_execution::{GameState, StatsSource};
use skrate_types::{Side, TrickId};
use tracing::debug;

use crate::policy::{choose_next_trick, PolicyConfig, PolicyError, UnitDraw};

/// The next attempt a simulated player makes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlannedAttempt {
    pub side: Side,
    pub trick_id: TrickId,
    pub landed: bool,
    /// Windowed landing rate the outcome was drawn against.
    pub landing_rate: f64,
}

/// Plays turns for a side using a user's attempt history.
#[derive(Clone, Copy, Debug, Default)]
pub struct Planner {
    pub policy: PolicyConfig,
}

impl Planner {
    pub fn new(policy: PolicyConfig) -> Self {
        Self { policy }
    }

    /// Plan the next turn of `state`, drawing on `user`'s history.
    ///
    /// A pending challenge is always answered with the challenged trick. Otherwise the policy
    /// picks among tricks that are not used up. The trick lands with its windowed landing rate.
    pub fn plan<S, D>(
        &self,
        state: &GameState,
        user: &str,
        stats: &S,
        rng: &mut D,
    ) -> Result<PlannedAttempt, PolicyError>
    where
        S: StatsSource + ?Sized,
        D: UnitDraw + ?Sized,
    {
        self.policy.validate()?;
        let side = state.next_side();
        let trick_id = match state.challenging_move_id {
            Some(challenge) => challenge,
            None => choose_next_trick(user, &state.used_up_trick_ids, stats, &self.policy, rng)?,
        };

        let landing_rate = stats
            .windowed_stats(user, self.policy.window)
            .into_iter()
            .find(|s| s.trick_id == trick_id)
            .map(|s| s.landing_rate())
            .unwrap_or(0.0);
        let landed = rng.draw() < landing_rate;
        debug!(?side, %trick_id, landing_rate, landed, "planned attempt");

        Ok(PlannedAttempt {
            side,
            trick_id,
            landed,
            landing_rate,
        })
    }
}
