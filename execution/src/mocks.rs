//! Fixtures for building attempt logs in tests.

use skrate_types::{past_self_name, Attempt, TrickId};

/// Live user used across tests.
pub const TEST_USER: &str = "janedoe";

pub fn trick(id: u32) -> TrickId {
    TrickId(id)
}

/// Builds a game's attempts with strictly increasing timestamps.
#[derive(Clone, Debug)]
pub struct GameScript {
    user: String,
    past: String,
    clock_ms: u64,
    attempts: Vec<Attempt>,
}

impl GameScript {
    pub fn new(user: &str) -> Self {
        Self {
            user: user.to_string(),
            past: past_self_name(user),
            clock_ms: 1_000,
            attempts: Vec::new(),
        }
    }

    fn push(&mut self, actor: String, trick_id: TrickId, landed: bool) -> &mut Self {
        self.clock_ms += 1_000;
        self.attempts
            .push(Attempt::new(trick_id, actor, landed, self.clock_ms));
        self
    }

    /// Attempt by the live user.
    pub fn user(&mut self, trick_id: TrickId, landed: bool) -> &mut Self {
        let actor = self.user.clone();
        self.push(actor, trick_id, landed)
    }

    /// Attempt by the past self.
    pub fn past(&mut self, trick_id: TrickId, landed: bool) -> &mut Self {
        let actor = self.past.clone();
        self.push(actor, trick_id, landed)
    }

    /// User then past self on the same trick.
    pub fn round(&mut self, trick_id: TrickId, user_landed: bool, past_landed: bool) -> &mut Self {
        self.user(trick_id, user_landed);
        self.past(trick_id, past_landed)
    }

    /// Past self then user on the same trick.
    pub fn reverse_round(
        &mut self,
        trick_id: TrickId,
        past_landed: bool,
        user_landed: bool,
    ) -> &mut Self {
        self.past(trick_id, past_landed);
        self.user(trick_id, user_landed)
    }

    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }

    pub fn into_attempts(self) -> Vec<Attempt> {
        self.attempts
    }
}

/// Practice attempts (outside any game) on one trick, oldest first.
pub fn practice(user: &str, trick_id: TrickId, outcomes: &[bool], start_ms: u64) -> Vec<Attempt> {
    outcomes
        .iter()
        .zip(start_ms..)
        .map(|(landed, time)| Attempt::new(trick_id, user, *landed, time))
        .collect()
}
