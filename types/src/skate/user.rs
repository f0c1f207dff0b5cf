use thiserror::Error as ThisError;

use super::{Side, MAX_USER_NAME_LENGTH, PAST_USER_PREFIX};

#[derive(Debug, Clone, ThisError, PartialEq, Eq)]
pub enum UserNameError {
    #[error("user name is empty")]
    Empty,
    #[error("user name too long (len={len}, max={max})")]
    TooLong { len: usize, max: usize },
    #[error("user name may not start with reserved prefix {prefix:?}")]
    ReservedPrefix { prefix: &'static str },
}

/// Check that a user name can be told apart from its past self.
pub fn validate_user_name(name: &str) -> Result<(), UserNameError> {
    if name.is_empty() {
        return Err(UserNameError::Empty);
    }
    if name.len() > MAX_USER_NAME_LENGTH {
        return Err(UserNameError::TooLong {
            len: name.len(),
            max: MAX_USER_NAME_LENGTH,
        });
    }
    if name.starts_with(PAST_USER_PREFIX) {
        return Err(UserNameError::ReservedPrefix {
            prefix: PAST_USER_PREFIX,
        });
    }
    Ok(())
}

/// Actor name recorded for attempts made by the past self of `user`.
pub fn past_self_name(user: &str) -> String {
    format!("{PAST_USER_PREFIX}{user}")
}

/// Which side of `live_user`'s game an attempt actor belongs to, if any.
pub fn side_of(actor: &str, live_user: &str) -> Option<Side> {
    if actor == live_user {
        return Some(Side::User);
    }
    match actor.strip_prefix(PAST_USER_PREFIX) {
        Some(rest) if rest == live_user => Some(Side::PastSelf),
        _ => None,
    }
}

/// Actor name for a side of `live_user`'s game.
pub fn actor_name(side: Side, live_user: &str) -> String {
    match side {
        Side::User => live_user.to_string(),
        Side::PastSelf => past_self_name(live_user),
    }
}
