//! Skateboarding domain types.
//!
//! Defines attempt/trick/statistics records and constants shared by the game rules engine and
//! the opponent policy.

mod attempt;
mod constants;
mod side;
mod stats;
mod trick;
mod user;

pub use attempt::*;
pub use constants::*;
pub use side::*;
pub use stats::*;
pub use trick::*;
pub use user::*;

#[cfg(test)]
mod tests;
