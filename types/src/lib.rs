//! Shared domain types for skrate.
//!
//! Attempts, tricks, per-trick statistics and the fixed SKATE letter sequence used by the
//! execution layer and the past-self opponent.

pub mod skate;

pub use skate::*;
