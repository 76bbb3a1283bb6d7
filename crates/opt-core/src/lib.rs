//! # opt-core
//! Foundation types and traits for the Optionality Tracker.
//!
//! Everything in this crate is pure: no storage, no I/O, no global state.
//! Computation crates (`opt-model`, `opt-analytics`) build on these types and
//! the node library supplies the collaborators behind [`traits`].

pub mod calendar;
pub mod category;
pub mod constants;
pub mod error;
pub mod math;
pub mod traits;
pub mod types;
pub mod validation;
