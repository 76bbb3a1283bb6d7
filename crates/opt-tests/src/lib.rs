//! End-to-end test suite for the Optionality Tracker.
//!
//! Integration tests drive a full node (store, settings provider, query
//! service) and check the computed series and summaries against hand-worked
//! expectations.

pub mod helpers;
