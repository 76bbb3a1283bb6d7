//! Shared test helpers for E2E and integration tests.

use std::sync::Arc;

use chrono::NaiveDate;
use opt_core::types::{Action, DateRange, Domain, Exposure, NewAction, NewExposure};
use opt_node_lib::{MemoryStore, Node, NodeConfig};

/// Calendar date shorthand.
pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// Inclusive range shorthand.
pub fn range(start: NaiveDate, end: NaiveDate) -> DateRange {
    DateRange::new(start, end).unwrap()
}

/// Action payload at noon on `day`.
pub fn new_action(day: NaiveDate, h: i8, r: i8, dd: i8, e: i8) -> NewAction {
    NewAction {
        occurred_at: day.and_hms_opt(12, 0, 0).unwrap(),
        domain: Domain::Income,
        title: format!("action on {day}"),
        notes: None,
        h,
        r,
        d: dd,
        e,
        tags: None,
    }
}

/// Exposure payload at 09:00 on `day`.
pub fn new_exposure(day: NaiveDate, kind: &str) -> NewExposure {
    NewExposure {
        occurred_at: day.and_hms_opt(9, 0, 0).unwrap(),
        kind: kind.to_string(),
        notes: None,
    }
}

/// Materialized action with a placeholder id, for calling the computation
/// crates directly.
pub fn action(day: NaiveDate, h: i8, r: i8, dd: i8, e: i8) -> Action {
    new_action(day, h, r, dd, e).into_action(0)
}

pub fn exposure(day: NaiveDate, kind: &str) -> Exposure {
    new_exposure(day, kind).into_exposure(0)
}

/// A node over a fresh in-memory store.
pub fn memory_node() -> Arc<Node> {
    let config = NodeConfig {
        in_memory: true,
        ..NodeConfig::default()
    };
    Arc::new(Node::with_store(config, Arc::new(MemoryStore::new())))
}

/// A node persisting to a temp directory.
pub fn disk_node() -> (Arc<Node>, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = NodeConfig {
        data_dir: dir.path().to_path_buf(),
        ..NodeConfig::default()
    };
    (Node::new(config).unwrap(), dir)
}

/// Record the four actions of the reference week:
/// 2024-01-01 (+3), 01-02 (-2), 01-03 (-1), 01-08 (-4).
pub fn seed_reference_week(node: &Node) {
    for (day, h, r, dd, e) in [
        (d(2024, 1, 1), 1, 1, -1, 0),
        (d(2024, 1, 2), -1, 0, 1, 0),
        (d(2024, 1, 3), 0, -1, 0, 0),
        (d(2024, 1, 8), -2, 2, 2, -2),
    ] {
        node.store().insert_action(new_action(day, h, r, dd, e)).unwrap();
    }
}
