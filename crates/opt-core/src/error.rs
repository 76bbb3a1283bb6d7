//! Error types for the Optionality Tracker.
//!
//! The computation crates are total over valid input and never return these;
//! they surface from validation, storage, and configuration.
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("end must be on or after start: {start} > {end}")] InvertedRange { start: NaiveDate, end: NaiveDate },
    #[error("weights must sum to 1.0 (got {total})")] WeightSum { total: f64 },
    #[error("weight {name} out of range [0, 1]: {value}")] WeightOutOfRange { name: &'static str, value: f64 },
    #[error("half_life_days must be >= 1 (got {0})")] HalfLife(u32),
    #[error("target_daily_income must be >= 1 (got {0})")] TargetIncome(u32),
    #[error("score {field} out of range [-2, 2]: {value}")] ScoreOutOfRange { field: &'static str, value: i8 },
    #[error("{0} must not be empty")] EmptyField(&'static str),
    #[error("{field} too long: {len} > {max}")] FieldTooLong { field: &'static str, len: usize, max: usize },
    #[error("limit must be in [1, {max}] (got {got})")] Limit { got: usize, max: usize },
    #[error("range too long: {days} days > {max}")] RangeTooLong { days: usize, max: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("action not found: {0}")] ActionNotFound(u64),
    #[error("exposure not found: {0}")] ExposureNotFound(u64),
    #[error("backend: {0}")] Backend(String),
}

#[derive(Error, Debug)]
pub enum OptError {
    #[error(transparent)] Validation(#[from] ValidationError),
    #[error(transparent)] Store(#[from] StoreError),
    #[error("config: {0}")] Config(String),
}

impl OptError {
    /// Whether the error stems from caller input rather than the system.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Whether the error reports a missing record.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Store(StoreError::ActionNotFound(_) | StoreError::ExposureNotFound(_))
        )
    }
}
