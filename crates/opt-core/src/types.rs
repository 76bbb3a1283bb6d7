//! Core data types: raw event records, settings, query ranges, and the
//! derived points produced per query.
//!
//! Derived types ([`IncomePoint`], [`DailyAnalyticsPoint`], ...) are
//! recomputed on every query and never persisted.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::{self, shift_back, shift_forward};
use crate::constants::{
    DEFAULT_EXPOSURE_GOAL_PER_WEEK, DEFAULT_HALF_LIFE_DAYS, DEFAULT_TARGET_DAILY_INCOME,
    DEFAULT_WEIGHT, SETTINGS_RECORD_ID,
};
use crate::error::ValidationError;
use crate::validation;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Life domain an action was logged under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    #[default]
    Income,
    Sleep,
    Nutrition,
    Movement,
    Stress,
    Social,
}

/// A recorded action with four bounded scores in `[-2, 2]`.
///
/// `h` health, `r` reversibility, `d` downside, `e` energy. The net
/// optionality delta is always derived from them, see [`Action::o_delta`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub id: u64,
    pub occurred_at: NaiveDateTime,
    #[serde(default)]
    pub domain: Domain,
    pub title: String,
    pub notes: Option<String>,
    pub h: i8,
    pub r: i8,
    pub d: i8,
    pub e: i8,
    pub tags: Option<String>,
}

impl Action {
    /// Net optionality delta: `h + r - d + e`.
    pub fn o_delta(&self) -> i32 {
        self.h as i32 + self.r as i32 - self.d as i32 + self.e as i32
    }

    /// Calendar day the action occurred on.
    pub fn day(&self) -> NaiveDate {
        calendar::day_of(&self.occurred_at)
    }
}

fn utc_now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Unvalidated payload for recording or replacing an action.
///
/// A missing `occurred_at` defaults to the current UTC time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAction {
    #[serde(default = "utc_now")]
    pub occurred_at: NaiveDateTime,
    #[serde(default)]
    pub domain: Domain,
    pub title: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub h: i8,
    pub r: i8,
    pub d: i8,
    pub e: i8,
    #[serde(default)]
    pub tags: Option<String>,
}

impl NewAction {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate_new_action(self)
    }

    /// Materialize the payload under a store-assigned id.
    pub fn into_action(self, id: u64) -> Action {
        Action {
            id,
            occurred_at: self.occurred_at,
            domain: self.domain,
            title: self.title,
            notes: self.notes,
            h: self.h,
            r: self.r,
            d: self.d,
            e: self.e,
            tags: self.tags,
        }
    }
}

/// A recorded exposure: an outward-facing event with a free-text type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exposure {
    pub id: u64,
    pub occurred_at: NaiveDateTime,
    #[serde(rename = "type")]
    pub kind: String,
    pub notes: Option<String>,
}

impl Exposure {
    pub fn day(&self) -> NaiveDate {
        calendar::day_of(&self.occurred_at)
    }
}

/// Unvalidated payload for recording an exposure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewExposure {
    #[serde(default = "utc_now")]
    pub occurred_at: NaiveDateTime,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewExposure {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate_new_exposure(self)
    }

    pub fn into_exposure(self, id: u64) -> Exposure {
        Exposure {
            id,
            occurred_at: self.occurred_at,
            kind: self.kind,
            notes: self.notes,
        }
    }
}

/// Immutable borrowed view of both event streams for one computation.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventSnapshot<'a> {
    pub actions: &'a [Action],
    pub exposures: &'a [Exposure],
}

impl<'a> EventSnapshot<'a> {
    pub fn new(actions: &'a [Action], exposures: &'a [Exposure]) -> Self {
        Self { actions, exposures }
    }

    pub fn len(&self) -> usize {
        self.actions.len() + self.exposures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Weighting and decay configuration for the readiness model.
///
/// A singleton record. Once validated the four weights sum to 1.0 within
/// [`WEIGHT_SUM_TOLERANCE`](crate::constants::WEIGHT_SUM_TOLERANCE).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub id: u32,
    pub target_daily_income: u32,
    pub w_s: f64,
    pub w_n: f64,
    pub w_l: f64,
    pub w_e: f64,
    pub half_life_days: u32,
    pub exposure_goal_per_week: u32,
    pub updated_at: DateTime<Utc>,
}

impl Settings {
    /// The record created on first access.
    pub fn defaults(now: DateTime<Utc>) -> Self {
        Self {
            id: SETTINGS_RECORD_ID,
            target_daily_income: DEFAULT_TARGET_DAILY_INCOME,
            w_s: DEFAULT_WEIGHT,
            w_n: DEFAULT_WEIGHT,
            w_l: DEFAULT_WEIGHT,
            w_e: DEFAULT_WEIGHT,
            half_life_days: DEFAULT_HALF_LIFE_DAYS,
            exposure_goal_per_week: DEFAULT_EXPOSURE_GOAL_PER_WEEK,
            updated_at: now,
        }
    }

    pub fn weight_sum(&self) -> f64 {
        self.w_s + self.w_n + self.w_l + self.w_e
    }

    /// Half-life guarded against zero.
    pub fn effective_half_life(&self) -> u32 {
        self.half_life_days.max(1)
    }

    /// Replace every user-editable field with `update` and stamp `now`.
    ///
    /// Callers validate `update` first.
    pub fn apply(&mut self, update: &SettingsUpdate, now: DateTime<Utc>) {
        self.target_daily_income = update.target_daily_income;
        self.w_s = update.w_s;
        self.w_n = update.w_n;
        self.w_l = update.w_l;
        self.w_e = update.w_e;
        self.half_life_days = update.half_life_days;
        self.exposure_goal_per_week = update.exposure_goal_per_week;
        self.updated_at = now;
    }
}

/// Explicit settings update payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub target_daily_income: u32,
    pub w_s: f64,
    pub w_n: f64,
    pub w_l: f64,
    pub w_e: f64,
    pub half_life_days: u32,
    pub exposure_goal_per_week: u32,
}

impl SettingsUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate_settings_update(self)
    }
}

// ---------------------------------------------------------------------------
// Query range
// ---------------------------------------------------------------------------

/// Inclusive, non-empty range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if end < start {
            return Err(ValidationError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn single(day: NaiveDate) -> Self {
        Self { start: day, end: day }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days in the range (always at least one).
    pub fn len(&self) -> usize {
        calendar::days_between(self.start, self.end) as usize + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Zero-based index of `day` from the range start.
    pub fn offset_of(&self, day: NaiveDate) -> Option<usize> {
        self.contains(day)
            .then(|| calendar::days_between(self.start, day) as usize)
    }

    /// Day at `offset` from the range start. Offsets past the end saturate.
    pub fn date_at(&self, offset: usize) -> NaiveDate {
        shift_forward(self.start, offset as u64).min(self.end)
    }

    /// Every day in the range, in chronological order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..self.len()).map(move |i| shift_forward(self.start, i as u64))
    }

    /// The same range with `days` extra days prepended.
    pub fn extend_back(&self, days: usize) -> Self {
        Self {
            start: shift_back(self.start, days as u64),
            end: self.end,
        }
    }
}

// ---------------------------------------------------------------------------
// Derived points
// ---------------------------------------------------------------------------

/// The four normalized capitals, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Capitals {
    pub s: f64,
    pub n: f64,
    pub l: f64,
    pub e: f64,
}

impl Capitals {
    /// `w_s·S + w_n·N + w_l·L + w_e·E`, unclamped.
    pub fn blend(&self, settings: &Settings) -> f64 {
        settings.w_s * self.s + settings.w_n * self.n + settings.w_l * self.l + settings.w_e * self.e
    }

    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            s: f(self.s),
            n: f(self.n),
            l: f(self.l),
            e: f(self.e),
        }
    }
}

/// Readiness point for a single day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IncomePoint {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub capitals: Capitals,
    /// Composite score in `[0, 100]`.
    pub readiness: f64,
    /// Data-coverage confidence in `[0, 1]`.
    pub confidence: f64,
    pub low_data_confidence: bool,
}

/// One readiness point per day of a query range.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IncomeSeries {
    pub daily: Vec<IncomePoint>,
}

impl IncomeSeries {
    /// The last point of the series, if any.
    pub fn current(&self) -> Option<&IncomePoint> {
        self.daily.last()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAnalyticsPoint {
    pub date: NaiveDate,
    pub o_delta_sum: i64,
    pub cumulative: i64,
    pub constraint_debt_7d: i64,
    pub irreversibility_avg: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyExposurePoint {
    /// Monday of the ISO week.
    pub week_start: NaiveDate,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalyticsTotals {
    pub sum_o_delta: i64,
    pub avg_o_delta: f64,
    pub constraint_debt_7d_last: i64,
    pub exposure_count_period: u64,
    pub readiness_latest: f64,
    pub capitals_latest: Capitals,
    pub confidence_latest: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub totals: AnalyticsTotals,
    pub daily: Vec<DailyAnalyticsPoint>,
    pub weekly_exposure: Vec<WeeklyExposurePoint>,
}
