//! Model constants. The saturation and stability constants are empirical and
//! must be preserved exactly for output compatibility.

// ---------------------------------------------------------------------------
// Action scoring
// ---------------------------------------------------------------------------

/// Lowest value any of the `h, r, d, e` action scores may take.
pub const SCORE_MIN: i8 = -2;

/// Highest value any of the `h, r, d, e` action scores may take.
pub const SCORE_MAX: i8 = 2;

/// Maximum length of an action title, in characters.
pub const MAX_TITLE_LEN: usize = 120;

/// Maximum length of an exposure type, in characters.
pub const MAX_EXPOSURE_TYPE_LEN: usize = 80;

/// Default page size when listing actions.
pub const DEFAULT_LIST_LIMIT: usize = 100;

/// Largest page size accepted when listing actions.
pub const MAX_LIST_LIMIT: usize = 500;

/// Days covered by a query when the caller gives no start date.
pub const DEFAULT_RANGE_DAYS: u32 = 30;

/// Longest range, in days, a series or summary query may cover.
pub const MAX_RANGE_DAYS: usize = 3_660;

// ---------------------------------------------------------------------------
// Decay window
// ---------------------------------------------------------------------------

/// Length of the trailing event window scanned for each readiness point,
/// inclusive of the scored day.
pub const DECAY_WINDOW_DAYS: usize = 60;

// ---------------------------------------------------------------------------
// Saturation and stability
// ---------------------------------------------------------------------------

/// Saturation steepness for the skill capital.
pub const SKILL_SATURATION_K: f64 = 2.0;

/// Saturation steepness for the network capital.
pub const NETWORK_SATURATION_K: f64 = 0.6;

/// Saturation steepness for the leads capital.
pub const LEAD_SATURATION_K: f64 = 0.7;

/// Variance of daily energy means at which the stability penalty saturates.
pub const ENERGY_VARIANCE_SCALE: f64 = 0.05;

/// Share of the energy capital removed at full stability penalty.
pub const ENERGY_PENALTY_WEIGHT: f64 = 0.5;

// ---------------------------------------------------------------------------
// Confidence
// ---------------------------------------------------------------------------

/// Number of distinct active days at which confidence reaches 1.0.
pub const CONFIDENCE_FULL_DAYS: usize = 30;

/// Below this many distinct active days a point is flagged low-data.
pub const LOW_DATA_MIN_DAYS: usize = 5;

/// Uninformative midpoint substituted for zero capitals on low-data points.
pub const LOW_DATA_FALLBACK: f64 = 0.5;

// ---------------------------------------------------------------------------
// Analytics
// ---------------------------------------------------------------------------

/// Length of the trailing constraint-debt window, inclusive of the current day.
pub const DEBT_WINDOW_DAYS: usize = 7;

/// Upper bound of the per-action irreversibility cost (`2 - r` with `r = -2`).
pub const IRREVERSIBILITY_MAX: f64 = 4.0;

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// The settings record is a singleton stored under this id.
pub const SETTINGS_RECORD_ID: u32 = 1;

/// Allowed deviation of the weight sum from 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-3;

/// Default weight of each capital.
pub const DEFAULT_WEIGHT: f64 = 0.25;

/// Default decay half-life in days.
pub const DEFAULT_HALF_LIFE_DAYS: u32 = 21;

/// Default weekly exposure goal.
pub const DEFAULT_EXPOSURE_GOAL_PER_WEEK: u32 = 5;

/// Default daily income target.
pub const DEFAULT_TARGET_DAILY_INCOME: u32 = 200;

// ---------------------------------------------------------------------------
// Presentation
// ---------------------------------------------------------------------------

/// Decimal places for capitals and confidence in presented output.
pub const UNIT_DECIMALS: u32 = 4;

/// Decimal places for readiness and averages in presented output.
pub const SCORE_DECIMALS: u32 = 2;
