//! Input validation for event payloads and settings updates.
//!
//! These checks belong to the surrounding layer: the computation crates
//! assume every record and settings value has already passed through here.

use crate::constants::{
    MAX_EXPOSURE_TYPE_LEN, MAX_TITLE_LEN, SCORE_MAX, SCORE_MIN, WEIGHT_SUM_TOLERANCE,
};
use crate::error::ValidationError;
use crate::types::{NewAction, NewExposure, SettingsUpdate};

/// Check that a score lies within `[SCORE_MIN, SCORE_MAX]`.
pub fn check_score(field: &'static str, value: i8) -> Result<(), ValidationError> {
    if !(SCORE_MIN..=SCORE_MAX).contains(&value) {
        return Err(ValidationError::ScoreOutOfRange { field, value });
    }
    Ok(())
}

fn check_text(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len == 0 {
        return Err(ValidationError::EmptyField(field));
    }
    if len > max {
        return Err(ValidationError::FieldTooLong { field, len, max });
    }
    Ok(())
}

pub fn validate_new_action(action: &NewAction) -> Result<(), ValidationError> {
    check_text("title", &action.title, MAX_TITLE_LEN)?;
    check_score("h", action.h)?;
    check_score("r", action.r)?;
    check_score("d", action.d)?;
    check_score("e", action.e)?;
    Ok(())
}

pub fn validate_new_exposure(exposure: &NewExposure) -> Result<(), ValidationError> {
    check_text("type", &exposure.kind, MAX_EXPOSURE_TYPE_LEN)
}

/// Validate a settings update.
///
/// Each weight must lie in `[0, 1]` and together they must sum to 1.0
/// within [`WEIGHT_SUM_TOLERANCE`].
pub fn validate_settings_update(update: &SettingsUpdate) -> Result<(), ValidationError> {
    if update.target_daily_income < 1 {
        return Err(ValidationError::TargetIncome(update.target_daily_income));
    }
    if update.half_life_days < 1 {
        return Err(ValidationError::HalfLife(update.half_life_days));
    }

    let weights = [
        ("w_s", update.w_s),
        ("w_n", update.w_n),
        ("w_l", update.w_l),
        ("w_e", update.w_e),
    ];
    for (name, value) in weights {
        if !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::WeightOutOfRange { name, value });
        }
    }

    let total: f64 = weights.iter().map(|(_, w)| w).sum();
    if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(ValidationError::WeightSum { total });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Domain;
    use chrono::NaiveDate;

    fn update(w: [f64; 4]) -> SettingsUpdate {
        SettingsUpdate {
            target_daily_income: 200,
            w_s: w[0],
            w_n: w[1],
            w_l: w[2],
            w_e: w[3],
            half_life_days: 21,
            exposure_goal_per_week: 5,
        }
    }

    fn new_action(title: &str, h: i8) -> NewAction {
        NewAction {
            occurred_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            domain: Domain::Sleep,
            title: title.into(),
            notes: None,
            h,
            r: 0,
            d: 0,
            e: 0,
            tags: None,
        }
    }

    // --- settings ---

    #[test]
    fn equal_weights_accepted() {
        assert!(validate_settings_update(&update([0.25; 4])).is_ok());
    }

    #[test]
    fn weight_sum_within_tolerance_accepted() {
        assert!(validate_settings_update(&update([0.25, 0.25, 0.25, 0.2505])).is_ok());
    }

    #[test]
    fn weight_sum_outside_tolerance_rejected() {
        let err = validate_settings_update(&update([0.4, 0.4, 0.4, 0.1])).unwrap_err();
        assert!(matches!(err, ValidationError::WeightSum { total } if (total - 1.3).abs() < 1e-9));

        let err = validate_settings_update(&update([0.25, 0.25, 0.25, 0.252])).unwrap_err();
        assert!(matches!(err, ValidationError::WeightSum { .. }));
    }

    #[test]
    fn negative_weight_rejected() {
        let err = validate_settings_update(&update([1.5, -0.5, 0.0, 0.0])).unwrap_err();
        assert_eq!(err, ValidationError::WeightOutOfRange { name: "w_s", value: 1.5 });
    }

    #[test]
    fn zero_half_life_rejected() {
        let mut u = update([0.25; 4]);
        u.half_life_days = 0;
        assert_eq!(validate_settings_update(&u), Err(ValidationError::HalfLife(0)));
    }

    #[test]
    fn zero_target_income_rejected() {
        let mut u = update([0.25; 4]);
        u.target_daily_income = 0;
        assert_eq!(validate_settings_update(&u), Err(ValidationError::TargetIncome(0)));
    }

    // --- events ---

    #[test]
    fn action_scores_bounded() {
        assert!(validate_new_action(&new_action("ok", 2)).is_ok());
        assert!(validate_new_action(&new_action("ok", -2)).is_ok());
        assert_eq!(
            validate_new_action(&new_action("ok", 3)),
            Err(ValidationError::ScoreOutOfRange { field: "h", value: 3 })
        );
    }

    #[test]
    fn action_title_bounds() {
        assert_eq!(
            validate_new_action(&new_action("", 0)),
            Err(ValidationError::EmptyField("title"))
        );
        let long = "x".repeat(MAX_TITLE_LEN + 1);
        assert!(matches!(
            validate_new_action(&new_action(&long, 0)),
            Err(ValidationError::FieldTooLong { field: "title", .. })
        ));
        let exact = "x".repeat(MAX_TITLE_LEN);
        assert!(validate_new_action(&new_action(&exact, 0)).is_ok());
    }

    #[test]
    fn exposure_type_bounds() {
        let mut ex = NewExposure {
            occurred_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            kind: "post".into(),
            notes: None,
        };
        assert!(validate_new_exposure(&ex).is_ok());
        ex.kind = String::new();
        assert_eq!(validate_new_exposure(&ex), Err(ValidationError::EmptyField("type")));
    }
}
