//! Page state for each tracked metric. A tracker is created per page view,
//! seeded with sample records, and mutated only by its own form handlers.

pub mod activity;
pub mod blood_pressure;
pub mod blood_sugar;
pub mod goals;
pub mod heart_rate;
pub mod nutrition;
pub mod reminders;
pub mod sleep;
pub mod steps;
pub mod water;

pub use activity::ActivityTracker;
pub use blood_pressure::BloodPressureTracker;
pub use blood_sugar::BloodSugarTracker;
pub use goals::GoalTracker;
pub use heart_rate::HeartRateTracker;
pub use nutrition::NutritionTracker;
pub use reminders::ReminderTracker;
pub use sleep::SleepTracker;
pub use steps::StepsTracker;
pub use water::WaterTracker;

use crate::classify::Assessment;
use crate::errors::{AppError, AppResult};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use std::str::FromStr;

/// Read-only view of a page, ready to hand to a renderer.
pub trait PageView {
    type Snapshot: Serialize;

    fn snapshot(&self) -> Self::Snapshot;
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessed<T> {
    #[serde(flatten)]
    pub record: T,
    pub assessment: Assessment,
}

pub(crate) fn required<'a>(field: &str, value: &'a str) -> AppResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(trimmed)
}

pub(crate) fn parse_whole<T: FromStr>(field: &str, value: &str) -> AppResult<T> {
    required(field, value)?
        .parse::<T>()
        .map_err(|_| AppError::Validation(format!("{} must be a whole number", field)))
}

pub(crate) fn parse_decimal(field: &str, value: &str) -> AppResult<f64> {
    let parsed = required(field, value)?
        .parse::<f64>()
        .map_err(|_| AppError::Validation(format!("{} must be a number", field)))?;
    if !parsed.is_finite() {
        return Err(AppError::Validation(format!("{} must be a finite number", field)));
    }
    Ok(parsed)
}

/// Blank or unreadable optional amounts count as zero.
pub(crate) fn whole_or_zero(value: &str) -> u32 {
    value.trim().parse::<u32>().unwrap_or(0)
}

pub(crate) fn parse_time(field: &str, value: &str) -> AppResult<NaiveTime> {
    let raw = required(field, value)?;
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| AppError::Validation(format!("{} must be a time like 07:30", field)))
}

pub(crate) fn parse_date(field: &str, value: &str) -> AppResult<NaiveDate> {
    let raw = required(field, value)?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("{} must be a date like 2024-12-31", field)))
}

/// Parses an enumerated field, using `default` when the field is blank.
pub(crate) fn choice_or<T: FromStr<Err = AppError>>(value: &str, default: T) -> AppResult<T> {
    match value.trim() {
        "" => Ok(default),
        raw => raw.parse::<T>(),
    }
}

pub(crate) fn optional_text(value: &str) -> Option<String> {
    match value.trim() {
        "" => None,
        text => Some(text.to_string()),
    }
}

pub(crate) fn seed_stamp(raw: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M").expect("valid seed timestamp")
}

pub(crate) fn seed_time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid seed time")
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::{choice_or, optional_text, parse_date, parse_decimal, parse_time, parse_whole, whole_or_zero};
    use crate::models::SugarReadingKind;

    #[test]
    fn required_fields_reject_blank_input() {
        let error = parse_whole::<u32>("systolic", "   ").expect_err("blank");
        assert_eq!(error.to_string(), "VALIDATION: systolic is required");
        assert!(parse_whole::<u32>("pulse", "-4").is_err());
        assert_eq!(parse_whole::<u32>("pulse", " 72 ").expect("parse"), 72);
    }

    #[test]
    fn decimals_must_be_finite() {
        assert_eq!(parse_decimal("target", "7.5").expect("parse"), 7.5);
        assert!(parse_decimal("target", "inf").is_err());
        assert!(parse_decimal("target", "NaN").is_err());
    }

    #[test]
    fn optional_values() {
        assert_eq!(whole_or_zero(""), 0);
        assert_eq!(whole_or_zero("abc"), 0);
        assert_eq!(whole_or_zero("12"), 12);
        assert_eq!(optional_text("  "), None);
        assert_eq!(optional_text(" note "), Some("note".to_string()));
        assert_eq!(choice_or("", SugarReadingKind::Random).expect("default"), SugarReadingKind::Random);
        assert_eq!(choice_or("fasting", SugarReadingKind::Random).expect("parse"), SugarReadingKind::Fasting);
        assert!(choice_or("lunch", SugarReadingKind::Random).is_err());
    }

    #[test]
    fn clock_and_calendar_inputs() {
        assert_eq!(parse_time("time", "07:05").expect("time").format("%H:%M").to_string(), "07:05");
        assert!(parse_time("time", "25:00").is_err());
        assert!(parse_date("deadline", "2024-12-31").is_ok());
        assert!(parse_date("deadline", "31/12/2024").is_err());
    }
}
