//! Threshold rules that turn a raw reading into a labelled assessment.
//!
//! Every function here is pure. Bands are evaluated top to bottom and the
//! first matching band wins, so the ordering of the checks is part of the
//! contract.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::models::{GoalCategory, GoalPriority, HeartRateKind, ReminderCategory, SleepQuality, SugarReadingKind};

/// Display treatment for a label, from informational to critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tone {
    Info,
    Good,
    Caution,
    Warning,
    Danger,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub label: &'static str,
    pub tone: Tone,
    pub alert: bool,
}

impl Assessment {
    const fn new(label: &'static str, tone: Tone, alert: bool) -> Self {
        Self { label, tone, alert }
    }
}

/// Blood pressure category for a systolic/diastolic pair in mmHg.
///
/// The `Stage 1` and `Stage 2` bands accept either value on its own, so a
/// pair such as 210/70 lands in `Stage 1` because the diastolic is below 90.
pub fn blood_pressure_category(systolic: u32, diastolic: u32) -> Assessment {
    if systolic < 90 || diastolic < 60 {
        Assessment::new("Low", Tone::Info, true)
    } else if systolic < 120 && diastolic < 80 {
        Assessment::new("Normal", Tone::Good, false)
    } else if systolic < 130 && diastolic < 80 {
        Assessment::new("Elevated", Tone::Caution, true)
    } else if systolic < 140 || diastolic < 90 {
        Assessment::new("Stage 1", Tone::Warning, true)
    } else if systolic < 180 || diastolic < 120 {
        Assessment::new("Stage 2", Tone::Danger, true)
    } else {
        Assessment::new("Crisis", Tone::Critical, true)
    }
}

/// Blood sugar status for a value in mg/dL.
pub fn blood_sugar_status(value: u32, kind: SugarReadingKind) -> Assessment {
    if value < 70 {
        return Assessment::new("Low", Tone::Info, true);
    }
    match kind {
        SugarReadingKind::Fasting => match value {
            0..=100 => Assessment::new("Normal", Tone::Good, false),
            101..=125 => Assessment::new("Prediabetic", Tone::Caution, true),
            _ => Assessment::new("Diabetic", Tone::Danger, true),
        },
        SugarReadingKind::PostMeal => match value {
            0..=140 => Assessment::new("Normal", Tone::Good, false),
            141..=199 => Assessment::new("Prediabetic", Tone::Caution, true),
            _ => Assessment::new("Diabetic", Tone::Danger, true),
        },
        SugarReadingKind::Random | SugarReadingKind::Bedtime => match value {
            0..=140 => Assessment::new("Normal", Tone::Good, false),
            _ => Assessment::new("High", Tone::Caution, true),
        },
    }
}

/// Heart rate status in bpm. Only resting readings are held to a band.
pub fn heart_rate_status(value: u32, kind: HeartRateKind) -> Assessment {
    match kind {
        HeartRateKind::Resting => match value {
            0..=59 => Assessment::new("Low", Tone::Info, true),
            60..=100 => Assessment::new("Normal", Tone::Good, false),
            _ => Assessment::new("High", Tone::Danger, true),
        },
        HeartRateKind::Active | HeartRateKind::Recovery => Assessment::new("Active", Tone::Caution, false),
    }
}

/// Percentage of a goal reached, capped at 100.
///
/// Weight goals count down from `weight_baseline` toward the target. A zero
/// span or a non-finite result reports 0.
pub fn goal_progress(current: f64, target: f64, category: GoalCategory, weight_baseline: f64) -> f64 {
    let (done, span) = match category {
        GoalCategory::Weight => (weight_baseline - current, weight_baseline - target),
        _ => (current, target),
    };
    if span == 0.0 {
        return 0.0;
    }
    let percentage = done / span * 100.0;
    if !percentage.is_finite() {
        return 0.0;
    }
    percentage.min(100.0)
}

/// Uncapped percent of a daily goal, used by the page summaries.
pub fn percent_of(value: f64, goal: f64) -> f64 {
    if goal == 0.0 || !goal.is_finite() || !value.is_finite() {
        return 0.0;
    }
    value / goal * 100.0
}

pub fn remaining(value: f64, goal: f64) -> f64 {
    (goal - value).max(0.0)
}

/// Hours slept between two clock times, rolling past midnight when the wake
/// time is earlier than bedtime. Rounded to one decimal.
pub fn sleep_duration(bedtime: NaiveTime, wake_time: NaiveTime) -> f64 {
    let mut minutes = (wake_time - bedtime).num_minutes();
    if minutes < 0 {
        minutes += 24 * 60;
    }
    (minutes as f64 / 60.0 * 10.0).round() / 10.0
}

pub fn estimated_max_heart_rate(age: u32) -> u32 {
    220u32.saturating_sub(age)
}

pub fn sleep_quality_tone(quality: SleepQuality) -> Tone {
    match quality {
        SleepQuality::Excellent => Tone::Good,
        SleepQuality::Good => Tone::Info,
        SleepQuality::Fair => Tone::Caution,
        SleepQuality::Poor => Tone::Danger,
    }
}

pub fn goal_priority_tone(priority: GoalPriority) -> Tone {
    match priority {
        GoalPriority::High => Tone::Danger,
        GoalPriority::Medium => Tone::Caution,
        GoalPriority::Low => Tone::Good,
    }
}

pub fn goal_category_icon(category: GoalCategory) -> &'static str {
    match category {
        GoalCategory::Fitness => "🏃‍♂️",
        GoalCategory::Weight => "⚖️",
        GoalCategory::Hydration => "💧",
        GoalCategory::Sleep => "😴",
        GoalCategory::Nutrition => "🥗",
        GoalCategory::General => "🎯",
    }
}

pub fn reminder_category_icon(category: ReminderCategory) -> &'static str {
    match category {
        ReminderCategory::Exercise => "🏃‍♂️",
        ReminderCategory::Mental => "🧠",
        ReminderCategory::Hydration => "💧",
        ReminderCategory::Medication => "💊",
        ReminderCategory::Sleep => "😴",
        ReminderCategory::Nutrition => "🥗",
        ReminderCategory::General => "⏰",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time")
    }

    #[test]
    fn blood_pressure_bands_follow_first_match() {
        let normal = blood_pressure_category(118, 76);
        assert_eq!(normal.label, "Normal");
        assert!(!normal.alert);

        let elevated = blood_pressure_category(125, 78);
        assert_eq!(elevated.label, "Elevated");
        assert!(elevated.alert);

        assert_eq!(blood_pressure_category(185, 125).label, "Crisis");
        assert_eq!(blood_pressure_category(185, 125).tone, Tone::Critical);

        let low = blood_pressure_category(85, 58);
        assert_eq!(low.label, "Low");
        assert!(low.alert);
    }

    #[test]
    fn blood_pressure_or_bands_accept_either_value() {
        assert_eq!(blood_pressure_category(145, 70).label, "Stage 1");
        assert_eq!(blood_pressure_category(210, 70).label, "Stage 1");
        assert_eq!(blood_pressure_category(150, 95).label, "Stage 2");
        assert_eq!(blood_pressure_category(190, 100).label, "Stage 2");
        assert_eq!(blood_pressure_category(120, 80).label, "Stage 1");
    }

    #[test]
    fn fasting_sugar_bands() {
        let labels: Vec<_> = [65, 95, 100, 110, 125, 140]
            .into_iter()
            .map(|value| blood_sugar_status(value, SugarReadingKind::Fasting).label)
            .collect();
        assert_eq!(labels, ["Low", "Normal", "Normal", "Prediabetic", "Prediabetic", "Diabetic"]);
        assert!(!blood_sugar_status(95, SugarReadingKind::Fasting).alert);
        assert!(blood_sugar_status(140, SugarReadingKind::Fasting).alert);
    }

    #[test]
    fn post_meal_sugar_bands() {
        let labels: Vec<_> = [65, 130, 180, 199, 210]
            .into_iter()
            .map(|value| blood_sugar_status(value, SugarReadingKind::PostMeal).label)
            .collect();
        assert_eq!(labels, ["Low", "Normal", "Prediabetic", "Prediabetic", "Diabetic"]);
    }

    #[test]
    fn random_and_bedtime_sugar_only_flag_high() {
        for kind in [SugarReadingKind::Random, SugarReadingKind::Bedtime] {
            assert_eq!(blood_sugar_status(69, kind).label, "Low");
            assert_eq!(blood_sugar_status(140, kind).label, "Normal");
            let high = blood_sugar_status(141, kind);
            assert_eq!(high.label, "High");
            assert!(high.alert);
        }
    }

    #[test]
    fn heart_rate_bands_only_apply_to_resting() {
        assert_eq!(heart_rate_status(55, HeartRateKind::Resting).label, "Low");
        assert_eq!(heart_rate_status(72, HeartRateKind::Resting).label, "Normal");
        assert_eq!(heart_rate_status(105, HeartRateKind::Resting).label, "High");
        for value in [30, 90, 200] {
            assert_eq!(heart_rate_status(value, HeartRateKind::Active).label, "Active");
            assert_eq!(heart_rate_status(value, HeartRateKind::Recovery).label, "Active");
        }
    }

    #[test]
    fn goal_progress_is_capped() {
        assert_eq!(goal_progress(8750.0, 10000.0, GoalCategory::Fitness, 85.0), 87.5);
        assert_eq!(goal_progress(12000.0, 10000.0, GoalCategory::Fitness, 85.0), 100.0);
    }

    #[test]
    fn weight_progress_counts_down_from_baseline() {
        let progress = goal_progress(78.0, 75.0, GoalCategory::Weight, 85.0);
        assert!((progress - 70.0).abs() < 1e-9);
        assert_eq!(goal_progress(74.0, 75.0, GoalCategory::Weight, 85.0), 100.0);
        let custom = goal_progress(78.0, 75.0, GoalCategory::Weight, 81.0);
        assert!((custom - 50.0).abs() < 1e-9);
    }

    #[test]
    fn zero_span_goal_reports_zero() {
        assert_eq!(goal_progress(5.0, 0.0, GoalCategory::Hydration, 85.0), 0.0);
        assert_eq!(goal_progress(80.0, 85.0, GoalCategory::Weight, 85.0), 0.0);
        assert_eq!(goal_progress(f64::NAN, 8.0, GoalCategory::Sleep, 85.0), 0.0);
    }

    #[test]
    fn sleep_duration_wraps_past_midnight() {
        assert_eq!(sleep_duration(time(22, 30), time(6, 30)), 8.0);
        assert_eq!(sleep_duration(time(23, 15), time(6, 45)), 7.5);
        assert_eq!(sleep_duration(time(13, 0), time(14, 20)), 1.3);
        assert_eq!(sleep_duration(time(7, 0), time(7, 0)), 0.0);
    }

    #[test]
    fn percent_helpers() {
        assert_eq!(percent_of(6.0, 8.0), 75.0);
        assert_eq!(percent_of(12.0, 8.0), 150.0);
        assert_eq!(percent_of(3.0, 0.0), 0.0);
        assert_eq!(remaining(6.0, 8.0), 2.0);
        assert_eq!(remaining(10.0, 8.0), 0.0);
        assert_eq!(estimated_max_heart_rate(32), 188);
        assert_eq!(estimated_max_heart_rate(300), 0);
    }
}
