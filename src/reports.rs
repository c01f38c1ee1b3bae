//! Monthly summary page. Goal achievement is computed from target and achieved
//! values; weekly rows and trend cards are fixed sample data.

use crate::classify::goal_progress;
use crate::models::GoalCategory;
use crate::trackers::{round1, PageView};
use once_cell::sync::Lazy;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increase,
    Decrease,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthTrend {
    pub metric: &'static str,
    pub change_percent: u32,
    pub direction: TrendDirection,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyTotals {
    pub week: &'static str,
    pub steps: u32,
    pub calories: u32,
    pub water: f64,
    pub sleep: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyGoal {
    pub goal: &'static str,
    pub category: GoalCategory,
    pub target: f64,
    pub achieved: f64,
    pub percentage: f64,
}

static HEALTH_TRENDS: Lazy<Vec<HealthTrend>> = Lazy::new(|| {
    let trend = |metric, change_percent, direction, description| HealthTrend {
        metric,
        change_percent,
        direction,
        description,
    };
    vec![
        trend("Weight Loss", 22, TrendDirection::Decrease, "Excellent progress towards your weight goal"),
        trend("General Health", 70, TrendDirection::Increase, "Overall health metrics showing improvement"),
        trend("Activity Level", 45, TrendDirection::Increase, "Daily activity has increased significantly"),
        trend("Sleep Quality", 15, TrendDirection::Increase, "Sleep patterns are improving steadily"),
    ]
});

static WEEKLY_TOTALS: Lazy<Vec<WeeklyTotals>> = Lazy::new(|| {
    let week = |week, steps, calories, water, sleep| WeeklyTotals {
        week,
        steps,
        calories,
        water,
        sleep,
    };
    vec![
        week("Week 1", 8500, 2100, 7.0, 7.2),
        week("Week 2", 9200, 2050, 8.0, 7.8),
        week("Week 3", 10_100, 1980, 8.5, 8.1),
        week("Week 4", 11_500, 1920, 9.0, 8.3),
    ]
});

const MONTHLY_TARGETS: [(&str, GoalCategory, f64, f64); 4] = [
    ("Daily Steps", GoalCategory::Fitness, 10_000.0, 8750.0),
    ("Water Intake", GoalCategory::Hydration, 8.0, 7.2),
    ("Sleep Hours", GoalCategory::Sleep, 8.0, 7.6),
    ("Workout Days", GoalCategory::Fitness, 20.0, 16.0),
];

#[derive(Debug, Clone)]
pub struct ReportsPage {
    monthly: Vec<MonthlyGoal>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportsSnapshot {
    pub health_trends: Vec<HealthTrend>,
    pub weekly: Vec<WeeklyTotals>,
    pub monthly_goals: Vec<MonthlyGoal>,
    pub overall_achievement: f64,
}

impl ReportsPage {
    pub fn seeded(weight_baseline: f64) -> Self {
        let monthly = MONTHLY_TARGETS
            .iter()
            .map(|&(goal, category, target, achieved)| MonthlyGoal {
                goal,
                category,
                target,
                achieved,
                percentage: round1(goal_progress(achieved, target, category, weight_baseline)),
            })
            .collect();
        Self { monthly }
    }

    pub fn monthly_goals(&self) -> &[MonthlyGoal] {
        &self.monthly
    }

    /// Mean of the monthly goal percentages.
    pub fn overall_achievement(&self) -> f64 {
        if self.monthly.is_empty() {
            return 0.0;
        }
        let total: f64 = self.monthly.iter().map(|goal| goal.percentage).sum();
        round1(total / self.monthly.len() as f64)
    }
}

impl PageView for ReportsPage {
    type Snapshot = ReportsSnapshot;

    fn snapshot(&self) -> ReportsSnapshot {
        ReportsSnapshot {
            health_trends: HEALTH_TRENDS.clone(),
            weekly: WEEKLY_TOTALS.clone(),
            monthly_goals: self.monthly.clone(),
            overall_achievement: self.overall_achievement(),
        }
    }
}
