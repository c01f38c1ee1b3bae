use super::{round1, PageView};
use crate::classify::{percent_of, remaining};
use chrono::Weekday;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySteps {
    pub day: Weekday,
    pub steps: u32,
}

#[derive(Debug, Clone)]
pub struct StepsTracker {
    current: u32,
    daily_goal: u32,
    week: Vec<DailySteps>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepsSnapshot {
    pub current: u32,
    pub daily_goal: u32,
    pub progress_percent: f64,
    pub remaining: u32,
    pub week: Vec<DailySteps>,
    pub weekly_average: f64,
    pub days_goal_met: usize,
}

impl StepsTracker {
    pub fn new(current: u32, daily_goal: u32, week: Vec<DailySteps>) -> Self {
        Self {
            current,
            daily_goal,
            week,
        }
    }

    pub fn seeded(daily_goal: u32) -> Self {
        let week = [
            (Weekday::Mon, 8500),
            (Weekday::Tue, 9200),
            (Weekday::Wed, 7800),
            (Weekday::Thu, 11_500),
            (Weekday::Fri, 9800),
            (Weekday::Sat, 12_000),
            (Weekday::Sun, 8750),
        ]
        .into_iter()
        .map(|(day, steps)| DailySteps { day, steps })
        .collect();
        Self::new(8750, daily_goal, week)
    }

    pub fn weekly_average(&self) -> f64 {
        if self.week.is_empty() {
            return 0.0;
        }
        let total: u64 = self.week.iter().map(|day| u64::from(day.steps)).sum();
        round1(total as f64 / self.week.len() as f64)
    }

    pub fn days_goal_met(&self) -> usize {
        self.week.iter().filter(|day| day.steps >= self.daily_goal).count()
    }
}

impl PageView for StepsTracker {
    type Snapshot = StepsSnapshot;

    fn snapshot(&self) -> StepsSnapshot {
        StepsSnapshot {
            current: self.current,
            daily_goal: self.daily_goal,
            progress_percent: round1(percent_of(f64::from(self.current), f64::from(self.daily_goal))),
            remaining: remaining(f64::from(self.current), f64::from(self.daily_goal)) as u32,
            week: self.week.clone(),
            weekly_average: self.weekly_average(),
            days_goal_met: self.days_goal_met(),
        }
    }
}
