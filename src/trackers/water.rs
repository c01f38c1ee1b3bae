use super::{round1, seed_time, PageView};
use crate::classify::{percent_of, remaining};
use crate::models::WaterLog;
use chrono::NaiveTime;
use serde::Serialize;

/// Glass counter for today plus the log of when each glass was recorded.
#[derive(Debug, Clone)]
pub struct WaterTracker {
    intake: u32,
    daily_goal: u32,
    max_glasses: u32,
    history: Vec<WaterLog>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterSnapshot {
    pub intake: u32,
    pub daily_goal: u32,
    pub progress_percent: f64,
    pub remaining: u32,
    pub history: Vec<WaterLog>,
}

impl WaterTracker {
    pub fn new(daily_goal: u32, max_glasses: u32) -> Self {
        Self {
            intake: 0,
            daily_goal,
            max_glasses,
            history: Vec::new(),
        }
    }

    pub fn seeded(daily_goal: u32, max_glasses: u32) -> Self {
        let log = |hour: u32, minute: u32, glasses: u32| WaterLog {
            time: seed_time(hour, minute),
            glasses,
        };
        Self {
            intake: 6,
            daily_goal,
            max_glasses,
            history: vec![log(8, 0, 1), log(10, 30, 1), log(12, 15, 2), log(14, 45, 1), log(16, 20, 1)],
        }
    }

    pub fn intake(&self) -> u32 {
        self.intake
    }

    pub fn history(&self) -> &[WaterLog] {
        &self.history
    }

    /// Adds one glass unless the daily cap is reached. Returns whether the
    /// glass was counted.
    pub fn add_glass(&mut self, at: NaiveTime) -> bool {
        if self.intake >= self.max_glasses {
            tracing::debug!(intake = self.intake, "water intake cap reached");
            return false;
        }
        self.intake += 1;
        self.history.push(WaterLog { time: at, glasses: 1 });
        tracing::info!(intake = self.intake, "glass of water added");
        true
    }

    /// Removes the most recent log entry and one glass.
    pub fn remove_glass(&mut self) -> bool {
        if self.intake == 0 {
            return false;
        }
        self.intake -= 1;
        self.history.pop();
        tracing::info!(intake = self.intake, "glass of water removed");
        true
    }

    pub fn progress_percent(&self) -> f64 {
        round1(percent_of(f64::from(self.intake), f64::from(self.daily_goal)))
    }

    pub fn remaining(&self) -> u32 {
        remaining(f64::from(self.intake), f64::from(self.daily_goal)) as u32
    }
}

impl PageView for WaterTracker {
    type Snapshot = WaterSnapshot;

    fn snapshot(&self) -> WaterSnapshot {
        WaterSnapshot {
            intake: self.intake,
            daily_goal: self.daily_goal,
            progress_percent: self.progress_percent(),
            remaining: self.remaining(),
            history: self.history.clone(),
        }
    }
}
