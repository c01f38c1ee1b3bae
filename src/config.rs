use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::errors::AppResult;

pub const CONFIG_FILE_NAME: &str = "config.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct HealthConfig {
    /// Simulated network latency before the mock auth flow completes.
    pub auth_delay_ms: u64,
    pub user_age: u32,
    pub goals: GoalDefaults,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            auth_delay_ms: 1500,
            user_age: 32,
            goals: GoalDefaults::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct GoalDefaults {
    /// Starting weight for weight goals that carry no baseline of their own.
    pub weight_baseline_kg: f64,
    pub activity_minutes: u32,
    pub activity_calories: u32,
    pub sleep_hours: f64,
    pub water_glasses: u32,
    pub water_max_glasses: u32,
    pub steps: u32,
    pub calories: u32,
    pub protein_g: u32,
    pub carbs_g: u32,
    pub fat_g: u32,
}

impl Default for GoalDefaults {
    fn default() -> Self {
        Self {
            weight_baseline_kg: 85.0,
            activity_minutes: 60,
            activity_calories: 400,
            sleep_hours: 8.0,
            water_glasses: 8,
            water_max_glasses: 15,
            steps: 10_000,
            calories: 2200,
            protein_g: 150,
            carbs_g: 275,
            fat_g: 73,
        }
    }
}

impl HealthConfig {
    /// Reads `config.yaml` from the data directory, falling back to defaults
    /// when the file does not exist.
    pub fn load(data_dir: &Path) -> AppResult<Self> {
        let path = data_dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(&path)?;
        Self::from_yaml(&raw)
    }

    pub fn from_yaml(raw: &str) -> AppResult<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(raw)?;
        Ok(config)
    }
}
