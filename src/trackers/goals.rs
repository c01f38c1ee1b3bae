use super::{choice_or, parse_date, parse_decimal, required, round1, PageView};
use crate::classify::{goal_category_icon, goal_priority_tone, goal_progress, Tone};
use crate::errors::AppResult;
use crate::models::{Goal, GoalCategory, GoalForm, GoalPriority, GoalStatus, RecordId};
use crate::store::{next_record_id, InsertAt, RecordStore};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct GoalTracker {
    goals: RecordStore<Goal>,
    weight_baseline: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    #[serde(flatten)]
    pub goal: Goal,
    pub progress_percent: f64,
    pub icon: &'static str,
    pub priority_tone: Tone,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalsSnapshot {
    pub goals: Vec<GoalProgress>,
    pub active: usize,
    pub completed: usize,
    pub average_progress: f64,
}

impl GoalTracker {
    /// `weight_baseline` applies to weight goals that carry no baseline of
    /// their own.
    pub fn new(weight_baseline: f64) -> Self {
        Self {
            goals: RecordStore::new(InsertAt::Back),
            weight_baseline,
        }
    }

    pub fn seeded(weight_baseline: f64) -> Self {
        let goal = |id: u64,
                    title: &str,
                    category: GoalCategory,
                    target: f64,
                    current: f64,
                    unit: &str,
                    deadline: (i32, u32, u32),
                    priority: GoalPriority| Goal {
            id: RecordId(id),
            title: title.to_string(),
            category,
            target,
            current,
            unit: unit.to_string(),
            deadline: NaiveDate::from_ymd_opt(deadline.0, deadline.1, deadline.2).expect("valid seed date"),
            status: GoalStatus::Active,
            priority,
            baseline: None,
        };
        let mut tracker = Self::new(weight_baseline);
        tracker.goals = RecordStore::seeded(
            vec![
                goal(1, "Daily Steps Goal", GoalCategory::Fitness, 10_000.0, 8750.0, "steps", (2024, 12, 31), GoalPriority::High),
                goal(2, "Weight Loss Target", GoalCategory::Weight, 75.0, 78.0, "kg", (2024, 6, 30), GoalPriority::High),
                goal(3, "Water Intake Goal", GoalCategory::Hydration, 8.0, 7.2, "glasses", (2024, 12, 31), GoalPriority::Medium),
                goal(4, "Sleep Quality", GoalCategory::Sleep, 8.0, 7.6, "hours", (2024, 12, 31), GoalPriority::Medium),
            ],
            InsertAt::Back,
        );
        tracker
    }

    pub fn goals(&self) -> &[Goal] {
        self.goals.list()
    }

    /// New goals start at zero progress and active.
    pub fn add(&mut self, form: GoalForm) -> AppResult<Goal> {
        let title = required("title", &form.title)?.to_string();
        let category = required("category", &form.category)?.parse::<GoalCategory>()?;
        let target = parse_decimal("target", &form.target)?;
        let unit = required("unit", &form.unit)?.to_string();
        let deadline = parse_date("deadline", &form.deadline)?;
        let priority = choice_or(&form.priority, GoalPriority::Medium)?;
        let baseline = match form.baseline.trim() {
            "" => None,
            raw => Some(parse_decimal("baseline", raw)?),
        };

        let goal = Goal {
            id: next_record_id(),
            title,
            category,
            target,
            current: 0.0,
            unit,
            deadline,
            status: GoalStatus::Active,
            priority,
            baseline,
        };
        tracing::info!(id = %goal.id, title = %goal.title, target, "goal added");
        Ok(self.goals.insert(goal).clone())
    }

    pub fn remove(&mut self, id: RecordId) -> Option<Goal> {
        let removed = self.goals.remove(id);
        if removed.is_some() {
            tracing::info!(id = %id, "goal removed");
        }
        removed
    }

    pub fn progress(&self, goal: &Goal) -> f64 {
        let baseline = goal.baseline.unwrap_or(self.weight_baseline);
        goal_progress(goal.current, goal.target, goal.category, baseline)
    }
}

impl PageView for GoalTracker {
    type Snapshot = GoalsSnapshot;

    fn snapshot(&self) -> GoalsSnapshot {
        let goals: Vec<_> = self
            .goals
            .iter()
            .map(|goal| GoalProgress {
                progress_percent: round1(self.progress(goal)),
                icon: goal_category_icon(goal.category),
                priority_tone: goal_priority_tone(goal.priority),
                goal: goal.clone(),
            })
            .collect();
        let average_progress = if goals.is_empty() {
            0.0
        } else {
            round1(goals.iter().map(|entry| entry.progress_percent).sum::<f64>() / goals.len() as f64)
        };
        GoalsSnapshot {
            active: self.goals.iter().filter(|goal| goal.status == GoalStatus::Active).count(),
            completed: self.goals.iter().filter(|goal| goal.status == GoalStatus::Completed).count(),
            average_progress,
            goals,
        }
    }
}
