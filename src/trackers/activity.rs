use super::{parse_whole, required, round1, seed_time, PageView};
use crate::classify::percent_of;
use crate::errors::AppResult;
use crate::models::{Intensity, RecordId, Workout, WorkoutForm};
use crate::store::{next_record_id, now_minute, InsertAt, RecordStore};
use chrono::{Days, NaiveDate, NaiveTime};
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct ActivityTracker {
    workouts: RecordStore<Workout>,
    today: NaiveDate,
    minutes_goal: u32,
    calories_goal: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySnapshot {
    pub workouts: Vec<Workout>,
    pub today_minutes: u32,
    pub today_calories: u32,
    pub minutes_goal: u32,
    pub calories_goal: u32,
    pub minutes_percent: f64,
    pub calories_percent: f64,
}

impl ActivityTracker {
    pub fn new(today: NaiveDate, minutes_goal: u32, calories_goal: u32) -> Self {
        Self {
            workouts: RecordStore::new(InsertAt::Back),
            today,
            minutes_goal,
            calories_goal,
        }
    }

    pub fn seeded(today: NaiveDate, minutes_goal: u32, calories_goal: u32) -> Self {
        let yesterday = today.checked_sub_days(Days::new(1)).unwrap_or(today);
        let workout = |id: u64,
                       kind: &str,
                       duration_minutes: u32,
                       calories: u32,
                       intensity: Intensity,
                       time: NaiveTime,
                       date: NaiveDate| Workout {
            id: RecordId(id),
            kind: kind.to_string(),
            duration_minutes,
            calories,
            intensity,
            time,
            date,
        };
        let mut tracker = Self::new(today, minutes_goal, calories_goal);
        tracker.workouts = RecordStore::seeded(
            vec![
                workout(1, "Running", 30, 300, Intensity::Moderate, seed_time(7, 0), today),
                workout(2, "Weight Training", 45, 250, Intensity::High, seed_time(18, 30), today),
                workout(3, "Yoga", 60, 180, Intensity::Low, seed_time(19, 30), yesterday),
            ],
            InsertAt::Back,
        );
        tracker
    }

    pub fn workouts(&self) -> &[Workout] {
        self.workouts.list()
    }

    pub fn add(&mut self, form: WorkoutForm) -> AppResult<Workout> {
        let kind = required("type", &form.kind)?.to_string();
        let duration_minutes = parse_whole("duration", &form.duration)?;
        let calories = parse_whole("calories", &form.calories)?;
        let intensity = required("intensity", &form.intensity)?.parse::<Intensity>()?;

        let workout = Workout {
            id: next_record_id(),
            kind,
            duration_minutes,
            calories,
            intensity,
            time: now_minute().time(),
            date: self.today,
        };
        tracing::info!(id = %workout.id, kind = %workout.kind, duration_minutes, "workout added");
        Ok(self.workouts.insert(workout).clone())
    }

    pub fn remove(&mut self, id: RecordId) -> Option<Workout> {
        let removed = self.workouts.remove(id);
        if removed.is_some() {
            tracing::info!(id = %id, "workout removed");
        }
        removed
    }

    fn today_workouts(&self) -> impl Iterator<Item = &Workout> {
        self.workouts.iter().filter(move |workout| workout.date == self.today)
    }

    pub fn today_minutes(&self) -> u32 {
        self.today_workouts()
            .fold(0, |total: u32, workout| total.saturating_add(workout.duration_minutes))
    }

    pub fn today_calories(&self) -> u32 {
        self.today_workouts()
            .fold(0, |total: u32, workout| total.saturating_add(workout.calories))
    }
}

impl PageView for ActivityTracker {
    type Snapshot = ActivitySnapshot;

    fn snapshot(&self) -> ActivitySnapshot {
        let today_minutes = self.today_minutes();
        let today_calories = self.today_calories();
        ActivitySnapshot {
            workouts: self.workouts.list().to_vec(),
            today_minutes,
            today_calories,
            minutes_goal: self.minutes_goal,
            calories_goal: self.calories_goal,
            minutes_percent: round1(percent_of(f64::from(today_minutes), f64::from(self.minutes_goal))),
            calories_percent: round1(percent_of(f64::from(today_calories), f64::from(self.calories_goal))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ActivityTracker;
    use crate::models::{Intensity, WorkoutForm};
    use crate::trackers::PageView;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).expect("date")
    }

    fn form(kind: &str, duration: &str, calories: &str, intensity: &str) -> WorkoutForm {
        WorkoutForm {
            kind: kind.to_string(),
            duration: duration.to_string(),
            calories: calories.to_string(),
            intensity: intensity.to_string(),
        }
    }

    #[test]
    fn only_today_counts_toward_totals() {
        let tracker = ActivityTracker::seeded(today(), 60, 400);
        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.today_minutes, 75);
        assert_eq!(snapshot.today_calories, 550);
        assert_eq!(snapshot.minutes_percent, 125.0);
        assert_eq!(snapshot.calories_percent, 137.5);
    }

    #[test]
    fn workouts_are_appended_for_today() {
        let mut tracker = ActivityTracker::seeded(today(), 60, 400);
        let added = tracker.add(form("Cycling", "20", "150", "moderate")).expect("add");
        assert_eq!(added.intensity, Intensity::Moderate);
        assert_eq!(added.date, today());
        assert_eq!(tracker.workouts().last().map(|workout| workout.id), Some(added.id));
        assert_eq!(tracker.today_minutes(), 95);

        tracker.remove(added.id).expect("remove");
        assert_eq!(tracker.today_minutes(), 75);
    }

    #[test]
    fn every_field_is_required() {
        let mut tracker = ActivityTracker::seeded(today(), 60, 400);
        assert!(tracker.add(form("", "20", "150", "low")).is_err());
        assert!(tracker.add(form("Swim", "20", "150", "")).is_err());
        assert!(tracker.add(form("Swim", "twenty", "150", "low")).is_err());
        assert_eq!(tracker.workouts().len(), 3);
    }

    #[test]
    fn oversized_workouts_saturate_totals() {
        let mut tracker = ActivityTracker::seeded(today(), 60, 400);
        tracker.add(form("Ultra", "4294967295", "4294967295", "high")).expect("add");
        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.today_minutes, u32::MAX);
        assert_eq!(snapshot.today_calories, u32::MAX);
    }

    #[test]
    fn removing_seeded_workout_updates_totals() {
        let mut tracker = ActivityTracker::seeded(today(), 60, 400);
        let first = tracker.workouts()[0].id;
        tracker.remove(first);
        assert!(tracker.remove(first).is_none());
        assert_eq!(tracker.today_calories(), 250);
    }
}
