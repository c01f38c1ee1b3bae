use super::{optional_text, parse_time, required, round1, seed_time, PageView};
use crate::classify::{percent_of, sleep_duration, sleep_quality_tone, Tone};
use crate::errors::AppResult;
use crate::models::{RecordId, SleepEntry, SleepForm, SleepQuality};
use crate::store::{next_record_id, InsertAt, RecordStore};
use chrono::{Days, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct SleepTracker {
    entries: RecordStore<SleepEntry>,
    today: NaiveDate,
    goal_hours: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatedSleep {
    #[serde(flatten)]
    pub entry: SleepEntry,
    pub tone: Tone,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepSnapshot {
    pub entries: Vec<RatedSleep>,
    pub today: Option<SleepEntry>,
    pub average_hours: Option<f64>,
    pub goal_hours: f64,
    pub today_percent: f64,
}

impl SleepTracker {
    pub fn new(today: NaiveDate, goal_hours: f64) -> Self {
        Self {
            entries: RecordStore::new(InsertAt::Front),
            today,
            goal_hours,
        }
    }

    pub fn seeded(today: NaiveDate, goal_hours: f64) -> Self {
        let days_ago = |days: u64| today.checked_sub_days(Days::new(days)).unwrap_or(today);
        let entry = |id: u64, bed: (u32, u32), wake: (u32, u32), quality: SleepQuality, date: NaiveDate, notes: &str| {
            let bedtime = seed_time(bed.0, bed.1);
            let wake_time = seed_time(wake.0, wake.1);
            SleepEntry {
                id: RecordId(id),
                bedtime,
                wake_time,
                duration_hours: sleep_duration(bedtime, wake_time),
                quality,
                date,
                notes: Some(notes.to_string()),
            }
        };
        let mut tracker = Self::new(today, goal_hours);
        tracker.entries = RecordStore::seeded(
            vec![
                entry(1, (22, 30), (6, 30), SleepQuality::Good, today, "Felt refreshed"),
                entry(2, (23, 15), (6, 45), SleepQuality::Fair, days_ago(1), "Woke up once during night"),
                entry(3, (22, 0), (6, 0), SleepQuality::Excellent, days_ago(2), "Perfect sleep"),
            ],
            InsertAt::Front,
        );
        tracker
    }

    pub fn entries(&self) -> &[SleepEntry] {
        self.entries.list()
    }

    /// Records last night's sleep. Any entry already logged for today is
    /// replaced.
    pub fn add(&mut self, form: SleepForm) -> AppResult<SleepEntry> {
        let bedtime = parse_time("bedtime", &form.bedtime)?;
        let wake_time = parse_time("wake time", &form.wake_time)?;
        let quality = required("quality", &form.quality)?.parse::<SleepQuality>()?;

        let entry = SleepEntry {
            id: next_record_id(),
            bedtime,
            wake_time,
            duration_hours: sleep_duration(bedtime, wake_time),
            quality,
            date: self.today,
            notes: optional_text(&form.notes),
        };

        let today = self.today;
        self.entries.retain(|existing| existing.date != today);
        tracing::info!(id = %entry.id, hours = entry.duration_hours, "sleep entry added");
        Ok(self.entries.insert(entry).clone())
    }

    pub fn remove(&mut self, id: RecordId) -> Option<SleepEntry> {
        let removed = self.entries.remove(id);
        if removed.is_some() {
            tracing::info!(id = %id, "sleep entry removed");
        }
        removed
    }

    pub fn today_entry(&self) -> Option<&SleepEntry> {
        self.entries.iter().find(|entry| entry.date == self.today)
    }

    pub fn average_hours(&self) -> Option<f64> {
        self.entries.average_by(|entry| entry.duration_hours).map(round1)
    }
}

impl PageView for SleepTracker {
    type Snapshot = SleepSnapshot;

    fn snapshot(&self) -> SleepSnapshot {
        let today = self.today_entry().cloned();
        let today_hours = today.as_ref().map(|entry| entry.duration_hours).unwrap_or(0.0);
        SleepSnapshot {
            entries: self
                .entries
                .iter()
                .map(|entry| RatedSleep {
                    tone: sleep_quality_tone(entry.quality),
                    entry: entry.clone(),
                })
                .collect(),
            today,
            average_hours: self.average_hours(),
            goal_hours: self.goal_hours,
            today_percent: round1(percent_of(today_hours, self.goal_hours)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SleepTracker;
    use crate::models::{SleepForm, SleepQuality};
    use crate::trackers::PageView;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).expect("date")
    }

    fn form(bedtime: &str, wake_time: &str, quality: &str) -> SleepForm {
        SleepForm {
            bedtime: bedtime.to_string(),
            wake_time: wake_time.to_string(),
            quality: quality.to_string(),
            notes: String::new(),
        }
    }

    #[test]
    fn seeded_durations_and_average() {
        let tracker = SleepTracker::seeded(today(), 8.0);
        let durations: Vec<_> = tracker.entries().iter().map(|entry| entry.duration_hours).collect();
        assert_eq!(durations, [8.0, 7.5, 8.0]);
        assert_eq!(tracker.average_hours(), Some(7.8));
        assert_eq!(tracker.snapshot().today_percent, 100.0);
    }

    #[test]
    fn new_entry_replaces_today_and_goes_first() {
        let mut tracker = SleepTracker::seeded(today(), 8.0);
        let added = tracker.add(form("23:45", "06:15", "poor")).expect("add");
        assert_eq!(added.duration_hours, 6.5);
        assert_eq!(added.quality, SleepQuality::Poor);

        assert_eq!(tracker.entries().len(), 3);
        assert_eq!(tracker.entries()[0].id, added.id);
        assert_eq!(tracker.today_entry().map(|entry| entry.id), Some(added.id));
        assert!(tracker.entries().iter().filter(|entry| entry.date == today()).count() == 1);
    }

    #[test]
    fn quality_is_required() {
        let mut tracker = SleepTracker::seeded(today(), 8.0);
        assert!(tracker.add(form("22:00", "06:00", "")).is_err());
        assert!(tracker.add(form("late", "06:00", "good")).is_err());
        assert_eq!(tracker.today_entry().map(|entry| entry.duration_hours), Some(8.0));
    }

    #[test]
    fn no_entry_for_today_reports_zero_percent() {
        let mut tracker = SleepTracker::seeded(today(), 8.0);
        let today_id = tracker.today_entry().map(|entry| entry.id).expect("today");
        tracker.remove(today_id).expect("remove");
        let snapshot = tracker.snapshot();
        assert!(snapshot.today.is_none());
        assert_eq!(snapshot.today_percent, 0.0);
    }
}
