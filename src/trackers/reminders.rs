use super::{choice_or, parse_time, required, seed_time, PageView};
use crate::classify::reminder_category_icon;
use crate::errors::AppResult;
use crate::models::{NextDue, RecordId, Reminder, ReminderCategory, ReminderForm};
use crate::store::{next_record_id, InsertAt, RecordStore};
use serde::Serialize;

const DEFAULT_FREQUENCY: &str = "daily";

#[derive(Debug, Clone)]
pub struct ReminderTracker {
    reminders: RecordStore<Reminder>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderView {
    #[serde(flatten)]
    pub reminder: Reminder,
    pub icon: &'static str,
    pub next_due_label: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemindersSnapshot {
    pub reminders: Vec<ReminderView>,
    pub active: usize,
    pub upcoming: Vec<RecordId>,
}

impl ReminderTracker {
    pub fn new() -> Self {
        Self {
            reminders: RecordStore::new(InsertAt::Back),
        }
    }

    pub fn seeded() -> Self {
        let reminder = |id: u64,
                        title: &str,
                        description: &str,
                        time: (u32, u32),
                        frequency: &str,
                        category: ReminderCategory,
                        next_due: Option<NextDue>| {
            let time = seed_time(time.0, time.1);
            Reminder {
                id: RecordId(id),
                title: title.to_string(),
                description: description.to_string(),
                time,
                frequency: frequency.to_string(),
                category,
                active: next_due != Some(NextDue::Paused),
                next_due: next_due.unwrap_or(NextDue::TodayAt(time)),
            }
        };
        Self {
            reminders: RecordStore::seeded(
                vec![
                    reminder(1, "Stretching Session", "48 minutes of stretching exercises", (8, 0), "daily", ReminderCategory::Exercise, None),
                    reminder(2, "Mind Training", "32 minutes of meditation and mindfulness", (19, 0), "daily", ReminderCategory::Mental, None),
                    reminder(3, "Water Break", "Drink a glass of water", (10, 0), "every 2 hours", ReminderCategory::Hydration, Some(NextDue::InHours(2))),
                    reminder(4, "Take Vitamins", "Daily vitamin supplements", (9, 0), "daily", ReminderCategory::Medication, Some(NextDue::TomorrowAt(seed_time(9, 0)))),
                    reminder(5, "Evening Walk", "30 minutes outdoor walk", (18, 30), "daily", ReminderCategory::Exercise, Some(NextDue::Paused)),
                    reminder(6, "Sleep Preparation", "Wind down routine before bed", (22, 0), "daily", ReminderCategory::Sleep, None),
                ],
                InsertAt::Back,
            ),
        }
    }

    pub fn reminders(&self) -> &[Reminder] {
        self.reminders.list()
    }

    /// Title and time are required. New reminders start active and due today.
    pub fn add(&mut self, form: ReminderForm) -> AppResult<Reminder> {
        let title = required("title", &form.title)?.to_string();
        let time = parse_time("time", &form.time)?;
        let category = choice_or(&form.category, ReminderCategory::General)?;
        let frequency = match form.frequency.trim() {
            "" => DEFAULT_FREQUENCY.to_string(),
            frequency => frequency.to_string(),
        };

        let reminder = Reminder {
            id: next_record_id(),
            title,
            description: form.description.trim().to_string(),
            time,
            frequency,
            category,
            active: true,
            next_due: NextDue::TodayAt(time),
        };
        tracing::info!(id = %reminder.id, title = %reminder.title, "reminder added");
        Ok(self.reminders.insert(reminder).clone())
    }

    /// Flips a reminder between paused and due today at its time.
    pub fn toggle(&mut self, id: RecordId) -> Option<Reminder> {
        let toggled = self
            .reminders
            .update(id, |reminder| {
                reminder.active = !reminder.active;
                reminder.next_due = if reminder.active {
                    NextDue::TodayAt(reminder.time)
                } else {
                    NextDue::Paused
                };
            })
            .cloned();
        if let Some(reminder) = &toggled {
            tracing::info!(id = %id, active = reminder.active, "reminder toggled");
        }
        toggled
    }

    pub fn remove(&mut self, id: RecordId) -> Option<Reminder> {
        let removed = self.reminders.remove(id);
        if removed.is_some() {
            tracing::info!(id = %id, "reminder removed");
        }
        removed
    }

    pub fn upcoming(&self) -> Vec<&Reminder> {
        self.reminders
            .iter()
            .filter(|reminder| reminder.active && reminder.next_due.is_today())
            .collect()
    }
}

impl Default for ReminderTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PageView for ReminderTracker {
    type Snapshot = RemindersSnapshot;

    fn snapshot(&self) -> RemindersSnapshot {
        RemindersSnapshot {
            reminders: self
                .reminders
                .iter()
                .map(|reminder| ReminderView {
                    icon: reminder_category_icon(reminder.category),
                    next_due_label: reminder.next_due.to_string(),
                    reminder: reminder.clone(),
                })
                .collect(),
            active: self.reminders.iter().filter(|reminder| reminder.active).count(),
            upcoming: self.upcoming().into_iter().map(|reminder| reminder.id).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ReminderTracker;
    use crate::models::{NextDue, RecordId, ReminderCategory, ReminderForm};
    use crate::trackers::PageView;

    fn form(title: &str, time: &str) -> ReminderForm {
        ReminderForm {
            title: title.to_string(),
            time: time.to_string(),
            ..ReminderForm::default()
        }
    }

    #[test]
    fn seeded_counts() {
        let tracker = ReminderTracker::seeded();
        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.active, 5);
        assert_eq!(snapshot.upcoming, [RecordId(1), RecordId(2), RecordId(6)]);
        assert_eq!(snapshot.reminders[0].next_due_label, "Today at 8:00 AM");
        assert_eq!(snapshot.reminders[4].next_due_label, "Paused");
    }

    #[test]
    fn new_reminder_uses_defaults() {
        let mut tracker = ReminderTracker::seeded();
        let added = tracker.add(form("Stand up", "15:30")).expect("add");
        assert_eq!(added.frequency, "daily");
        assert_eq!(added.category, ReminderCategory::General);
        assert!(added.active);
        assert_eq!(added.next_due.to_string(), "Today at 3:30 PM");
        assert_eq!(tracker.reminders().last().map(|last| last.id), Some(added.id));
        assert!(tracker.upcoming().iter().any(|reminder| reminder.id == added.id));
    }

    #[test]
    fn title_and_time_are_required() {
        let mut tracker = ReminderTracker::seeded();
        assert!(tracker.add(form("", "10:00")).is_err());
        assert!(tracker.add(form("Walk", "")).is_err());
        assert_eq!(tracker.reminders().len(), 6);
    }

    #[test]
    fn toggle_pauses_and_resumes() {
        let mut tracker = ReminderTracker::seeded();
        let paused = tracker.toggle(RecordId(1)).expect("toggle");
        assert!(!paused.active);
        assert_eq!(paused.next_due, NextDue::Paused);

        let resumed = tracker.toggle(RecordId(5)).expect("toggle");
        assert!(resumed.active);
        assert!(resumed.next_due.is_today());
        assert_eq!(resumed.next_due.to_string(), "Today at 6:30 PM");

        assert!(tracker.toggle(RecordId(77)).is_none());
    }

    #[test]
    fn delete_removes_from_upcoming() {
        let mut tracker = ReminderTracker::seeded();
        tracker.remove(RecordId(6)).expect("remove");
        assert!(tracker.remove(RecordId(6)).is_none());
        assert_eq!(tracker.upcoming().len(), 2);
    }
}
