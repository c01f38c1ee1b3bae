use chrono::{Local, NaiveDateTime, Timelike};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::models::{BloodPressureReading, BloodSugarReading, Goal, HeartRateReading, Meal, RecordId, Reminder, SleepEntry, Workout};

static LAST_ISSUED_ID: AtomicU64 = AtomicU64::new(0);

/// Issues an id from the wall clock in milliseconds, bumped past the last
/// issued id so two records created in the same millisecond never collide.
pub fn next_record_id() -> RecordId {
    let now = u64::try_from(Local::now().timestamp_millis()).unwrap_or_default();
    let previous = LAST_ISSUED_ID
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(now.max(last + 1)))
        .unwrap_or_else(|last| last);
    RecordId(now.max(previous + 1))
}

/// Local wall-clock time truncated to the minute.
pub fn now_minute() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_second(0)
        .and_then(|value| value.with_nanosecond(0))
        .unwrap_or(now)
}

pub trait Record {
    fn id(&self) -> RecordId;
}

macro_rules! impl_record {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Record for $ty {
                fn id(&self) -> RecordId {
                    self.id
                }
            }
        )*
    };
}

impl_record!(
    BloodPressureReading,
    BloodSugarReading,
    HeartRateReading,
    Workout,
    SleepEntry,
    Meal,
    Goal,
    Reminder,
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsertAt {
    Front,
    Back,
}

/// Ordered in-memory list of records for one page view. Order is display
/// order only.
#[derive(Debug, Clone)]
pub struct RecordStore<T> {
    records: Vec<T>,
    insert_at: InsertAt,
}

impl<T: Record> RecordStore<T> {
    pub fn new(insert_at: InsertAt) -> Self {
        Self::seeded(Vec::new(), insert_at)
    }

    pub fn seeded(records: Vec<T>, insert_at: InsertAt) -> Self {
        Self { records, insert_at }
    }

    pub fn list(&self) -> &[T] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn insert(&mut self, record: T) -> &T {
        match self.insert_at {
            InsertAt::Front => {
                self.records.insert(0, record);
                &self.records[0]
            }
            InsertAt::Back => {
                self.records.push(record);
                let last = self.records.len() - 1;
                &self.records[last]
            }
        }
    }

    /// Removes the record with `id`. Unknown ids leave the list untouched.
    pub fn remove(&mut self, id: RecordId) -> Option<T> {
        let index = self.records.iter().position(|record| record.id() == id)?;
        Some(self.records.remove(index))
    }

    pub fn update<F>(&mut self, id: RecordId, apply: F) -> Option<&T>
    where
        F: FnOnce(&mut T),
    {
        let record = self.records.iter_mut().find(|record| record.id() == id)?;
        apply(record);
        Some(&*record)
    }

    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.records.retain(keep);
    }

    pub fn sum_by<F>(&self, value: F) -> f64
    where
        F: Fn(&T) -> f64,
    {
        self.records.iter().map(value).sum()
    }

    /// Mean over all records, or `None` for an empty list.
    pub fn average_by<F>(&self, value: F) -> Option<f64>
    where
        F: Fn(&T) -> f64,
    {
        if self.records.is_empty() {
            return None;
        }
        Some(self.sum_by(value) / self.records.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::{next_record_id, InsertAt, Record, RecordStore};
    use crate::models::RecordId;

    #[derive(Debug, Clone, PartialEq)]
    struct Sample {
        id: RecordId,
        value: f64,
    }

    impl Record for Sample {
        fn id(&self) -> RecordId {
            self.id
        }
    }

    fn sample(id: u64, value: f64) -> Sample {
        Sample { id: RecordId(id), value }
    }

    #[test]
    fn front_store_prepends_and_back_store_appends() {
        let mut front = RecordStore::seeded(vec![sample(1, 1.0)], InsertAt::Front);
        front.insert(sample(2, 2.0));
        assert_eq!(front.list()[0].id, RecordId(2));

        let mut back = RecordStore::seeded(vec![sample(1, 1.0)], InsertAt::Back);
        let inserted = back.insert(sample(2, 2.0)).id;
        assert_eq!(inserted, RecordId(2));
        assert_eq!(back.list()[1].id, RecordId(2));
    }

    #[test]
    fn append_then_remove_restores_contents() {
        for insert_at in [InsertAt::Front, InsertAt::Back] {
            let mut store = RecordStore::seeded(vec![sample(1, 1.0), sample(2, 2.0)], insert_at);
            let before = store.list().to_vec();
            store.insert(sample(3, 3.0));
            assert_eq!(store.len(), 3);
            let removed = store.remove(RecordId(3)).expect("removed");
            assert_eq!(removed.value, 3.0);
            assert_eq!(store.list(), before.as_slice());
        }
    }

    #[test]
    fn removing_unknown_id_is_a_no_op() {
        let mut store = RecordStore::seeded(vec![sample(1, 1.0)], InsertAt::Back);
        assert!(store.remove(RecordId(42)).is_none());
        assert!(store.remove(RecordId(1)).is_some());
        assert!(store.remove(RecordId(1)).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn update_touches_only_matching_record() {
        let mut store = RecordStore::seeded(vec![sample(1, 1.0), sample(2, 2.0)], InsertAt::Back);
        let updated = store.update(RecordId(2), |record| record.value = 20.0).cloned();
        assert_eq!(updated, Some(sample(2, 20.0)));
        assert_eq!(store.get(RecordId(1)), Some(&sample(1, 1.0)));
        assert!(store.update(RecordId(9), |record| record.value = 0.0).is_none());
    }

    #[test]
    fn averages_handle_empty_lists() {
        let store: RecordStore<Sample> = RecordStore::new(InsertAt::Back);
        assert!(store.average_by(|record| record.value).is_none());

        let store = RecordStore::seeded(vec![sample(1, 2.0), sample(2, 4.0)], InsertAt::Back);
        assert_eq!(store.average_by(|record| record.value), Some(3.0));
        assert_eq!(store.sum_by(|record| record.value), 6.0);
    }

    #[test]
    fn generated_ids_strictly_increase() {
        let first = next_record_id();
        let second = next_record_id();
        let third = next_record_id();
        assert!(first < second);
        assert!(second < third);
    }
}
