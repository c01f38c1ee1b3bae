use super::{choice_or, optional_text, parse_whole, round1, seed_stamp, Assessed, PageView};
use crate::classify::{blood_sugar_status, percent_of, Assessment};
use crate::errors::AppResult;
use crate::models::{BloodSugarForm, BloodSugarReading, RecordId, SugarReadingKind};
use crate::store::{next_record_id, now_minute, InsertAt, RecordStore};
use serde::Serialize;
use std::ops::RangeInclusive;

/// Readings inside this band count toward time in range.
pub const TARGET_RANGE: RangeInclusive<u32> = 70..=140;

#[derive(Debug, Clone)]
pub struct BloodSugarTracker {
    readings: RecordStore<BloodSugarReading>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BloodSugarSnapshot {
    pub readings: Vec<Assessed<BloodSugarReading>>,
    pub average: Option<f64>,
    pub latest: Option<Assessment>,
    pub target_min: u32,
    pub target_max: u32,
    pub in_range_percent: f64,
}

impl BloodSugarTracker {
    pub fn new() -> Self {
        Self {
            readings: RecordStore::new(InsertAt::Front),
        }
    }

    pub fn seeded() -> Self {
        let reading = |id: u64, value: u32, at: &str, kind: SugarReadingKind, notes: Option<&str>| BloodSugarReading {
            id: RecordId(id),
            value,
            kind,
            captured_at: seed_stamp(at),
            notes: notes.map(ToString::to_string),
        };
        Self {
            readings: RecordStore::seeded(
                vec![
                    reading(1, 95, "2024-01-15 08:00", SugarReadingKind::Fasting, Some("Morning reading")),
                    reading(2, 140, "2024-01-15 10:30", SugarReadingKind::PostMeal, Some("2 hours after breakfast")),
                    reading(3, 110, "2024-01-15 14:00", SugarReadingKind::Random, None),
                    reading(4, 125, "2024-01-15 16:30", SugarReadingKind::PostMeal, Some("After lunch")),
                    reading(5, 88, "2024-01-15 22:00", SugarReadingKind::Bedtime, None),
                ],
                InsertAt::Front,
            ),
        }
    }

    pub fn readings(&self) -> &[BloodSugarReading] {
        self.readings.list()
    }

    pub fn add(&mut self, form: BloodSugarForm) -> AppResult<BloodSugarReading> {
        let value = parse_whole("value", &form.value)?;
        let kind = choice_or(&form.kind, SugarReadingKind::Random)?;

        let reading = BloodSugarReading {
            id: next_record_id(),
            value,
            kind,
            captured_at: now_minute(),
            notes: optional_text(&form.notes),
        };
        tracing::info!(id = %reading.id, value, kind = kind.as_str(), "blood sugar reading added");
        Ok(self.readings.insert(reading).clone())
    }

    pub fn remove(&mut self, id: RecordId) -> Option<BloodSugarReading> {
        let removed = self.readings.remove(id);
        if removed.is_some() {
            tracing::info!(id = %id, "blood sugar reading removed");
        }
        removed
    }

    pub fn average(&self) -> Option<f64> {
        self.readings
            .average_by(|reading| f64::from(reading.value))
            .map(round1)
    }

    pub fn in_range_percent(&self) -> f64 {
        let in_range = self
            .readings
            .iter()
            .filter(|reading| TARGET_RANGE.contains(&reading.value))
            .count();
        round1(percent_of(in_range as f64, self.readings.len() as f64))
    }
}

impl Default for BloodSugarTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PageView for BloodSugarTracker {
    type Snapshot = BloodSugarSnapshot;

    fn snapshot(&self) -> BloodSugarSnapshot {
        let readings: Vec<_> = self
            .readings
            .iter()
            .map(|reading| Assessed {
                assessment: blood_sugar_status(reading.value, reading.kind),
                record: reading.clone(),
            })
            .collect();
        BloodSugarSnapshot {
            latest: readings.first().map(|entry| entry.assessment),
            average: self.average(),
            target_min: *TARGET_RANGE.start(),
            target_max: *TARGET_RANGE.end(),
            in_range_percent: self.in_range_percent(),
            readings,
        }
    }
}
