use super::{choice_or, optional_text, parse_whole, round1, seed_stamp, Assessed, PageView};
use crate::classify::{estimated_max_heart_rate, heart_rate_status, Assessment};
use crate::errors::AppResult;
use crate::models::{HeartRateForm, HeartRateKind, HeartRateReading, RecordId};
use crate::store::{next_record_id, now_minute, InsertAt, RecordStore};
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct HeartRateTracker {
    readings: RecordStore<HeartRateReading>,
    max_heart_rate: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartRateZone {
    pub name: &'static str,
    pub min_bpm: u32,
    pub max_bpm: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartRateSnapshot {
    pub readings: Vec<Assessed<HeartRateReading>>,
    pub average: Option<f64>,
    pub average_resting: Option<f64>,
    pub latest: Option<Assessment>,
    pub max_heart_rate: u32,
    pub zones: Vec<HeartRateZone>,
}

impl HeartRateTracker {
    pub fn new(age: u32) -> Self {
        Self {
            readings: RecordStore::new(InsertAt::Front),
            max_heart_rate: estimated_max_heart_rate(age),
        }
    }

    pub fn seeded(age: u32) -> Self {
        let reading = |id: u64, value: u32, at: &str, kind: HeartRateKind, notes: Option<&str>| HeartRateReading {
            id: RecordId(id),
            value,
            kind,
            captured_at: seed_stamp(at),
            notes: notes.map(ToString::to_string),
        };
        Self {
            readings: RecordStore::seeded(
                vec![
                    reading(1, 72, "2024-01-15 08:00", HeartRateKind::Resting, Some("Morning reading")),
                    reading(2, 145, "2024-01-15 10:30", HeartRateKind::Active, Some("During workout")),
                    reading(3, 85, "2024-01-15 11:00", HeartRateKind::Recovery, Some("Post-workout")),
                    reading(4, 68, "2024-01-15 14:00", HeartRateKind::Resting, None),
                    reading(5, 75, "2024-01-15 18:00", HeartRateKind::Resting, None),
                ],
                InsertAt::Front,
            ),
            max_heart_rate: estimated_max_heart_rate(age),
        }
    }

    pub fn readings(&self) -> &[HeartRateReading] {
        self.readings.list()
    }

    pub fn add(&mut self, form: HeartRateForm) -> AppResult<HeartRateReading> {
        let value = parse_whole("value", &form.value)?;
        let kind = choice_or(&form.kind, HeartRateKind::Resting)?;

        let reading = HeartRateReading {
            id: next_record_id(),
            value,
            kind,
            captured_at: now_minute(),
            notes: optional_text(&form.notes),
        };
        tracing::info!(id = %reading.id, value, kind = kind.as_str(), "heart rate reading added");
        Ok(self.readings.insert(reading).clone())
    }

    pub fn remove(&mut self, id: RecordId) -> Option<HeartRateReading> {
        let removed = self.readings.remove(id);
        if removed.is_some() {
            tracing::info!(id = %id, "heart rate reading removed");
        }
        removed
    }

    pub fn average(&self) -> Option<f64> {
        self.readings
            .average_by(|reading| f64::from(reading.value))
            .map(round1)
    }

    pub fn average_resting(&self) -> Option<f64> {
        let resting: Vec<f64> = self
            .readings
            .iter()
            .filter(|reading| reading.kind == HeartRateKind::Resting)
            .map(|reading| f64::from(reading.value))
            .collect();
        if resting.is_empty() {
            return None;
        }
        Some(round1(resting.iter().sum::<f64>() / resting.len() as f64))
    }

    /// Training zones; the top zone ends at the estimated maximum.
    pub fn zones(&self) -> Vec<HeartRateZone> {
        vec![
            HeartRateZone { name: "Resting", min_bpm: 60, max_bpm: 70 },
            HeartRateZone { name: "Fat Burn", min_bpm: 70, max_bpm: 130 },
            HeartRateZone { name: "Cardio", min_bpm: 130, max_bpm: 155 },
            HeartRateZone { name: "Peak", min_bpm: 155, max_bpm: self.max_heart_rate.max(155) },
        ]
    }
}

impl PageView for HeartRateTracker {
    type Snapshot = HeartRateSnapshot;

    fn snapshot(&self) -> HeartRateSnapshot {
        let readings: Vec<_> = self
            .readings
            .iter()
            .map(|reading| Assessed {
                assessment: heart_rate_status(reading.value, reading.kind),
                record: reading.clone(),
            })
            .collect();
        HeartRateSnapshot {
            latest: readings.first().map(|entry| entry.assessment),
            average: self.average(),
            average_resting: self.average_resting(),
            max_heart_rate: self.max_heart_rate,
            zones: self.zones(),
            readings,
        }
    }
}
