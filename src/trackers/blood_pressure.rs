use super::{optional_text, parse_whole, round1, seed_stamp, Assessed, PageView};
use crate::classify::{blood_pressure_category, Assessment};
use crate::errors::AppResult;
use crate::models::{BloodPressureForm, BloodPressureReading, RecordId};
use crate::store::{next_record_id, now_minute, InsertAt, RecordStore};
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct BloodPressureTracker {
    readings: RecordStore<BloodPressureReading>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BloodPressureAverages {
    pub systolic: f64,
    pub diastolic: f64,
    pub pulse: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BloodPressureSnapshot {
    pub readings: Vec<Assessed<BloodPressureReading>>,
    pub averages: Option<BloodPressureAverages>,
    pub latest: Option<Assessment>,
    pub alerts: usize,
}

impl BloodPressureTracker {
    pub fn new() -> Self {
        Self {
            readings: RecordStore::new(InsertAt::Front),
        }
    }

    pub fn seeded() -> Self {
        let reading = |id: u64, systolic: u32, diastolic: u32, pulse: u32, at: &str, notes: Option<&str>| {
            BloodPressureReading {
                id: RecordId(id),
                systolic,
                diastolic,
                pulse,
                captured_at: seed_stamp(at),
                notes: notes.map(ToString::to_string),
            }
        };
        Self {
            readings: RecordStore::seeded(
                vec![
                    reading(1, 120, 80, 72, "2024-01-15 08:00", Some("Morning reading")),
                    reading(2, 118, 78, 68, "2024-01-15 14:00", None),
                    reading(3, 125, 82, 75, "2024-01-15 20:00", Some("Evening reading")),
                    reading(4, 115, 75, 70, "2024-01-14 08:00", None),
                    reading(5, 122, 79, 73, "2024-01-14 20:00", None),
                ],
                InsertAt::Front,
            ),
        }
    }

    pub fn readings(&self) -> &[BloodPressureReading] {
        self.readings.list()
    }

    pub fn add(&mut self, form: BloodPressureForm) -> AppResult<BloodPressureReading> {
        let systolic = parse_whole("systolic", &form.systolic)?;
        let diastolic = parse_whole("diastolic", &form.diastolic)?;
        let pulse = parse_whole("pulse", &form.pulse)?;

        let reading = BloodPressureReading {
            id: next_record_id(),
            systolic,
            diastolic,
            pulse,
            captured_at: now_minute(),
            notes: optional_text(&form.notes),
        };
        let category = blood_pressure_category(systolic, diastolic);
        tracing::info!(id = %reading.id, systolic, diastolic, category = category.label, "blood pressure reading added");
        Ok(self.readings.insert(reading).clone())
    }

    pub fn remove(&mut self, id: RecordId) -> Option<BloodPressureReading> {
        let removed = self.readings.remove(id);
        if removed.is_some() {
            tracing::info!(id = %id, "blood pressure reading removed");
        }
        removed
    }

    pub fn averages(&self) -> Option<BloodPressureAverages> {
        Some(BloodPressureAverages {
            systolic: round1(self.readings.average_by(|reading| f64::from(reading.systolic))?),
            diastolic: round1(self.readings.average_by(|reading| f64::from(reading.diastolic))?),
            pulse: round1(self.readings.average_by(|reading| f64::from(reading.pulse))?),
        })
    }
}

impl Default for BloodPressureTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PageView for BloodPressureTracker {
    type Snapshot = BloodPressureSnapshot;

    fn snapshot(&self) -> BloodPressureSnapshot {
        let readings: Vec<_> = self
            .readings
            .iter()
            .map(|reading| Assessed {
                assessment: blood_pressure_category(reading.systolic, reading.diastolic),
                record: reading.clone(),
            })
            .collect();
        BloodPressureSnapshot {
            alerts: readings.iter().filter(|entry| entry.assessment.alert).count(),
            latest: readings.first().map(|entry| entry.assessment),
            averages: self.averages(),
            readings,
        }
    }
}
