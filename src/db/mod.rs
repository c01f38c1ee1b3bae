use crate::errors::{AppError, AppResult};
use crate::models::ProfileSettings;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::fs;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

const SCHEMA_SQL: &str = include_str!("schema.sql");

pub const USER_KEY: &str = "healthPulseUser";
pub const LANGUAGE_KEY: &str = "language";
pub const SIDEBAR_KEY: &str = "sidebarOpen";
pub const SETTINGS_KEY: &str = "settings";

/// String key-value storage shared by the whole process, the desktop
/// counterpart of browser local storage.
#[derive(Debug)]
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub fn new(path: &Path) -> AppResult<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| AppError::Io(err.to_string()))?;
        }
        let conn = Connection::open(path).map_err(AppError::from)?;
        conn.execute_batch(SCHEMA_SQL).map_err(AppError::from)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        let conn = self.lock()?;
        let value = conn
            .query_row("SELECT value FROM local_storage WHERE key = ?1", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    pub fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO local_storage (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Returns whether a value was present.
    pub fn remove_item(&self, key: &str) -> AppResult<bool> {
        let conn = self.lock()?;
        let removed = conn.execute("DELETE FROM local_storage WHERE key = ?1", [key])?;
        Ok(removed > 0)
    }

    pub fn get_settings(&self) -> AppResult<ProfileSettings> {
        match self.get_item(SETTINGS_KEY)? {
            Some(raw) => Ok(serde_json::from_str::<ProfileSettings>(&raw).unwrap_or_default()),
            None => Ok(ProfileSettings::default()),
        }
    }

    pub fn update_settings(&self, update: serde_json::Value) -> AppResult<ProfileSettings> {
        let current = self.get_settings()?;
        let mut merged = serde_json::to_value(current)?;
        merge_json(&mut merged, update);
        let settings: ProfileSettings = serde_json::from_value(merged)
            .map_err(|error| AppError::Validation(format!("invalid settings update: {}", error)))?;

        self.set_item(SETTINGS_KEY, &serde_json::to_string(&settings)?)?;
        Ok(settings)
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| AppError::Internal("database mutex poisoned".to_string()))
    }
}

fn merge_json(target: &mut serde_json::Value, update: serde_json::Value) {
    match (target, update) {
        (serde_json::Value::Object(target_map), serde_json::Value::Object(update_map)) => {
            for (key, value) in update_map {
                merge_json(target_map.entry(key).or_insert(serde_json::Value::Null), value);
            }
        }
        (target, update) => {
            *target = update;
        }
    }
}
