use crate::db::{Database, LANGUAGE_KEY, SIDEBAR_KEY};
use crate::errors::{AppError, AppResult};
use crate::models::{Language, UiPreferences};
use std::sync::{Arc, RwLock};

/// Process-wide UI flags. Loaded once at startup, written through on every
/// change.
#[derive(Debug)]
pub struct PreferenceStore {
    db: Arc<Database>,
    current: RwLock<UiPreferences>,
}

impl PreferenceStore {
    pub fn load(db: Arc<Database>) -> AppResult<Self> {
        let mut preferences = UiPreferences::default();

        if let Some(raw) = db.get_item(LANGUAGE_KEY)? {
            match raw.parse::<Language>() {
                Ok(language) => {
                    preferences.language = language;
                    preferences.direction = language.direction();
                }
                Err(_) => tracing::warn!(value = %raw, "ignoring unsupported stored language"),
            }
        }

        if let Some(raw) = db.get_item(SIDEBAR_KEY)? {
            preferences.sidebar_open = raw == "true";
        }

        Ok(Self {
            db,
            current: RwLock::new(preferences),
        })
    }

    pub fn current(&self) -> AppResult<UiPreferences> {
        let reader = self
            .current
            .read()
            .map_err(|_| AppError::Internal("preferences lock poisoned".to_string()))?;
        Ok(reader.clone())
    }

    pub fn set_language(&self, language: Language) -> AppResult<UiPreferences> {
        self.db.set_item(LANGUAGE_KEY, language.as_str())?;
        tracing::info!(language = language.as_str(), "language changed");
        self.modify(|preferences| {
            preferences.language = language;
            preferences.direction = language.direction();
        })
    }

    pub fn set_sidebar_open(&self, open: bool) -> AppResult<UiPreferences> {
        self.db.set_item(SIDEBAR_KEY, if open { "true" } else { "false" })?;
        self.modify(|preferences| preferences.sidebar_open = open)
    }

    pub fn toggle_sidebar(&self) -> AppResult<UiPreferences> {
        let open = !self.current()?.sidebar_open;
        tracing::info!(open, "sidebar toggled");
        self.set_sidebar_open(open)
    }

    fn modify<F>(&self, apply: F) -> AppResult<UiPreferences>
    where
        F: FnOnce(&mut UiPreferences),
    {
        let mut writer = self
            .current
            .write()
            .map_err(|_| AppError::Internal("preferences lock poisoned".to_string()))?;
        apply(&mut writer);
        Ok(writer.clone())
    }
}
