use crate::auth::MockAuth;
use crate::classify::Assessment;
use crate::config::HealthConfig;
use crate::db::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{
    BloodPressureForm, BloodSugarForm, Greeting, HeartRateForm, Language, MealForm, Page, ProfileSettings, RecordId,
    Reminder, ReminderForm, SignInPayload, SignUpPayload, SleepForm, StoredUser, UiPreferences, WorkoutForm, GoalForm,
};
use crate::preferences::PreferenceStore;
use crate::reports::ReportsPage;
use crate::store::now_minute;
use crate::trackers::{
    ActivityTracker, BloodPressureTracker, BloodSugarTracker, GoalTracker, HeartRateTracker, NutritionTracker, PageView,
    ReminderTracker, SleepTracker, StepsTracker, WaterTracker,
};
use chrono::{Local, NaiveDate};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::time::Duration;

const DATABASE_FILE_NAME: &str = "state.sqlite";

/// Entry point for every page and preference operation. Shared state is the
/// key-value store and the preference snapshot; page state is created fresh
/// for each view.
#[derive(Debug)]
pub struct HealthCore {
    db: Arc<Database>,
    preferences: PreferenceStore,
    auth: MockAuth,
    config: HealthConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestReading {
    pub value: String,
    pub assessment: Assessment,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub greeting: Greeting,
    pub steps: u32,
    pub steps_goal: u32,
    pub water_glasses: u32,
    pub water_goal: u32,
    pub calories: u32,
    pub blood_pressure: Option<LatestReading>,
    pub blood_sugar: Option<LatestReading>,
    pub heart_rate: Option<LatestReading>,
    pub upcoming_reminders: Vec<Reminder>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageChange {
    pub page: Page,
    pub changed: Value,
    pub snapshot: Value,
}

impl HealthCore {
    pub fn new(data_dir: PathBuf) -> AppResult<Arc<Self>> {
        let config = HealthConfig::load(&data_dir)?;
        Self::with_config(data_dir, config)
    }

    pub fn with_config(data_dir: PathBuf, config: HealthConfig) -> AppResult<Arc<Self>> {
        let db_path = data_dir.join(DATABASE_FILE_NAME);
        let db = Arc::new(Database::new(&db_path)?);
        let preferences = PreferenceStore::load(db.clone())?;
        let auth = MockAuth::new(db.clone(), Duration::from_millis(config.auth_delay_ms));

        tracing::info!(path = %db_path.display(), "health core ready");
        Ok(Arc::new(Self {
            db,
            preferences,
            auth,
            config,
        }))
    }

    pub fn config(&self) -> &HealthConfig {
        &self.config
    }

    pub fn preferences(&self) -> AppResult<UiPreferences> {
        self.preferences.current()
    }

    pub fn set_language(&self, language: Language) -> AppResult<UiPreferences> {
        self.preferences.set_language(language)
    }

    pub fn toggle_sidebar(&self) -> AppResult<UiPreferences> {
        self.preferences.toggle_sidebar()
    }

    pub async fn sign_in(&self, payload: SignInPayload) -> AppResult<StoredUser> {
        self.auth.sign_in(payload).await
    }

    pub async fn sign_up(&self, payload: SignUpPayload) -> AppResult<StoredUser> {
        self.auth.sign_up(payload).await
    }

    pub fn sign_out(&self) -> AppResult<bool> {
        self.auth.sign_out()
    }

    pub fn current_user(&self) -> AppResult<Option<StoredUser>> {
        self.auth.current_user()
    }

    pub fn greeting(&self) -> AppResult<Greeting> {
        let preferences = self.preferences.current()?;
        let signed_in = self.auth.current_user()?.is_some_and(|user| user.is_logged_in);
        Ok(Greeting {
            name: self.auth.display_name()?,
            language: preferences.language,
            direction: preferences.direction,
            signed_in,
        })
    }

    pub fn settings(&self) -> AppResult<ProfileSettings> {
        self.db.get_settings()
    }

    pub fn update_settings(&self, update: Value) -> AppResult<ProfileSettings> {
        let settings = self.db.update_settings(update)?;
        tracing::info!("settings updated");
        Ok(settings)
    }

    pub fn activity_page(&self) -> ActivityTracker {
        let goals = &self.config.goals;
        ActivityTracker::seeded(today(), goals.activity_minutes, goals.activity_calories)
    }

    pub fn sleep_page(&self) -> SleepTracker {
        SleepTracker::seeded(today(), self.config.goals.sleep_hours)
    }

    pub fn water_page(&self) -> WaterTracker {
        let goals = &self.config.goals;
        WaterTracker::seeded(goals.water_glasses, goals.water_max_glasses)
    }

    pub fn nutrition_page(&self) -> NutritionTracker {
        NutritionTracker::seeded(&self.config.goals)
    }

    pub fn blood_pressure_page(&self) -> BloodPressureTracker {
        BloodPressureTracker::seeded()
    }

    pub fn blood_sugar_page(&self) -> BloodSugarTracker {
        BloodSugarTracker::seeded()
    }

    pub fn heart_rate_page(&self) -> HeartRateTracker {
        HeartRateTracker::seeded(self.config.user_age)
    }

    pub fn steps_page(&self) -> StepsTracker {
        StepsTracker::seeded(self.config.goals.steps)
    }

    pub fn goals_page(&self) -> GoalTracker {
        GoalTracker::seeded(self.config.goals.weight_baseline_kg)
    }

    pub fn reminders_page(&self) -> ReminderTracker {
        ReminderTracker::seeded()
    }

    pub fn reports_page(&self) -> ReportsPage {
        ReportsPage::seeded(self.config.goals.weight_baseline_kg)
    }

    pub fn dashboard(&self) -> AppResult<DashboardSnapshot> {
        let steps = self.steps_page().snapshot();
        let water = self.water_page();
        let blood_pressure = self.blood_pressure_page().snapshot();
        let blood_sugar = self.blood_sugar_page().snapshot();
        let heart_rate = self.heart_rate_page().snapshot();
        let reminders = self.reminders_page();

        Ok(DashboardSnapshot {
            greeting: self.greeting()?,
            steps: steps.current,
            steps_goal: steps.daily_goal,
            water_glasses: water.intake(),
            water_goal: self.config.goals.water_glasses,
            calories: self.nutrition_page().totals().calories,
            blood_pressure: blood_pressure.readings.first().map(|entry| LatestReading {
                value: format!("{}/{}", entry.record.systolic, entry.record.diastolic),
                assessment: entry.assessment,
            }),
            blood_sugar: blood_sugar.readings.first().map(|entry| LatestReading {
                value: entry.record.value.to_string(),
                assessment: entry.assessment,
            }),
            heart_rate: heart_rate.readings.first().map(|entry| LatestReading {
                value: entry.record.value.to_string(),
                assessment: entry.assessment,
            }),
            upcoming_reminders: reminders.upcoming().into_iter().cloned().collect(),
        })
    }

    /// Seeded view of a page as JSON.
    pub fn page_snapshot(&self, page: Page) -> AppResult<Value> {
        let value = match page {
            Page::Dashboard => serde_json::to_value(self.dashboard()?)?,
            Page::Activity => serde_json::to_value(self.activity_page().snapshot())?,
            Page::Sleep => serde_json::to_value(self.sleep_page().snapshot())?,
            Page::Water => serde_json::to_value(self.water_page().snapshot())?,
            Page::Nutrition => serde_json::to_value(self.nutrition_page().snapshot())?,
            Page::BloodPressure => serde_json::to_value(self.blood_pressure_page().snapshot())?,
            Page::BloodSugar => serde_json::to_value(self.blood_sugar_page().snapshot())?,
            Page::HeartRate => serde_json::to_value(self.heart_rate_page().snapshot())?,
            Page::Steps => serde_json::to_value(self.steps_page().snapshot())?,
            Page::Goals => serde_json::to_value(self.goals_page().snapshot())?,
            Page::Reminders => serde_json::to_value(self.reminders_page().snapshot())?,
            Page::Reports => serde_json::to_value(self.reports_page().snapshot())?,
            Page::Settings => serde_json::to_value(self.settings()?)?,
        };
        Ok(value)
    }

    /// Submits a page form given as JSON fields and returns the new record with
    /// the resulting page view. The water page ignores the fields and adds one
    /// glass.
    pub fn page_add(&self, page: Page, fields: Value) -> AppResult<PageChange> {
        let (changed, snapshot) = match page {
            Page::Activity => submit(self.activity_page(), fields, |page, form: WorkoutForm| page.add(form))?,
            Page::Sleep => submit(self.sleep_page(), fields, |page, form: SleepForm| page.add(form))?,
            Page::Nutrition => submit(self.nutrition_page(), fields, |page, form: MealForm| page.add(form))?,
            Page::BloodPressure => {
                submit(self.blood_pressure_page(), fields, |page, form: BloodPressureForm| page.add(form))?
            }
            Page::BloodSugar => submit(self.blood_sugar_page(), fields, |page, form: BloodSugarForm| page.add(form))?,
            Page::HeartRate => submit(self.heart_rate_page(), fields, |page, form: HeartRateForm| page.add(form))?,
            Page::Goals => submit(self.goals_page(), fields, |page, form: GoalForm| page.add(form))?,
            Page::Reminders => submit(self.reminders_page(), fields, |page, form: ReminderForm| page.add(form))?,
            Page::Water => {
                let mut water = self.water_page();
                let added = water.add_glass(now_minute().time());
                (Value::Bool(added), serde_json::to_value(water.snapshot())?)
            }
            other => return Err(no_records(other)),
        };
        Ok(PageChange {
            page,
            changed,
            snapshot,
        })
    }

    /// Deletes a record by id. Unknown ids leave the page unchanged and report
    /// `changed: null`. The water page removes the latest glass.
    pub fn page_remove(&self, page: Page, id: RecordId) -> AppResult<PageChange> {
        let (changed, snapshot) = match page {
            Page::Activity => discard(self.activity_page(), |page| page.remove(id))?,
            Page::Sleep => discard(self.sleep_page(), |page| page.remove(id))?,
            Page::Nutrition => discard(self.nutrition_page(), |page| page.remove(id))?,
            Page::BloodPressure => discard(self.blood_pressure_page(), |page| page.remove(id))?,
            Page::BloodSugar => discard(self.blood_sugar_page(), |page| page.remove(id))?,
            Page::HeartRate => discard(self.heart_rate_page(), |page| page.remove(id))?,
            Page::Goals => discard(self.goals_page(), |page| page.remove(id))?,
            Page::Reminders => discard(self.reminders_page(), |page| page.remove(id))?,
            Page::Water => {
                let mut water = self.water_page();
                let removed = water.remove_glass();
                (Value::Bool(removed), serde_json::to_value(water.snapshot())?)
            }
            other => return Err(no_records(other)),
        };
        Ok(PageChange {
            page,
            changed,
            snapshot,
        })
    }

    pub fn toggle_reminder(&self, id: RecordId) -> AppResult<PageChange> {
        let (changed, snapshot) = discard(self.reminders_page(), |page| page.toggle(id))?;
        Ok(PageChange {
            page: Page::Reminders,
            changed,
            snapshot,
        })
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn no_records(page: Page) -> AppError {
    AppError::Validation(format!("{} page has no editable records", page.as_str()))
}

fn submit<P, F, R>(mut page: P, fields: Value, add: impl FnOnce(&mut P, F) -> AppResult<R>) -> AppResult<(Value, Value)>
where
    P: PageView,
    F: DeserializeOwned,
    R: Serialize,
{
    let form: F = serde_json::from_value(fields).map_err(|error| AppError::Validation(error.to_string()))?;
    let record = add(&mut page, form).inspect_err(|error| tracing::debug!(error = %error, "form rejected"))?;
    Ok((serde_json::to_value(record)?, serde_json::to_value(page.snapshot())?))
}

fn discard<P, R>(mut page: P, remove: impl FnOnce(&mut P) -> Option<R>) -> AppResult<(Value, Value)>
where
    P: PageView,
    R: Serialize,
{
    let removed = remove(&mut page);
    Ok((serde_json::to_value(removed)?, serde_json::to_value(page.snapshot())?))
}

#[cfg(test)]
mod tests {
    use super::HealthCore;
    use crate::config::HealthConfig;
    use crate::models::{Language, Page, RecordId, SignInPayload};
    use serde_json::json;

    fn core(dir: &tempfile::TempDir) -> std::sync::Arc<HealthCore> {
        let config = HealthConfig {
            auth_delay_ms: 0,
            ..HealthConfig::default()
        };
        HealthCore::with_config(dir.path().to_path_buf(), config).expect("core")
    }

    #[test]
    fn every_page_renders() {
        let dir = tempfile::tempdir().expect("tempdir");
        let core = core(&dir);
        for page in Page::ALL {
            let snapshot = core.page_snapshot(page).expect("snapshot");
            assert!(snapshot.is_object(), "{} did not render", page.as_str());
        }
    }

    #[test]
    fn rejected_form_leaves_page_untouched() {
        let dir = tempfile::tempdir().expect("tempdir");
        let core = core(&dir);
        let error = core
            .page_add(Page::BloodPressure, json!({ "systolic": "120", "diastolic": "" }))
            .expect_err("missing fields");
        assert!(error.is_validation());
        assert!(core.page_add(Page::Steps, json!({})).is_err());
    }

    #[test]
    fn blood_pressure_reading_is_prepended_and_assessed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let core = core(&dir);
        let change = core
            .page_add(
                Page::BloodPressure,
                json!({ "systolic": "145", "diastolic": "70", "pulse": "80" }),
            )
            .expect("add");
        assert_eq!(change.snapshot["readings"][0]["systolic"], 145);
        assert_eq!(change.snapshot["readings"][0]["assessment"]["label"], "Stage 1");
        assert_eq!(change.snapshot["readings"].as_array().map(Vec::len), Some(6));
    }

    #[test]
    fn removing_unknown_id_reports_null() {
        let dir = tempfile::tempdir().expect("tempdir");
        let core = core(&dir);
        let change = core.page_remove(Page::Goals, RecordId(404)).expect("remove");
        assert!(change.changed.is_null());
        assert_eq!(change.snapshot["goals"].as_array().map(Vec::len), Some(4));

        let change = core.page_remove(Page::Goals, RecordId(2)).expect("remove");
        assert_eq!(change.changed["title"], "Weight Loss Target");
    }

    #[test]
    fn reminder_toggle_pauses() {
        let dir = tempfile::tempdir().expect("tempdir");
        let core = core(&dir);
        let change = core.toggle_reminder(RecordId(1)).expect("toggle");
        assert_eq!(change.changed["active"], false);
        assert_eq!(change.snapshot["upcoming"], json!([2, 6]));
    }

    #[tokio::test]
    async fn greeting_follows_sign_in_and_language() {
        let dir = tempfile::tempdir().expect("tempdir");
        let core = core(&dir);
        assert_eq!(core.greeting().expect("greeting").name, "User");

        core.sign_in(SignInPayload {
            email: "demo@example.com".to_string(),
            password: "secret".to_string(),
        })
        .await
        .expect("sign in");
        core.set_language(Language::Ar).expect("language");

        let greeting = core.greeting().expect("greeting");
        assert_eq!(greeting.name, "Demo User");
        assert!(greeting.signed_in);
        assert_eq!(serde_json::to_value(greeting.direction).expect("json"), "rtl");

        let dashboard = core.dashboard().expect("dashboard");
        assert_eq!(dashboard.steps, 8750);
        assert_eq!(dashboard.water_glasses, 6);
        assert_eq!(dashboard.calories, 1320);
        assert_eq!(dashboard.upcoming_reminders.len(), 3);
    }
}
