use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value
            .trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| AppError::Validation(format!("'{}' is not a record id", value)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ar => "ar",
        }
    }

    pub fn direction(self) -> TextDirection {
        match self {
            Self::En => TextDirection::Ltr,
            Self::Ar => TextDirection::Rtl,
        }
    }
}

impl FromStr for Language {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "en" => Ok(Self::En),
            "ar" => Ok(Self::Ar),
            other => Err(AppError::Validation(format!("unsupported language '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiPreferences {
    pub language: Language,
    pub direction: TextDirection,
    pub sidebar_open: bool,
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            language: Language::En,
            direction: TextDirection::Ltr,
            sidebar_open: true,
        }
    }
}

/// Shape of the `healthPulseUser` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredUser {
    pub name: String,
    pub email: String,
    pub is_logged_in: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SignInPayload {
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SignUpPayload {
    #[serde(default)]
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Greeting {
    pub name: String,
    pub language: Language,
    pub direction: TextDirection,
    pub signed_in: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSettings {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: String,
    pub gender: String,
    pub height: String,
    pub weight: String,
    pub email_notifications: bool,
    pub push_notifications: bool,
    pub reminder_notifications: bool,
    pub weekly_reports: bool,
    pub goal_achievements: bool,
    pub profile_visibility: String,
    pub data_sharing: bool,
    pub analytics_tracking: bool,
    pub theme: String,
    pub language: Language,
    pub units: String,
    pub timezone: String,
    pub daily_steps_goal: String,
    pub daily_water_goal: String,
    pub daily_calories_goal: String,
    pub sleep_goal: String,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            full_name: "Tassy Omah".to_string(),
            email: "tassy.omah@example.com".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
            date_of_birth: "1992-03-15".to_string(),
            gender: "female".to_string(),
            height: "165".to_string(),
            weight: "65".to_string(),
            email_notifications: true,
            push_notifications: true,
            reminder_notifications: true,
            weekly_reports: true,
            goal_achievements: true,
            profile_visibility: "private".to_string(),
            data_sharing: false,
            analytics_tracking: true,
            theme: "light".to_string(),
            language: Language::En,
            units: "metric".to_string(),
            timezone: "UTC-5".to_string(),
            daily_steps_goal: "10000".to_string(),
            daily_water_goal: "8".to_string(),
            daily_calories_goal: "2200".to_string(),
            sleep_goal: "8".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    Dashboard,
    Activity,
    Sleep,
    Water,
    Nutrition,
    BloodPressure,
    BloodSugar,
    HeartRate,
    Steps,
    Goals,
    Reminders,
    Reports,
    Settings,
}

impl Page {
    pub const ALL: [Page; 13] = [
        Self::Dashboard,
        Self::Activity,
        Self::Sleep,
        Self::Water,
        Self::Nutrition,
        Self::BloodPressure,
        Self::BloodSugar,
        Self::HeartRate,
        Self::Steps,
        Self::Goals,
        Self::Reminders,
        Self::Reports,
        Self::Settings,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Activity => "activity",
            Self::Sleep => "sleep",
            Self::Water => "water",
            Self::Nutrition => "nutrition",
            Self::BloodPressure => "blood-pressure",
            Self::BloodSugar => "blood-sugar",
            Self::HeartRate => "heart-rate",
            Self::Steps => "steps",
            Self::Goals => "goals",
            Self::Reminders => "reminders",
            Self::Reports => "reports",
            Self::Settings => "settings",
        }
    }
}

impl FromStr for Page {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|page| page.as_str() == wanted)
            .ok_or_else(|| AppError::NotFound(format!("no page named '{}'", value)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SugarReadingKind {
    Fasting,
    PostMeal,
    #[default]
    Random,
    Bedtime,
}

impl SugarReadingKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fasting => "fasting",
            Self::PostMeal => "post-meal",
            Self::Random => "random",
            Self::Bedtime => "bedtime",
        }
    }
}

impl FromStr for SugarReadingKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fasting" => Ok(Self::Fasting),
            "post-meal" | "postmeal" => Ok(Self::PostMeal),
            "random" => Ok(Self::Random),
            "bedtime" => Ok(Self::Bedtime),
            other => Err(AppError::Validation(format!("unknown blood sugar reading type '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeartRateKind {
    #[default]
    Resting,
    Active,
    Recovery,
}

impl HeartRateKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Resting => "resting",
            Self::Active => "active",
            Self::Recovery => "recovery",
        }
    }
}

impl FromStr for HeartRateKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "resting" => Ok(Self::Resting),
            "active" => Ok(Self::Active),
            "recovery" => Ok(Self::Recovery),
            other => Err(AppError::Validation(format!("unknown heart rate type '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Intensity {
    Low,
    Moderate,
    High,
}

impl FromStr for Intensity {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "moderate" => Ok(Self::Moderate),
            "high" => Ok(Self::High),
            other => Err(AppError::Validation(format!("unknown intensity '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SleepQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl FromStr for SleepQuality {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "excellent" => Ok(Self::Excellent),
            "good" => Ok(Self::Good),
            "fair" => Ok(Self::Fair),
            "poor" => Ok(Self::Poor),
            other => Err(AppError::Validation(format!("unknown sleep quality '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MealKind {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl FromStr for MealKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "breakfast" => Ok(Self::Breakfast),
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            "snack" => Ok(Self::Snack),
            other => Err(AppError::Validation(format!("unknown meal type '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoalCategory {
    Fitness,
    Weight,
    Hydration,
    Sleep,
    Nutrition,
    General,
}

impl FromStr for GoalCategory {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fitness" => Ok(Self::Fitness),
            "weight" => Ok(Self::Weight),
            "hydration" => Ok(Self::Hydration),
            "sleep" => Ok(Self::Sleep),
            "nutrition" => Ok(Self::Nutrition),
            "general" => Ok(Self::General),
            other => Err(AppError::Validation(format!("unknown goal category '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoalStatus {
    Active,
    Completed,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoalPriority {
    High,
    #[default]
    Medium,
    Low,
}

impl FromStr for GoalPriority {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(AppError::Validation(format!("unknown goal priority '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReminderCategory {
    Exercise,
    Mental,
    Hydration,
    Medication,
    Sleep,
    Nutrition,
    #[default]
    General,
}

impl FromStr for ReminderCategory {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "exercise" => Ok(Self::Exercise),
            "mental" => Ok(Self::Mental),
            "hydration" => Ok(Self::Hydration),
            "medication" => Ok(Self::Medication),
            "sleep" => Ok(Self::Sleep),
            "nutrition" => Ok(Self::Nutrition),
            "general" => Ok(Self::General),
            other => Err(AppError::Validation(format!("unknown reminder category '{}'", other))),
        }
    }
}

/// When a reminder fires next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "at", rename_all = "kebab-case")]
pub enum NextDue {
    TodayAt(NaiveTime),
    TomorrowAt(NaiveTime),
    InHours(u32),
    Paused,
}

impl NextDue {
    pub fn is_today(self) -> bool {
        matches!(self, Self::TodayAt(_))
    }
}

impl fmt::Display for NextDue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TodayAt(time) => write!(f, "Today at {}", time.format("%-I:%M %p")),
            Self::TomorrowAt(time) => write!(f, "Tomorrow at {}", time.format("%-I:%M %p")),
            Self::InHours(hours) => write!(f, "In {} hours", hours),
            Self::Paused => f.write_str("Paused"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BloodPressureReading {
    pub id: RecordId,
    pub systolic: u32,
    pub diastolic: u32,
    pub pulse: u32,
    pub captured_at: NaiveDateTime,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BloodSugarReading {
    pub id: RecordId,
    pub value: u32,
    pub kind: SugarReadingKind,
    pub captured_at: NaiveDateTime,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartRateReading {
    pub id: RecordId,
    pub value: u32,
    pub kind: HeartRateKind,
    pub captured_at: NaiveDateTime,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: RecordId,
    pub kind: String,
    pub duration_minutes: u32,
    pub calories: u32,
    pub intensity: Intensity,
    pub time: NaiveTime,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepEntry {
    pub id: RecordId,
    pub bedtime: NaiveTime,
    pub wake_time: NaiveTime,
    pub duration_hours: f64,
    pub quality: SleepQuality,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: RecordId,
    pub kind: MealKind,
    pub food: String,
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
    pub time: NaiveTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: RecordId,
    pub title: String,
    pub category: GoalCategory,
    pub target: f64,
    pub current: f64,
    pub unit: String,
    pub deadline: NaiveDate,
    pub status: GoalStatus,
    pub priority: GoalPriority,
    /// Starting value for goals that count down (weight).
    pub baseline: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub time: NaiveTime,
    pub frequency: String,
    pub category: ReminderCategory,
    pub active: bool,
    pub next_due: NextDue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterLog {
    pub time: NaiveTime,
    pub glasses: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BloodPressureForm {
    pub systolic: String,
    pub diastolic: String,
    pub pulse: String,
    pub notes: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BloodSugarForm {
    pub value: String,
    /// Blank means `random`.
    pub kind: String,
    pub notes: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeartRateForm {
    pub value: String,
    /// Blank means `resting`.
    pub kind: String,
    pub notes: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkoutForm {
    pub kind: String,
    pub duration: String,
    pub calories: String,
    pub intensity: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SleepForm {
    pub bedtime: String,
    pub wake_time: String,
    pub quality: String,
    pub notes: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MealForm {
    pub kind: String,
    pub food: String,
    pub calories: String,
    pub protein: String,
    pub carbs: String,
    pub fat: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GoalForm {
    pub title: String,
    pub category: String,
    pub target: String,
    pub unit: String,
    pub deadline: String,
    /// Blank means `medium`.
    pub priority: String,
    pub baseline: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReminderForm {
    pub title: String,
    pub description: String,
    pub time: String,
    /// Blank means `daily`.
    pub frequency: String,
    /// Blank means `general`.
    pub category: String,
}
