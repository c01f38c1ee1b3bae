use crate::models::{GoalCategory, HeartRateKind, Language, Page, RecordId, SugarReadingKind};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "health-pulse", version, about = "Personal health dashboard")]
pub struct Cli {
    /// Directory holding the settings database, config and logs.
    #[arg(long, global = true, env = "HEALTH_PULSE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify a single reading.
    #[command(subcommand)]
    Classify(ClassifyCommand),
    GoalProgress(GoalProgressArgs),
    SleepDuration {
        #[arg(long)]
        bedtime: String,
        #[arg(long)]
        wake_time: String,
    },
    #[command(subcommand)]
    Page(PageCommand),
    #[command(subcommand)]
    Prefs(PrefsCommand),
    SignIn {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    SignUp {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    SignOut,
    Greet,
    #[command(subcommand)]
    Settings(SettingsCommand),
}

#[derive(Debug, Subcommand)]
pub enum ClassifyCommand {
    BloodPressure {
        #[arg(long)]
        systolic: u32,
        #[arg(long)]
        diastolic: u32,
    },
    BloodSugar {
        #[arg(long)]
        value: u32,
        #[arg(long, default_value = "random")]
        kind: SugarReadingKind,
    },
    HeartRate {
        #[arg(long)]
        value: u32,
        #[arg(long, default_value = "resting")]
        kind: HeartRateKind,
    },
}

#[derive(Debug, Args)]
pub struct GoalProgressArgs {
    #[arg(long)]
    pub current: f64,
    #[arg(long)]
    pub target: f64,
    #[arg(long, default_value = "general")]
    pub category: GoalCategory,
    /// Starting weight for weight goals. Defaults to the configured baseline.
    #[arg(long)]
    pub baseline: Option<f64>,
}

#[derive(Debug, Subcommand)]
pub enum PageCommand {
    Show {
        page: Page,
    },
    /// Submit a page form. Fields are a JSON object of strings.
    Add {
        page: Page,
        #[arg(long, default_value = "{}")]
        fields: String,
    },
    /// Delete a record. The water page removes its latest glass and takes no id.
    Remove {
        page: Page,
        id: Option<RecordId>,
    },
    ToggleReminder {
        id: RecordId,
    },
}

#[derive(Debug, Subcommand)]
pub enum PrefsCommand {
    Show,
    Language { language: Language },
    ToggleSidebar,
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    Show,
    /// Merge a partial JSON object into the stored settings.
    Update { patch: String },
}
