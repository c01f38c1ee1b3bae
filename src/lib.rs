pub mod auth;
pub mod classify;
pub mod cli;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod preferences;
pub mod reports;
pub mod service;
pub mod store;
pub mod trackers;

use crate::classify::{blood_pressure_category, blood_sugar_status, goal_progress, heart_rate_status, sleep_duration};
use crate::cli::{Cli, ClassifyCommand, Command, GoalProgressArgs, PageCommand, PrefsCommand, SettingsCommand};
use crate::models::{Page, RecordId, SignInPayload, SignUpPayload};
use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;

pub use crate::errors::{AppError, AppResult};
pub use crate::service::HealthCore;

const DATA_DIR_NAME: &str = "health-pulse";
const LOG_FILE_NAME: &str = "health-pulse.log";

static LOG_GUARD: std::sync::OnceLock<WorkerGuard> = std::sync::OnceLock::new();

/// Parses the command line, runs one command and prints its JSON result.
pub async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let output = dispatch(cli.data_dir, cli.command).await.map_err(to_client_error)?;
    let rendered = serde_json::to_string_pretty(&output).map_err(to_client_error)?;
    println!("{rendered}");
    Ok(())
}

/// Runs one command. The data directory is only opened by commands that read
/// or write stored state.
async fn dispatch(data_dir: Option<PathBuf>, command: Command) -> AppResult<Value> {
    let open = move || open_core(data_dir);
    match command {
        Command::Classify(command) => classify(command),
        Command::SleepDuration { bedtime, wake_time } => hours_slept(&bedtime, &wake_time),
        Command::GoalProgress(args) => progress(&*open()?, args),
        Command::Page(command) => page(&*open()?, command),
        Command::Prefs(PrefsCommand::Show) => to_json(open()?.preferences()?),
        Command::Prefs(PrefsCommand::Language { language }) => to_json(open()?.set_language(language)?),
        Command::Prefs(PrefsCommand::ToggleSidebar) => to_json(open()?.toggle_sidebar()?),
        Command::SignIn { email, password } => {
            let core = open()?;
            to_json(core.sign_in(SignInPayload { email, password }).await?)
        }
        Command::SignUp { name, email, password } => {
            let core = open()?;
            to_json(core.sign_up(SignUpPayload { name, email, password }).await?)
        }
        Command::SignOut => Ok(json!({ "signedOut": open()?.sign_out()? })),
        Command::Greet => to_json(open()?.greeting()?),
        Command::Settings(SettingsCommand::Show) => to_json(open()?.settings()?),
        Command::Settings(SettingsCommand::Update { patch }) => {
            let patch: Value = serde_json::from_str(&patch)
                .map_err(|error| AppError::Validation(format!("settings patch is not JSON: {error}")))?;
            to_json(open()?.update_settings(patch)?)
        }
    }
}

fn open_core(explicit: Option<PathBuf>) -> AppResult<Arc<HealthCore>> {
    let data_dir = resolve_data_dir(explicit)?;
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;
    init_tracing(&data_dir).map_err(AppError::Internal)?;
    HealthCore::new(data_dir)
}

fn classify(command: ClassifyCommand) -> AppResult<Value> {
    match command {
        ClassifyCommand::BloodPressure { systolic, diastolic } => to_json(blood_pressure_category(systolic, diastolic)),
        ClassifyCommand::BloodSugar { value, kind } => to_json(blood_sugar_status(value, kind)),
        ClassifyCommand::HeartRate { value, kind } => to_json(heart_rate_status(value, kind)),
    }
}

fn hours_slept(bedtime: &str, wake_time: &str) -> AppResult<Value> {
    let bedtime = trackers::parse_time("bedtime", bedtime)?;
    let wake_time = trackers::parse_time("wake time", wake_time)?;
    Ok(json!({ "hours": sleep_duration(bedtime, wake_time) }))
}

fn progress(core: &HealthCore, args: GoalProgressArgs) -> AppResult<Value> {
    let baseline = args.baseline.unwrap_or(core.config().goals.weight_baseline_kg);
    let percent = goal_progress(args.current, args.target, args.category, baseline);
    Ok(json!({ "progressPercent": percent }))
}

fn page(core: &HealthCore, command: PageCommand) -> AppResult<Value> {
    match command {
        PageCommand::Show { page } => core.page_snapshot(page),
        PageCommand::Add { page, fields } => {
            let fields: Value = serde_json::from_str(&fields)
                .map_err(|error| AppError::Validation(format!("form fields are not JSON: {error}")))?;
            to_json(core.page_add(page, fields)?)
        }
        PageCommand::Remove { page, id } => {
            let id = match (page, id) {
                (_, Some(id)) => id,
                (Page::Water, None) => RecordId(0),
                (_, None) => return Err(AppError::Validation("id is required".to_string())),
            };
            to_json(core.page_remove(page, id)?)
        }
        PageCommand::ToggleReminder { id } => to_json(core.toggle_reminder(id)?),
    }
}

fn to_json(value: impl Serialize) -> AppResult<Value> {
    Ok(serde_json::to_value(value)?)
}

fn resolve_data_dir(explicit: Option<PathBuf>) -> AppResult<PathBuf> {
    explicit
        .or_else(|| dirs::data_dir().map(|dir| dir.join(DATA_DIR_NAME)))
        .ok_or_else(|| AppError::Config("no data directory; pass --data-dir".to_string()))
}

pub fn init_tracing(app_data_dir: &Path) -> Result<(), String> {
    let log_dir = app_data_dir.join("logs");
    std::fs::create_dir_all(&log_dir).map_err(|error| error.to_string())?;
    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let _ = LOG_GUARD.set(guard);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .json()
        .with_writer(non_blocking)
        .try_init()
        .map_err(|error| error.to_string())
}

fn to_client_error(error: impl std::fmt::Display) -> String {
    error.to_string()
}
