use health_pulse_lib::config::HealthConfig;
use health_pulse_lib::models::{Language, Page, RecordId, SignUpPayload};
use health_pulse_lib::HealthCore;
use serde_json::{json, Value};
use std::process::Command;
use std::sync::Arc;

fn instant_core(dir: &tempfile::TempDir) -> Arc<HealthCore> {
    let config = HealthConfig {
        auth_delay_ms: 0,
        ..HealthConfig::default()
    };
    HealthCore::with_config(dir.path().to_path_buf(), config).expect("core")
}

fn cli(data_dir: &std::path::Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_health-pulse"))
        .arg("--data-dir")
        .arg(data_dir)
        .args(args)
        .output()
        .expect("run health-pulse")
}

#[test]
fn preferences_survive_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    {
        let core = instant_core(&dir);
        core.set_language(Language::Ar).expect("language");
        let preferences = core.toggle_sidebar().expect("sidebar");
        assert!(!preferences.sidebar_open);
    }

    let reopened = instant_core(&dir);
    let preferences = reopened.preferences().expect("preferences");
    assert_eq!(preferences.language, Language::Ar);
    assert!(!preferences.sidebar_open);
}

#[tokio::test]
async fn sign_up_then_sign_out() {
    let dir = tempfile::tempdir().expect("tempdir");
    let core = instant_core(&dir);
    let user = core
        .sign_up(SignUpPayload {
            name: String::new(),
            email: "new@example.com".to_string(),
            password: "pw".to_string(),
        })
        .await
        .expect("sign up");
    assert_eq!(user.name, "New User");
    let stored = core.current_user().expect("user").expect("signed in");
    assert_eq!(stored.email, "new@example.com");
    assert!(stored.is_logged_in);
    assert_eq!(core.greeting().expect("greeting").name, "New User");

    assert!(core.sign_out().expect("sign out"));
    assert!(!core.sign_out().expect("second sign out"));
    let greeting = core.greeting().expect("greeting");
    assert_eq!(greeting.name, "User");
    assert!(!greeting.signed_in);
    assert!(core.current_user().expect("user").is_none());
}

#[test]
fn settings_merge_partial_updates() {
    let dir = tempfile::tempdir().expect("tempdir");
    let core = instant_core(&dir);
    core.update_settings(json!({ "fullName": "Sam Lee", "weeklyReports": false }))
        .expect("update");
    let settings = core.update_settings(json!({ "theme": "dark" })).expect("update");
    assert_eq!(settings.full_name, "Sam Lee");
    assert!(!settings.weekly_reports);
    assert_eq!(settings.theme, "dark");

    assert!(core.update_settings(json!({ "weeklyReports": "often" })).is_err());
    assert_eq!(core.settings().expect("settings").full_name, "Sam Lee");
}

#[test]
fn page_changes_do_not_leak_between_views() {
    let dir = tempfile::tempdir().expect("tempdir");
    let core = instant_core(&dir);
    let change = core
        .page_add(
            Page::Nutrition,
            json!({ "kind": "snack", "food": "Yogurt", "calories": "150", "protein": "9" }),
        )
        .expect("add");
    assert_eq!(change.snapshot["totals"]["calories"], 1470);

    let fresh = core.page_snapshot(Page::Nutrition).expect("snapshot");
    assert_eq!(fresh["totals"]["calories"], 1320);

    let removed = core.page_remove(Page::Activity, RecordId(3)).expect("remove");
    assert_eq!(removed.changed["kind"], "Yoga");
}

#[test]
fn config_file_overrides_goals() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join("config.yaml"),
        "auth_delay_ms: 0\ngoals:\n  steps: 8000\n",
    )
    .expect("write config");
    let core = HealthCore::new(dir.path().to_path_buf()).expect("core");
    let steps = core.page_snapshot(Page::Steps).expect("steps");
    assert_eq!(steps["dailyGoal"], 8000);
    assert_eq!(steps["daysGoalMet"], 6);
}

#[test]
fn binary_classifies_without_data_dir_state() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = cli(dir.path(), &["classify", "blood-pressure", "--systolic", "185", "--diastolic", "125"]);
    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["label"], "Crisis");
    assert_eq!(value["tone"], "critical");
}

#[test]
fn binary_persists_language_and_reports_errors() {
    let dir = tempfile::tempdir().expect("tempdir");
    assert!(cli(dir.path(), &["prefs", "language", "ar"]).status.success());

    let output = cli(dir.path(), &["prefs", "show"]);
    let value: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["language"], "ar");
    assert_eq!(value["direction"], "rtl");

    let failed = cli(dir.path(), &["page", "add", "blood-pressure", "--fields", "{\"systolic\":\"120\"}"]);
    assert!(!failed.status.success());
    assert!(String::from_utf8_lossy(&failed.stderr).starts_with("VALIDATION:"));
}
