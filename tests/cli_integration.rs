//! CLI integration tests for petposter.
//!
//! Each test points the binary at a fresh data directory and drives the
//! draft through several invocations, checking what was persisted.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use petposter::util::hash::short_hash;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

/// Get the petposter binary command, bound to a data directory.
///
/// Home and XDG directories point inside `tmp` so a developer's global
/// config can't leak into the run.
fn petposter(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("petposter").unwrap();
    cmd.current_dir(tmp.path())
        .env("HOME", tmp.path())
        .env("XDG_CONFIG_HOME", tmp.path().join("xdg-config"))
        .env("XDG_DATA_HOME", tmp.path().join("xdg-data"))
        .env_remove("PETPOSTER_DATA_DIR")
        .arg("--data-dir")
        .arg(data_dir(tmp))
        .arg("--no-color");
    cmd
}

fn data_dir(tmp: &TempDir) -> PathBuf {
    tmp.path().join("data")
}

/// File holding the draft under the default storage key.
fn draft_path(tmp: &TempDir) -> PathBuf {
    data_dir(tmp).join(format!("{}.entry", short_hash("petPosterFormData")))
}

fn stored_json(tmp: &TempDir) -> Value {
    let raw = fs::read_to_string(draft_path(tmp)).unwrap();
    serde_json::from_str(&raw).unwrap()
}

fn write_project_config(dir: &Path, contents: &str) {
    let config_dir = dir.join(".petposter");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), contents).unwrap();
}

fn fill_required(tmp: &TempDir) {
    for (field, value) in [
        ("petName", "Rex"),
        ("ownerName", "John Smith"),
        ("contactPhone", "11999999999"),
        ("lastSeenLocation", "Villa Lobos Park"),
    ] {
        petposter(tmp).args(["set", field, value]).assert().success();
    }
    petposter(tmp)
        .args(["photo", "add", "rex.jpg"])
        .assert()
        .success();
}

// ============================================================================
// petposter show
// ============================================================================

#[test]
fn test_show_empty_draft() {
    let tmp = TempDir::new().unwrap();

    petposter(&tmp)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pet"))
        .stdout(predicate::str::contains("Photos (0)"));

    // Nothing was edited, so nothing is written.
    assert!(!draft_path(&tmp).exists());
}

#[test]
fn test_show_json_keeps_raw_phone() {
    let tmp = TempDir::new().unwrap();
    petposter(&tmp)
        .args(["set", "contactPhone", "11999999999"])
        .assert()
        .success();

    let output = petposter(&tmp).args(["show", "--json"]).output().unwrap();
    assert!(output.status.success());
    let record: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(record["contactPhone"], "11999999999");
}

#[test]
fn test_show_formats_phone() {
    let tmp = TempDir::new().unwrap();
    petposter(&tmp)
        .args(["set", "contactPhone", "11999999999"])
        .assert()
        .success();

    petposter(&tmp)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("(11) 99999-9999"));
}

// ============================================================================
// petposter set
// ============================================================================

#[test]
fn test_set_persists_versioned_envelope() {
    let tmp = TempDir::new().unwrap();

    petposter(&tmp)
        .args(["set", "petName", "Rex"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Updated petName"));

    let stored = stored_json(&tmp);
    assert_eq!(stored["version"], "1.0.0");
    assert_eq!(stored["data"]["petName"], "Rex");
    assert!(stored["timestamp"].as_u64().unwrap() > 0);
    // Empty values are stripped on save.
    assert!(stored["data"].get("ownerName").is_none());
    assert!(stored["data"].get("photos").is_none());
}

#[test]
fn test_set_warns_on_invalid_value_but_keeps_it() {
    let tmp = TempDir::new().unwrap();

    petposter(&tmp)
        .args(["set", "petName", "R"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Enter at least 2 characters"));

    assert_eq!(stored_json(&tmp)["data"]["petName"], "R");
}

#[test]
fn test_set_unknown_field_fails() {
    let tmp = TempDir::new().unwrap();

    petposter(&tmp)
        .args(["set", "color", "brown"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown field `color`"));
}

#[test]
fn test_set_json_field() {
    let tmp = TempDir::new().unwrap();

    petposter(&tmp)
        .args(["set", "photos", r#"["a.jpg", "b.jpg"]"#])
        .assert()
        .success();

    assert_eq!(
        stored_json(&tmp)["data"]["photos"],
        serde_json::json!(["a.jpg", "b.jpg"])
    );
}

// ============================================================================
// petposter photo / field / reward
// ============================================================================

#[test]
fn test_photo_add_and_remove() {
    let tmp = TempDir::new().unwrap();

    petposter(&tmp)
        .args(["photo", "add", "one.jpg", "two.jpg"])
        .assert()
        .success();
    petposter(&tmp)
        .args(["photo", "remove", "0"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Removed photo one.jpg"));

    assert_eq!(
        stored_json(&tmp)["data"]["photos"],
        serde_json::json!(["two.jpg"])
    );

    petposter(&tmp)
        .args(["photo", "remove", "0"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Add at least one photo"));
}

#[test]
fn test_photo_remove_out_of_range() {
    let tmp = TempDir::new().unwrap();

    petposter(&tmp)
        .args(["photo", "remove", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn test_custom_field_lifecycle() {
    let tmp = TempDir::new().unwrap();

    petposter(&tmp)
        .args(["field", "add", "--label", "Age", "--value", "3 years"])
        .assert()
        .success();
    petposter(&tmp)
        .args(["field", "set", "0", "Breed", "Labrador"])
        .assert()
        .success();

    let stored = stored_json(&tmp);
    assert_eq!(stored["data"]["customFields"][0]["label"], "Breed");

    petposter(&tmp)
        .args(["field", "remove", "0"])
        .assert()
        .success()
        .stderr(predicate::str::contains("custom field `Breed`"));
}

#[test]
fn test_empty_custom_field_is_flagged() {
    let tmp = TempDir::new().unwrap();

    petposter(&tmp)
        .args(["field", "add"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Warning customFields"));
}

#[test]
fn test_reward_set_and_clear() {
    let tmp = TempDir::new().unwrap();

    petposter(&tmp)
        .args(["reward", "set", "500", "usd"])
        .assert()
        .success()
        .stderr(predicate::str::contains("reward 500.00 USD"));
    assert_eq!(
        stored_json(&tmp)["data"]["reward"],
        serde_json::json!({"amount": 500.0, "currency": "USD"})
    );

    petposter(&tmp).args(["reward", "clear"]).assert().success();
    assert!(stored_json(&tmp)["data"].get("reward").is_none());
}

#[test]
fn test_reward_rejects_non_finite_amount() {
    let tmp = TempDir::new().unwrap();
    petposter(&tmp).args(["set", "petName", "Rex"]).assert().success();

    petposter(&tmp)
        .args(["reward", "set", "inf", "USD"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("finite number"));

    let output = petposter(&tmp).args(["show", "--json"]).output().unwrap();
    let record: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(record["petName"], "Rex");
    assert!(record.get("reward").is_none());
}

#[test]
fn test_reward_rejects_unknown_currency() {
    let tmp = TempDir::new().unwrap();

    petposter(&tmp)
        .args(["reward", "set", "10", "EUR"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid currency 'EUR'"));
}

// ============================================================================
// petposter validate
// ============================================================================

#[test]
fn test_validate_empty_draft_fails() {
    let tmp = TempDir::new().unwrap();

    petposter(&tmp)
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("draft is not ready: 5 invalid fields"))
        .stderr(predicate::str::contains("petName: This field is required"))
        .stderr(predicate::str::contains("help: consider:"));
}

#[test]
fn test_validate_complete_draft_passes() {
    let tmp = TempDir::new().unwrap();
    fill_required(&tmp);

    petposter(&tmp)
        .arg("validate")
        .assert()
        .success()
        .stderr(predicate::str::contains("ready to export"));
}

#[test]
fn test_validate_json_output() {
    let tmp = TempDir::new().unwrap();
    fill_required(&tmp);
    petposter(&tmp)
        .args(["set", "lastSeenDateTime", "yesterday"])
        .assert()
        .success();

    let output = petposter(&tmp)
        .args(["validate", "--json"])
        .output()
        .unwrap();
    assert!(!output.status.success());

    let result: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["isValid"], false);
    assert_eq!(result["errorCount"], 1);
    assert_eq!(
        result["errors"]["lastSeenDateTime"]["errorMessage"],
        "Enter a valid date and time"
    );
}

// ============================================================================
// petposter reset
// ============================================================================

#[test]
fn test_reset_removes_draft() {
    let tmp = TempDir::new().unwrap();
    petposter(&tmp).args(["set", "petName", "Rex"]).assert().success();
    assert!(draft_path(&tmp).exists());

    petposter(&tmp)
        .arg("reset")
        .assert()
        .success()
        .stderr(predicate::str::contains("Cleared draft"));
    assert!(!draft_path(&tmp).exists());
}

#[test]
fn test_reset_all_keeps_foreign_files() {
    let tmp = TempDir::new().unwrap();
    petposter(&tmp).args(["set", "petName", "Rex"]).assert().success();
    fs::write(data_dir(&tmp).join("notes.txt"), "keep me").unwrap();

    petposter(&tmp).args(["reset", "--all"]).assert().success();

    assert!(!draft_path(&tmp).exists());
    assert!(data_dir(&tmp).join("notes.txt").exists());
}

// ============================================================================
// petposter migrate
// ============================================================================

#[test]
fn test_migrate_wraps_legacy_draft() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(data_dir(&tmp)).unwrap();
    fs::write(draft_path(&tmp), r#"{"petName":"Rex","photos":[]}"#).unwrap();

    petposter(&tmp)
        .arg("migrate")
        .assert()
        .success()
        .stderr(predicate::str::contains("Migrated draft to version 1.0.0"));

    let stored = stored_json(&tmp);
    assert_eq!(stored["version"], "1.0.0");
    assert_eq!(stored["data"], serde_json::json!({"petName": "Rex"}));

    petposter(&tmp)
        .arg("migrate")
        .assert()
        .success()
        .stderr(predicate::str::contains("nothing to migrate"));
}

#[test]
fn test_legacy_draft_is_loaded_transparently() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(data_dir(&tmp)).unwrap();
    fs::write(draft_path(&tmp), r#"{"petName":"Rex"}"#).unwrap();

    petposter(&tmp)
        .args(["show", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"petName\": \"Rex\""));
}

#[test]
fn test_version_mismatch_starts_fresh() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(data_dir(&tmp)).unwrap();
    fs::write(
        draft_path(&tmp),
        r#"{"version":"0.9.0","data":{"petName":"Old"},"timestamp":1}"#,
    )
    .unwrap();

    let output = petposter(&tmp).args(["show", "--json"]).output().unwrap();
    assert!(output.status.success());
    let record: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(record["petName"], "");
}

// ============================================================================
// storage failures
// ============================================================================

#[test]
fn test_unreadable_draft_reports_load_failure() {
    let tmp = TempDir::new().unwrap();
    write_project_config(tmp.path(), "[store]\nretry_delay_ms = 0\n");
    // A directory where the draft file should be makes every read fail.
    fs::create_dir_all(draft_path(&tmp)).unwrap();

    petposter(&tmp)
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not load the saved draft"))
        .stderr(predicate::str::contains("after 3 attempts"))
        .stderr(predicate::str::contains("petposter reset --all"));
}

#[test]
fn test_quota_exceeded_reports_save_failure() {
    let tmp = TempDir::new().unwrap();
    write_project_config(tmp.path(), "[store]\nquota_bytes = 16\n");

    petposter(&tmp)
        .args(["set", "petDescription", "A very long description of the pet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("warning: draft was not saved"))
        .stderr(predicate::str::contains("quota_bytes"));

    assert!(!draft_path(&tmp).exists());
}

// ============================================================================
// petposter config
// ============================================================================

#[test]
fn test_config_shows_project_overrides() {
    let tmp = TempDir::new().unwrap();
    write_project_config(tmp.path(), "[store]\ndebounce_ms = 50\n");

    petposter(&tmp)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("[store]"))
        .stdout(predicate::str::contains("debounce_ms = 50"))
        .stdout(predicate::str::contains("storage_key = \"petPosterFormData\""));
}

#[cfg(target_os = "linux")]
#[test]
fn test_config_reads_global_file_from_isolated_home() {
    let tmp = TempDir::new().unwrap();
    let global_dir = tmp.path().join("xdg-config").join("petposter");
    fs::create_dir_all(&global_dir).unwrap();
    fs::write(
        global_dir.join("config.toml"),
        "[store]\nload_attempts = 7\n",
    )
    .unwrap();

    petposter(&tmp)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("load_attempts = 7"));
}

#[test]
fn test_config_init_writes_defaults() {
    let tmp = TempDir::new().unwrap();

    petposter(&tmp)
        .args(["config", "--init"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Created"));

    let written = fs::read_to_string(tmp.path().join(".petposter").join("config.toml")).unwrap();
    assert!(written.contains("[store]"));
    assert!(written.contains("debounce_ms = 300"));

    // The written file is picked up as the project config.
    petposter(&tmp)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("storage_key = \"petPosterFormData\""));
}

#[test]
fn test_config_init_keeps_existing_file() {
    let tmp = TempDir::new().unwrap();
    write_project_config(tmp.path(), "[store]\ndebounce_ms = 50\n");

    petposter(&tmp)
        .args(["config", "--init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    let path = tmp.path().join(".petposter").join("config.toml");
    assert_eq!(fs::read_to_string(&path).unwrap(), "[store]\ndebounce_ms = 50\n");

    petposter(&tmp)
        .args(["config", "--init", "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&path).unwrap().contains("debounce_ms = 300"));
}

#[test]
fn test_quiet_suppresses_status_lines() {
    let tmp = TempDir::new().unwrap();

    petposter(&tmp)
        .args(["--quiet", "set", "petName", "Rex"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Updated").not());
}
