//! End-to-end CLI integration tests
//!
//! These tests invoke the compiled binary as a subprocess to verify
//! that the CLI behaves correctly from a user's perspective.

use assert_cmd::Command;
use predicates::prelude::*;

/// Returns a Command configured to run our binary.
///
/// Note: `cargo_bin` is marked deprecated for edge cases involving custom
/// cargo build directories, but works correctly for standard project layouts.
#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_shows_usage() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("Options:"));
}

#[test]
fn short_help_flag_shows_usage() {
    cmd()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn version_flag_shows_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn short_version_flag_shows_version() {
    cmd()
        .arg("-V")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_only_prints_bare_version() {
    cmd()
        .arg("--version-only")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "{}\n",
            env!("CARGO_PKG_VERSION")
        )));
}

// =============================================================================
// Info Command
// =============================================================================

#[test]
fn info_shows_package_name_and_version() {
    cmd()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_NAME")))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn info_json_outputs_valid_json() {
    let output = cmd().arg("info").arg("--json").assert().success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("info --json should output valid JSON");

    assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn info_json_contains_expected_fields() {
    cmd()
        .arg("info")
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\""))
        .stdout(predicate::str::contains("\"version\""));
}

#[test]
fn info_help_shows_command_options() {
    cmd()
        .args(["info", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--json"));
}

// =============================================================================
// Global Flags
// =============================================================================

#[test]
fn quiet_flag_accepted() {
    cmd().args(["--quiet", "info"]).assert().success();
}

#[test]
fn short_quiet_flag_accepted() {
    cmd().args(["-q", "info"]).assert().success();
}

#[test]
fn verbose_flag_accepted() {
    cmd().args(["--verbose", "info"]).assert().success();
}

#[test]
fn short_verbose_flag_accepted() {
    cmd().args(["-v", "info"]).assert().success();
}

#[test]
fn multiple_verbose_flags_accepted() {
    cmd().args(["-vv", "info"]).assert().success();
}

#[test]
fn color_auto_accepted() {
    cmd().args(["--color", "auto", "info"]).assert().success();
}

#[test]
fn color_always_accepted() {
    cmd().args(["--color", "always", "info"]).assert().success();
}

#[test]
fn color_never_accepted() {
    cmd().args(["--color", "never", "info"]).assert().success();
}

// =============================================================================
// Suggest Command
// =============================================================================

/// Workspace with a small corpus under `data/corpus`.
fn corpus_workspace() -> tempfile::TempDir {
    let tmp = tempfile::TempDir::new().unwrap();
    let corpus = tmp.path().join("data/corpus");
    std::fs::create_dir_all(&corpus).unwrap();
    let mut text = "the robot moved\n".repeat(10);
    text.push_str(&"robots are here\n".repeat(4));
    std::fs::write(corpus.join("notes.txt"), text).unwrap();
    tmp
}

#[test]
fn suggest_writes_yaml_shortcuts() {
    let tmp = corpus_workspace();
    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "suggest"])
        .assert()
        .success()
        .stdout(predicate::str::contains("robot"));

    let yaml = std::fs::read_to_string(tmp.path().join("output/suggested_shortcuts.yaml")).unwrap();
    let map: std::collections::BTreeMap<String, String> = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(map.get("robot").map(String::as_str), Some("r"));
    assert_eq!(map.get("robots").map(String::as_str), Some("rs"));
}

#[test]
fn suggest_json_reports_shortcuts_and_warnings() {
    let tmp = corpus_workspace();
    let output = cmd()
        .args([
            "-C",
            tmp.path().to_str().unwrap(),
            "suggest",
            "--no-write",
            "--json",
        ])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(json["shortcuts"]["robot"], "r");
    assert!(json["warnings"].is_array());
    assert!(json["written_to"].is_null());
    assert!(!tmp.path().join("output").exists());
}

#[test]
fn suggest_respects_custom_presets() {
    let tmp = corpus_workspace();
    std::fs::write(
        tmp.path().join(".shorthand.yaml"),
        "presets:\n  robot: bot\nblacklist: [r]\n",
    )
    .unwrap();

    let output = cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "suggest", "--json", "--no-write"])
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_slice(&output.get_output().stdout).expect("valid JSON");
    assert_eq!(json["shortcuts"]["robot"], "bot");
    assert_ne!(json["shortcuts"]["the"], "r");
}

#[test]
fn suggest_missing_corpus_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "suggest"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("corpus directory not found"));
}

// =============================================================================
// Autokey Command
// =============================================================================

#[test]
fn autokey_writes_phrase_files() {
    let tmp = tempfile::TempDir::new().unwrap();
    let input = tmp.path().join("shortcuts.yaml");
    std::fs::write(&input, "because: bc\n").unwrap();
    let out = tmp.path().join("phrases");

    cmd()
        .args([
            "autokey",
            "--input",
            input.to_str().unwrap(),
            "--output-dir",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.join(".because.json")).unwrap())
            .unwrap();
    assert_eq!(json["abbreviation"]["abbreviations"][0], "bc");
    assert_eq!(json["filter"]["regex"], "google-chrome.Google-chrome");
}

#[test]
fn autokey_missing_input_fails() {
    cmd()
        .args(["autokey", "--input", "/nonexistent/shortcuts.yaml"])
        .assert()
        .failure();
}

// =============================================================================
// Slack Command
// =============================================================================

#[test]
fn slack_extracts_user_messages() {
    let tmp = tempfile::TempDir::new().unwrap();
    let export = tmp.path().join("export/general");
    std::fs::create_dir_all(&export).unwrap();
    std::fs::write(
        export.join("2024-01-01.json"),
        r#"[{"user_profile": {"name": "erik"}, "text": "Ship it :rocket:"},
            {"user_profile": {"name": "other"}, "text": "nope"}]"#,
    )
    .unwrap();
    let out = tmp.path().join("slack_msgs.txt");

    cmd()
        .args([
            "slack",
            "--export",
            tmp.path().join("export").to_str().unwrap(),
            "--user",
            "erik",
            "--output",
            out.to_str().unwrap(),
        ])
        .assert()
        .success();

    assert_eq!(std::fs::read_to_string(out).unwrap(), "ship it\n");
}

#[test]
fn slack_requires_export_flag() {
    cmd()
        .args(["slack", "--user", "erik"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--export"));
}

// =============================================================================
// Abbrevs Command
// =============================================================================

#[test]
fn abbrevs_lists_candidates() {
    cmd()
        .args(["abbrevs", "different"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dt"))
        .stdout(predicate::str::contains("diff"));
}

#[test]
fn abbrevs_json_flags_savings() {
    let output = cmd()
        .args(["abbrevs", "the", "--json"])
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_slice(&output.get_output().stdout).expect("valid JSON");
    assert_eq!(json[0]["abbrev"], "t");
    assert_eq!(json[0]["saves_enough"], true);
    assert_eq!(json[1]["abbrev"], "te");
    assert_eq!(json[1]["saves_enough"], false);
}

// =============================================================================
// Error Cases
// =============================================================================

#[test]
fn no_subcommand_shows_help() {
    // arg_required_else_help makes clap print help to stderr and exit 2
    cmd()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn invalid_subcommand_shows_error() {
    cmd()
        .arg("not-a-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn invalid_flag_shows_error() {
    cmd()
        .arg("--not-a-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}


// =============================================================================
// Chdir Flag
// =============================================================================

#[test]
fn chdir_flag_changes_directory() {
    // The -C flag should be accepted and work without error
    // We use a path that definitely exists
    cmd().args(["-C", "/tmp", "info"]).assert().success();
}

#[test]
fn chdir_nonexistent_fails() {
    cmd()
        .args(["-C", "/nonexistent/path/that/does/not/exist", "info"])
        .assert()
        .failure();
}
