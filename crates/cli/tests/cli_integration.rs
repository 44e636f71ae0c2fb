//! CLI integration tests for every subcommand.
//!
//! Uses `assert_cmd` to spawn the `waypoint` binary and verify
//! exit codes, stdout content, and stderr content.
//!
//! All tests set `current_dir` to the workspace root so that relative
//! paths to fixtures resolve correctly.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Locate the workspace root by walking up from CARGO_MANIFEST_DIR.
fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .to_path_buf()
}

/// Helper: create a Command for the `waypoint` binary, rooted at workspace.
fn waypoint() -> Command {
    let mut cmd = cargo_bin_cmd!("waypoint");
    cmd.current_dir(workspace_root());
    cmd
}

/// Write `contents` to `name` inside a fresh temporary directory.
fn temp_definition(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    (dir, path)
}

// ──────────────────────────────────────────────
// 1. Help and version
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    waypoint()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Waypoint wizard definition toolchain",
        ));
}

#[test]
fn version_exits_0() {
    waypoint()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("waypoint"));
}

#[test]
fn missing_subcommand_is_a_usage_error() {
    waypoint().assert().failure().code(2);
}

// ──────────────────────────────────────────────
// 2. check
// ──────────────────────────────────────────────

#[test]
fn check_valid_definition_prints_summary() {
    waypoint()
        .args(["check", "fixtures/signup.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Account signup: ok"))
        .stdout(predicate::str::contains("Steps: 7 declared, 7 reachable"))
        .stdout(predicate::str::contains("Final step: Confirm (path 'finish')"));
}

#[test]
fn check_toml_definition() {
    waypoint()
        .args(["check", "fixtures/signup.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Account signup: ok"));
}

#[test]
fn check_json_output_is_parseable() {
    let output = waypoint()
        .args(["--output", "json", "check", "fixtures/signup.json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["valid"], true);
    assert_eq!(json["id"], "signup");
    assert_eq!(json["steps"], 7);
    assert_eq!(json["paths"], 5);
    assert_eq!(json["first_step"], "Welcome");
    assert_eq!(json["terminal_path"], "finish");
}

#[test]
fn check_rejects_two_terminal_paths() {
    waypoint()
        .args(["check", "fixtures/two_terminals.json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid wizard 'two-terminals'"))
        .stderr(predicate::str::contains("multiple terminal paths"));
}

#[test]
fn check_rejects_unknown_step_reference() {
    waypoint()
        .args(["check", "fixtures/unknown_step.json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("goodbye"));
}

#[test]
fn check_missing_file_fails() {
    waypoint()
        .args(["check", "fixtures/nope.json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("nope.json"));
}

#[test]
fn json_errors_go_to_stderr_as_objects() {
    let output = waypoint()
        .args(["--output", "json", "check", "fixtures/unknown_step.json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert!(json["error"].as_str().unwrap().contains("goodbye"));
}

#[test]
fn quiet_suppresses_error_output() {
    waypoint()
        .args(["--quiet", "check", "fixtures/unknown_step.json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::is_empty());
}

// ──────────────────────────────────────────────
// 3. validate
// ──────────────────────────────────────────────

#[test]
fn validate_json_fixture() {
    waypoint()
        .args(["validate", "fixtures/signup.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("valid"));
}

#[test]
fn validate_toml_fixture() {
    waypoint()
        .args(["validate", "fixtures/signup.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("valid"));
}

#[test]
fn validate_json_output() {
    waypoint()
        .args(["--output", "json", "validate", "fixtures/signup.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"valid\": true"));
}

#[test]
fn validate_checks_shape_not_references() {
    // Dangling ids are a compile error, not a schema error.
    waypoint()
        .args(["validate", "fixtures/unknown_step.json"])
        .assert()
        .success();
}

#[test]
fn validate_reports_schema_violations() {
    let (_dir, path) = temp_definition(
        "bad.json",
        r#"{ "id": "bad", "first": "main", "steps": [], "paths": [{ "id": "main", "kind": "loop", "steps": [] }] }"#,
    );
    waypoint()
        .args(["validate", path.to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid definition"));
}

#[test]
fn validate_rejects_malformed_condition() {
    let (_dir, path) = temp_definition(
        "cond.json",
        r#"{
            "id": "c", "first": "main",
            "steps": [{ "id": "a", "name": "A" }],
            "paths": [{
                "id": "main", "kind": "branching", "steps": ["a"],
                "branches": [{ "when": "sometimes", "to": "main" }]
            }]
        }"#,
    );
    let output = waypoint()
        .args(["--output", "json", "validate", path.to_str().unwrap()])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(json["valid"], false);
    assert!(!json["errors"].as_array().unwrap().is_empty());
}

#[test]
fn validate_unparseable_json_fails() {
    let (_dir, path) = temp_definition("broken.json", "{ not json");
    waypoint()
        .args(["validate", path.to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error parsing JSON"));
}

// ──────────────────────────────────────────────
// 4. paths
// ──────────────────────────────────────────────

#[test]
fn paths_text_report_lists_routes() {
    waypoint()
        .args(["paths", "fixtures/signup.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Path Analysis: Account signup"))
        .stdout(predicate::str::contains("Routes: 2 total, 2 reach the final path"))
        .stdout(predicate::str::contains(
            "Welcome -> Create account -> Choose plan -> Billing details -> Invite team -> Confirm",
        ))
        .stdout(predicate::str::contains("Findings:"));
}

#[test]
fn paths_json_report_is_parseable() {
    let output = waypoint()
        .args(["--output", "json", "paths", "fixtures/signup.json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["routes"]["route_count"], 2);
    assert_eq!(json["validation"]["valid"], true);
    assert_eq!(json["complexity"]["max_fan_out"], 2);
    assert_eq!(json["analyses_run"].as_array().unwrap().len(), 4);
}

#[test]
fn paths_selected_analysis_only() {
    let output = waypoint()
        .args([
            "--output",
            "json",
            "paths",
            "fixtures/signup.json",
            "--analysis",
            "reachability",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(json["routes"].is_null());
    assert_eq!(json["analyses_run"], serde_json::json!(["reachability"]));
}

#[test]
fn paths_rejects_unknown_analysis() {
    waypoint()
        .args(["paths", "fixtures/signup.json", "--analysis", "routes,bogus"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid analysis 'bogus'"));
}

#[test]
fn paths_exits_1_on_validation_warning() {
    waypoint()
        .args(["paths", "fixtures/two_terminals.json"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("[validation/WARNING]"));
}

#[test]
fn paths_warns_about_unreachable_paths() {
    let (_dir, path) = temp_definition(
        "island.json",
        r#"{
            "id": "island", "first": "main",
            "steps": [{ "id": "a", "name": "A" }, { "id": "b", "name": "B" }],
            "paths": [
                { "id": "main", "kind": "linear", "steps": ["a"] },
                { "id": "lost", "kind": "linear", "steps": ["b"], "next": "main" }
            ]
        }"#,
    );
    waypoint()
        .args(["paths", path.to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("[reachability/WARNING] [lost]"));
}

#[test]
fn paths_reports_cycles_as_info() {
    let (_dir, path) = temp_definition(
        "loop.toml",
        r#"
id = "loop"
first = "ask"

[[steps]]
id = "question"
name = "Question"

[[steps]]
id = "done"
name = "Done"

[[paths]]
id = "ask"
kind = "branching"
steps = ["question"]

[[paths.branches]]
when = { fact = "answered", equals = true }
to = "end"

[[paths.branches]]
when = "always"
to = "ask"

[[paths]]
id = "end"
kind = "linear"
steps = ["done"]
"#,
    );
    waypoint()
        .args(["paths", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("(cycle back to ask)"))
        .stdout(predicate::str::contains("[routes/INFO]"));
}

// ──────────────────────────────────────────────
// 5. walk
// ──────────────────────────────────────────────

#[test]
fn walk_follows_default_facts() {
    waypoint()
        .args(["walk", "fixtures/signup.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4. free-tier (Free tier limits)"))
        .stdout(predicate::str::contains("billing").not())
        .stdout(predicate::str::contains("finished at 'confirm'"));
}

#[test]
fn walk_fact_override_selects_branch() {
    waypoint()
        .args(["walk", "fixtures/signup.toml", "--fact", "plan=pro"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4. billing (Billing details)"))
        .stdout(predicate::str::contains("5. team (Invite team)"))
        .stdout(predicate::str::contains("free-tier").not());
}

#[test]
fn walk_json_output() {
    let output = waypoint()
        .args(["--output", "json", "walk", "fixtures/signup.json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["wizard"], "signup");
    assert_eq!(json["final_step"], "confirm");
    let ids: Vec<&str> = json["steps"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["welcome", "account", "plan", "free-tier", "confirm"]);
}

#[test]
fn walk_stops_at_incomplete_step() {
    waypoint()
        .args(["walk", "fixtures/incomplete.json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("step 'questions' is not complete"));
}

#[test]
fn walk_complete_all_finishes() {
    waypoint()
        .args(["walk", "fixtures/incomplete.json", "--complete-all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("finished at 'thanks'"));
}

#[test]
fn walk_without_matching_branch_fails() {
    waypoint()
        .args(["walk", "fixtures/no_fallback.json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("walk stopped at step 'where'"))
        .stderr(predicate::str::contains("no branch of path 'gate'"));
}

#[test]
fn walk_with_matching_fact_reaches_the_end() {
    waypoint()
        .args(["walk", "fixtures/no_fallback.json", "--fact", "region=us"])
        .assert()
        .success()
        .stdout(predicate::str::contains("finished at 'us-tax'"));
}

#[test]
fn walk_rejects_malformed_fact() {
    waypoint()
        .args(["walk", "fixtures/signup.json", "--fact", "plan"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("plan"));
}
