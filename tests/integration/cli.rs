use assert_cmd::Command;
use predicates::prelude::*;
use report_aggregator::test_utils::TestProject;

fn command(project: &TestProject) -> Command {
    let mut cmd = Command::cargo_bin("report-aggregator").unwrap();
    cmd.current_dir(&project.root).env_remove("RUST_LOG");
    cmd
}

fn project() -> TestProject {
    TestProject::builder()
        .unwrap()
        .with_module("core", "jar")
        .with_module("group", "pom")
        .with_setting("copy_pattern", "\"pit-reports\"")
        .with_build_file("core", "pit-reports/index.html", "core")
        .build()
        .unwrap()
}

#[test]
fn test_aggregate_command() {
    let project = project();

    command(&project)
        .arg("aggregate")
        .assert()
        .success()
        .stdout(predicate::str::contains("core"))
        .stdout(predicate::str::contains("index.html"));

    assert!(project.file_exists("target/pit-reports/core/pit-reports/index.html"));
    assert!(project.file_exists("target/pit-reports/index.html"));
}

#[test]
fn test_aggregate_flags_override_project_file() {
    let project = project();

    command(&project)
        .args(["--quiet", "aggregate", "--no-copy", "--destination", "site"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(project.file_exists("site/index.html"));
    assert!(!project.file_exists("site/core"));
    assert!(!project.file_exists("target/pit-reports"));
}

#[test]
fn test_aggregate_strict_fails_on_template_failure() {
    let project = project();
    project.write_file("broken_html.st", "{% if %}").unwrap();

    command(&project).args(["aggregate", "--templates", "broken_html.st"]).assert().success();

    command(&project)
        .args(["aggregate", "--templates", "broken_html.st", "--strict"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_missing_project_file() {
    let project = project();

    command(&project)
        .args(["aggregate", "--project", "missing.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Project file not found"))
        .stderr(predicate::str::contains("suggestion"));
}

#[test]
fn test_missing_copy_pattern() {
    let project = TestProject::builder().unwrap().with_module("core", "jar").build().unwrap();

    command(&project)
        .arg("aggregate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("copy pattern"));

    command(&project)
        .args(["aggregate", "--copy-pattern", "pit-reports"])
        .assert()
        .success();
}

#[test]
fn test_copy_pattern_from_environment() {
    let project = TestProject::builder().unwrap().with_module("core", "jar").build().unwrap();

    command(&project)
        .env("REPORT_AGGREGATOR_COPY_PATTERN", "site")
        .arg("aggregate")
        .assert()
        .success();
    assert!(project.file_exists("target/site/index.html"));
}

#[test]
fn test_validate_command() {
    let project = project();

    command(&project)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("core"))
        .stdout(predicate::str::contains("group"))
        .stdout(predicate::str::contains("index.html"));

    assert!(!project.file_exists("target"));
}

#[test]
fn test_validate_json() {
    let project = project();

    let output = command(&project).args(["validate", "--format", "json"]).assert().success();
    let json: serde_json::Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    assert_eq!(json["modules"], serde_json::json!(["core"]));
    assert_eq!(json["excluded"], serde_json::json!(["group"]));
    assert_eq!(json["templates"].as_array().unwrap().len(), 2);
}

#[test]
fn test_validate_rejects_invalid_pattern() {
    let project = project();

    command(&project)
        .args(["validate", "--copy-pattern", "(unclosed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid copy pattern"));
}
