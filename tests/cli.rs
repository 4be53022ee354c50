//! End-to-end tests for the flowseed binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

const WORKFLOW_JSON: &str = r#"{
    "slug": "simple_workflow",
    "name": "Simple Workflow",
    "sample_data_load_function": {"module": "flowseed.sample_data", "name": "projects"},
    "versions": [{"slug": "v1", "name": "Version 1"}]
}"#;

const NO_SAMPLES_JSON: &str = r#"{
    "slug": "bare_workflow",
    "name": "Bare Workflow",
    "versions": [{"slug": "v1", "name": "Version 1"}]
}"#;

/// Isolated database for one test.
struct TestContext {
    root: TempDir,
}

impl TestContext {
    fn new() -> Self {
        Self {
            root: TempDir::new().expect("Failed to create temp directory for tests"),
        }
    }

    fn db_path(&self) -> PathBuf {
        self.root.path().join("data").join("flowseed.db")
    }

    fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("flowseed").expect("Failed to locate flowseed binary");
        cmd.env("FLOWSEED_DATABASE_PATH", self.db_path())
            .env("FLOWSEED_LOG", "off");
        cmd
    }

    fn write_definition(&self, name: &str, json: &str) -> PathBuf {
        let path = self.root.path().join(name);
        fs::write(&path, json).unwrap();
        path
    }

    fn load_workflow(&self, path: &Path) {
        self.cli()
            .arg("load-workflow")
            .arg(path)
            .assert()
            .success();
    }
}

#[test]
fn load_sample_data_for_unknown_workflow_exits_cleanly() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["load-sample-data", "ghost", "v1"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "Workflow ghost has not been loaded into the database",
        ));
}

#[test]
fn load_sample_data_for_unknown_version_exits_cleanly() {
    let ctx = TestContext::new();
    ctx.load_workflow(&ctx.write_definition("simple.json", WORKFLOW_JSON));

    ctx.cli()
        .args(["load-sample-data", "simple_workflow", "v7"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Version v7 does not exist"));
}

#[test]
fn load_sample_data_without_loader_exits_cleanly() {
    let ctx = TestContext::new();
    ctx.load_workflow(&ctx.write_definition("bare.json", NO_SAMPLES_JSON));

    ctx.cli()
        .args(["load-sample-data", "bare_workflow", "v1"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "Workflow bare_workflow does not provide sample data",
        ));
}

#[test]
fn load_sample_data_reports_success_on_stdout() {
    let ctx = TestContext::new();
    ctx.load_workflow(&ctx.write_definition("simple.json", WORKFLOW_JSON));

    ctx.cli()
        .args(["load-sample-data", "simple_workflow", "v1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Successfully loaded sample data for simple_workflow - v1",
        ));
}

#[test]
fn load_sample_data_requires_both_slugs() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["load-sample-data", "simple_workflow"])
        .assert()
        .failure();
}

#[test]
fn list_workflows_shows_loader_status() {
    let ctx = TestContext::new();
    ctx.load_workflow(&ctx.write_definition("simple.json", WORKFLOW_JSON));
    ctx.load_workflow(&ctx.write_definition("bare.json", NO_SAMPLES_JSON));

    ctx.cli()
        .arg("list-workflows")
        .assert()
        .success()
        .stdout(predicate::str::contains("bare_workflow  Bare Workflow"))
        .stdout(predicate::str::contains(
            "sample data: flowseed.sample_data.projects (registered)",
        ))
        .stdout(predicate::str::contains("sample data: none"));
}

#[test]
fn load_workflow_with_missing_file_fails() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["load-workflow", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read workflow definition"));
}

#[test]
fn load_sample_data_with_debug_logging_completes() {
    let ctx = TestContext::new();
    ctx.load_workflow(&ctx.write_definition("simple.json", WORKFLOW_JSON));

    // Debug enables sqlx statement logs emitted from its worker thread
    ctx.cli()
        .env("FLOWSEED_LOG", "debug")
        .args(["load-sample-data", "simple_workflow", "v1"])
        .timeout(Duration::from_secs(30))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Successfully loaded sample data for simple_workflow - v1",
        ));

    ctx.cli()
        .env("FLOWSEED_LOG", "debug")
        .arg("list-workflows")
        .timeout(Duration::from_secs(30))
        .assert()
        .success()
        .stdout(predicate::str::contains("simple_workflow  Simple Workflow"));
}
