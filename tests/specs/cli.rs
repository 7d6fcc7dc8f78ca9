// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Black-box CLI specifications: invoke the binary, assert on stdout,
//! stderr, and exit codes.

use crate::prelude::Project;
use assert_cmd::Command;

fn sagagen() -> Command {
    Command::cargo_bin("sagagen").expect("binary builds")
}

const CHAIN: &str = "Workflow::<OrderState>::create(\"process-order\")\
    .start_with::<ValidateOrder>()\
    .finally::<Complete>()";

#[test]
fn help_lists_the_subcommands() {
    let assert = sagagen().arg("--help").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(stdout.contains("generate"));
    assert!(stdout.contains("check"));
    assert!(stdout.contains("watch"));
}

#[test]
fn generate_writes_artifacts_into_the_out_dir() {
    let project = Project::with_chain(CHAIN);
    let assert = sagagen()
        .arg("-C")
        .arg(project.root.path())
        .args(["generate", "--source", "src", "--out-dir", "generated"])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(stdout.contains("written"));
    assert!(project.out.join("ProcessOrderSaga.g.rs").exists());
}

#[test]
fn check_is_quiet_and_writes_nothing_on_a_clean_tree() {
    let project = Project::with_chain(CHAIN);
    sagagen()
        .arg("-C")
        .arg(project.root.path())
        .args(["check", "--source", "src", "--out-dir", "generated"])
        .assert()
        .success();
    assert!(!project.out.exists());
}

#[test]
fn check_fails_on_error_diagnostics() {
    let project = Project::with_source(
        r#"
#[workflow(name = "")]
pub struct Nameless;

impl Nameless {
    pub fn define() -> WorkflowBuilder<S> {
        Workflow::<S>::create("").start_with::<A>().finally::<B>()
    }
}
"#,
    );
    let assert = sagagen()
        .arg("-C")
        .arg(project.root.path())
        .args(["check", "--source", "src", "--out-dir", "generated"])
        .assert()
        .failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("AGWF001"));
}

#[test]
fn json_output_is_parseable() {
    let project = Project::with_chain(CHAIN);
    let assert = sagagen()
        .arg("-C")
        .arg(project.root.path())
        .args([
            "-o",
            "json",
            "generate",
            "--source",
            "src",
            "--out-dir",
            "generated",
        ])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    // Two JSON documents: diagnostics array then the summary object.
    assert!(stdout.contains("\"up_to_date\""));
}

#[test]
fn config_file_supplies_defaults() {
    let project = Project::with_chain(CHAIN);
    std::fs::write(
        project.root.path().join("sagagen.toml"),
        "[generate]\nsource = \"src\"\nout_dir = \"generated\"\n",
    )
    .unwrap();
    sagagen()
        .arg("-C")
        .arg(project.root.path())
        .arg("generate")
        .assert()
        .success();
    assert!(project.out.join("ProcessOrderPhase.g.rs").exists());
}
