// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Determinism and incrementality specifications.

use crate::prelude::{exists, Project};
use sg_driver::{Driver, GeneratorOptions};
use similar_asserts::assert_eq;

const CHAIN: &str = "Workflow::<OrderState>::create(\"process-order\")\
    .start_with::<ValidateOrder>()\
    .then::<ProcessPayment>()\
    .finally::<Complete>()";

#[test]
fn regeneration_is_byte_identical() {
    let project = Project::with_chain(CHAIN);
    project.generate();
    let first = project.artifact("ProcessOrderSaga.g.rs");

    // Force a full re-emit; bytes must not move.
    let mut options = GeneratorOptions::new(&project.src, &project.out);
    options.force = true;
    let report = Driver::new(options).run().unwrap();
    assert!(report.written.is_empty());
    assert_eq!(project.artifact("ProcessOrderSaga.g.rs"), first);
}

#[test]
fn second_pass_performs_zero_writes() {
    let project = Project::with_chain(CHAIN);
    let first = project.generate();
    assert!(!first.written.is_empty());
    let second = project.generate();
    assert!(second.written.is_empty());
    assert!(second.skipped > 0);
}

#[test]
fn artifacts_carry_no_timestamps_or_source_paths() {
    let project = Project::with_chain(CHAIN);
    project.generate();
    let saga = project.artifact("ProcessOrderSaga.g.rs");
    assert!(saga.starts_with("// @generated by sagagen/0.1"));
    let source_path = project.source_file().display().to_string();
    assert!(!saga.contains(&source_path));
}

#[test]
fn edited_declaration_regenerates_only_after_change() {
    let project = Project::with_chain(CHAIN);
    project.generate();

    let source = std::fs::read_to_string(project.source_file()).unwrap();
    let edited = source.replace("ProcessPayment>()", "ProcessPayment>().then::<Audit>()");
    std::fs::write(project.source_file(), edited).unwrap();

    let report = project.generate();
    assert!(!report.written.is_empty());
    assert!(project.artifact("ProcessOrderPhase.g.rs").contains("Audit,"));
    assert!(exists(&project.out, "ProcessOrderSaga.g.rs"));
}
