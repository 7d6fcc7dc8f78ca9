// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostic edge-case specifications.

use crate::prelude::{codes, Project};

#[test]
fn empty_workflow_name_skips_emission() {
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
    let report = project.generate();
    assert!(codes(&report.diagnostics).contains(&"AGWF001"));
    assert_eq!(report.failed, 1);
    assert!(!project.out.join("Saga.g.rs").exists());
}

#[test]
fn duplicate_linear_steps_report_but_do_not_block() {
    let project = Project::with_chain(
        "Workflow::<OrderState>::create(\"process-order\")\
         .start_with::<A>()\
         .then::<X>()\
         .then::<X>()\
         .finally::<B>()",
    );
    let report = project.generate();
    assert!(codes(&report.diagnostics).contains(&"AGWF003"));
    // Non-fatal: artifacts still emitted, deduplicated.
    let phase = project.artifact("ProcessOrderPhase.g.rs");
    assert_eq!(phase.matches("    X,").count(), 1);
}

#[test]
fn fork_without_join_is_reported() {
    let project = Project::with_chain(
        "Workflow::<OrderState>::create(\"process-order\")\
         .start_with::<Gather>()\
         .fork(|p| p.then::<Alpha>(), |p| p.then::<Beta>())\
         .then::<Oops>()\
         .finally::<Done>()",
    );
    let diagnostics = project.check();
    assert!(codes(&diagnostics).contains(&"AGWF012"));
}

#[test]
fn empty_loop_body_is_reported() {
    let project = Project::with_chain(
        "Workflow::<OrderState>::create(\"process-order\")\
         .start_with::<A>()\
         .repeat_until(|s| s.done, \"Empty\", |l| l, 5)\
         .finally::<B>()",
    );
    let diagnostics = project.check();
    assert!(codes(&diagnostics).contains(&"AGWF014"));
}

#[test]
fn reducer_marker_misuse_is_reported() {
    let project = Project::with_source(
        r#"
#[workflow_state]
pub struct BadState {
    #[append]
    pub count: u32,
    #[merge]
    pub tags: Vec<String>,
}
"#,
    );
    let diagnostics = project.check();
    let found = codes(&diagnostics);
    assert!(found.contains(&"AGSR001"));
    assert!(found.contains(&"AGSR002"));
}

#[test]
fn missing_finally_and_start_with_are_reported() {
    let project = Project::with_chain(
        "Workflow::<OrderState>::create(\"process-order\").then::<A>().then::<B>()",
    );
    let diagnostics = project.check();
    let found = codes(&diagnostics);
    assert!(found.contains(&"AGWF009"));
    assert!(found.contains(&"AGWF010"));
}
