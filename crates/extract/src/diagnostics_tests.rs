// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structural diagnostic tests.

use crate::assemble::{extract_state, extract_workflow};
use crate::test_support::{decl_from_chain, decl_from_source};
use sg_model::{codes, CancelFlag, Severity};
use sg_syntax::{state_decls, SourceUnit};

fn diagnostics_of(chain: &str) -> Vec<(String, Severity)> {
    let (decl, types) = decl_from_chain(chain);
    let extraction = extract_workflow(&decl, &types, CancelFlag::new()).unwrap();
    extraction
        .diagnostics
        .iter()
        .map(|d| (d.code.clone(), d.severity))
        .collect()
}

fn codes_of(chain: &str) -> Vec<String> {
    diagnostics_of(chain).into_iter().map(|(c, _)| c).collect()
}

#[test]
fn clean_workflow_reports_nothing() {
    let codes = codes_of(
        "Workflow::<S>::create(\"process-order\")\
         .start_with::<ValidateOrder>()\
         .then::<ProcessPayment>()\
         .finally::<Complete>()",
    );
    assert!(codes.is_empty(), "unexpected diagnostics: {codes:?}");
}

#[test]
fn empty_workflow_name_is_agwf001() {
    let src = r#"
#[workflow(name = "")]
pub struct Nameless;

impl Nameless {
    pub fn define() -> WorkflowBuilder<S> {
        Workflow::<S>::create("").start_with::<A>().finally::<B>()
    }
}
"#;
    let (decl, types) = decl_from_source(src);
    let extraction = extract_workflow(&decl, &types, CancelFlag::new()).unwrap();
    assert!(extraction.diagnostics.iter().any(|d| d.code == codes::EMPTY_WORKFLOW_NAME));
    assert!(!extraction.is_emittable());
}

#[test]
fn missing_module_is_agwf004() {
    let src = r#"
#[workflow(name = "stray")]
pub struct Stray;

impl Stray {
    pub fn define() -> WorkflowBuilder<S> {
        Workflow::<S>::create("stray").start_with::<A>().finally::<B>()
    }
}
"#;
    let unit = SourceUnit::parse("stray.rs", None, src).unwrap();
    let types = unit.types.clone();
    let decl = sg_syntax::workflow_decls(&unit).remove(0);
    let extraction = extract_workflow(&decl, &types, CancelFlag::new()).unwrap();
    assert!(extraction.diagnostics.iter().any(|d| d.code == codes::NO_MODULE));
    assert!(!extraction.is_emittable());
}

#[test]
fn no_steps_is_a_warning() {
    let diags = diagnostics_of("Workflow::<S>::create(\"x\")");
    assert!(diags.contains(&(codes::NO_STEPS.to_string(), Severity::Warning)));
}

#[test]
fn missing_start_with_is_agwf009() {
    let codes = codes_of(
        "Workflow::<S>::create(\"x\").then::<A>().finally::<B>()",
    );
    assert!(codes.contains(&codes::NO_START_WITH.to_string()));
}

#[test]
fn missing_finally_is_a_warning() {
    let diags = diagnostics_of(
        "Workflow::<S>::create(\"x\").start_with::<A>().then::<B>()",
    );
    assert!(diags.contains(&(codes::NO_FINALLY.to_string(), Severity::Warning)));
}

#[test]
fn duplicate_linear_steps_are_agwf003() {
    let codes = codes_of(
        "Workflow::<S>::create(\"x\")\
         .start_with::<A>()\
         .then::<B>()\
         .then::<B>()\
         .finally::<C>()",
    );
    assert!(codes.contains(&codes::DUPLICATE_STEP_NAME.to_string()));
}

#[test]
fn distinct_fork_path_types_do_not_trigger_agwf003() {
    let codes = codes_of(
        "Workflow::<S>::create(\"x\")\
         .start_with::<Gather>()\
         .fork(|p| p.then::<Alpha>(), |p| p.then::<Beta>())\
         .join::<Synth>()\
         .finally::<Report>()",
    );
    assert!(!codes.contains(&codes::DUPLICATE_STEP_NAME.to_string()));
}

#[test]
fn same_type_fork_paths_without_names_trigger_agwf003() {
    let codes = codes_of(
        "Workflow::<S>::create(\"x\")\
         .start_with::<Gather>()\
         .fork(|p| p.then::<Analyze>(), |p| p.then::<Analyze>())\
         .join::<Synth>()\
         .finally::<Report>()",
    );
    assert!(codes.contains(&codes::DUPLICATE_STEP_NAME.to_string()));
}

#[test]
fn branch_case_name_collisions_are_allowed() {
    let codes = codes_of(
        "Workflow::<S>::create(\"x\")\
         .start_with::<Assess>()\
         .branch(|s| s.kind, \
            when(OrderKind::Auto, |p| p.then::<Notify>()), \
            otherwise(|p| p.then::<Notify>()))\
         .finally::<End>()",
    );
    assert!(!codes.contains(&codes::DUPLICATE_STEP_NAME.to_string()));
}

#[test]
fn fork_without_join_is_agwf012() {
    let codes = codes_of(
        "Workflow::<S>::create(\"x\")\
         .start_with::<Gather>()\
         .fork(|p| p.then::<Alpha>(), |p| p.then::<Beta>())\
         .then::<Oops>()\
         .finally::<Report>()",
    );
    assert!(codes.contains(&codes::FORK_WITHOUT_JOIN.to_string()));
}

#[test]
fn empty_loop_body_is_agwf014() {
    let codes = codes_of(
        "Workflow::<S>::create(\"x\")\
         .start_with::<A>()\
         .repeat_until(|s| s.done, \"Empty\", |l| l, 5)\
         .finally::<B>()",
    );
    assert!(codes.contains(&codes::EMPTY_LOOP_BODY.to_string()));
}

#[test]
fn state_marker_mismatches_are_agsr_errors() {
    let src = r#"
#[workflow_state]
pub struct BadState {
    #[append]
    pub count: u32,
    #[merge]
    pub tags: Vec<String>,
    #[append]
    pub notes: Vec<String>,
    #[merge]
    pub attrs: HashMap<String, String>,
}
"#;
    let unit = SourceUnit::parse("state.rs", Some("crate".to_string()), src).unwrap();
    let decl = state_decls(&unit).remove(0);
    let (_, diagnostics) = extract_state(&decl);
    let codes: Vec<_> = diagnostics.iter().map(|d| d.code.as_str()).collect();
    assert_eq!(codes, [codes::APPEND_NOT_COLLECTION, codes::MERGE_NOT_MAP]);
}
