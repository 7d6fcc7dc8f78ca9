// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Full-pipeline extraction tests.

use super::*;
use crate::test_support::{decl_from_chain, decl_from_source};

fn model_of(chain: &str) -> WorkflowModel {
    let (decl, types) = decl_from_chain(chain);
    extract_workflow(&decl, &types, CancelFlag::new())
        .unwrap()
        .model
}

#[test]
fn assembles_identity_and_state_type() {
    let model = model_of(
        "Workflow::<OrderState>::create(\"process-order\")\
         .start_with::<ValidateOrder>()\
         .finally::<Complete>()",
    );
    assert_eq!(model.workflow_name, "process-order");
    assert_eq!(model.pascal_name, "ProcessOrder");
    assert_eq!(model.version, 1);
    assert_eq!(model.module_path.as_deref(), Some("crate::flows"));
    assert_eq!(model.state_type_name.as_deref(), Some("OrderState"));
    assert_eq!(model.saga_type_name(), "ProcessOrderSaga");
    assert_eq!(model.reducer_type_name().as_deref(), Some("OrderStateReducer"));
}

#[test]
fn attribute_name_wins_over_create_literal() {
    let src = r#"
#[workflow(name = "attribute-name")]
pub struct Flow;

impl Flow {
    pub fn define() -> WorkflowBuilder<S> {
        Workflow::<S>::create("literal-name").start_with::<A>().finally::<B>()
    }
}
"#;
    let (decl, types) = decl_from_source(src);
    let model = extract_workflow(&decl, &types, CancelFlag::new()).unwrap().model;
    assert_eq!(model.workflow_name, "attribute-name");
}

#[test]
fn create_literal_backfills_a_missing_attribute_name() {
    let src = r#"
#[workflow]
pub struct Flow;

impl Flow {
    pub fn define() -> WorkflowBuilder<S> {
        Workflow::<S>::create("literal-name").start_with::<A>().finally::<B>()
    }
}
"#;
    let (decl, types) = decl_from_source(src);
    let model = extract_workflow(&decl, &types, CancelFlag::new()).unwrap().model;
    assert_eq!(model.workflow_name, "literal-name");
}

#[test]
fn validation_presence_is_aggregated() {
    let model = model_of(
        "Workflow::<S>::create(\"x\")\
         .start_with::<A>()\
         .validate_state(|s| s.total > 0, \"must be positive\")\
         .finally::<B>()",
    );
    assert!(model.has_any_validation);
    let a = model.step_by_phase("A").unwrap();
    assert_eq!(a.validation_predicate.as_deref(), Some("state.total > 0"));
}

#[test]
fn full_featured_workflow_populates_every_section() {
    let model = model_of(
        "Workflow::<OrderState>::create(\"everything\")\
         .start_with::<Intake>()\
         .repeat_until(|s| s.stable, \"Refine\", |l| l.then::<Critique>().then::<Revise>(), 4)\
         .then::<Sort>()\
         .branch(|s| s.kind, \
            when(OrderKind::Auto, |p| p.then::<FastTrack>()), \
            otherwise(|p| p.then::<Escalate>()))\
         .then::<Assemble>()\
         .fork(|p| p.then::<Audit>(), |p| p.then::<Summarize>())\
         .join::<Reconcile>()\
         .await_approval::<ComplianceApprover>(|a| a.on_rejection(|h| h.then::<NotifyReject>().complete()))\
         .on_failure(|h| h.then::<Rollback>().complete())\
         .finally::<Publish>()",
    );
    assert_eq!(model.loops.len(), 1);
    assert_eq!(model.branches.len(), 1);
    assert_eq!(model.forks.len(), 1);
    assert_eq!(model.approvals.len(), 1);
    assert_eq!(model.failure_handlers.len(), 1);
    let phases: Vec<_> = model.steps.iter().map(|s| s.phase_name()).collect();
    assert!(phases.contains(&"Refine_Critique".to_string()));
    assert!(phases.contains(&"Reconcile".to_string()));
    assert!(phases.contains(&"NotifyReject".to_string()));
    assert!(phases.contains(&"Rollback".to_string()));
}

#[test]
fn version_floor_is_one() {
    let src = r#"
#[workflow(name = "legacy", version = 0)]
pub struct Legacy;

impl Legacy {
    pub fn define() -> WorkflowBuilder<S> {
        Workflow::<S>::create("legacy").start_with::<A>().finally::<B>()
    }
}
"#;
    let (decl, types) = decl_from_source(src);
    let model = extract_workflow(&decl, &types, CancelFlag::new()).unwrap().model;
    assert_eq!(model.version, 1);
}

#[test]
fn cancellation_aborts_extraction() {
    let (decl, types) = decl_from_chain("Workflow::<S>::create(\"x\").finally::<A>()");
    let cancel = CancelFlag::new();
    cancel.cancel();
    assert_eq!(
        extract_workflow(&decl, &types, cancel).unwrap_err(),
        ExtractError::Cancelled
    );
}

#[test]
fn state_extraction_maps_markers_to_kinds() {
    let src = r#"
#[workflow_state]
pub struct OrderState {
    pub total: f64,
    #[append]
    pub notes: Vec<String>,
    #[merge]
    pub attrs: HashMap<String, String>,
}
"#;
    let unit = sg_syntax::SourceUnit::parse("state.rs", Some("crate".to_string()), src).unwrap();
    let decl = sg_syntax::state_decls(&unit).remove(0);
    let (model, diagnostics) = extract_state(&decl);
    assert!(diagnostics.is_empty());
    assert_eq!(model.type_name, "OrderState");
    assert_eq!(model.reducer_type_name(), "OrderStateReducer");
    let kinds: Vec<_> = model.properties.iter().map(|p| p.kind).collect();
    assert_eq!(
        kinds,
        [PropertyKind::Standard, PropertyKind::Append, PropertyKind::Merge]
    );
    assert!(model.has_merge_property());
}
