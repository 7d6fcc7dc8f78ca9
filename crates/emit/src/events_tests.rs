// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event emitter tests.

use super::*;
use crate::test_support::{linear_order_model, model_of};

#[test]
fn emits_marker_trait_and_lifecycle_events() {
    let text = emit_events(&linear_order_model());
    assert!(text.contains("pub trait ProcessOrderWorkflowEvent {}"));
    assert!(text.contains("pub struct ProcessOrderStarted {"));
    assert!(text.contains("pub struct ProcessOrderCompleted {"));
    assert!(text.contains("pub struct ProcessOrderStepFailed {"));
    assert!(text.contains("impl ProcessOrderWorkflowEvent for ProcessOrderStarted {}"));
}

#[test]
fn completion_events_are_per_type_with_state_and_confidence() {
    let text = emit_events(&linear_order_model());
    assert!(text.contains("pub struct ValidateOrderCompleted {"));
    assert!(text.contains("pub updated_state: OrderState,"));
    assert!(text.contains("pub confidence: Option<f64>,"));
}

#[test]
fn validation_failed_event_only_when_guards_exist() {
    let without = emit_events(&linear_order_model());
    assert!(!without.contains("ProcessOrderValidationFailed"));

    let with = emit_events(&model_of(
        "Workflow::<S>::create(\"x\")\
         .start_with::<A>()\
         .validate_state(|s| s.total > 0, \"must be positive\")\
         .finally::<B>()",
    ));
    assert!(with.contains("pub struct ProcessOrderValidationFailed {"));
    assert!(with.contains("pub error_message: String,"));
}

#[test]
fn approval_event_only_when_gates_exist() {
    let without = emit_events(&linear_order_model());
    assert!(!without.contains("ApprovalReceived"));

    let with = emit_events(&model_of(
        "Workflow::<S>::create(\"x\")\
         .start_with::<Submit>()\
         .await_approval::<ComplianceApprover>(|a| a)\
         .finally::<Done>()",
    ));
    assert!(with.contains("pub enum ApprovalOutcome {"));
    assert!(with.contains("pub struct ProcessOrderApprovalReceived {"));
}
