// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Derived artifact names shared across emitters.
//!
//! Start commands are minted per phase (they encode a position in the
//! flow); worker commands, completion events, and handlers are minted per
//! step type (instance-named phases share them).

use inflector::Inflector;
use sg_model::{ApprovalModel, LoopModel, WorkflowModel};

pub(crate) fn phase_enum(model: &WorkflowModel) -> String {
    format!("{}Phase", model.pascal_name)
}

pub(crate) fn message_enum(model: &WorkflowModel) -> String {
    format!("{}Message", model.pascal_name)
}

pub(crate) fn event_trait(model: &WorkflowModel) -> String {
    format!("{}WorkflowEvent", model.pascal_name)
}

pub(crate) fn start_workflow_command(model: &WorkflowModel) -> String {
    format!("Start{}WorkflowCommand", model.pascal_name)
}

/// `Start<Phase>Command` — one per phase.
pub(crate) fn start_command(phase: &str) -> String {
    format!("Start{phase}Command")
}

/// `Execute<Type>Command` — the legacy non-state-carrying form.
pub(crate) fn execute_command(step_type: &str) -> String {
    format!("Execute{step_type}Command")
}

/// `Execute<Type>WorkerCommand` — carries the state snapshot.
pub(crate) fn worker_command(step_type: &str) -> String {
    format!("Execute{step_type}WorkerCommand")
}

/// `<Type>Completed` — one per step type.
pub(crate) fn completed_event(step_type: &str) -> String {
    format!("{step_type}Completed")
}

pub(crate) fn worker_handler(step_type: &str) -> String {
    format!("{step_type}Handler")
}

/// Method-name fragment for a phase (`Refinement_Critique` →
/// `refinement_critique`).
pub(crate) fn phase_method(phase: &str) -> String {
    phase.to_snake_case()
}

/// Saga field tracking a loop's iteration count.
pub(crate) fn iteration_field(l: &LoopModel) -> String {
    format!("{}_iteration_count", l.full_prefix().to_snake_case())
}

/// Saga field tracking a fork's outstanding paths. Fork ids are
/// `Fork<n>`; lowercasing keeps the digit attached (`fork1_..`).
pub(crate) fn outstanding_field(fork_id: &str) -> String {
    format!("{}_outstanding_paths", fork_id.to_lowercase())
}

/// The loop-exit predicate method.
pub(crate) fn exit_method(l: &LoopModel) -> String {
    format!("should_exit_{}_loop", l.full_prefix().to_snake_case())
}

/// Approval outcome phase variants, in declaration order.
pub(crate) fn approval_phases(approval: &ApprovalModel) -> Vec<String> {
    let name = &approval.approval_point_name;
    let mut out = vec![name.clone(), format!("{name}Approved")];
    if approval.has_rejection_handler() {
        out.push(format!("{name}Rejected"));
    }
    if approval.has_escalation_handler() {
        out.push(format!("{name}TimedOut"));
    }
    if !approval.nested_escalation_approvals.is_empty() {
        out.push(format!("{name}Escalated"));
    }
    out
}

/// The registry-extension function.
pub(crate) fn registration_fn(model: &WorkflowModel) -> String {
    format!("add_{}_workflow", model.pascal_name.to_snake_case())
}
