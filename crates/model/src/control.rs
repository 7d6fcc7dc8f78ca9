// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Control-flow constructs: loops, branches, forks, approvals, and failure
//! handlers.
//!
//! These are peer variants, not a subtype hierarchy; `WorkflowModel`
//! composes them by inclusion. Nodes link to one another by step name,
//! never by pointer — the only owned recursion is the consecutive-branch
//! chain and nested escalation approvals.

use crate::naming;
use serde::{Deserialize, Serialize};

/// A `repeat_until` loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopModel {
    pub loop_name: String,
    /// Deterministic identifier of the exit predicate (stable across runs
    /// for an unchanged declaration).
    pub condition_id: String,
    /// Verbatim exit-predicate text when the DSL supplied a state lambda.
    pub exit_condition: Option<String>,
    /// Iteration ceiling; the emitted guard exits at or beyond it.
    pub max_iterations: u32,
    pub first_body_step_name: String,
    pub last_body_step_name: String,
    /// The step chained after the loop, if any.
    pub continuation_step_name: Option<String>,
    pub parent_loop_name: Option<String>,
}

impl LoopModel {
    /// The loop's hierarchical prefix: parent prefix + own name.
    pub fn full_prefix(&self) -> String {
        naming::join_prefix(self.parent_loop_name.as_deref(), &self.loop_name)
    }
}

/// One `when(value, ..)` or `otherwise(..)` case of a branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchCaseModel {
    /// The case's literal: `Type::Member` for enum members, literal text
    /// for strings/numbers/bools, and `"default"` for `otherwise`.
    pub case_value_literal: String,
    pub branch_path_prefix: String,
    pub step_names: Vec<String>,
    pub is_terminal: bool,
}

impl BranchCaseModel {
    pub fn is_default(&self) -> bool {
        self.case_value_literal == "default"
    }
}

/// A `branch(discriminator, case..)` construct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchModel {
    /// Stable workflow-scoped identifier (`BranchByType`, `Branch2`, ..).
    pub branch_id: String,
    /// Empty for a consecutive branch chained directly after another
    /// branch.
    pub previous_step_name: String,
    /// Dotted property path, or `m()` for a method discriminator.
    pub discriminator_property_path: String,
    pub discriminator_type_name: String,
    pub is_enum_discriminator: bool,
    pub is_method_discriminator: bool,
    pub cases: Vec<BranchCaseModel>,
    /// First step after the branch's consecutive run, if the flow rejoins.
    pub rejoin_step_name: Option<String>,
    pub loop_prefix: Option<String>,
    /// Next branch sharing this branch's predecessor (consecutive run).
    pub next_consecutive_branch: Option<Box<BranchModel>>,
}

impl BranchModel {
    pub fn is_consecutive(&self) -> bool {
        self.previous_step_name.is_empty()
    }

    /// The default (`otherwise`) case, when declared.
    pub fn default_case(&self) -> Option<&BranchCaseModel> {
        self.cases.iter().find(|c| c.is_default())
    }
}

/// One parallel path of a fork.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForkPathModel {
    pub path_index: usize,
    pub step_names: Vec<String>,
    pub has_failure_handler: bool,
    pub is_terminal_on_failure: bool,
    pub failure_handler_step_names: Option<Vec<String>>,
}

/// A `fork(path..)` / `join::<T>()` construct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForkModel {
    pub fork_id: String,
    pub previous_step_name: String,
    pub paths: Vec<ForkPathModel>,
    pub join_step_name: String,
}

/// An `await_approval::<TApprover>(..)` gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalModel {
    /// Derived by stripping a trailing `Approver` from the approver type.
    pub approval_point_name: String,
    pub approver_type_name: String,
    /// The step preceding the gate; the sentinel `"BranchPath"` inside a
    /// branch lambda, `"Escalation"` for nested escalation approvals.
    pub preceding_step_name: String,
    pub escalation_steps: Vec<String>,
    pub rejection_steps: Vec<String>,
    pub nested_escalation_approvals: Vec<ApprovalModel>,
    pub is_escalation_terminal: bool,
    pub is_rejection_terminal: bool,
}

impl ApprovalModel {
    pub fn has_rejection_handler(&self) -> bool {
        !self.rejection_steps.is_empty() || self.is_rejection_terminal
    }

    pub fn has_escalation_handler(&self) -> bool {
        !self.escalation_steps.is_empty()
            || self.is_escalation_terminal
            || !self.nested_escalation_approvals.is_empty()
    }
}

/// Scope of a failure handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureScope {
    Workflow,
    Step,
}

/// An `on_failure(..)` handler at workflow scope, or a step-scoped
/// compensation recorded against its trigger step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureHandlerModel {
    pub handler_id: String,
    pub scope: FailureScope,
    pub step_names: Vec<String>,
    pub is_terminal: bool,
    pub trigger_step_name: Option<String>,
}

#[cfg(test)]
#[path = "control_tests.rs"]
mod tests;
