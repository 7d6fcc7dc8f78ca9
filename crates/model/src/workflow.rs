// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The aggregated workflow model handed to the emitters.

use crate::control::{ApprovalModel, BranchModel, FailureHandlerModel, ForkModel, LoopModel};
use crate::naming;
use crate::{ContextBindingModel, StepModel};
use serde::{Deserialize, Serialize};

/// Everything extraction recovered from one workflow declaration.
///
/// Immutable once assembled; emitters take it by shared reference. All
/// cross-construct links are step names, never pointers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowModel {
    /// User-visible name from `create("...")`.
    pub workflow_name: String,
    /// Identifier-safe PascalCase derivation of `workflow_name`.
    pub pascal_name: String,
    /// Enclosing Rust module path of the declaring type.
    pub module_path: Option<String>,
    pub version: u32,
    /// Fully-qualified state type from `Workflow::<TState>::create`.
    pub state_type_name: Option<String>,
    pub steps: Vec<StepModel>,
    pub loops: Vec<LoopModel>,
    pub branches: Vec<BranchModel>,
    pub forks: Vec<ForkModel>,
    pub approvals: Vec<ApprovalModel>,
    pub failure_handlers: Vec<FailureHandlerModel>,
    pub context_bindings: Vec<ContextBindingModel>,
    pub has_any_validation: bool,
}

impl WorkflowModel {
    /// An empty model for the given name; extraction fills the rest.
    pub fn named(workflow_name: &str) -> Self {
        Self {
            workflow_name: workflow_name.to_string(),
            pascal_name: naming::pascal_identifier(workflow_name),
            module_path: None,
            version: 1,
            state_type_name: None,
            steps: Vec::new(),
            loops: Vec::new(),
            branches: Vec::new(),
            forks: Vec::new(),
            approvals: Vec::new(),
            failure_handlers: Vec::new(),
            context_bindings: Vec::new(),
            has_any_validation: false,
        }
    }

    /// `<PascalName>Saga`, versioned as `<PascalName>SagaV<n>` for n > 1.
    pub fn saga_type_name(&self) -> String {
        if self.version <= 1 {
            format!("{}Saga", self.pascal_name)
        } else {
            format!("{}SagaV{}", self.pascal_name, self.version)
        }
    }

    /// `<StateSimpleName>Reducer`, when a state type is declared.
    pub fn reducer_type_name(&self) -> Option<String> {
        self.state_type_name
            .as_deref()
            .map(|t| format!("{}Reducer", naming::simple_type_name(t)))
    }

    /// Simple name of the state type, when declared.
    pub fn state_simple_name(&self) -> Option<&str> {
        self.state_type_name.as_deref().map(naming::simple_type_name)
    }

    /// Steps deduplicated by phase name, first occurrence kept. Applying
    /// this to an already-deduplicated list is a no-op.
    pub fn dedup_steps(steps: &[StepModel]) -> Vec<StepModel> {
        let mut seen = Vec::new();
        let mut out = Vec::new();
        for step in steps {
            let phase = step.phase_name();
            if !seen.contains(&phase) {
                seen.push(phase);
                out.push(step.clone());
            }
        }
        out
    }

    /// Distinct step type simple names in first-occurrence order. Commands,
    /// events, and worker handlers are shared at this granularity.
    pub fn distinct_step_types(&self) -> Vec<&StepModel> {
        let mut seen = Vec::new();
        let mut out = Vec::new();
        for step in &self.steps {
            if !seen.contains(&step.step_name.as_str()) {
                seen.push(step.step_name.as_str());
                out.push(step);
            }
        }
        out
    }

    /// Find a step by phase name.
    pub fn step_by_phase(&self, phase: &str) -> Option<&StepModel> {
        self.steps.iter().find(|s| s.phase_name() == phase)
    }
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;
