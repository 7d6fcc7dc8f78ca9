// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Step model: one phase-defining invocation recovered from the chain.

use crate::naming;
use serde::{Deserialize, Serialize};

/// Structural position of a step within the workflow graph.
///
/// Linear and ForkPath steps execute unconditionally, so their phase names
/// must be unique. BranchPath steps are mutually exclusive across sibling
/// cases and may share names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepContext {
    #[default]
    Linear,
    ForkPath,
    BranchPath,
}

/// Per-step execution configuration recovered from chained configuration
/// calls (`with_retry`, `with_timeout`, `compensate`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepConfig {
    pub retry_attempts: Option<u32>,
    pub timeout: Option<String>,
    pub compensation_step_name: Option<String>,
}

impl StepConfig {
    pub fn is_empty(&self) -> bool {
        self.retry_attempts.is_none()
            && self.timeout.is_none()
            && self.compensation_step_name.is_none()
    }
}

/// A single step recovered from `start_with`/`then`/`finally`/`join`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepModel {
    /// Host type simple name (e.g. `ValidateOrder`).
    pub step_name: String,
    /// Fully-qualified step type path, no leading `::`.
    pub step_type_name: String,
    /// Explicit name override from `then::<T>("name")`.
    pub instance_name: Option<String>,
    /// Hierarchical loop prefix (e.g. `Outer_Inner`) when inside loops.
    pub loop_name: Option<String>,
    /// Verbatim guard expression text, when a `validate_state` precedes
    /// this step.
    pub validation_predicate: Option<String>,
    pub validation_error_message: Option<String>,
    pub context: StepContext,
    pub config: StepConfig,
}

impl StepModel {
    /// Create a linear step with no overrides; primarily a test convenience.
    pub fn linear(step_name: &str, step_type_name: &str) -> Self {
        Self {
            step_name: step_name.to_string(),
            step_type_name: step_type_name.to_string(),
            instance_name: None,
            loop_name: None,
            validation_predicate: None,
            validation_error_message: None,
            context: StepContext::Linear,
            config: StepConfig::default(),
        }
    }

    /// The name driving phase identity: the instance name when present,
    /// otherwise the step type's simple name.
    pub fn effective_name(&self) -> &str {
        self.instance_name.as_deref().unwrap_or(&self.step_name)
    }

    /// The phase name: loop prefix + effective name.
    pub fn phase_name(&self) -> String {
        naming::phase_name(self.loop_name.as_deref(), self.effective_name())
    }

    pub fn has_validation(&self) -> bool {
        self.validation_predicate.is_some()
    }
}

#[cfg(test)]
#[path = "step_tests.rs"]
mod tests;
