// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Extraction pipeline: runs every extractor and assembles the model.

use crate::context::ParseContext;
use crate::error::ExtractError;
use crate::{
    approvals, branches, context_bindings, diagnostics, failures, forks, loops, steps,
};
use sg_model::{
    CancelFlag, Diagnostic, PropertyKind, StateModel, StatePropertyModel, StepModel, WorkflowModel,
};
use sg_syntax::{StateDecl, StateMarker, TypeIndex, WorkflowDecl};

/// Everything one declaration produced: the model, the raw step list (for
/// duplicate analysis), and the diagnostics.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub model: WorkflowModel,
    pub raw_steps: Vec<StepModel>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Extraction {
    /// True when a fatal diagnostic prevents emission of this workflow.
    pub fn is_emittable(&self) -> bool {
        !self.diagnostics.iter().any(Diagnostic::is_fatal)
    }
}

/// Run the full extraction pipeline over one workflow declaration.
pub fn extract_workflow(
    decl: &WorkflowDecl,
    types: &TypeIndex,
    cancel: CancelFlag,
) -> Result<Extraction, ExtractError> {
    let ctx = ParseContext::create(decl, types, cancel)?;

    // 1. Steps first: phase identity drives everything downstream.
    let lists = steps::extract_steps(&ctx)?;

    // 2. Control-flow constructs, each an independent pass.
    let loops = loops::extract_loops(&ctx)?;
    let branches = branches::extract_branches(&ctx)?;
    let forks = forks::extract_forks(&ctx)?;
    let approvals = approvals::extract_approvals(&ctx)?;
    let failure_handlers = failures::extract_failure_handlers(&ctx)?;
    let context_bindings = context_bindings::extract_context_bindings(&ctx)?;

    // 3. Workflow identity: the attribute name wins, the create literal
    //    is the fallback.
    let create = ctx
        .arena()
        .all_named("create")
        .first()
        .map(|id| ctx.arena().get(*id).clone());
    let workflow_name = if decl.workflow_name.trim().is_empty() {
        create
            .as_ref()
            .and_then(|inv| inv.first_string_arg())
            .unwrap_or_default()
            .to_string()
    } else {
        decl.workflow_name.clone()
    };

    // 4. State type from `Workflow::<TState>::create`.
    let state_type_name = create
        .as_ref()
        .and_then(|inv| inv.type_arguments.first().cloned())
        .map(|ty| types.resolve(&ty).fully_qualified_name);

    // 5. Assemble the immutable model.
    let mut model = WorkflowModel::named(&workflow_name);
    model.module_path = decl.module_path.clone();
    model.version = decl.version.max(1);
    model.state_type_name = state_type_name;
    model.has_any_validation = lists.steps.iter().any(StepModel::has_validation);
    model.steps = lists.steps;
    model.loops = loops;
    model.branches = branches;
    model.forks = forks;
    model.approvals = approvals;
    model.failure_handlers = failure_handlers;
    model.context_bindings = context_bindings;

    // 6. Structural diagnostics over the raw extraction.
    let diagnostics = diagnostics::check_workflow(&ctx, &model.workflow_name, &lists.raw)?;
    tracing::debug!(
        workflow = %model.workflow_name,
        steps = model.steps.len(),
        diagnostics = diagnostics.len(),
        "extracted workflow"
    );

    Ok(Extraction {
        model,
        raw_steps: lists.raw,
        diagnostics,
    })
}

/// Extract the reducer IR for one `#[workflow_state]` declaration.
pub fn extract_state(decl: &StateDecl) -> (StateModel, Vec<Diagnostic>) {
    let properties = decl
        .fields
        .iter()
        .map(|field| StatePropertyModel {
            name: field.name.clone(),
            type_name: field.type_name.clone(),
            kind: match field.marker {
                Some(StateMarker::Append) => PropertyKind::Append,
                Some(StateMarker::Merge) => PropertyKind::Merge,
                None => PropertyKind::Standard,
            },
        })
        .collect();
    let model = StateModel {
        type_name: decl.type_name.clone(),
        module_path: decl.module_path.clone(),
        properties,
    };
    let diagnostics = diagnostics::check_state(decl);
    (model, diagnostics)
}

#[cfg(test)]
#[path = "assemble_tests.rs"]
mod tests;
