// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Phase enumeration emitter.

use crate::names;
use crate::writer::CodeWriter;
use sg_model::WorkflowModel;

/// Every phase variant in emission order: `NotStarted`, one per step
/// phase, approval-point phases, then the terminal sinks.
pub(crate) fn phase_variants(model: &WorkflowModel) -> Vec<String> {
    let mut out = vec!["NotStarted".to_string()];
    for step in &model.steps {
        out.push(step.phase_name());
    }
    for approval in &model.approvals {
        push_approval_phases(approval, &mut out);
    }
    out.push("Completed".to_string());
    out.push("Failed".to_string());
    if model.has_any_validation {
        out.push("ValidationFailed".to_string());
    }
    out
}

fn push_approval_phases(approval: &sg_model::ApprovalModel, out: &mut Vec<String>) {
    for phase in names::approval_phases(approval) {
        if !out.contains(&phase) {
            out.push(phase);
        }
    }
    for nested in &approval.nested_escalation_approvals {
        push_approval_phases(nested, out);
    }
}

pub fn emit_phase(model: &WorkflowModel) -> String {
    let mut w = CodeWriter::with_header();
    let enum_name = names::phase_enum(model);

    w.line(format!(
        "/// Durable position of a `{}` workflow instance.",
        model.workflow_name
    ));
    w.line("///");
    w.line("/// Serialized by variant name; renaming a variant is a breaking");
    w.line("/// change for stored instances.");
    w.line("#[allow(non_camel_case_types)]");
    w.line("#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]");
    w.open(format!("pub enum {enum_name} {{"));
    for (index, variant) in phase_variants(model).iter().enumerate() {
        if index == 0 {
            w.line("#[default]");
        }
        w.line(format!("{variant},"));
    }
    w.close("}");
    w.finish()
}

#[cfg(test)]
#[path = "phase_tests.rs"]
mod tests;
