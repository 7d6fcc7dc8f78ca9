// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mermaid state-diagram emitter.

use crate::flow::{FlowGraph, Successor};
use crate::writer::{CodeWriter, BUILD_VERSION};
use sg_model::WorkflowModel;

pub fn emit_mermaid(model: &WorkflowModel) -> String {
    let graph = FlowGraph::build(model);
    let mut w = CodeWriter::new();

    w.line(format!("# {} — state diagram", model.workflow_name));
    w.blank();
    w.line(format!("Generated by {BUILD_VERSION}."));
    w.blank();
    w.line("```mermaid");
    w.line("stateDiagram-v2");

    // Terminal state declarations.
    w.line("    state Failed");
    if model.has_any_validation {
        w.line("    state ValidationFailed");
    }
    for branch in &model.branches {
        declare_choices(&mut w, branch);
    }

    if let Some(first) = graph.first_phase() {
        w.line(format!("    [*] --> {first}"));
    }

    for step in &model.steps {
        let phase = step.phase_name();
        match graph.successor(step) {
            Successor::Step(next) => w.line(format!("    {phase} --> {next}")),
            Successor::Branch(branch) => {
                w.line(format!("    {phase} --> {}", branch.branch_id));
            }
            Successor::Fork(fork) => {
                for path in &fork.paths {
                    if let Some(first) = path.step_names.first() {
                        let target = sg_model::phase_name(step.loop_name.as_deref(), first);
                        w.line(format!("    {phase} --> {target}"));
                    }
                }
            }
            Successor::LoopCheck(l) => {
                let first = graph.loop_phase(l, &l.first_body_step_name);
                w.line(format!("    {phase} --> {first} : continue"));
                match graph.loop_exit_target(l) {
                    Some(exit) => w.line(format!("    {phase} --> {exit} : exit")),
                    None => w.line(format!("    {phase} --> [*] : exit")),
                }
            }
            Successor::JoinSignal(fork) => {
                w.line(format!("    {phase} --> {}", fork.join_step_name));
            }
            Successor::Approval(approval) => {
                w.line(format!("    {phase} --> {}", approval.approval_point_name));
            }
            Successor::HandlerEnd { .. } | Successor::Complete => {
                w.line(format!("    {phase} --> [*]"));
            }
        }
        w.line(format!("    {phase} --> Failed"));
        if step.has_validation() {
            w.line(format!("    {phase} --> ValidationFailed : guard failed"));
        }
    }

    // Branch case edges off the choice nodes.
    for branch in &model.branches {
        branch_edges(&mut w, branch);
    }

    // Approval outcome edges.
    for approval in &model.approvals {
        approval_edges(&mut w, &graph, approval);
    }

    // Loop annotations.
    for l in &model.loops {
        let first = graph.loop_phase(l, &l.first_body_step_name);
        w.line(format!(
            "    note right of {first} : Loop: {} (max {})",
            l.loop_name, l.max_iterations
        ));
    }

    w.line("```");
    w.finish()
}

fn declare_choices(w: &mut CodeWriter, branch: &sg_model::BranchModel) {
    w.line(format!("    state {} <<choice>>", branch.branch_id));
    if let Some(next) = branch.next_consecutive_branch.as_deref() {
        declare_choices(w, next);
    }
}

fn branch_edges(w: &mut CodeWriter, branch: &sg_model::BranchModel) {
    for case in &branch.cases {
        let Some(first) = case.step_names.first() else {
            continue;
        };
        let target = sg_model::phase_name(branch.loop_prefix.as_deref(), first);
        let label = case
            .case_value_literal
            .trim_matches('"')
            .replace("::", ".");
        w.line(format!("    {} --> {target} : {label}", branch.branch_id));
    }
    if let Some(next) = branch.next_consecutive_branch.as_deref() {
        branch_edges(w, next);
    }
}

fn approval_edges(
    w: &mut CodeWriter,
    graph: &FlowGraph<'_>,
    approval: &sg_model::ApprovalModel,
) {
    let name = &approval.approval_point_name;
    if let Some(continuation) = graph.approval_continuation(approval) {
        w.line(format!("    {name} --> {continuation} : approved"));
    } else {
        w.line(format!("    {name} --> [*] : approved"));
    }
    if let Some(first) = approval.rejection_steps.first() {
        w.line(format!("    {name} --> {first} : rejected"));
    }
    if let Some(first) = approval.escalation_steps.first() {
        w.line(format!("    {name} --> {first} : timed out"));
    }
    for nested in &approval.nested_escalation_approvals {
        w.line(format!(
            "    {name} --> {} : escalated",
            nested.approval_point_name
        ));
        approval_edges(w, graph, nested);
    }
}

#[cfg(test)]
#[path = "mermaid_tests.rs"]
mod tests;
