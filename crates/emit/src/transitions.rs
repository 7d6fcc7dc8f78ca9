// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transition-table emitter.

use crate::flow::{FlowGraph, Successor};
use crate::names;
use crate::writer::CodeWriter;
use indexmap::IndexMap;
use sg_model::WorkflowModel;

/// Compute the full transition map in phase order. Terminal sinks map to
/// the empty set.
pub(crate) fn transition_map(model: &WorkflowModel) -> IndexMap<String, Vec<String>> {
    let graph = FlowGraph::build(model);
    let mut map: IndexMap<String, Vec<String>> = IndexMap::new();

    let first = graph.first_phase();
    map.insert(
        "NotStarted".to_string(),
        first.clone().into_iter().collect(),
    );

    for step in &model.steps {
        let phase = step.phase_name();
        let mut targets = Vec::new();
        match graph.successor(step) {
            Successor::Step(next) => targets.push(next),
            Successor::Branch(branch) => {
                for case in &branch.cases {
                    if let Some(first) = case.step_names.first() {
                        targets.push(sg_model::phase_name(
                            branch.loop_prefix.as_deref(),
                            first,
                        ));
                    }
                }
            }
            Successor::Fork(fork) => {
                for path in &fork.paths {
                    if let Some(first) = path.step_names.first() {
                        targets.push(sg_model::phase_name(step.loop_name.as_deref(), first));
                    }
                }
            }
            Successor::LoopCheck(l) => {
                targets.push(graph.loop_phase(l, &l.first_body_step_name));
                targets.push(
                    graph
                        .loop_exit_target(l)
                        .unwrap_or_else(|| "Completed".to_string()),
                );
            }
            Successor::JoinSignal(fork) => targets.push(fork.join_step_name.clone()),
            Successor::Approval(approval) => {
                targets.push(approval.approval_point_name.clone());
            }
            Successor::HandlerEnd { failure, .. } => {
                targets.push(if failure { "Failed" } else { "Completed" }.to_string());
            }
            Successor::Complete => targets.push("Completed".to_string()),
        }
        targets.push("Failed".to_string());
        if step.has_validation() {
            targets.push("ValidationFailed".to_string());
        }
        dedup_in_place(&mut targets);
        map.insert(phase, targets);
    }

    for approval in &model.approvals {
        insert_approval_transitions(&graph, approval, &mut map);
    }

    map.insert("Completed".to_string(), Vec::new());
    map.insert("Failed".to_string(), Vec::new());
    if model.has_any_validation {
        map.insert("ValidationFailed".to_string(), Vec::new());
    }
    map
}

fn insert_approval_transitions(
    graph: &FlowGraph<'_>,
    approval: &sg_model::ApprovalModel,
    map: &mut IndexMap<String, Vec<String>>,
) {
    let name = &approval.approval_point_name;
    let mut outcomes = vec![format!("{name}Approved")];
    if approval.has_rejection_handler() {
        outcomes.push(format!("{name}Rejected"));
    }
    if approval.has_escalation_handler() {
        outcomes.push(format!("{name}TimedOut"));
    }
    if !approval.nested_escalation_approvals.is_empty() {
        outcomes.push(format!("{name}Escalated"));
    }
    map.insert(name.clone(), outcomes);

    let continuation = graph
        .approval_continuation(approval)
        .unwrap_or_else(|| "Completed".to_string());
    map.insert(format!("{name}Approved"), vec![continuation]);

    if approval.has_rejection_handler() {
        let target = approval
            .rejection_steps
            .first()
            .cloned()
            .unwrap_or_else(|| "Completed".to_string());
        map.insert(format!("{name}Rejected"), vec![target]);
    }
    if approval.has_escalation_handler() {
        let target = approval
            .escalation_steps
            .first()
            .cloned()
            .or_else(|| {
                approval
                    .nested_escalation_approvals
                    .first()
                    .map(|n| n.approval_point_name.clone())
            })
            .unwrap_or_else(|| "Completed".to_string());
        map.insert(format!("{name}TimedOut"), vec![target]);
    }
    if !approval.nested_escalation_approvals.is_empty() {
        let targets = approval
            .nested_escalation_approvals
            .iter()
            .map(|n| n.approval_point_name.clone())
            .collect();
        map.insert(format!("{name}Escalated"), targets);
    }
    for nested in &approval.nested_escalation_approvals {
        insert_approval_transitions(graph, nested, map);
    }
}

fn dedup_in_place(targets: &mut Vec<String>) {
    let mut seen = Vec::new();
    targets.retain(|t| {
        if seen.contains(t) {
            false
        } else {
            seen.push(t.clone());
            true
        }
    });
}

pub fn emit_transitions(model: &WorkflowModel) -> String {
    let mut w = CodeWriter::with_header();
    let enum_name = names::phase_enum(model);
    let map = transition_map(model);

    w.line(format!(
        "use super::{enum_name};"
    ));
    w.blank();
    w.line(format!(
        "/// Phases reachable from `from` in one transition of the `{}`",
        model.workflow_name
    ));
    w.line("/// workflow. Terminal sinks return the empty slice.");
    w.open(format!(
        "pub fn valid_transitions(from: {enum_name}) -> &'static [{enum_name}] {{"
    ));
    w.open("match from {");
    for (from, targets) in &map {
        if targets.is_empty() {
            w.line(format!("{enum_name}::{from} => &[],"));
        } else {
            let list = targets
                .iter()
                .map(|t| format!("{enum_name}::{t}"))
                .collect::<Vec<_>>()
                .join(", ");
            w.line(format!("{enum_name}::{from} => &[{list}],"));
        }
    }
    w.close("}");
    w.close("}");
    w.blank();
    w.open(format!(
        "pub fn is_valid_transition(from: {enum_name}, to: {enum_name}) -> bool {{"
    ));
    w.line("valid_transitions(from).contains(&to)");
    w.close("}");
    w.finish()
}

#[cfg(test)]
#[path = "transitions_tests.rs"]
mod tests;
