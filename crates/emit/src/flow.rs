// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Flow graph: resolves each phase's successor from the IR constructs.
//!
//! This is the single source of truth the transitions, saga, and diagram
//! emitters share, so the three artifacts can never disagree about an
//! edge.

use sg_model::{
    phase_name, ApprovalModel, BranchModel, ForkModel, LoopModel, StepContext, StepModel,
    WorkflowModel,
};
use std::collections::HashSet;

/// What happens after a step's completion event is reduced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Successor<'a> {
    /// Dispatch the next phase's start command.
    Step(String),
    /// Route through a branch switch on the discriminator.
    Branch(&'a BranchModel),
    /// Dispatch every path's first step and arm the outstanding counter.
    Fork(&'a ForkModel),
    /// Loop guard: max-iteration check, exit predicate, iterate or leave.
    LoopCheck(&'a LoopModel),
    /// Decrement the fork's outstanding counter; dispatch the join at zero.
    JoinSignal(&'a ForkModel),
    /// Park on an approval gate.
    Approval(&'a ApprovalModel),
    /// End of a failure/rejection/escalation sub-path. `failure` marks
    /// failure-compensation paths (which end in the `Failed` phase).
    HandlerEnd { terminal: bool, failure: bool },
    /// Terminal step: mark the workflow completed.
    Complete,
}

/// Shared successor resolution over one workflow model.
pub struct FlowGraph<'a> {
    model: &'a WorkflowModel,
    handler_steps: HashSet<String>,
}

impl<'a> FlowGraph<'a> {
    pub fn build(model: &'a WorkflowModel) -> Self {
        let mut handler_steps = HashSet::new();
        for handler in &model.failure_handlers {
            handler_steps.extend(handler.step_names.iter().cloned());
        }
        for fork in &model.forks {
            for path in &fork.paths {
                if let Some(steps) = &path.failure_handler_step_names {
                    handler_steps.extend(steps.iter().cloned());
                }
            }
        }
        for approval in &model.approvals {
            collect_approval_handler_steps(approval, &mut handler_steps);
        }
        Self {
            model,
            handler_steps,
        }
    }

    /// The phase entered from `NotStarted`.
    pub fn first_phase(&self) -> Option<String> {
        self.model
            .steps
            .iter()
            .find(|s| self.is_main_flow(s))
            .map(StepModel::phase_name)
    }

    /// Whether a phase belongs to a failure/rejection/escalation sub-path.
    pub fn is_handler_phase(&self, step: &StepModel) -> bool {
        self.handler_steps.contains(step.effective_name())
    }

    fn is_main_flow(&self, step: &StepModel) -> bool {
        step.context == StepContext::Linear && !self.is_handler_phase(step)
    }

    /// Resolve what follows `step`'s completion.
    pub fn successor(&self, step: &StepModel) -> Successor<'a> {
        let phase = step.phase_name();

        if let Some(branch) = self
            .model
            .branches
            .iter()
            .find(|b| b.previous_step_name == phase)
        {
            return Successor::Branch(branch);
        }
        if let Some(fork) = self
            .model
            .forks
            .iter()
            .find(|f| f.previous_step_name == phase)
        {
            return Successor::Fork(fork);
        }
        if let Some(approval) = self
            .model
            .approvals
            .iter()
            .find(|a| a.preceding_step_name == phase)
        {
            return Successor::Approval(approval);
        }
        if let Some(l) = self.model.loops.iter().find(|l| {
            step.loop_name.as_deref() == Some(l.full_prefix().as_str())
                && step.effective_name() == l.last_body_step_name
        }) {
            return Successor::LoopCheck(l);
        }
        if step.context == StepContext::ForkPath {
            if let Some(successor) = self.fork_path_successor(step) {
                return successor;
            }
        }
        if step.context == StepContext::BranchPath {
            if let Some(successor) = self.branch_case_successor(step) {
                return successor;
            }
        }
        if self.is_handler_phase(step) {
            if let Some(successor) = self.handler_successor(step) {
                return successor;
            }
        }
        self.next_main_flow_after(step)
            .map(Successor::Step)
            .unwrap_or(Successor::Complete)
    }

    fn fork_path_successor(&self, step: &StepModel) -> Option<Successor<'a>> {
        let effective = step.effective_name();
        for fork in &self.model.forks {
            for path in &fork.paths {
                let Some(pos) = path.step_names.iter().position(|n| n == effective) else {
                    continue;
                };
                return Some(match path.step_names.get(pos + 1) {
                    Some(next) => {
                        Successor::Step(phase_name(step.loop_name.as_deref(), next))
                    }
                    None => Successor::JoinSignal(fork),
                });
            }
        }
        None
    }

    fn branch_case_successor(&self, step: &StepModel) -> Option<Successor<'a>> {
        let effective = step.effective_name();
        for head in &self.model.branches {
            let mut branch = Some(head);
            while let Some(b) = branch {
                if b.loop_prefix.as_deref() == step.loop_name.as_deref() {
                    for case in &b.cases {
                        let Some(pos) = case.step_names.iter().position(|n| n == effective)
                        else {
                            continue;
                        };
                        if let Some(next) = case.step_names.get(pos + 1) {
                            return Some(Successor::Step(phase_name(
                                step.loop_name.as_deref(),
                                next,
                            )));
                        }
                        if case.is_terminal {
                            return Some(Successor::Complete);
                        }
                        // The selected case flows into the consecutive
                        // branch before rejoining.
                        if let Some(next_branch) = b.next_consecutive_branch.as_deref() {
                            return Some(Successor::Branch(next_branch));
                        }
                        return Some(match &b.rejoin_step_name {
                            Some(rejoin) => Successor::Step(rejoin.clone()),
                            None => Successor::Complete,
                        });
                    }
                }
                branch = b.next_consecutive_branch.as_deref();
            }
        }
        None
    }

    fn handler_successor(&self, step: &StepModel) -> Option<Successor<'a>> {
        let effective = step.effective_name();
        for handler in &self.model.failure_handlers {
            if let Some(s) =
                sub_path_successor(&handler.step_names, effective, handler.is_terminal, true)
            {
                return Some(s);
            }
        }
        for fork in &self.model.forks {
            for path in &fork.paths {
                let Some(steps) = &path.failure_handler_step_names else {
                    continue;
                };
                if let Some(s) =
                    sub_path_successor(steps, effective, path.is_terminal_on_failure, true)
                {
                    return Some(s);
                }
            }
        }
        for approval in &self.model.approvals {
            if let Some(s) = approval_sub_path_successor(approval, effective) {
                return Some(s);
            }
        }
        None
    }

    fn next_main_flow_after(&self, step: &StepModel) -> Option<String> {
        let phase = step.phase_name();
        let index = self
            .model
            .steps
            .iter()
            .position(|s| s.phase_name() == phase)?;
        self.model.steps[index + 1..]
            .iter()
            .find(|s| self.is_main_flow(s))
            .map(StepModel::phase_name)
    }

    /// The main-flow phase an approval resumes on approval.
    pub fn approval_continuation(&self, approval: &ApprovalModel) -> Option<String> {
        let index = self
            .model
            .steps
            .iter()
            .position(|s| s.phase_name() == approval.preceding_step_name)?;
        self.model.steps[index + 1..]
            .iter()
            .find(|s| self.is_main_flow(s))
            .map(StepModel::phase_name)
    }

    /// The loop enclosing `l`, if any.
    pub fn parent_loop(&self, l: &LoopModel) -> Option<&'a LoopModel> {
        let parent = l.parent_loop_name.as_deref()?;
        self.model.loops.iter().find(|p| p.full_prefix() == parent)
    }

    /// Where control goes when `l` exits: the nearest continuation walking
    /// outward through enclosing loops, or completion.
    pub fn loop_exit_target(&self, l: &LoopModel) -> Option<String> {
        let mut current = Some(l);
        while let Some(cursor) = current {
            if let Some(continuation) = &cursor.continuation_step_name {
                return Some(continuation.clone());
            }
            current = self.parent_loop(cursor);
        }
        None
    }

    /// Phase of a loop-body step.
    pub fn loop_phase(&self, l: &LoopModel, step_name: &str) -> String {
        phase_name(Some(&l.full_prefix()), step_name)
    }
}

fn sub_path_successor<'a>(
    steps: &[String],
    effective: &str,
    terminal: bool,
    failure: bool,
) -> Option<Successor<'a>> {
    let pos = steps.iter().position(|n| n == effective)?;
    Some(match steps.get(pos + 1) {
        Some(next) => Successor::Step(next.clone()),
        None => Successor::HandlerEnd { terminal, failure },
    })
}

fn approval_sub_path_successor<'a>(
    approval: &ApprovalModel,
    effective: &str,
) -> Option<Successor<'a>> {
    if let Some(s) = sub_path_successor(
        &approval.rejection_steps,
        effective,
        approval.is_rejection_terminal,
        false,
    ) {
        return Some(s);
    }
    if let Some(s) = sub_path_successor(
        &approval.escalation_steps,
        effective,
        approval.is_escalation_terminal,
        false,
    ) {
        return Some(s);
    }
    for nested in &approval.nested_escalation_approvals {
        if let Some(s) = approval_sub_path_successor(nested, effective) {
            return Some(s);
        }
    }
    None
}

fn collect_approval_handler_steps(approval: &ApprovalModel, out: &mut HashSet<String>) {
    out.extend(approval.rejection_steps.iter().cloned());
    out.extend(approval.escalation_steps.iter().cloned());
    for nested in &approval.nested_escalation_approvals {
        collect_approval_handler_steps(nested, out);
    }
}

#[cfg(test)]
#[path = "flow_tests.rs"]
mod tests;
