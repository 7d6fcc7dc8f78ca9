// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Saga emitter: the "brain" of the generated workflow.
//!
//! Handlers are emitted in twelve slices: properties, the start
//! constructor, per-phase start handlers (with validation guards), per-type
//! completion handlers (linear, branch routing, loop completion, fork
//! join, approval parking), the approval-received router, the step-failed
//! router, loop-exit helpers, not-found handlers, and the completion
//! sentinel. Validation guards use yield-style early returns, never
//! panics or `Err`.

use crate::flow::{FlowGraph, Successor};
use crate::names;
use crate::writer::CodeWriter;
use regex::Regex;
use sg_model::{ApprovalModel, BranchModel, LoopModel, StepModel, WorkflowModel};

pub fn emit_saga(model: &WorkflowModel) -> String {
    let mut w = CodeWriter::with_header();
    let graph = FlowGraph::build(model);
    let saga = model.saga_type_name();

    emit_struct(&mut w, model, &saga);
    w.blank();
    w.open(format!("impl {saga} {{"));
    emit_start(&mut w, model, &graph);
    emit_start_handlers(&mut w, model);
    emit_completion_handlers(&mut w, model, &graph);
    emit_approval_router(&mut w, model, &graph);
    emit_step_failed(&mut w, model);
    emit_loop_helpers(&mut w, model, &graph);
    emit_not_found(&mut w, model);
    w.blank();
    w.line("/// Completion sentinel; the runtime archives the instance.");
    w.open("fn mark_completed(&mut self) {");
    w.line("self.completed = true;");
    w.close("}");
    w.close("}");
    w.finish()
}

/// Rewrite a normalized predicate/selector so it reads saga state:
/// `state.total > 0` → `self.state.total > 0`.
fn rewrite_state_expr(expr: &str) -> String {
    match Regex::new(r"\bstate\b") {
        Ok(re) => re.replace_all(expr, "self.state").into_owned(),
        Err(_) => expr.to_string(),
    }
}

fn state_type(model: &WorkflowModel) -> &str {
    model.state_simple_name().unwrap_or("serde_json::Value")
}

/// `self.state = Reducer::reduce(..)` or a plain assignment when no state
/// type is declared.
fn reduce_line(model: &WorkflowModel) -> String {
    match model.reducer_type_name() {
        Some(reducer) => format!(
            "self.state = {reducer}::reduce(self.state.clone(), event.updated_state);"
        ),
        None => "self.state = event.updated_state;".to_string(),
    }
}

fn start_message(model: &WorkflowModel, phase: &str, id_expr: &str) -> String {
    format!(
        "{}::Start{phase}({} {{ workflow_id: {id_expr} }})",
        names::message_enum(model),
        names::start_command(phase)
    )
}

fn completed_message(model: &WorkflowModel, id_expr: &str) -> String {
    format!(
        "{}::Completed({}Completed {{ workflow_id: {id_expr}, timestamp: chrono::Utc::now() }})",
        names::message_enum(model),
        model.pascal_name
    )
}

// --- properties -----------------------------------------------------------

fn emit_struct(w: &mut CodeWriter, model: &WorkflowModel, saga: &str) {
    let phase_enum = names::phase_enum(model);
    w.line(format!(
        "/// Brain of the `{}` workflow: serialized per instance, advanced",
        model.workflow_name
    ));
    w.line("/// one message at a time. Workers carry the muscle.");
    w.line("#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, sagarun::Saga)]");
    w.open(format!("pub struct {saga} {{"));
    w.line("#[saga(identity)]");
    w.line("pub workflow_id: uuid::Uuid,");
    w.line("/// Optimistic-concurrency counter; the store rejects stale writes.");
    w.line("#[saga(version)]");
    w.line("pub version: u64,");
    w.line(format!("pub phase: {phase_enum},"));
    w.line(format!("pub state: {},", state_type(model)));
    w.line("pub started_at: chrono::DateTime<chrono::Utc>,");
    for l in &model.loops {
        w.line(format!("pub {}: u32,", names::iteration_field(l)));
    }
    for fork in &model.forks {
        w.line(format!("pub {}: u32,", names::outstanding_field(&fork.fork_id)));
    }
    w.line("/// Archival flag consumed by the runtime.");
    w.line("pub completed: bool,");
    w.close("}");
}

// --- start ----------------------------------------------------------------

fn emit_start(w: &mut CodeWriter, model: &WorkflowModel, graph: &FlowGraph<'_>) {
    let Some(first) = graph.first_phase() else {
        return;
    };
    let phase_enum = names::phase_enum(model);
    w.line("/// Start a new instance. The saga row and the first step's command");
    w.line("/// are persisted in one atomic commit.");
    w.open(format!(
        "pub fn start(command: {}) -> (Self, {}) {{",
        names::start_workflow_command(model),
        names::start_command(&first)
    ));
    w.open("let saga = Self {");
    w.line("workflow_id: command.workflow_id,");
    w.line("version: 0,");
    w.line(format!("phase: {phase_enum}::NotStarted,"));
    w.line("state: command.initial_state,");
    w.line("started_at: chrono::Utc::now(),");
    for l in &model.loops {
        w.line(format!("{}: 0,", names::iteration_field(l)));
    }
    for fork in &model.forks {
        w.line(format!("{}: 0,", names::outstanding_field(&fork.fork_id)));
    }
    w.line("completed: false,");
    w.close("};");
    w.line(format!(
        "let first = {} {{ workflow_id: command.workflow_id }};",
        names::start_command(&first)
    ));
    w.line("(saga, first)");
    w.close("}");
}

// --- start-phase handlers -------------------------------------------------

fn emit_start_handlers(w: &mut CodeWriter, model: &WorkflowModel) {
    for step in &model.steps {
        let phase = step.phase_name();
        let method = names::phase_method(&phase);
        let phase_enum = names::phase_enum(model);
        let worker = names::worker_command(&step.step_name);
        let command = names::start_command(&phase);
        w.blank();
        if step.has_validation() {
            emit_validating_start_handler(w, model, step, &phase);
            continue;
        }
        w.open(format!(
            "pub fn handle_start_{method}(&mut self, command: {command}) -> {worker} {{"
        ));
        w.line(format!("self.phase = {phase_enum}::{phase};"));
        w.open(format!("{worker} {{"));
        w.line("workflow_id: command.workflow_id,");
        w.line("step_execution_id: uuid::Uuid::new_v4(),");
        w.line("state: self.state.clone(),");
        w.close("}");
        w.close("}");
    }
}

/// Guarded start handler: a lazy message sequence. On guard failure the
/// validation event is the only message; the worker command is never
/// yielded.
fn emit_validating_start_handler(
    w: &mut CodeWriter,
    model: &WorkflowModel,
    step: &StepModel,
    phase: &str,
) {
    let method = names::phase_method(phase);
    let phase_enum = names::phase_enum(model);
    let message = names::message_enum(model);
    let worker = names::worker_command(&step.step_name);
    let command = names::start_command(phase);
    let predicate = step
        .validation_predicate
        .as_deref()
        .map(rewrite_state_expr)
        .unwrap_or_else(|| "true".to_string());
    let error = step
        .validation_error_message
        .clone()
        .unwrap_or_else(|| format!("validation failed before {phase}"));

    w.open(format!(
        "pub fn handle_start_{method}(&mut self, command: {command}) -> Vec<{message}> {{"
    ));
    w.line("let mut messages = Vec::new();");
    w.line(format!("self.phase = {phase_enum}::{phase};"));
    w.open(format!("if !({predicate}) {{"));
    w.line(format!("self.phase = {phase_enum}::ValidationFailed;"));
    w.open(format!(
        "messages.push({message}::ValidationFailed({}ValidationFailed {{",
        model.pascal_name
    ));
    w.line("workflow_id: command.workflow_id,");
    w.line(format!("step_name: \"{phase}\".to_string(),"));
    w.line(format!("error_message: {error:?}.to_string(),"));
    w.line("timestamp: chrono::Utc::now(),");
    w.close("}));");
    w.line("return messages;");
    w.close("}");
    w.open(format!("messages.push({message}::Execute{}Worker({worker} {{", step.step_name));
    w.line("workflow_id: command.workflow_id,");
    w.line("step_execution_id: uuid::Uuid::new_v4(),");
    w.line("state: self.state.clone(),");
    w.close("}));");
    w.line("messages");
    w.close("}");
}

// --- completion-phase handlers --------------------------------------------

fn emit_completion_handlers(w: &mut CodeWriter, model: &WorkflowModel, graph: &FlowGraph<'_>) {
    for step_type in model.distinct_step_types() {
        let type_name = step_type.step_name.clone();
        let phases: Vec<&StepModel> = model
            .steps
            .iter()
            .filter(|s| s.step_name == type_name)
            .collect();
        let event = names::completed_event(&type_name);
        let method = names::phase_method(&type_name);
        w.blank();
        if phases.len() == 1 {
            emit_single_phase_completion(w, model, graph, phases[0], &event, &method);
        } else {
            emit_multi_phase_completion(w, model, graph, &phases, &event, &method);
        }
    }
}

/// A type serving one phase keeps the most specific return type.
fn emit_single_phase_completion(
    w: &mut CodeWriter,
    model: &WorkflowModel,
    graph: &FlowGraph<'_>,
    step: &StepModel,
    event: &str,
    method: &str,
) {
    let phase_enum = names::phase_enum(model);
    let message = names::message_enum(model);
    match graph.successor(step) {
        Successor::Step(next) => {
            w.open(format!(
                "pub fn handle_{method}_completed(&mut self, event: {event}) -> {} {{",
                names::start_command(&next)
            ));
            w.line(reduce_line(model));
            w.line(format!(
                "{} {{ workflow_id: event.workflow_id }}",
                names::start_command(&next)
            ));
            w.close("}");
        }
        Successor::Branch(branch) => {
            w.open(format!(
                "pub fn handle_{method}_completed(&mut self, event: {event}) -> {message} {{"
            ));
            w.line(reduce_line(model));
            emit_branch_switch(w, model, branch, "event.workflow_id");
            w.close("}");
        }
        Successor::Fork(fork) => {
            w.open(format!(
                "pub fn handle_{method}_completed(&mut self, event: {event}) -> Vec<{message}> {{"
            ));
            w.line(reduce_line(model));
            emit_fork_dispatch(w, model, fork, step, "event.workflow_id");
            w.close("}");
        }
        Successor::LoopCheck(l) => {
            w.open(format!(
                "pub fn handle_{method}_completed(&mut self, event: {event}) -> {message} {{"
            ));
            w.line(reduce_line(model));
            w.line(loop_check_call(l, "event.workflow_id"));
            w.close("}");
        }
        Successor::JoinSignal(fork) => {
            w.open(format!(
                "pub fn handle_{method}_completed(&mut self, event: {event}) -> Vec<{message}> {{"
            ));
            w.line(reduce_line(model));
            emit_join_signal(w, model, fork, "event.workflow_id");
            w.close("}");
        }
        Successor::Approval(approval) => {
            w.line("/// Parks on the approval gate; resumed by the approval event.");
            w.open(format!(
                "pub fn handle_{method}_completed(&mut self, event: {event}) {{"
            ));
            w.line(reduce_line(model));
            w.line(format!(
                "self.phase = {phase_enum}::{};",
                approval.approval_point_name
            ));
            w.close("}");
        }
        Successor::HandlerEnd { failure, .. } => {
            w.open(format!(
                "pub fn handle_{method}_completed(&mut self, event: {event}) -> {}Completed {{",
                model.pascal_name
            ));
            w.line(reduce_line(model));
            if failure {
                w.line(format!("self.phase = {phase_enum}::Failed;"));
            } else {
                w.line(format!("self.phase = {phase_enum}::Completed;"));
            }
            w.line("self.mark_completed();");
            w.line(format!(
                "{}Completed {{ workflow_id: event.workflow_id, timestamp: chrono::Utc::now() }}",
                model.pascal_name
            ));
            w.close("}");
        }
        Successor::Complete => {
            w.open(format!(
                "pub fn handle_{method}_completed(&mut self, event: {event}) -> {}Completed {{",
                model.pascal_name
            ));
            w.line(reduce_line(model));
            w.line(format!("self.phase = {phase_enum}::Completed;"));
            w.line("self.mark_completed();");
            w.line(format!(
                "{}Completed {{ workflow_id: event.workflow_id, timestamp: chrono::Utc::now() }}",
                model.pascal_name
            ));
            w.close("}");
        }
    }
}

/// Instance-named phases share one event type; the current phase selects
/// the route. Fork paths get identical arms, which stays correct under
/// concurrent completion.
fn emit_multi_phase_completion(
    w: &mut CodeWriter,
    model: &WorkflowModel,
    graph: &FlowGraph<'_>,
    phases: &[&StepModel],
    event: &str,
    method: &str,
) {
    let phase_enum = names::phase_enum(model);
    let message = names::message_enum(model);
    w.open(format!(
        "pub fn handle_{method}_completed(&mut self, event: {event}) -> Vec<{message}> {{"
    ));
    w.line(reduce_line(model));
    w.open("match self.phase {");
    for step in phases {
        let phase = step.phase_name();
        w.open(format!("{phase_enum}::{phase} => {{"));
        emit_successor_as_messages(w, model, graph, step, "event.workflow_id");
        w.close("}");
    }
    w.line("_ => Vec::new(),");
    w.close("}");
    w.close("}");
}

/// Emit a successor action as a `Vec<Message>`-producing block body.
fn emit_successor_as_messages(
    w: &mut CodeWriter,
    model: &WorkflowModel,
    graph: &FlowGraph<'_>,
    step: &StepModel,
    id_expr: &str,
) {
    let phase_enum = names::phase_enum(model);
    match graph.successor(step) {
        Successor::Step(next) => {
            w.line(format!("vec![{}]", start_message(model, &next, id_expr)));
        }
        Successor::Branch(branch) => {
            w.line("let routed =");
            emit_branch_switch_expr(w, model, branch, id_expr);
            w.line("vec![routed]");
        }
        Successor::Fork(fork) => emit_fork_dispatch(w, model, fork, step, id_expr),
        Successor::LoopCheck(l) => {
            w.line(format!("vec![{}]", loop_check_call(l, id_expr)));
        }
        Successor::JoinSignal(fork) => emit_join_signal(w, model, fork, id_expr),
        Successor::Approval(approval) => {
            w.line(format!(
                "self.phase = {phase_enum}::{};",
                approval.approval_point_name
            ));
            w.line("Vec::new()");
        }
        Successor::HandlerEnd { failure, .. } => {
            let terminal_phase = if failure { "Failed" } else { "Completed" };
            w.line(format!("self.phase = {phase_enum}::{terminal_phase};"));
            w.line("self.mark_completed();");
            w.line(format!("vec![{}]", completed_message(model, id_expr)));
        }
        Successor::Complete => {
            w.line(format!("self.phase = {phase_enum}::Completed;"));
            w.line("self.mark_completed();");
            w.line(format!("vec![{}]", completed_message(model, id_expr)));
        }
    }
}

// --- branch routing -------------------------------------------------------

/// The switch expression for a branch, as a returned value.
fn emit_branch_switch(
    w: &mut CodeWriter,
    model: &WorkflowModel,
    branch: &BranchModel,
    id_expr: &str,
) {
    emit_branch_match(w, model, branch, id_expr, false);
}

fn emit_branch_switch_expr(
    w: &mut CodeWriter,
    model: &WorkflowModel,
    branch: &BranchModel,
    id_expr: &str,
) {
    emit_branch_match(w, model, branch, id_expr, true);
}

fn emit_branch_match(
    w: &mut CodeWriter,
    model: &WorkflowModel,
    branch: &BranchModel,
    id_expr: &str,
    as_statement: bool,
) {
    let scrutinee = branch_scrutinee(branch);
    w.open(format!("match {scrutinee} {{"));
    let mut has_default = false;
    for case in &branch.cases {
        let target = case
            .step_names
            .first()
            .map(|first| sg_model::phase_name(branch.loop_prefix.as_deref(), first));
        let Some(target) = target else { continue };
        let value = start_message(model, &target, id_expr);
        if case.is_default() {
            has_default = true;
            w.line(format!("_ => {value},"));
        } else {
            w.line(format!("{} => {value},", case.case_value_literal));
        }
    }
    if !has_default {
        // Unmatched discriminants fall through to the rejoin, or finish.
        let fallback = match &branch.rejoin_step_name {
            Some(rejoin) => start_message(model, rejoin, id_expr),
            None => completed_message(model, id_expr),
        };
        w.line(format!("_ => {fallback},"));
    }
    if as_statement {
        w.close("};");
    } else {
        w.close("}");
    }
}

/// The match scrutinee for a branch discriminator.
fn branch_scrutinee(branch: &BranchModel) -> String {
    let path = &branch.discriminator_property_path;
    let base = if path.contains("(state)") {
        rewrite_state_expr(path)
    } else {
        format!("self.state.{path}")
    };
    let has_string_case = branch
        .cases
        .iter()
        .any(|c| c.case_value_literal.starts_with('"'));
    if has_string_case {
        format!("{base}.as_str()")
    } else {
        base
    }
}

// --- fork dispatch and join -----------------------------------------------

fn emit_fork_dispatch(
    w: &mut CodeWriter,
    model: &WorkflowModel,
    fork: &sg_model::ForkModel,
    step: &StepModel,
    id_expr: &str,
) {
    w.line(format!(
        "self.{} = {};",
        names::outstanding_field(&fork.fork_id),
        fork.paths.len()
    ));
    w.open("vec![");
    for path in &fork.paths {
        if let Some(first) = path.step_names.first() {
            let phase = sg_model::phase_name(step.loop_name.as_deref(), first);
            w.line(format!("{},", start_message(model, &phase, id_expr)));
        }
    }
    w.close("]");
}

fn emit_join_signal(
    w: &mut CodeWriter,
    model: &WorkflowModel,
    fork: &sg_model::ForkModel,
    id_expr: &str,
) {
    let field = names::outstanding_field(&fork.fork_id);
    w.line(format!("self.{field} = self.{field}.saturating_sub(1);"));
    w.open(format!("if self.{field} == 0 {{"));
    w.line(format!(
        "return vec![{}];",
        start_message(model, &fork.join_step_name, id_expr)
    ));
    w.close("}");
    w.line("Vec::new()");
}

// --- loop completion ------------------------------------------------------

/// The loop-completion entry: (a) max-iteration guard, (b) exit
/// predicate, (c) iterate. Emitted as a reusable helper so nested-loop
/// cascades can call into the outer loop's check.
fn loop_check_call(l: &LoopModel, id_expr: &str) -> String {
    format!(
        "self.check_{}_loop({id_expr})",
        names::phase_method(&l.full_prefix())
    )
}

fn emit_loop_helpers(w: &mut CodeWriter, model: &WorkflowModel, graph: &FlowGraph<'_>) {
    let message = names::message_enum(model);
    for l in &model.loops {
        let prefix_method = names::phase_method(&l.full_prefix());
        let field = names::iteration_field(l);
        let exit = names::exit_method(l);
        let first_phase = graph.loop_phase(l, &l.first_body_step_name);

        w.blank();
        w.line(format!(
            "/// Loop `{}`: guard, exit check, then iterate (innermost first).",
            l.full_prefix()
        ));
        w.open(format!(
            "fn check_{prefix_method}_loop(&mut self, workflow_id: uuid::Uuid) -> {message} {{"
        ));
        w.open(format!("if self.{field} >= {} {{", l.max_iterations));
        w.line(format!("return self.exit_{prefix_method}_loop(workflow_id);"));
        w.close("}");
        w.open(format!("if self.{exit}() {{"));
        w.line(format!("return self.exit_{prefix_method}_loop(workflow_id);"));
        w.close("}");
        w.line(format!("self.{field} += 1;"));
        w.line(start_message(model, &first_phase, "workflow_id"));
        w.close("}");

        w.blank();
        w.open(format!(
            "fn exit_{prefix_method}_loop(&mut self, workflow_id: uuid::Uuid) -> {message} {{"
        ));
        if let Some(continuation) = &l.continuation_step_name {
            w.line(start_message(model, continuation, "workflow_id"));
        } else if let Some(parent) = graph.parent_loop(l) {
            // Exit cascades to the enclosing loop's guard and exit checks.
            w.line(format!(
                "self.check_{}_loop(workflow_id)",
                names::phase_method(&parent.full_prefix())
            ));
        } else {
            let phase_enum = names::phase_enum(model);
            w.line(format!("self.phase = {phase_enum}::Completed;"));
            w.line("self.mark_completed();");
            w.line(completed_message(model, "workflow_id"));
        }
        w.close("}");

        w.blank();
        w.line("/// Exit predicate evaluated against the current state.");
        w.open(format!("fn {exit}(&self) -> bool {{"));
        match &l.exit_condition {
            Some(condition) => w.line(rewrite_state_expr(condition)),
            None => w.line("false"),
        }
        w.close("}");
    }
}

// --- approvals ------------------------------------------------------------

fn emit_approval_router(w: &mut CodeWriter, model: &WorkflowModel, graph: &FlowGraph<'_>) {
    if model.approvals.is_empty() {
        return;
    }
    let message = names::message_enum(model);
    let pascal = &model.pascal_name;
    w.blank();
    w.line("/// Routes an approval outcome to its continuation, rejection, or");
    w.line("/// escalation sub-path.");
    w.open(format!(
        "pub fn handle_approval_received(&mut self, event: {pascal}ApprovalReceived) -> Vec<{message}> {{"
    ));
    w.open("match event.approval_point.as_str() {");
    for approval in &model.approvals {
        emit_approval_arm(w, model, graph, approval);
    }
    w.line("_ => Vec::new(),");
    w.close("}");
    w.close("}");
}

fn emit_approval_arm(
    w: &mut CodeWriter,
    model: &WorkflowModel,
    graph: &FlowGraph<'_>,
    approval: &ApprovalModel,
) {
    let phase_enum = names::phase_enum(model);
    let name = &approval.approval_point_name;
    w.open(format!("\"{name}\" => match event.outcome {{"));

    // Approved: resume the main flow.
    w.open("ApprovalOutcome::Approved => {");
    w.line(format!("self.phase = {phase_enum}::{name}Approved;"));
    match graph.approval_continuation(approval) {
        Some(continuation) => w.line(format!(
            "vec![{}]",
            start_message(model, &continuation, "event.workflow_id")
        )),
        None => {
            w.line("self.mark_completed();");
            w.line(format!(
                "vec![{}]",
                completed_message(model, "event.workflow_id")
            ));
        }
    }
    w.close("}");

    // Rejected: the rejection sub-path, or terminal completion.
    w.open("ApprovalOutcome::Rejected => {");
    if approval.has_rejection_handler() {
        w.line(format!("self.phase = {phase_enum}::{name}Rejected;"));
        match approval.rejection_steps.first() {
            Some(first) => w.line(format!(
                "vec![{}]",
                start_message(model, first, "event.workflow_id")
            )),
            None => {
                w.line("self.mark_completed();");
                w.line(format!(
                    "vec![{}]",
                    completed_message(model, "event.workflow_id")
                ));
            }
        }
    } else {
        w.line("Vec::new()");
    }
    w.close("}");

    // TimedOut: the escalation sub-path.
    w.open("ApprovalOutcome::TimedOut => {");
    if approval.has_escalation_handler() {
        w.line(format!("self.phase = {phase_enum}::{name}TimedOut;"));
        if let Some(first) = approval.escalation_steps.first() {
            w.line(format!(
                "vec![{}]",
                start_message(model, first, "event.workflow_id")
            ));
        } else if let Some(nested) = approval.nested_escalation_approvals.first() {
            w.line(format!(
                "self.phase = {phase_enum}::{};",
                nested.approval_point_name
            ));
            w.line("Vec::new()");
        } else {
            w.line("self.mark_completed();");
            w.line(format!(
                "vec![{}]",
                completed_message(model, "event.workflow_id")
            ));
        }
    } else {
        w.line("Vec::new()");
    }
    w.close("}");

    // Escalated: park on the nested gate.
    w.open("ApprovalOutcome::Escalated => {");
    match approval.nested_escalation_approvals.first() {
        Some(nested) => {
            w.line(format!(
                "self.phase = {phase_enum}::{};",
                nested.approval_point_name
            ));
            w.line("Vec::new()");
        }
        None => w.line("Vec::new()"),
    }
    w.close("}");

    w.close("},");

    for nested in &approval.nested_escalation_approvals {
        emit_approval_arm(w, model, graph, nested);
    }
}

// --- failure routing ------------------------------------------------------

fn emit_step_failed(w: &mut CodeWriter, model: &WorkflowModel) {
    let message = names::message_enum(model);
    let phase_enum = names::phase_enum(model);
    let pascal = &model.pascal_name;
    w.blank();
    w.line("/// Workflow-scope failure routing: run the failure handler when");
    w.line("/// one is declared, otherwise fail terminally.");
    w.open(format!(
        "pub fn handle_step_failed(&mut self, event: {pascal}StepFailed) -> Vec<{message}> {{"
    ));
    match model
        .failure_handlers
        .first()
        .and_then(|h| h.step_names.first())
    {
        Some(first) => {
            w.line(format!(
                "vec![{}]",
                start_message(model, first, "event.workflow_id")
            ));
        }
        None => {
            w.line(format!("self.phase = {phase_enum}::Failed;"));
            w.line("self.mark_completed();");
            w.line("Vec::new()");
        }
    }
    w.close("}");
}

// --- not-found handlers ---------------------------------------------------

fn emit_not_found(w: &mut CodeWriter, model: &WorkflowModel) {
    for step in &model.steps {
        let phase = step.phase_name();
        let method = names::phase_method(&phase);
        let command = names::start_command(&phase);
        w.blank();
        w.open(format!(
            "pub fn not_found_start_{method}(command: &{command}) {{"
        ));
        w.line(format!(
            "tracing::warn!(workflow_id = %command.workflow_id, \"orphaned {command}: saga archived\");"
        ));
        w.close("}");
    }
    for step_type in model.distinct_step_types() {
        let event = names::completed_event(&step_type.step_name);
        let method = names::phase_method(&step_type.step_name);
        w.blank();
        w.open(format!(
            "pub fn not_found_{method}_completed(event: &{event}) {{"
        ));
        w.line(format!(
            "tracing::warn!(workflow_id = %event.workflow_id, \"orphaned {event}: saga archived\");"
        ));
        w.close("}");
    }
}

#[cfg(test)]
#[path = "saga_tests.rs"]
mod tests;
