// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command emitter: the Message Tripling record set.
//!
//! Per phase, a saga-routed `Start<Phase>Command`. Per step type, the
//! legacy `Execute<Type>Command` and the worker-routed
//! `Execute<Type>WorkerCommand` carrying the state snapshot. Plus the
//! workflow-initiation command and the dispatch enum the saga's routing
//! handlers return.

use crate::names;
use crate::writer::CodeWriter;
use sg_model::WorkflowModel;

const RECORD_DERIVES: &str =
    "#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]";

pub fn emit_commands(model: &WorkflowModel) -> String {
    let mut w = CodeWriter::with_header();
    let state = model.state_simple_name().unwrap_or("serde_json::Value");

    // Workflow initiation.
    w.line(format!(
        "/// Starts a new `{}` workflow instance.",
        model.workflow_name
    ));
    w.line(RECORD_DERIVES);
    w.open(format!("pub struct {} {{", names::start_workflow_command(model)));
    w.line("pub workflow_id: uuid::Uuid,");
    w.line(format!("pub initial_state: {state},"));
    w.close("}");

    // Saga-routed start commands, one per phase.
    for step in &model.steps {
        let phase = step.phase_name();
        w.blank();
        w.line(RECORD_DERIVES);
        w.open(format!("pub struct {} {{", names::start_command(&phase)));
        w.line("pub workflow_id: uuid::Uuid,");
        w.close("}");
    }

    // Worker-routed commands, one pair per step type.
    for step in model.distinct_step_types() {
        let ty = &step.step_name;
        w.blank();
        w.line("/// Legacy execution command; kept for wire compatibility.");
        w.line(RECORD_DERIVES);
        w.open(format!("pub struct {} {{", names::execute_command(ty)));
        w.line("pub workflow_id: uuid::Uuid,");
        w.line("pub step_execution_id: uuid::Uuid,");
        w.close("}");
        w.blank();
        w.line("/// Worker-routed command carrying the state snapshot, so the");
        w.line("/// saga's persisted state never races the worker.");
        w.line(RECORD_DERIVES);
        w.open(format!("pub struct {} {{", names::worker_command(ty)));
        w.line("pub workflow_id: uuid::Uuid,");
        w.line("pub step_execution_id: uuid::Uuid,");
        w.line(format!("pub state: {state},"));
        w.close("}");
    }

    // The heterogeneous return type for routing handlers.
    w.blank();
    w.line("/// Every message a saga handler can return; routing handlers");
    w.line("/// (branches, forks, approvals) dispatch through this enum.");
    w.line("#[allow(non_camel_case_types)]");
    w.line(RECORD_DERIVES);
    w.open(format!("pub enum {} {{", names::message_enum(model)));
    for step in &model.steps {
        let phase = step.phase_name();
        w.line(format!("Start{phase}({}),", names::start_command(&phase)));
    }
    for step in model.distinct_step_types() {
        let ty = &step.step_name;
        w.line(format!("Execute{ty}Worker({}),", names::worker_command(ty)));
    }
    w.line(format!("Completed({}Completed),", model.pascal_name));
    if model.has_any_validation {
        w.line(format!(
            "ValidationFailed({}ValidationFailed),",
            model.pascal_name
        ));
    }
    w.close("}");
    w.finish()
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
