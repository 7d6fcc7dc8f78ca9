// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event emitter.

use crate::names;
use crate::writer::CodeWriter;
use sg_model::WorkflowModel;

const RECORD_DERIVES: &str =
    "#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]";

pub fn emit_events(model: &WorkflowModel) -> String {
    let mut w = CodeWriter::with_header();
    let pascal = &model.pascal_name;
    let state = model.state_simple_name().unwrap_or("serde_json::Value");
    let trait_name = names::event_trait(model);

    w.line(format!(
        "/// Marker for every event of the `{}` workflow.",
        model.workflow_name
    ));
    w.line(format!("pub trait {trait_name} {{}}"));

    w.blank();
    w.line(RECORD_DERIVES);
    w.open(format!("pub struct {pascal}Started {{"));
    w.line("pub workflow_id: uuid::Uuid,");
    w.line("pub timestamp: chrono::DateTime<chrono::Utc>,");
    w.close("}");
    w.line(format!("impl {trait_name} for {pascal}Started {{}}"));

    for step in model.distinct_step_types() {
        let event = names::completed_event(&step.step_name);
        w.blank();
        w.line(RECORD_DERIVES);
        w.open(format!("pub struct {event} {{"));
        w.line("/// Saga identity: routes the event back to its instance.");
        w.line("pub workflow_id: uuid::Uuid,");
        w.line("pub step_execution_id: uuid::Uuid,");
        w.line(format!("pub updated_state: {state},"));
        w.line("pub confidence: Option<f64>,");
        w.line("pub timestamp: chrono::DateTime<chrono::Utc>,");
        w.close("}");
        w.line(format!("impl {trait_name} for {event} {{}}"));
    }

    w.blank();
    w.line(RECORD_DERIVES);
    w.open(format!("pub struct {pascal}Completed {{"));
    w.line("pub workflow_id: uuid::Uuid,");
    w.line("pub timestamp: chrono::DateTime<chrono::Utc>,");
    w.close("}");
    w.line(format!("impl {trait_name} for {pascal}Completed {{}}"));

    w.blank();
    w.line(RECORD_DERIVES);
    w.open(format!("pub struct {pascal}StepFailed {{"));
    w.line("pub workflow_id: uuid::Uuid,");
    w.line("pub step_name: String,");
    w.line("pub error: String,");
    w.line("pub timestamp: chrono::DateTime<chrono::Utc>,");
    w.close("}");
    w.line(format!("impl {trait_name} for {pascal}StepFailed {{}}"));

    if model.has_any_validation {
        w.blank();
        w.line("/// Emitted when a validation guard rejects a step's dispatch.");
        w.line(RECORD_DERIVES);
        w.open(format!("pub struct {pascal}ValidationFailed {{"));
        w.line("pub workflow_id: uuid::Uuid,");
        w.line("pub step_name: String,");
        w.line("pub error_message: String,");
        w.line("pub timestamp: chrono::DateTime<chrono::Utc>,");
        w.close("}");
        w.line(format!("impl {trait_name} for {pascal}ValidationFailed {{}}"));
    }

    if !model.approvals.is_empty() {
        w.blank();
        w.line("#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]");
        w.open("pub enum ApprovalOutcome {");
        w.line("Approved,");
        w.line("Rejected,");
        w.line("Escalated,");
        w.line("TimedOut,");
        w.close("}");
        w.blank();
        w.line(RECORD_DERIVES);
        w.open(format!("pub struct {pascal}ApprovalReceived {{"));
        w.line("pub workflow_id: uuid::Uuid,");
        w.line("pub approval_point: String,");
        w.line("pub outcome: ApprovalOutcome,");
        w.line("pub approver: String,");
        w.line("pub timestamp: chrono::DateTime<chrono::Utc>,");
        w.close("}");
        w.line(format!("impl {trait_name} for {pascal}ApprovalReceived {{}}"));
    }

    w.finish()
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
