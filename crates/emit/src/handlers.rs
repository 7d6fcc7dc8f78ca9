// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker-handler emitter: the "muscle" shells.
//!
//! One handler per distinct step type; instance-named phases of the same
//! type share it. Workers receive the state snapshot in their command and
//! never touch the saga.

use crate::names;
use crate::writer::CodeWriter;
use inflector::Inflector;
use sg_model::WorkflowModel;

pub fn emit_handlers(model: &WorkflowModel) -> String {
    let mut w = CodeWriter::with_header();
    for (index, step) in model.distinct_step_types().into_iter().enumerate() {
        let ty = &step.step_name;
        let handler = names::worker_handler(ty);
        let command = names::worker_command(ty);
        let event = names::completed_event(ty);
        let field = ty.to_snake_case();
        if index > 0 {
            w.blank();
        }
        w.line(format!("/// Executes `{ty}` steps outside the saga's critical path."));
        w.open(format!("pub struct {handler} {{"));
        w.line(format!("{field}: {ty},"));
        w.close("}");
        w.blank();
        w.open(format!("impl {handler} {{"));
        w.open(format!("pub fn new({field}: {ty}) -> Self {{"));
        w.line(format!("Self {{ {field} }}"));
        w.close("}");
        w.blank();
        w.open(format!(
            "pub async fn handle(&self, command: {command}, ct: &sagarun::CancellationToken) -> {event} {{"
        ));
        w.line("let context = sagarun::StepContext::for_execution(command.step_execution_id);");
        w.line(format!(
            "let output = self.{field}.execute(command.state, context, ct).await;"
        ));
        w.open(format!("{event} {{"));
        w.line("workflow_id: command.workflow_id,");
        w.line("step_execution_id: command.step_execution_id,");
        w.line("updated_state: output.state,");
        w.line("confidence: output.confidence,");
        w.line("timestamp: chrono::Utc::now(),");
        w.close("}");
        w.close("}");
        w.close("}");
    }
    w.finish()
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;
