// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Service-registry extension emitter.

use crate::names;
use crate::writer::CodeWriter;
use sg_model::WorkflowModel;

pub fn emit_extensions(model: &WorkflowModel) -> String {
    let mut w = CodeWriter::with_header();
    w.line(format!(
        "/// Registers every `{}` step type and worker handler as transient",
        model.workflow_name
    ));
    w.line("/// services.");
    w.open(format!(
        "pub fn {}(registry: &mut sagarun::ServiceRegistry) {{",
        names::registration_fn(model)
    ));
    for step in model.distinct_step_types() {
        let ty = &step.step_name;
        w.line(format!("registry.register_transient::<{ty}>();"));
        w.line(format!(
            "registry.register_transient::<{}>();",
            names::worker_handler(ty)
        ));
    }
    w.close("}");
    w.finish()
}

#[cfg(test)]
#[path = "extensions_tests.rs"]
mod tests;
