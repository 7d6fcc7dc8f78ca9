// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Emitters: deterministic pure functions from the workflow IR to source
//! text. Nothing here touches the filesystem or the syntax tree.

mod commands;
mod events;
mod extensions;
mod flow;
mod handlers;
mod mermaid;
mod names;
mod phase;
mod reducer;
mod saga;
#[cfg(test)]
mod test_support;
mod transitions;
mod writer;

pub use commands::emit_commands;
pub use events::emit_events;
pub use extensions::emit_extensions;
pub use flow::{FlowGraph, Successor};
pub use handlers::emit_handlers;
pub use mermaid::emit_mermaid;
pub use phase::emit_phase;
pub use reducer::emit_reducer;
pub use saga::emit_saga;
pub use transitions::emit_transitions;
pub use writer::{CodeWriter, BUILD_VERSION};

use sg_model::WorkflowModel;

/// One generated artifact: a file stem plus its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub content: String,
}

impl Artifact {
    pub fn new(file_name: impl Into<String>, content: String) -> Self {
        Self {
            file_name: file_name.into(),
            content,
        }
    }
}

/// Emit the full artifact set for one workflow, in a fixed order.
///
/// The reducer is emitted separately (it belongs to the state type, not
/// the workflow).
pub fn emit_workflow(model: &WorkflowModel) -> Vec<Artifact> {
    let pascal = &model.pascal_name;
    vec![
        Artifact::new(format!("{pascal}Phase.g.rs"), emit_phase(model)),
        Artifact::new(format!("{pascal}Transitions.g.rs"), emit_transitions(model)),
        Artifact::new(format!("{pascal}Commands.g.rs"), emit_commands(model)),
        Artifact::new(format!("{pascal}Events.g.rs"), emit_events(model)),
        Artifact::new(format!("{pascal}Saga.g.rs"), emit_saga(model)),
        Artifact::new(format!("{pascal}Handlers.g.rs"), emit_handlers(model)),
        Artifact::new(format!("{pascal}Extensions.g.rs"), emit_extensions(model)),
        Artifact::new(format!("{pascal}Diagram.g.md"), emit_mermaid(model)),
    ]
}
