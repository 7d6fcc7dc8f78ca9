// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for emitter tests: run real extraction over a chain.

use sg_model::{CancelFlag, StateModel, WorkflowModel};

pub(crate) fn model_of(chain: &str) -> WorkflowModel {
    let src = format!(
        r#"
pub enum OrderKind {{ Auto, Manual }}

#[workflow(name = "process-order")]
pub struct ProcessOrder;

impl ProcessOrder {{
    pub fn define() -> WorkflowBuilder<OrderState> {{
        {chain}
    }}
}}
"#
    );
    let unit = sg_syntax::SourceUnit::parse("flows.rs", Some("crate::flows".to_string()), &src)
        .expect("test source parses");
    let types = unit.types.clone();
    let decl = sg_syntax::workflow_decls(&unit).remove(0);
    sg_extract::extract_workflow(&decl, &types, CancelFlag::new())
        .expect("extraction succeeds")
        .model
}

pub(crate) fn state_of(src: &str) -> StateModel {
    let unit = sg_syntax::SourceUnit::parse("state.rs", Some("crate".to_string()), src)
        .expect("state source parses");
    let decl = sg_syntax::state_decls(&unit).remove(0);
    sg_extract::extract_state(&decl).0
}

/// Boundary scenario 1: the plain linear order flow.
pub(crate) fn linear_order_model() -> WorkflowModel {
    model_of(
        "Workflow::<OrderState>::create(\"process-order\")\
         .start_with::<ValidateOrder>()\
         .then::<ProcessPayment>()\
         .then::<SendConfirmation>()\
         .finally::<Complete>()",
    )
}
