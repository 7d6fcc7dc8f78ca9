// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for extraction tests.

use sg_syntax::{workflow_decls, SourceUnit, TypeIndex, WorkflowDecl};

/// Wrap a chain expression in a complete workflow declaration.
pub(crate) fn source_with_chain(chain: &str) -> String {
    format!(
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
    )
}

/// Parse a full source file and return its first workflow declaration.
pub(crate) fn decl_from_source(src: &str) -> (WorkflowDecl, TypeIndex) {
    let unit = SourceUnit::parse("flows.rs", Some("crate::flows".to_string()), src)
        .expect("test source must parse");
    let types = unit.types.clone();
    let mut decls = workflow_decls(&unit);
    assert!(!decls.is_empty(), "test source must declare a workflow");
    (decls.remove(0), types)
}

/// Parse a chain expression into a workflow declaration.
pub(crate) fn decl_from_chain(chain: &str) -> (WorkflowDecl, TypeIndex) {
    decl_from_source(&source_with_chain(chain))
}
