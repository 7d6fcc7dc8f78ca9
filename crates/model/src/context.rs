// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Context bindings recovered from `with_context` configuration.

use serde::{Deserialize, Serialize};

/// One context source declared inside a `with_context` lambda.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContextSourceModel {
    /// `literal("...")` — a fixed string.
    Literal(String),
    /// `from_state(|state| state.x.y)` — a dotted state path.
    StatePath(String),
    /// `from_retrieval::<TColl>(..)` — a retrieval against a collection.
    Retrieval { collection_type_name: String },
}

/// Context sources attached to one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextBindingModel {
    pub step_name: String,
    pub sources: Vec<ContextSourceModel>,
}
