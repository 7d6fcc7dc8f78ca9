// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! State-type IR for the reducer generator.

use serde::{Deserialize, Serialize};

/// Reduction semantics of one state property.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyKind {
    /// Copied from the update.
    #[default]
    Standard,
    /// Collections concatenated, current first.
    Append,
    /// Maps merged, update entries winning.
    Merge,
}

/// One property of a `#[workflow_state]` type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatePropertyModel {
    pub name: String,
    pub type_name: String,
    pub kind: PropertyKind,
}

/// A state type declared with `#[workflow_state]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateModel {
    pub type_name: String,
    pub module_path: Option<String>,
    pub properties: Vec<StatePropertyModel>,
}

impl StateModel {
    pub fn reducer_type_name(&self) -> String {
        format!("{}Reducer", self.type_name)
    }

    pub fn has_merge_property(&self) -> bool {
        self.properties.iter().any(|p| p.kind == PropertyKind::Merge)
    }
}
