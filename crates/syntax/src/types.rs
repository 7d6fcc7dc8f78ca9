// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Type classification within one compilation unit.

use std::collections::{BTreeMap, BTreeSet};

/// Syntactic kind of a resolved type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Struct,
    Enum,
    /// Declared outside this unit; kind unknown at generation time.
    Unknown,
}

/// Result of resolving a type path against the unit's declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeResolution {
    pub simple_name: String,
    /// Full path text with no leading `::`.
    pub fully_qualified_name: String,
    pub is_enum: bool,
    pub kind: TypeKind,
}

/// Index of type and function declarations in one unit, for enum
/// classification and method-reference return types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeIndex {
    enums: BTreeSet<String>,
    structs: BTreeSet<String>,
    fn_returns: BTreeMap<String, String>,
}

impl TypeIndex {
    pub(crate) fn add_enum(&mut self, name: String) {
        self.enums.insert(name);
    }

    pub(crate) fn add_struct(&mut self, name: String) {
        self.structs.insert(name);
    }

    pub(crate) fn add_fn_return(&mut self, name: String, return_type: String) {
        self.fn_returns.insert(name, return_type);
    }

    /// Resolve a rendered type path to its simple name and kind.
    pub fn resolve(&self, type_path: &str) -> TypeResolution {
        let fully_qualified = type_path.trim_start_matches("::").to_string();
        let simple = fully_qualified
            .rsplit("::")
            .next()
            .unwrap_or(&fully_qualified)
            .to_string();
        let kind = if self.enums.contains(&simple) {
            TypeKind::Enum
        } else if self.structs.contains(&simple) {
            TypeKind::Struct
        } else {
            TypeKind::Unknown
        };
        TypeResolution {
            is_enum: kind == TypeKind::Enum,
            simple_name: simple,
            fully_qualified_name: fully_qualified,
            kind,
        }
    }

    /// Return type of a free or associated function declared in the unit.
    pub fn method_return(&self, name: &str) -> Option<&str> {
        self.fn_returns.get(name).map(String::as_str)
    }
}
