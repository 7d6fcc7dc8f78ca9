// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Identifier derivation for workflow names, phases, and loop prefixes.

use inflector::Inflector;

/// Derive an identifier-safe PascalCase name from a user-visible workflow
/// name like `"process-order"`.
///
/// Characters that cannot appear in an identifier are treated as word
/// separators; a leading digit is prefixed with an underscore so the result
/// is always a legal type name.
pub fn pascal_identifier(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    let pascal = cleaned.trim().to_pascal_case();
    match pascal.chars().next() {
        Some(c) if c.is_ascii_digit() => format!("_{pascal}"),
        _ => pascal,
    }
}

/// Derive a snake_case identifier from a PascalCase or user-visible name.
pub fn snake_identifier(name: &str) -> String {
    pascal_identifier(name).to_snake_case()
}

/// Compose a step's phase name from its enclosing loop prefix and its
/// effective name. Steps outside any loop use the effective name alone.
pub fn phase_name(loop_prefix: Option<&str>, effective_name: &str) -> String {
    match loop_prefix {
        None | Some("") => effective_name.to_string(),
        Some(prefix) => format!("{prefix}_{effective_name}"),
    }
}

/// Compose a hierarchical loop prefix from a parent prefix and a loop name.
pub fn join_prefix(parent: Option<&str>, loop_name: &str) -> String {
    match parent {
        None | Some("") => loop_name.to_string(),
        Some(parent) => format!("{parent}_{loop_name}"),
    }
}

/// The simple (last-segment) name of a possibly-qualified type path.
pub fn simple_type_name(type_name: &str) -> &str {
    type_name.rsplit("::").next().unwrap_or(type_name)
}

#[cfg(test)]
#[path = "naming_tests.rs"]
mod tests;
