// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Discovery of workflow and state declarations by marker attribute.

use crate::invocation::InvocationArena;
use crate::lower::Lowerer;
use crate::text::type_text;
use crate::unit::SourceUnit;
use sg_model::SourceLocation;
use syn::{Attribute, Expr, ImplItem, Item, Stmt};

/// A type bearing `#[workflow(..)]`, with its lowered fluent chain.
#[derive(Debug, Clone)]
pub struct WorkflowDecl {
    pub type_name: String,
    /// `name = ".."` from the attribute; the declared workflow name.
    pub workflow_name: String,
    /// `version = n` from the attribute, defaulting to 1.
    pub version: u32,
    pub module_path: Option<String>,
    pub location: SourceLocation,
    pub arena: InvocationArena,
}

/// Marker on a state property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateMarker {
    Append,
    Merge,
}

/// One property of a `#[workflow_state]` type.
#[derive(Debug, Clone)]
pub struct StateField {
    pub name: String,
    pub type_name: String,
    pub marker: Option<StateMarker>,
    pub is_collection: bool,
    pub is_map: bool,
    pub location: SourceLocation,
}

/// A type bearing `#[workflow_state]`.
#[derive(Debug, Clone)]
pub struct StateDecl {
    pub type_name: String,
    pub module_path: Option<String>,
    pub location: SourceLocation,
    pub fields: Vec<StateField>,
}

const COLLECTION_TYPES: &[&str] = &["Vec", "VecDeque", "BTreeSet", "HashSet"];
const MAP_TYPES: &[&str] = &["HashMap", "BTreeMap", "IndexMap"];

/// All workflow declarations in the unit, chains lowered.
pub fn workflow_decls(unit: &SourceUnit) -> Vec<WorkflowDecl> {
    let mut out = Vec::new();
    for (module_path, item) in unit.items_with_module() {
        let Item::Struct(s) = item else { continue };
        let Some(attr) = find_attr(&s.attrs, "workflow") else {
            continue;
        };
        let (workflow_name, version) = parse_workflow_attr(attr);
        let type_name = s.ident.to_string();
        let arena = find_chain(unit, &type_name).unwrap_or_default();
        let start = s.ident.span().start();
        out.push(WorkflowDecl {
            type_name,
            workflow_name,
            version,
            module_path,
            location: SourceLocation::new(&unit.file_name, start.line, start.column + 1),
            arena,
        });
    }
    out
}

/// All state declarations in the unit, fields classified.
pub fn state_decls(unit: &SourceUnit) -> Vec<StateDecl> {
    let mut out = Vec::new();
    for (module_path, item) in unit.items_with_module() {
        let Item::Struct(s) = item else { continue };
        if find_attr(&s.attrs, "workflow_state").is_none() {
            continue;
        }
        let fields = s
            .fields
            .iter()
            .filter_map(|field| {
                let ident = field.ident.as_ref()?;
                let type_name = type_text(&field.ty);
                let head = type_head(&type_name);
                let start = ident.span().start();
                Some(StateField {
                    name: ident.to_string(),
                    marker: field_marker(&field.attrs),
                    is_collection: COLLECTION_TYPES.contains(&head),
                    is_map: MAP_TYPES.contains(&head),
                    type_name,
                    location: SourceLocation::new(&unit.file_name, start.line, start.column + 1),
                })
            })
            .collect();
        let start = s.ident.span().start();
        out.push(StateDecl {
            type_name: s.ident.to_string(),
            module_path,
            location: SourceLocation::new(&unit.file_name, start.line, start.column + 1),
            fields,
        });
    }
    out
}

fn find_attr<'a>(attrs: &'a [Attribute], name: &str) -> Option<&'a Attribute> {
    attrs.iter().find(|attr| attr.path().is_ident(name))
}

fn field_marker(attrs: &[Attribute]) -> Option<StateMarker> {
    if find_attr(attrs, "append").is_some() {
        Some(StateMarker::Append)
    } else if find_attr(attrs, "merge").is_some() {
        Some(StateMarker::Merge)
    } else {
        None
    }
}

/// First path segment of a rendered type (`HashMap<..>` → `HashMap`).
fn type_head(type_name: &str) -> &str {
    let no_generics = type_name.split('<').next().unwrap_or(type_name);
    no_generics.rsplit("::").next().unwrap_or(no_generics).trim()
}

fn parse_workflow_attr(attr: &Attribute) -> (String, u32) {
    let mut name = String::new();
    let mut version = 1u32;
    // `#[workflow]` with no arguments is tolerated; both fields keep
    // their defaults and diagnostics flag the empty name downstream.
    let _ = attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("name") {
            let lit: syn::LitStr = meta.value()?.parse()?;
            name = lit.value();
        } else if meta.path.is_ident("version") {
            let lit: syn::LitInt = meta.value()?.parse()?;
            version = lit.base10_parse().unwrap_or(1);
        }
        Ok(())
    });
    (name, version)
}

/// Locate and lower the declaring type's fluent chain: the last expression
/// of the first impl-block method that contains a `create` or `finally`
/// call.
fn find_chain(unit: &SourceUnit, type_name: &str) -> Option<InvocationArena> {
    for (_, item) in unit.items_with_module() {
        let Item::Impl(imp) = item else { continue };
        let syn::Type::Path(self_ty) = &*imp.self_ty else {
            continue;
        };
        let matches_type = self_ty
            .path
            .segments
            .last()
            .is_some_and(|seg| seg.ident == type_name);
        if !matches_type {
            continue;
        }
        for member in &imp.items {
            let ImplItem::Fn(f) = member else { continue };
            let Some(expr) = last_expression(&f.block.stmts) else {
                continue;
            };
            let arena = Lowerer::new(&unit.file_name).lower_chain(expr);
            let has_chain = !arena.all_named("create").is_empty()
                || !arena.all_named("finally").is_empty();
            if has_chain {
                return Some(arena);
            }
        }
    }
    None
}

fn last_expression(stmts: &[Stmt]) -> Option<&Expr> {
    match stmts.last()? {
        Stmt::Expr(expr, _) => Some(expr),
        _ => None,
    }
}

#[cfg(test)]
#[path = "decl_tests.rs"]
mod tests;
