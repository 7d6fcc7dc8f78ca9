// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One parsed compilation unit (a single `.rs` file).

use crate::error::OracleError;
use crate::text::type_text;
use crate::types::TypeIndex;
use syn::{ImplItem, Item, ReturnType};

/// A parsed source file plus its type index.
///
/// The syntax tree is owned here for the duration of a generation pass and
/// never mutated.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    pub file_name: String,
    /// Module path of the file itself (e.g. `crate::flows`); `None` when
    /// the file sits outside the configured source root.
    pub module_path: Option<String>,
    pub(crate) ast: syn::File,
    pub types: TypeIndex,
}

impl SourceUnit {
    /// Parse source text into a unit.
    pub fn parse(
        file_name: &str,
        module_path: Option<String>,
        source: &str,
    ) -> Result<Self, OracleError> {
        let ast = syn::parse_file(source).map_err(|e| OracleError::parse(file_name, &e))?;
        let mut types = TypeIndex::default();
        index_items(&ast.items, &mut types);
        Ok(Self {
            file_name: file_name.to_string(),
            module_path,
            ast,
            types,
        })
    }

    /// Walk every item with its in-file module path prefix.
    pub(crate) fn items_with_module<'a>(&'a self) -> Vec<(Option<String>, &'a Item)> {
        let mut out = Vec::new();
        collect_items(self.module_path.clone(), &self.ast.items, &mut out);
        out
    }
}

fn collect_items<'a>(
    module: Option<String>,
    items: &'a [Item],
    out: &mut Vec<(Option<String>, &'a Item)>,
) {
    for item in items {
        if let Item::Mod(m) = item {
            if let Some((_, nested)) = &m.content {
                let nested_path = match &module {
                    Some(path) => Some(format!("{path}::{}", m.ident)),
                    None => Some(m.ident.to_string()),
                };
                collect_items(nested_path, nested, out);
                continue;
            }
        }
        out.push((module.clone(), item));
    }
}

fn index_items(items: &[Item], types: &mut TypeIndex) {
    for item in items {
        match item {
            Item::Enum(e) => types.add_enum(e.ident.to_string()),
            Item::Struct(s) => types.add_struct(s.ident.to_string()),
            Item::Fn(f) => {
                if let ReturnType::Type(_, ty) = &f.sig.output {
                    types.add_fn_return(f.sig.ident.to_string(), type_text(ty));
                }
            }
            Item::Impl(imp) => {
                for member in &imp.items {
                    if let ImplItem::Fn(f) = member {
                        if let ReturnType::Type(_, ty) = &f.sig.output {
                            types.add_fn_return(f.sig.ident.to_string(), type_text(ty));
                        }
                    }
                }
            }
            Item::Mod(m) => {
                if let Some((_, nested)) = &m.content {
                    index_items(nested, types);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
#[path = "unit_tests.rs"]
mod tests;
