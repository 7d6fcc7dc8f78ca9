// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! State-reducer emitter.

use crate::writer::CodeWriter;
use sg_model::{PropertyKind, StateModel};

pub fn emit_reducer(state: &StateModel) -> String {
    let mut w = CodeWriter::with_header();
    let ty = &state.type_name;
    let reducer = state.reducer_type_name();

    w.line(format!(
        "/// Pure property-wise merge of two `{ty}` values."
    ));
    w.line("///");
    w.line("/// Standard properties copy from the update; append properties");
    w.line("/// concatenate (current first); merge properties combine maps with");
    w.line("/// the update winning on overlapping keys.");
    w.line(format!("pub struct {reducer};"));
    w.blank();
    w.open(format!("impl {reducer} {{"));
    w.open(format!(
        "pub fn reduce(current: {ty}, update: {ty}) -> {ty} {{"
    ));
    w.open(format!("{ty} {{"));
    for property in &state.properties {
        let name = &property.name;
        match property.kind {
            PropertyKind::Standard => w.line(format!("{name}: update.{name},")),
            PropertyKind::Append => {
                w.open(format!("{name}: {{"));
                w.line(format!("let mut merged = current.{name};"));
                w.line(format!("merged.extend(update.{name});"));
                w.line("merged");
                w.close("},");
            }
            PropertyKind::Merge => {
                w.line(format!(
                    "{name}: merge_maps(current.{name}, update.{name}),"
                ));
            }
        }
    }
    w.close("}");
    w.close("}");
    w.close("}");

    if state.has_merge_property() {
        w.blank();
        w.line("/// Last-write-wins map merge: entries of `update` overwrite");
        w.line("/// entries of `current`.");
        w.line("fn merge_maps<K: std::cmp::Eq + std::hash::Hash, V>(");
        w.line("    current: std::collections::HashMap<K, V>,");
        w.line("    update: std::collections::HashMap<K, V>,");
        w.open(") -> std::collections::HashMap<K, V> {");
        w.line("let mut merged = current;");
        w.line("merged.extend(update);");
        w.line("merged");
        w.close("}");
    }
    w.finish()
}

#[cfg(test)]
#[path = "reducer_tests.rs"]
mod tests;
