// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structural diagnostics (AGWF001..AGWF014, AGSR001..AGSR002).
//!
//! Diagnostics report; they never abort. The driver decides what a fatal
//! code means for emission.

use crate::context::{is_step_method, ParseContext};
use crate::error::ExtractError;
use crate::forks::join_of;
use crate::walker::Walker;
use indexmap::IndexMap;
use sg_model::{codes, Diagnostic, StepContext, StepModel};
use sg_syntax::{StateDecl, StateMarker};

pub(crate) fn check_workflow(
    ctx: &ParseContext<'_>,
    workflow_name: &str,
    raw_steps: &[StepModel],
) -> Result<Vec<Diagnostic>, ExtractError> {
    let mut out = Vec::new();
    let decl_location = ctx.decl.location.clone();

    if workflow_name.trim().is_empty() {
        out.push(Diagnostic::error(
            codes::EMPTY_WORKFLOW_NAME,
            format!("workflow '{}' has an empty name", ctx.decl.type_name),
            decl_location.clone(),
        ));
    }

    if ctx.decl.module_path.is_none() {
        out.push(Diagnostic::error(
            codes::NO_MODULE,
            format!(
                "workflow '{}' is declared outside any module",
                ctx.decl.type_name
            ),
            decl_location.clone(),
        ));
    }

    if raw_steps.is_empty() {
        out.push(Diagnostic::warning(
            codes::NO_STEPS,
            format!("workflow '{}' defines no steps", ctx.decl.type_name),
            decl_location.clone(),
        ));
    } else {
        check_start_with(ctx, &mut out)?;
    }

    if ctx.finally.is_none() && !ctx.chain.is_empty() {
        out.push(Diagnostic::warning(
            codes::NO_FINALLY,
            format!("workflow '{}' has no finally terminator", ctx.decl.type_name),
            decl_location.clone(),
        ));
    }

    check_duplicates(raw_steps, ctx, &mut out);
    check_forks(ctx, &mut out)?;
    check_loops(ctx, &mut out)?;

    Ok(out)
}

/// AGWF009: the first phase-defining call must be `start_with`.
fn check_start_with(
    ctx: &ParseContext<'_>,
    out: &mut Vec<Diagnostic>,
) -> Result<(), ExtractError> {
    let nodes = Walker::walk(ctx)?;
    let first_step = nodes.iter().find(|node| node.is_step_method);
    if let Some(node) = first_step {
        let inv = ctx.arena().get(node.id);
        if inv.method_name != "start_with" {
            out.push(Diagnostic::error(
                codes::NO_START_WITH,
                format!(
                    "workflow '{}' must begin with start_with, found {}",
                    ctx.decl.type_name, inv.method_name
                ),
                inv.location.clone(),
            ));
        }
    }
    Ok(())
}

/// AGWF003: duplicate effective names in non-exclusive contexts. Consumes
/// the raw (pre-dedup) list.
fn check_duplicates(raw_steps: &[StepModel], ctx: &ParseContext<'_>, out: &mut Vec<Diagnostic>) {
    let mut groups: IndexMap<(String, String), usize> = IndexMap::new();
    for step in raw_steps {
        if !matches!(step.context, StepContext::Linear | StepContext::ForkPath) {
            continue;
        }
        let key = (
            step.effective_name().to_string(),
            step.loop_name.clone().unwrap_or_default(),
        );
        *groups.entry(key).or_insert(0) += 1;
    }
    for ((name, prefix), count) in groups {
        if count > 1 {
            let shown = if prefix.is_empty() {
                name
            } else {
                format!("{prefix}_{name}")
            };
            out.push(Diagnostic::error(
                codes::DUPLICATE_STEP_NAME,
                format!("duplicate step name '{shown}' ({count} occurrences)"),
                ctx.decl.location.clone(),
            ));
        }
    }
}

/// AGWF012: every fork needs its join.
fn check_forks(ctx: &ParseContext<'_>, out: &mut Vec<Diagnostic>) -> Result<(), ExtractError> {
    for id in ctx.arena().all_named("fork") {
        ctx.check_cancelled()?;
        if join_of(ctx, id, None).is_none() {
            let inv = ctx.arena().get(id);
            out.push(Diagnostic::error(
                codes::FORK_WITHOUT_JOIN,
                "fork without a matching join".to_string(),
                inv.location.clone(),
            ));
        }
    }
    Ok(())
}

/// AGWF014: a named loop body must contain at least one step method.
fn check_loops(ctx: &ParseContext<'_>, out: &mut Vec<Diagnostic>) -> Result<(), ExtractError> {
    for id in ctx.arena().all_named("repeat_until") {
        ctx.check_cancelled()?;
        let inv = ctx.arena().get(id);
        let Some(name) = inv.first_string_arg() else {
            continue;
        };
        let Some(body) = inv.lambda_args().last() else {
            continue;
        };
        let has_step = Walker::collect_invocations_in_lambda(ctx.arena(), body)
            .into_iter()
            .any(|bid| is_step_method(&ctx.arena().get(bid).method_name));
        if !has_step {
            out.push(Diagnostic::error(
                codes::EMPTY_LOOP_BODY,
                format!("repeat_until loop '{name}' has no step in its body"),
                inv.location.clone(),
            ));
        }
    }
    Ok(())
}

/// AGSR001/AGSR002: reducer markers must match the property's shape.
pub(crate) fn check_state(decl: &StateDecl) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    for field in &decl.fields {
        match field.marker {
            Some(StateMarker::Append) if !field.is_collection => {
                out.push(Diagnostic::error(
                    codes::APPEND_NOT_COLLECTION,
                    format!(
                        "#[append] on non-collection property '{}.{}' of type {}",
                        decl.type_name, field.name, field.type_name
                    ),
                    field.location.clone(),
                ));
            }
            Some(StateMarker::Merge) if !field.is_map => {
                out.push(Diagnostic::error(
                    codes::MERGE_NOT_MAP,
                    format!(
                        "#[merge] on non-map property '{}.{}' of type {}",
                        decl.type_name, field.name, field.type_name
                    ),
                    field.location.clone(),
                ));
            }
            _ => {}
        }
    }
    out
}

#[cfg(test)]
#[path = "diagnostics_tests.rs"]
mod tests;
