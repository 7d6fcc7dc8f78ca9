// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fork/join extraction.

use crate::context::{is_step_method, linearize, ParseContext};
use crate::error::ExtractError;
use crate::steps::{preceding_step_name, step_effective_name};
use crate::walker::Walker;
use sg_model::{ForkModel, ForkPathModel};
use sg_syntax::InvocationId;

pub(crate) fn extract_forks(ctx: &ParseContext<'_>) -> Result<Vec<ForkModel>, ExtractError> {
    let prefixes = Walker::prefix_map(ctx)?;
    let mut out = Vec::new();
    for (ordinal, id) in ctx.arena().all_named("fork").into_iter().enumerate() {
        ctx.check_cancelled()?;
        let inv = ctx.arena().get(id);
        let prefix = prefixes.get(&id).cloned().flatten();

        let Some(previous_step_name) = preceding_step_name(ctx, id, prefix.as_deref()) else {
            continue;
        };
        // A fork without its join is AGWF012; no model is produced.
        let Some(join_step_name) = join_of(ctx, id, prefix.as_deref()) else {
            continue;
        };

        let mut paths = Vec::new();
        for lambda in inv.lambda_args() {
            let ids = Walker::collect_invocations_in_lambda(ctx.arena(), lambda);
            let step_names: Vec<String> = ids
                .iter()
                .filter_map(|&pid| {
                    let node = ctx.arena().get(pid);
                    if node.method_name == "then" {
                        step_effective_name(ctx.types, node)
                    } else {
                        None
                    }
                })
                .collect();
            if step_names.is_empty() {
                continue;
            }

            let failure = ids
                .iter()
                .find(|&&pid| ctx.arena().get(pid).method_name == "on_failure");
            let (handler_steps, terminal_on_failure) = match failure {
                Some(&fid) => parse_path_failure(ctx, fid),
                None => (None, false),
            };

            paths.push(ForkPathModel {
                path_index: paths.len(),
                step_names,
                has_failure_handler: handler_steps.is_some(),
                is_terminal_on_failure: terminal_on_failure,
                failure_handler_step_names: handler_steps,
            });
        }
        if paths.len() < 2 {
            continue;
        }

        out.push(ForkModel {
            fork_id: format!("Fork{}", ordinal + 1),
            previous_step_name,
            paths,
            join_step_name,
        });
    }
    Ok(out)
}

/// The `join::<T>()` chained after a fork, stepping over configuration
/// calls. Any other step method ends the search: that fork has no join.
pub(crate) fn join_of(
    ctx: &ParseContext<'_>,
    fork: InvocationId,
    prefix: Option<&str>,
) -> Option<String> {
    let mut current = ctx.arena().caller_of(fork);
    while let Some(id) = current {
        let inv = ctx.arena().get(id);
        let name = inv.method_name.as_str();
        if name == "join" {
            let effective = step_effective_name(ctx.types, inv)?;
            return Some(sg_model::phase_name(prefix, &effective));
        }
        if is_step_method(name) {
            return None;
        }
        current = ctx.arena().caller_of(id);
    }
    None
}

fn parse_path_failure(
    ctx: &ParseContext<'_>,
    on_failure: InvocationId,
) -> (Option<Vec<String>>, bool) {
    let inv = ctx.arena().get(on_failure);
    let Some(handler) = inv.lambda_args().last() else {
        return (None, false);
    };
    let ids: Vec<InvocationId> = handler
        .chain_tails
        .iter()
        .flat_map(|tail| linearize(ctx.arena(), *tail))
        .collect();
    let steps: Vec<String> = ids
        .iter()
        .filter_map(|&id| {
            let node = ctx.arena().get(id);
            if node.method_name == "then" {
                step_effective_name(ctx.types, node)
            } else {
                None
            }
        })
        .collect();
    let terminal = ids
        .iter()
        .any(|&id| ctx.arena().get(id).method_name == "complete");
    (Some(steps), terminal)
}

#[cfg(test)]
#[path = "forks_tests.rs"]
mod tests;
