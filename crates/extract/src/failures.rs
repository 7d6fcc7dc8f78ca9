// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workflow-scope failure-handler extraction.
//!
//! Step-scoped failure handling (`with_retry`, `with_timeout`,
//! `compensate`) lives on the step's configuration; fork-path handlers
//! belong to the fork extractor. Only `on_failure` calls on the main
//! chain land here.

use crate::context::{linearize, ParseContext};
use crate::error::ExtractError;
use crate::steps::{preceding_step_name, step_effective_name};
use crate::walker::Walker;
use sg_model::{FailureHandlerModel, FailureScope};

pub(crate) fn extract_failure_handlers(
    ctx: &ParseContext<'_>,
) -> Result<Vec<FailureHandlerModel>, ExtractError> {
    let prefixes = Walker::prefix_map(ctx)?;
    let mut out = Vec::new();
    for (ordinal, id) in ctx.arena().all_named("on_failure").into_iter().enumerate() {
        ctx.check_cancelled()?;
        let inv = ctx.arena().get(id);
        if inv.lambda_depth != 0 {
            continue;
        }
        let Some(handler) = inv.lambda_args().last() else {
            continue;
        };
        let ids: Vec<_> = handler
            .chain_tails
            .iter()
            .flat_map(|tail| linearize(ctx.arena(), *tail))
            .collect();
        let step_names: Vec<String> = ids
            .iter()
            .filter_map(|&hid| {
                let node = ctx.arena().get(hid);
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
        let is_terminal = ids
            .iter()
            .any(|&hid| ctx.arena().get(hid).method_name == "complete");
        let prefix = prefixes.get(&id).cloned().flatten();

        out.push(FailureHandlerModel {
            handler_id: format!("FailureHandler{}", ordinal + 1),
            scope: FailureScope::Workflow,
            step_names,
            is_terminal,
            trigger_step_name: preceding_step_name(ctx, id, prefix.as_deref()),
        });
    }
    Ok(out)
}

#[cfg(test)]
#[path = "failures_tests.rs"]
mod tests;
