// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Loop extraction.

use crate::context::ParseContext;
use crate::error::ExtractError;
use crate::rewrite::normalize_param;
use crate::steps::{following_step_name, step_effective_name};
use crate::walker::Walker;
use sg_model::LoopModel;
use sg_syntax::Argument;

/// Iteration ceiling applied when the DSL omits the literal.
pub(crate) const DEFAULT_MAX_ITERATIONS: u32 = 10;

pub(crate) fn extract_loops(ctx: &ParseContext<'_>) -> Result<Vec<LoopModel>, ExtractError> {
    let nodes = Walker::walk(ctx)?;
    let mut out = Vec::new();
    for node in nodes
        .iter()
        .filter(|n| ctx.arena().get(n.id).method_name == "repeat_until")
    {
        ctx.check_cancelled()?;
        let inv = ctx.arena().get(node.id);
        let Some(loop_name) = inv.first_string_arg() else {
            continue;
        };
        let Some(body) = inv.lambda_args().last() else {
            continue;
        };
        let body_steps: Vec<String> = Walker::collect_invocations_in_lambda(ctx.arena(), body)
            .into_iter()
            .filter_map(|id| {
                let body_inv = ctx.arena().get(id);
                if body_inv.method_name == "then" {
                    step_effective_name(ctx.types, body_inv)
                } else {
                    None
                }
            })
            .collect();
        let (Some(first), Some(last)) = (body_steps.first(), body_steps.last()) else {
            // An empty body is AGWF014; no model is produced for it.
            continue;
        };

        let exit_condition = match inv.arguments.first() {
            Some(Argument::Lambda(predicate)) => {
                let param = predicate.param.as_deref().unwrap_or("state");
                Some(normalize_param(&predicate.body_text, param))
            }
            _ => None,
        };

        out.push(LoopModel {
            loop_name: loop_name.to_string(),
            condition_id: format!("{loop_name}ExitCondition"),
            exit_condition,
            max_iterations: inv
                .first_int_arg()
                .map(|n| n as u32)
                .unwrap_or(DEFAULT_MAX_ITERATIONS),
            first_body_step_name: first.clone(),
            last_body_step_name: last.clone(),
            // A branch chained directly onto the loop is a loop-exit
            // branch; the continuation is the step after its run.
            continuation_step_name: following_step_name(
                ctx,
                node.id,
                node.loop_prefix.as_deref(),
                &["branch"],
            ),
            parent_loop_name: node.loop_prefix.clone(),
        });
    }
    Ok(out)
}

#[cfg(test)]
#[path = "loops_tests.rs"]
mod tests;
