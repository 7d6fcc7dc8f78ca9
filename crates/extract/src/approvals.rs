// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Approval-gate extraction.

use crate::context::{linearize, ParseContext};
use crate::error::ExtractError;
use crate::steps::{preceding_step_name, step_effective_name};
use crate::walker::Walker;
use sg_model::ApprovalModel;
use sg_syntax::{Invocation, InvocationId, LambdaArg};

/// Sentinel `preceding_step_name` for approvals declared inside a branch
/// lambda.
pub(crate) const BRANCH_PATH_SENTINEL: &str = "BranchPath";

/// Sentinel `preceding_step_name` for approvals reached via escalation.
pub(crate) const ESCALATION_SENTINEL: &str = "Escalation";

pub(crate) fn extract_approvals(
    ctx: &ParseContext<'_>,
) -> Result<Vec<ApprovalModel>, ExtractError> {
    let prefixes = Walker::prefix_map(ctx)?;
    let mut out = Vec::new();
    for (ordinal, id) in ctx
        .arena()
        .all_named("await_approval")
        .into_iter()
        .enumerate()
    {
        ctx.check_cancelled()?;
        let inv = ctx.arena().get(id);
        let prefix = prefixes.get(&id).cloned().flatten();
        let preceding = match preceding_step_name(ctx, id, prefix.as_deref()) {
            Some(name) => name,
            // No preceding step on the chain: the gate sits directly on a
            // branch-lambda parameter.
            None => BRANCH_PATH_SENTINEL.to_string(),
        };
        if let Some(model) = parse_approval(ctx, inv, ordinal, preceding) {
            out.push(model);
        }
    }
    Ok(out)
}

fn parse_approval(
    ctx: &ParseContext<'_>,
    inv: &Invocation,
    ordinal: usize,
    preceding_step_name: String,
) -> Option<ApprovalModel> {
    let approver = inv.type_arguments.first()?;
    let approver_type_name = ctx.types.resolve(approver).simple_name;
    let stripped = approver_type_name
        .strip_suffix("Approver")
        .unwrap_or(&approver_type_name);
    let approval_point_name = if stripped.is_empty() {
        format!("Approval{}", ordinal + 1)
    } else {
        stripped.to_string()
    };

    let mut model = ApprovalModel {
        approval_point_name,
        approver_type_name,
        preceding_step_name,
        escalation_steps: Vec::new(),
        rejection_steps: Vec::new(),
        nested_escalation_approvals: Vec::new(),
        is_escalation_terminal: false,
        is_rejection_terminal: false,
    };

    if let Some(config) = inv.lambda_args().last() {
        parse_config(ctx, config, ordinal, &mut model);
    }
    Some(model)
}

/// Walk the configuration lambda for `on_rejection` and `on_timeout`.
fn parse_config(
    ctx: &ParseContext<'_>,
    config: &LambdaArg,
    ordinal: usize,
    model: &mut ApprovalModel,
) {
    for tail in &config.chain_tails {
        for id in linearize(ctx.arena(), *tail) {
            let node = ctx.arena().get(id);
            match node.method_name.as_str() {
                "on_rejection" => {
                    let Some(handler) = node.lambda_args().last() else {
                        continue;
                    };
                    let outcome = parse_handler(ctx, handler, ordinal, model);
                    model.rejection_steps = outcome.steps;
                    model.is_rejection_terminal = outcome.terminal;
                }
                "on_timeout" => {
                    let Some(handler) = node.lambda_args().last() else {
                        continue;
                    };
                    let outcome = parse_handler(ctx, handler, ordinal, model);
                    model.escalation_steps = outcome.steps;
                    model.is_escalation_terminal = outcome.terminal;
                }
                _ => {}
            }
        }
    }
}

struct HandlerOutcome {
    steps: Vec<String>,
    terminal: bool,
}

/// Handler bodies mix `then`, `escalate_to`, and `complete`.
fn parse_handler(
    ctx: &ParseContext<'_>,
    handler: &LambdaArg,
    ordinal: usize,
    model: &mut ApprovalModel,
) -> HandlerOutcome {
    let mut steps = Vec::new();
    let mut terminal = false;
    let ids: Vec<InvocationId> = handler
        .chain_tails
        .iter()
        .flat_map(|tail| linearize(ctx.arena(), *tail))
        .collect();
    for id in ids {
        let node = ctx.arena().get(id);
        match node.method_name.as_str() {
            "then" => {
                if let Some(name) = step_effective_name(ctx.types, node) {
                    steps.push(name);
                }
            }
            "complete" => terminal = true,
            "escalate_to" => {
                if let Some(nested) =
                    parse_approval(ctx, node, ordinal + 1, ESCALATION_SENTINEL.to_string())
                {
                    model.nested_escalation_approvals.push(nested);
                }
            }
            _ => {}
        }
    }
    HandlerOutcome { steps, terminal }
}

#[cfg(test)]
#[path = "approvals_tests.rs"]
mod tests;
