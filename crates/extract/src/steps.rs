// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Step extraction.
//!
//! Produces the raw step list (for duplicate diagnostics) and the
//! deduplicated list that drives phase naming. Descends into fork paths,
//! branch cases, approval handlers, and failure handlers so that every
//! phase the saga can enter is represented.

use crate::context::{is_step_method, linearize, ParseContext};
use crate::error::ExtractError;
use crate::rewrite::normalize_param;
use crate::walker::Walker;
use sg_model::{StepContext, StepModel, WorkflowModel};
use sg_syntax::{Invocation, InvocationId, TypeIndex};

/// Output of step extraction.
pub(crate) struct StepLists {
    /// Deduplicated by phase name, first occurrence kept.
    pub steps: Vec<StepModel>,
    /// Every phase-defining invocation, duplicates included.
    pub raw: Vec<StepModel>,
}

pub(crate) fn extract_steps(ctx: &ParseContext<'_>) -> Result<StepLists, ExtractError> {
    let nodes = Walker::walk(ctx)?;
    let mut raw = Vec::new();
    for node in &nodes {
        ctx.check_cancelled()?;
        let inv = ctx.arena().get(node.id);
        let prefix = node.loop_prefix.as_deref();
        collect_invocation(ctx, inv, prefix, StepContext::Linear, &mut raw)?;
    }
    let steps = WorkflowModel::dedup_steps(&raw);
    Ok(StepLists { steps, raw })
}

/// Dispatch one invocation: push a step, attach trailing configuration, or
/// descend into a construct's lambdas.
fn collect_invocation(
    ctx: &ParseContext<'_>,
    inv: &Invocation,
    prefix: Option<&str>,
    context: StepContext,
    raw: &mut Vec<StepModel>,
) -> Result<(), ExtractError> {
    match inv.method_name.as_str() {
        "start_with" | "then" | "finally" | "join" => {
            if let Some(step) = make_step(ctx.types, inv, prefix, context) {
                raw.push(step);
            }
        }
        "validate_state" => attach_validation(inv, raw),
        "with_retry" => {
            if let Some(last) = raw.last_mut() {
                last.config.retry_attempts = inv.first_int_arg().map(|n| n as u32);
            }
        }
        "with_timeout" => {
            if let Some(last) = raw.last_mut() {
                last.config.timeout = inv.first_string_arg().map(str::to_string);
            }
        }
        "compensate" => {
            if let Some(last) = raw.last_mut() {
                last.config.compensation_step_name = inv
                    .type_arguments
                    .first()
                    .map(|t| ctx.types.resolve(t).simple_name);
            }
        }
        "fork" => {
            // Every argument lambda is a parallel path.
            for path in inv.lambda_args() {
                let ids = Walker::collect_invocations_in_lambda(ctx.arena(), path);
                collect_sub_chain(ctx, &ids, prefix, StepContext::ForkPath, raw)?;
            }
        }
        "branch" => {
            // Each `when`/`otherwise` case owns an exclusive path.
            for case_id in inv.call_args() {
                let case = ctx.arena().get(case_id);
                let Some(body) = case.lambda_args().last() else {
                    continue;
                };
                let ids = Walker::collect_invocations_in_lambda(ctx.arena(), body);
                collect_sub_chain(ctx, &ids, prefix, StepContext::BranchPath, raw)?;
            }
        }
        "on_failure" => {
            // Failure-handler steps run linearly once triggered.
            if let Some(handler) = inv.lambda_args().last() {
                let ids = Walker::collect_invocations_in_lambda(ctx.arena(), handler);
                collect_sub_chain(ctx, &ids, prefix, StepContext::Linear, raw)?;
            }
        }
        "await_approval" | "escalate_to" => {
            if let Some(config) = inv.lambda_args().last() {
                collect_approval_config(ctx, config, prefix, raw)?;
            }
        }
        "repeat_until" => {
            // Top-level loops are expanded by the walker; loops nested in
            // fork/branch/handler lambdas are expanded by collect_sub_chain.
        }
        _ => {}
    }
    Ok(())
}

/// Walk a lambda-body chain (already linearized) in source order.
fn collect_sub_chain(
    ctx: &ParseContext<'_>,
    ids: &[InvocationId],
    prefix: Option<&str>,
    context: StepContext,
    raw: &mut Vec<StepModel>,
) -> Result<(), ExtractError> {
    for &id in ids {
        ctx.check_cancelled()?;
        let inv = ctx.arena().get(id);
        if inv.method_name == "repeat_until" {
            let Some(loop_name) = inv.first_string_arg() else {
                continue;
            };
            let effective = sg_model::join_prefix(prefix, loop_name);
            if let Some(body) = inv.lambda_args().last() {
                let body_ids = Walker::collect_invocations_in_lambda(ctx.arena(), body);
                collect_sub_chain(ctx, &body_ids, Some(&effective), context, raw)?;
            }
            continue;
        }
        collect_invocation(ctx, inv, prefix, context, raw)?;
    }
    Ok(())
}

/// Approval configuration: `on_rejection`/`on_timeout` handler bodies
/// contribute linear steps; `escalate_to` recurses.
fn collect_approval_config(
    ctx: &ParseContext<'_>,
    config: &sg_syntax::LambdaArg,
    prefix: Option<&str>,
    raw: &mut Vec<StepModel>,
) -> Result<(), ExtractError> {
    for tail in &config.chain_tails {
        ctx.check_cancelled()?;
        for id in linearize(ctx.arena(), *tail) {
            let inv = ctx.arena().get(id);
            if matches!(inv.method_name.as_str(), "on_rejection" | "on_timeout") {
                if let Some(handler) = inv.lambda_args().last() {
                    let ids = Walker::collect_invocations_in_lambda(ctx.arena(), handler);
                    collect_sub_chain(ctx, &ids, prefix, StepContext::Linear, raw)?;
                }
            }
        }
    }
    Ok(())
}

/// Build a step model from a phase-defining invocation. Steps without a
/// resolvable type argument are skipped.
pub(crate) fn make_step(
    types: &TypeIndex,
    inv: &Invocation,
    prefix: Option<&str>,
    context: StepContext,
) -> Option<StepModel> {
    let type_arg = inv.type_arguments.first()?;
    let resolution = types.resolve(type_arg);
    let mut step = StepModel::linear(&resolution.simple_name, &resolution.fully_qualified_name);
    step.instance_name = inv.first_string_arg().map(str::to_string);
    step.loop_name = prefix.map(str::to_string);
    step.context = context;
    Some(step)
}

/// A `validate_state(predicate, message)` guards the step it chains onto.
fn attach_validation(inv: &Invocation, raw: &mut [StepModel]) {
    let Some(last) = raw.last_mut() else { return };
    let Some(predicate) = inv.lambda_args().next() else {
        return;
    };
    let param = predicate.param.as_deref().unwrap_or("state");
    last.validation_predicate = Some(normalize_param(&predicate.body_text, param));
    last.validation_error_message = inv.first_string_arg().map(str::to_string);
}

/// Effective (phase-identity) name of a step invocation.
pub(crate) fn step_effective_name(types: &TypeIndex, inv: &Invocation) -> Option<String> {
    let type_arg = inv.type_arguments.first()?;
    let simple = types.resolve(type_arg).simple_name;
    Some(
        inv.first_string_arg()
            .map(str::to_string)
            .unwrap_or(simple),
    )
}

/// Walk receiver-wards from `from` to the nearest preceding step method
/// and return its phase name under the given loop prefix.
pub(crate) fn preceding_step_name(
    ctx: &ParseContext<'_>,
    from: InvocationId,
    prefix: Option<&str>,
) -> Option<String> {
    let mut current = ctx.arena().get(from).receiver;
    while let Some(id) = current {
        let inv = ctx.arena().get(id);
        if is_step_method(&inv.method_name) || inv.method_name == "join" {
            let effective = step_effective_name(ctx.types, inv)?;
            return Some(sg_model::phase_name(prefix, &effective));
        }
        current = inv.receiver;
    }
    None
}

/// Calls that chain transparently between a construct and the next step.
const TRANSPARENT_METHODS: &[&str] = &[
    "validate_state",
    "with_retry",
    "with_timeout",
    "compensate",
    "with_context",
    "on_failure",
];

/// Walk caller-wards from `from` to the next chained step method and
/// return its phase name. Methods named in `skip` (and configuration
/// calls) are stepped over; any other construct ends the search.
pub(crate) fn following_step_name(
    ctx: &ParseContext<'_>,
    from: InvocationId,
    prefix: Option<&str>,
    skip: &[&str],
) -> Option<String> {
    let mut current = ctx.arena().caller_of(from);
    while let Some(id) = current {
        let inv = ctx.arena().get(id);
        let name = inv.method_name.as_str();
        if is_step_method(name) || name == "join" {
            let effective = step_effective_name(ctx.types, inv)?;
            return Some(sg_model::phase_name(prefix, &effective));
        }
        if !skip.contains(&name) && !TRANSPARENT_METHODS.contains(&name) {
            return None;
        }
        current = ctx.arena().caller_of(id);
    }
    None
}

#[cfg(test)]
#[path = "steps_tests.rs"]
mod tests;
