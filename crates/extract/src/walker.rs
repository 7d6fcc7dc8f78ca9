// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Invocation-chain walker.
//!
//! Yields annotated invocation nodes in source order, descending into
//! `repeat_until` bodies with the hierarchical loop prefix applied.
//! Strictly nested lambdas (branch cases, fork paths, approval handlers)
//! are left to their owning extractors.

use crate::context::{is_step_method, linearize, ParseContext};
use crate::error::ExtractError;
use sg_syntax::{InvocationArena, InvocationId, LambdaArg};

/// One walked invocation with its loop context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationNode {
    pub id: InvocationId,
    pub loop_prefix: Option<String>,
    pub is_step_method: bool,
    pub is_validate_state: bool,
}

/// Walks the fluent chain from the `finally` anchor through loop bodies.
pub struct Walker;

impl Walker {
    /// All chain invocations in source order, loop prefixes applied.
    pub fn walk(ctx: &ParseContext<'_>) -> Result<Vec<InvocationNode>, ExtractError> {
        let mut out = Vec::new();
        Self::walk_ids(ctx, &ctx.chain, None, &mut out)?;
        Ok(out)
    }

    fn walk_ids(
        ctx: &ParseContext<'_>,
        ids: &[InvocationId],
        prefix: Option<&str>,
        out: &mut Vec<InvocationNode>,
    ) -> Result<(), ExtractError> {
        for &id in ids {
            ctx.check_cancelled()?;
            let inv = ctx.arena().get(id);
            out.push(InvocationNode {
                id,
                loop_prefix: prefix.map(str::to_string),
                is_step_method: is_step_method(&inv.method_name) || inv.method_name == "join",
                is_validate_state: inv.method_name == "validate_state",
            });
            if inv.method_name != "repeat_until" {
                continue;
            }
            // A loop without a name literal is skipped wholesale.
            let Some(loop_name) = inv.first_string_arg() else {
                continue;
            };
            let effective = sg_model::join_prefix(prefix, loop_name);
            let Some(body) = inv.lambda_args().last() else {
                continue;
            };
            let body_ids = Self::collect_invocations_in_lambda(ctx.arena(), body);
            Self::walk_ids(ctx, &body_ids, Some(&effective), out)?;
        }
        Ok(())
    }

    /// Loop prefix of every walked invocation, keyed by id. Constructs
    /// the walker never reaches are simply absent (no prefix).
    pub fn prefix_map(
        ctx: &ParseContext<'_>,
    ) -> Result<std::collections::HashMap<InvocationId, Option<String>>, ExtractError> {
        Ok(Self::walk(ctx)?
            .into_iter()
            .map(|node| (node.id, node.loop_prefix))
            .collect())
    }

    /// Source-order invocations of a lambda body, excluding those inside
    /// any strictly nested lambda.
    pub fn collect_invocations_in_lambda(
        arena: &InvocationArena,
        lambda: &LambdaArg,
    ) -> Vec<InvocationId> {
        lambda
            .chain_tails
            .iter()
            .flat_map(|tail| linearize(arena, *tail))
            .collect()
    }
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
