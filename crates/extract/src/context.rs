// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parse context: per-declaration facts every extractor needs.

use crate::error::ExtractError;
use sg_model::CancelFlag;
use sg_syntax::{InvocationArena, InvocationId, TypeIndex, WorkflowDecl};

/// Methods that define a phase.
pub(crate) const STEP_METHODS: &[&str] = &["start_with", "then", "finally"];

pub(crate) fn is_step_method(name: &str) -> bool {
    STEP_METHODS.contains(&name)
}

/// Precomputed view over one workflow declaration.
///
/// Holds the linearized top-level chain (source order), the `finally`
/// anchor when present, and the cancellation flag all downstream work
/// polls at loop and recursion boundaries.
#[derive(Debug)]
pub struct ParseContext<'a> {
    pub decl: &'a WorkflowDecl,
    pub types: &'a TypeIndex,
    pub cancel: CancelFlag,
    /// The unique top-level `finally`, if any.
    pub finally: Option<InvocationId>,
    /// Top-level chain from `create` to its tail, in source order.
    pub chain: Vec<InvocationId>,
}

impl<'a> ParseContext<'a> {
    pub fn create(
        decl: &'a WorkflowDecl,
        types: &'a TypeIndex,
        cancel: CancelFlag,
    ) -> Result<Self, ExtractError> {
        if cancel.is_cancelled() {
            return Err(ExtractError::Cancelled);
        }
        let arena = &decl.arena;
        let finally = arena.unique_top_level("finally");
        // Anchor on `finally`; fall back to the chain tail so that a
        // missing terminator still yields steps (AGWF010 is a warning).
        let anchor = finally.or_else(|| top_level_tail(arena));
        let chain = anchor.map(|id| linearize(arena, id)).unwrap_or_default();
        Ok(Self {
            decl,
            types,
            cancel,
            finally,
            chain,
        })
    }

    pub fn arena(&self) -> &InvocationArena {
        &self.decl.arena
    }

    pub fn check_cancelled(&self) -> Result<(), ExtractError> {
        if self.cancel.is_cancelled() {
            Err(ExtractError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// The last top-level invocation that nothing chains onto. Case calls
/// (`when`/`otherwise`) sit at depth zero as branch arguments but are
/// never the chain tail.
fn top_level_tail(arena: &InvocationArena) -> Option<InvocationId> {
    arena
        .iter()
        .filter(|(id, node)| {
            node.lambda_depth == 0
                && arena.caller_of(*id).is_none()
                && !matches!(node.method_name.as_str(), "when" | "otherwise")
        })
        .map(|(id, _)| id)
        .last()
}

/// Walk receiver-wards from `tail` and return the chain in source order.
pub(crate) fn linearize(arena: &InvocationArena, tail: InvocationId) -> Vec<InvocationId> {
    let mut out = Vec::new();
    let mut current = Some(tail);
    while let Some(id) = current {
        out.push(id);
        current = arena.get(id).receiver;
    }
    out.reverse();
    out
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
