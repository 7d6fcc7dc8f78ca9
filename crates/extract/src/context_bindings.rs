// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Context-binding extraction from `with_context` configuration.

use crate::context::{linearize, ParseContext};
use crate::error::ExtractError;
use crate::steps::preceding_step_name;
use crate::walker::Walker;
use sg_model::{ContextBindingModel, ContextSourceModel};

pub(crate) fn extract_context_bindings(
    ctx: &ParseContext<'_>,
) -> Result<Vec<ContextBindingModel>, ExtractError> {
    let prefixes = Walker::prefix_map(ctx)?;
    let mut out = Vec::new();
    for id in ctx.arena().all_named("with_context") {
        ctx.check_cancelled()?;
        let inv = ctx.arena().get(id);
        let prefix = prefixes.get(&id).cloned().flatten();
        let Some(step_name) = preceding_step_name(ctx, id, prefix.as_deref()) else {
            continue;
        };
        let Some(config) = inv.lambda_args().last() else {
            continue;
        };

        let mut sources = Vec::new();
        for tail in &config.chain_tails {
            for cid in linearize(ctx.arena(), *tail) {
                let node = ctx.arena().get(cid);
                match node.method_name.as_str() {
                    "literal" => {
                        if let Some(text) = node.first_string_arg() {
                            sources.push(ContextSourceModel::Literal(text.to_string()));
                        }
                    }
                    "from_state" => {
                        if let Some(path) = node
                            .lambda_args()
                            .next()
                            .and_then(|l| l.property_path.clone())
                        {
                            sources.push(ContextSourceModel::StatePath(path));
                        }
                    }
                    "from_retrieval" => {
                        if let Some(ty) = node.type_arguments.first() {
                            sources.push(ContextSourceModel::Retrieval {
                                collection_type_name: ctx.types.resolve(ty).simple_name,
                            });
                        }
                    }
                    _ => {}
                }
            }
        }
        if sources.is_empty() {
            continue;
        }
        out.push(ContextBindingModel { step_name, sources });
    }
    Ok(out)
}

#[cfg(test)]
#[path = "context_bindings_tests.rs"]
mod tests;
