// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Branch extraction and consecutive-branch linking.

use crate::context::ParseContext;
use crate::error::ExtractError;
use crate::steps::{following_step_name, preceding_step_name, step_effective_name};
use crate::walker::Walker;
use sg_model::{pascal_identifier, BranchCaseModel, BranchModel};
use sg_syntax::{Argument, Invocation, InvocationId};
use std::collections::HashMap;

pub(crate) fn extract_branches(ctx: &ParseContext<'_>) -> Result<Vec<BranchModel>, ExtractError> {
    let prefixes = Walker::prefix_map(ctx)?;
    let mut parsed: Vec<(InvocationId, BranchModel)> = Vec::new();
    let mut taken_ids: Vec<String> = Vec::new();

    for (ordinal, id) in ctx.arena().all_named("branch").into_iter().enumerate() {
        ctx.check_cancelled()?;
        let inv = ctx.arena().get(id);

        // Branches chained directly onto `repeat_until` are loop-exit
        // branches; the loop emitter owns those transitions.
        if let Some(recv) = inv.receiver {
            if ctx.arena().get(recv).method_name == "repeat_until" {
                continue;
            }
        }

        let prefix = prefixes.get(&id).cloned().flatten();
        let Some(discriminator) = parse_discriminator(ctx, inv) else {
            // Unresolvable discriminators make the construct opaque.
            continue;
        };

        let consecutive = inv
            .receiver
            .is_some_and(|recv| ctx.arena().get(recv).method_name == "branch");
        let previous_step_name = if consecutive {
            String::new()
        } else {
            match preceding_step_name(ctx, id, prefix.as_deref()) {
                Some(name) => name,
                None => continue,
            }
        };

        let (cases, enum_type) = parse_cases(ctx, inv);
        if cases.is_empty() {
            continue;
        }

        let branch_id = {
            let candidate = format!("BranchBy{}", pascal_identifier(discriminator.display_name()));
            if taken_ids.contains(&candidate) {
                format!("Branch{}", ordinal + 1)
            } else {
                candidate
            }
        };
        taken_ids.push(branch_id.clone());

        let is_enum = discriminator.is_enum || enum_type.is_some();
        let discriminator_type_name = if discriminator.type_name.is_empty() {
            enum_type.unwrap_or_default()
        } else {
            discriminator.type_name
        };

        parsed.push((
            id,
            BranchModel {
                branch_id,
                previous_step_name,
                discriminator_property_path: discriminator.path,
                discriminator_type_name,
                is_enum_discriminator: is_enum,
                is_method_discriminator: discriminator.is_method,
                cases,
                rejoin_step_name: following_step_name(ctx, id, prefix.as_deref(), &["branch"]),
                loop_prefix: prefix,
                next_consecutive_branch: None,
            },
        ));
    }

    Ok(link_consecutive(ctx, parsed))
}

/// Attach each consecutive branch to its head, right-to-left, and return
/// only the heads.
fn link_consecutive(
    ctx: &ParseContext<'_>,
    parsed: Vec<(InvocationId, BranchModel)>,
) -> Vec<BranchModel> {
    let mut by_id: HashMap<InvocationId, BranchModel> = HashMap::new();
    let mut order: Vec<InvocationId> = Vec::new();
    for (id, model) in parsed {
        order.push(id);
        by_id.insert(id, model);
    }

    for &id in order.iter().rev() {
        let Some(model) = by_id.get(&id) else { continue };
        if !model.is_consecutive() {
            continue;
        }
        let Some(recv) = ctx.arena().get(id).receiver else {
            continue;
        };
        if let Some(tail) = by_id.remove(&id) {
            if let Some(head) = by_id.get_mut(&recv) {
                head.next_consecutive_branch = Some(Box::new(tail));
            }
        }
    }

    order
        .into_iter()
        .filter_map(|id| by_id.remove(&id))
        // A consecutive branch whose head was skipped has no way in.
        .filter(|model| !model.is_consecutive())
        .collect()
}

struct Discriminator {
    path: String,
    type_name: String,
    is_enum: bool,
    is_method: bool,
}

impl Discriminator {
    /// Last path segment without call parens, for branch-id derivation.
    fn display_name(&self) -> &str {
        let last = self.path.rsplit('.').next().unwrap_or(&self.path);
        last.split('(').next().unwrap_or(last)
    }
}

fn parse_discriminator(ctx: &ParseContext<'_>, inv: &Invocation) -> Option<Discriminator> {
    match inv.arguments.first()? {
        Argument::Lambda(lambda) => {
            let path = lambda.property_path.clone()?;
            Some(Discriminator {
                is_method: path.ends_with("()"),
                path,
                type_name: String::new(),
                is_enum: false,
            })
        }
        Argument::Path(path) => {
            // A bare path is a static method reference; the saga passes
            // the state in explicitly.
            let name = path.rsplit("::").next().unwrap_or(path);
            let return_type = ctx.types.method_return(name).unwrap_or_default();
            Some(Discriminator {
                path: format!("{name}(state)"),
                type_name: return_type.to_string(),
                is_enum: ctx.types.resolve(return_type).is_enum,
                is_method: true,
            })
        }
        _ => None,
    }
}

/// Parse `when`/`otherwise` case calls. Returns the cases plus the enum
/// type inferred from member-access case values.
fn parse_cases(
    ctx: &ParseContext<'_>,
    inv: &Invocation,
) -> (Vec<BranchCaseModel>, Option<String>) {
    let mut cases = Vec::new();
    let mut enum_type = None;
    for (index, case_id) in inv.call_args().enumerate() {
        let case = ctx.arena().get(case_id);
        let value = match case.method_name.as_str() {
            "when" => match case.arguments.first() {
                Some(Argument::Path(path)) if path.contains("::") => {
                    if let Some((ty, _)) = path.rsplit_once("::") {
                        enum_type.get_or_insert_with(|| ty.to_string());
                    }
                    path.clone()
                }
                Some(Argument::Str(s)) => format!("\"{s}\""),
                Some(Argument::Int(n)) => n.to_string(),
                Some(Argument::Bool(b)) => b.to_string(),
                _ => continue,
            },
            "otherwise" => "default".to_string(),
            _ => continue,
        };
        let Some(body) = case.lambda_args().last() else {
            continue;
        };
        let ids = Walker::collect_invocations_in_lambda(ctx.arena(), body);
        let step_names: Vec<String> = ids
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
        if step_names.is_empty() {
            continue;
        }
        let is_terminal = ids
            .iter()
            .any(|&id| ctx.arena().get(id).method_name == "complete");
        cases.push(BranchCaseModel {
            case_value_literal: value,
            branch_path_prefix: format!("Case{}", index + 1),
            step_names,
            is_terminal,
        });
    }
    (cases, enum_type)
}

#[cfg(test)]
#[path = "branches_tests.rs"]
mod tests;
