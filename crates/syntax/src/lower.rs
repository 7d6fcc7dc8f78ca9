// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lowering of fluent-chain expressions into the invocation arena.
//!
//! Unrecognized expressions lower to nothing: the chain walker treats a
//! missing receiver as an opaque boundary, which is what gives the
//! pipeline its tolerance of partially-edited source.

use crate::invocation::{Argument, Invocation, InvocationArena, InvocationId, LambdaArg};
use crate::text::{expr_text, type_text};
use sg_model::SourceLocation;
use syn::{Expr, ExprClosure, GenericArgument, PathArguments};

pub(crate) struct Lowerer<'a> {
    file: &'a str,
    arena: InvocationArena,
    depth: usize,
}

impl<'a> Lowerer<'a> {
    pub(crate) fn new(file: &'a str) -> Self {
        Self {
            file,
            arena: InvocationArena::default(),
            depth: 0,
        }
    }

    /// Lower a full chain expression and seal the arena.
    pub(crate) fn lower_chain(mut self, expr: &Expr) -> InvocationArena {
        self.lower_expr(expr);
        self.arena.seal();
        self.arena
    }

    fn location(&self, span: proc_macro2::Span) -> SourceLocation {
        let start = span.start();
        SourceLocation::new(self.file, start.line, start.column + 1)
    }

    /// Lower one expression, returning the id of its outermost invocation.
    fn lower_expr(&mut self, expr: &Expr) -> Option<InvocationId> {
        match expr {
            Expr::MethodCall(call) => {
                let (receiver, receiver_param) = match &*call.receiver {
                    Expr::Path(path) if path.path.segments.len() == 1 => {
                        (None, Some(path.path.segments[0].ident.to_string()))
                    }
                    other => (self.lower_expr(other), None),
                };
                let type_arguments = call
                    .turbofish
                    .as_ref()
                    .map(|fish| generic_type_texts(&fish.args))
                    .unwrap_or_default();
                let id = self.arena.push(Invocation {
                    method_name: call.method.to_string(),
                    type_arguments,
                    arguments: Vec::new(),
                    receiver,
                    receiver_param,
                    lambda_depth: self.depth,
                    location: self.location(call.method.span()),
                });
                let arguments = call.args.iter().map(|arg| self.lower_arg(arg)).collect();
                self.arena.set_arguments(id, arguments);
                Some(id)
            }
            Expr::Call(call) => {
                let Expr::Path(path) = &*call.func else {
                    return None;
                };
                let last = path.path.segments.last()?;
                let type_arguments = path
                    .path
                    .segments
                    .iter()
                    .find_map(|seg| match &seg.arguments {
                        PathArguments::AngleBracketed(args) => Some(generic_type_texts(&args.args)),
                        _ => None,
                    })
                    .unwrap_or_default();
                let id = self.arena.push(Invocation {
                    method_name: last.ident.to_string(),
                    type_arguments,
                    arguments: Vec::new(),
                    receiver: None,
                    receiver_param: None,
                    lambda_depth: self.depth,
                    location: self.location(last.ident.span()),
                });
                let arguments = call.args.iter().map(|arg| self.lower_arg(arg)).collect();
                self.arena.set_arguments(id, arguments);
                Some(id)
            }
            Expr::Paren(inner) => self.lower_expr(&inner.expr),
            Expr::Block(block) => {
                let mut last = None;
                for stmt in &block.block.stmts {
                    if let syn::Stmt::Expr(expr, _) = stmt {
                        last = self.lower_expr(expr);
                    }
                }
                last
            }
            _ => None,
        }
    }

    fn lower_arg(&mut self, expr: &Expr) -> Argument {
        match expr {
            Expr::Lit(lit) => match &lit.lit {
                syn::Lit::Str(s) => Argument::Str(s.value()),
                syn::Lit::Int(n) => n
                    .base10_parse::<u64>()
                    .map(Argument::Int)
                    .unwrap_or_else(|_| Argument::Other(expr_text(expr))),
                syn::Lit::Bool(b) => Argument::Bool(b.value()),
                _ => Argument::Other(expr_text(expr)),
            },
            Expr::Path(path) => Argument::Path(expr_text(&Expr::Path(path.clone()))),
            Expr::Closure(closure) => Argument::Lambda(self.lower_lambda(closure)),
            Expr::Call(_) | Expr::MethodCall(_) => match self.lower_expr(expr) {
                Some(id) => Argument::Call(id),
                None => Argument::Other(expr_text(expr)),
            },
            other => Argument::Other(expr_text(other)),
        }
    }

    fn lower_lambda(&mut self, closure: &ExprClosure) -> LambdaArg {
        let param = closure.inputs.first().and_then(|pat| match pat {
            syn::Pat::Ident(ident) => Some(ident.ident.to_string()),
            _ => None,
        });
        let body_text = expr_text(&closure.body);
        let property_path = param
            .as_deref()
            .and_then(|p| selector_path(p, &closure.body));

        self.depth += 1;
        let chain_tails = match &*closure.body {
            Expr::Block(block) => block
                .block
                .stmts
                .iter()
                .filter_map(|stmt| match stmt {
                    syn::Stmt::Expr(expr, _) => self.lower_expr(expr),
                    _ => None,
                })
                .collect(),
            body => self.lower_expr(body).into_iter().collect(),
        };
        self.depth -= 1;

        LambdaArg {
            param,
            body_text,
            property_path,
            chain_tails,
        }
    }
}

fn generic_type_texts(
    args: &syn::punctuated::Punctuated<GenericArgument, syn::Token![,]>,
) -> Vec<String> {
    args.iter()
        .filter_map(|arg| match arg {
            GenericArgument::Type(ty) => Some(type_text(ty)),
            _ => None,
        })
        .collect()
}

/// Resolve `|s| s.x.y` to `x.y` and `|s| s.m()` to `m()`. Returns `None`
/// when the body is not a plain selector off the closure parameter.
fn selector_path(param: &str, body: &Expr) -> Option<String> {
    fn walk(param: &str, expr: &Expr, segments: &mut Vec<String>) -> bool {
        match expr {
            Expr::Path(path) => {
                path.path.segments.len() == 1 && path.path.segments[0].ident == param
            }
            Expr::Field(field) => {
                if !walk(param, &field.base, segments) {
                    return false;
                }
                match &field.member {
                    syn::Member::Named(ident) => {
                        segments.push(ident.to_string());
                        true
                    }
                    syn::Member::Unnamed(index) => {
                        segments.push(index.index.to_string());
                        true
                    }
                }
            }
            Expr::MethodCall(call) if call.args.is_empty() => {
                if !walk(param, &call.receiver, segments) {
                    return false;
                }
                segments.push(format!("{}()", call.method));
                true
            }
            _ => false,
        }
    }

    let mut segments = Vec::new();
    if walk(param, body, &mut segments) && !segments.is_empty() {
        Some(segments.join("."))
    } else {
        None
    }
}

#[cfg(test)]
#[path = "lower_tests.rs"]
mod tests;
