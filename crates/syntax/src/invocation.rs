// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The invocation arena: a fluent chain lowered to plain values.
//!
//! Nodes are linked by index (receiver and caller edges), never by
//! reference, so extraction can walk the chain in both directions without
//! borrowing the syntax tree. Insertion order is source order.

use sg_model::SourceLocation;

/// Index of an invocation within its arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InvocationId(pub usize);

/// A closure passed as an argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LambdaArg {
    /// First closure parameter identifier, when present.
    pub param: Option<String>,
    /// Rendered body text (for predicates and selectors).
    pub body_text: String,
    /// Dotted selector path when the body selects off the parameter
    /// (`|s| s.x.y` → `x.y`, `|s| s.m()` → `m()`).
    pub property_path: Option<String>,
    /// Outermost invocation of each top-level fluent chain in the body.
    /// Nested closures keep their own tails; they do not appear here.
    pub chain_tails: Vec<InvocationId>,
}

/// One argument of an invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    Str(String),
    Int(u64),
    Bool(bool),
    /// A bare or qualified path (`OrderKind::Auto`, `route_by_priority`).
    Path(String),
    Lambda(LambdaArg),
    /// A nested call lowered into the arena (`when(..)`, `otherwise(..)`).
    Call(InvocationId),
    /// Anything else, carried as text and treated as opaque.
    Other(String),
}

/// One method or function call in the fluent chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub method_name: String,
    /// Turbofish type arguments, rendered as text.
    pub type_arguments: Vec<String>,
    pub arguments: Vec<Argument>,
    /// The immediate syntactic receiver, when it is itself an invocation.
    pub receiver: Option<InvocationId>,
    /// The closure parameter the chain starts on (`|p| p.then..`).
    pub receiver_param: Option<String>,
    /// 0 for the top-level chain, +1 per enclosing closure.
    pub lambda_depth: usize,
    pub location: SourceLocation,
}

impl Invocation {
    pub fn is_generic(&self) -> bool {
        !self.type_arguments.is_empty()
    }

    /// First string-literal argument, at any position.
    pub fn first_string_arg(&self) -> Option<&str> {
        self.arguments.iter().find_map(|a| match a {
            Argument::Str(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// First integer-literal argument, at any position.
    pub fn first_int_arg(&self) -> Option<u64> {
        self.arguments.iter().find_map(|a| match a {
            Argument::Int(n) => Some(*n),
            _ => None,
        })
    }

    /// Lambda arguments in declaration order.
    pub fn lambda_args(&self) -> impl Iterator<Item = &LambdaArg> {
        self.arguments.iter().filter_map(|a| match a {
            Argument::Lambda(l) => Some(l),
            _ => None,
        })
    }

    /// Nested call arguments in declaration order.
    pub fn call_args(&self) -> impl Iterator<Item = InvocationId> + '_ {
        self.arguments.iter().filter_map(|a| match a {
            Argument::Call(id) => Some(*id),
            _ => None,
        })
    }
}

/// Arena of invocations for one workflow declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationArena {
    nodes: Vec<Invocation>,
    callers: Vec<Option<InvocationId>>,
}

impl InvocationArena {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: InvocationId) -> &Invocation {
        &self.nodes[id.0]
    }

    /// All invocations in source order.
    pub fn iter(&self) -> impl Iterator<Item = (InvocationId, &Invocation)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (InvocationId(i), node))
    }

    /// Whether `a` is the immediate syntactic receiver of `b`.
    pub fn is_receiver_of(&self, a: InvocationId, b: InvocationId) -> bool {
        self.get(b).receiver == Some(a)
    }

    /// The invocation chained onto `id`, if any (`a.b()`: caller of `a`
    /// is `b`). Nested-call arguments do not count as callers.
    pub fn caller_of(&self, id: InvocationId) -> Option<InvocationId> {
        self.callers.get(id.0).copied().flatten()
    }

    /// Top-level (depth 0) invocations with the given method name, in
    /// source order.
    pub fn top_level(&self, method: &str) -> Vec<InvocationId> {
        self.iter()
            .filter(|(_, node)| node.lambda_depth == 0 && node.method_name == method)
            .map(|(id, _)| id)
            .collect()
    }

    /// The unique top-level invocation with the given method name, if
    /// there is exactly one.
    pub fn unique_top_level(&self, method: &str) -> Option<InvocationId> {
        let found = self.top_level(method);
        match found.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// All invocations with the given method name at any depth.
    pub fn all_named(&self, method: &str) -> Vec<InvocationId> {
        self.iter()
            .filter(|(_, node)| node.method_name == method)
            .map(|(id, _)| id)
            .collect()
    }

    pub(crate) fn push(&mut self, node: Invocation) -> InvocationId {
        let id = InvocationId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub(crate) fn set_arguments(&mut self, id: InvocationId, arguments: Vec<Argument>) {
        self.nodes[id.0].arguments = arguments;
    }

    /// Compute inverse receiver edges. Called once after lowering.
    pub(crate) fn seal(&mut self) {
        self.callers = vec![None; self.nodes.len()];
        for (i, node) in self.nodes.iter().enumerate() {
            if let Some(recv) = node.receiver {
                self.callers[recv.0] = Some(InvocationId(i));
            }
        }
    }
}
