// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Expression text reconstruction.
//!
//! Validation predicates, state selectors, and branch discriminators are
//! carried through the pipeline as source text and re-emitted with only a
//! lexical parameter rewrite. `syn` does not preserve raw source slices,
//! so the text is rebuilt from the token stream with conventional spacing.

use proc_macro2::{Delimiter, Spacing, TokenStream, TokenTree};
use quote::ToTokens;

/// Render an expression back to conventional source text.
pub fn expr_text(expr: &syn::Expr) -> String {
    render(expr.to_token_stream(), false)
}

/// Render a type back to conventional source text. Angle brackets are
/// always generic delimiters here, never comparison operators.
pub fn type_text(ty: &syn::Type) -> String {
    render(ty.to_token_stream(), true)
}

#[derive(Debug)]
enum Tok {
    Ident(String),
    Literal(String),
    Op(String),
    Group(Delimiter, String),
}

impl Tok {
    fn text(&self) -> &str {
        match self {
            Tok::Ident(s) | Tok::Literal(s) | Tok::Op(s) | Tok::Group(_, s) => s,
        }
    }
}

fn render(stream: TokenStream, tight_angles: bool) -> String {
    let toks = flatten(stream, tight_angles);
    join(&toks, tight_angles)
}

/// Merge joint punctuation into multi-character operators and pre-render
/// groups recursively.
fn flatten(stream: TokenStream, tight_angles: bool) -> Vec<Tok> {
    let mut toks = Vec::new();
    let mut pending_op = String::new();
    for tree in stream {
        match tree {
            TokenTree::Punct(p) => {
                pending_op.push(p.as_char());
                if p.spacing() == Spacing::Alone {
                    toks.push(Tok::Op(std::mem::take(&mut pending_op)));
                }
            }
            other => {
                if !pending_op.is_empty() {
                    toks.push(Tok::Op(std::mem::take(&mut pending_op)));
                }
                match other {
                    TokenTree::Ident(i) => toks.push(Tok::Ident(i.to_string())),
                    TokenTree::Literal(l) => toks.push(Tok::Literal(l.to_string())),
                    TokenTree::Group(g) => {
                        let inner = render(g.stream(), tight_angles);
                        toks.push(Tok::Group(g.delimiter(), group_text(g.delimiter(), &inner)));
                    }
                    TokenTree::Punct(_) => {}
                }
            }
        }
    }
    if !pending_op.is_empty() {
        toks.push(Tok::Op(pending_op));
    }
    toks
}

fn group_text(delim: Delimiter, inner: &str) -> String {
    match delim {
        Delimiter::Parenthesis => format!("({inner})"),
        Delimiter::Bracket => format!("[{inner}]"),
        Delimiter::Brace => {
            if inner.is_empty() {
                "{}".to_string()
            } else {
                format!("{{ {inner} }}")
            }
        }
        Delimiter::None => inner.to_string(),
    }
}

fn join(toks: &[Tok], tight_angles: bool) -> String {
    let mut out = String::new();
    let mut turbofish_depth = 0usize;
    for (i, tok) in toks.iter().enumerate() {
        let prev = if i == 0 { None } else { Some(&toks[i - 1]) };
        if tok.text() == "<" && (tight_angles || matches!(prev, Some(t) if t.text() == "::")) {
            turbofish_depth += 1;
        }
        if needs_space(prev, tok, turbofish_depth) {
            out.push(' ');
        }
        out.push_str(tok.text());
        if tok.text() == ">" && turbofish_depth > 0 {
            turbofish_depth -= 1;
        }
    }
    out
}

fn needs_space(prev: Option<&Tok>, cur: &Tok, turbofish_depth: usize) -> bool {
    let Some(prev) = prev else { return false };
    let p = prev.text();
    let c = cur.text();

    // Path and member access glue tightly.
    if c == "." || c == "::" || p == "." || p == "::" {
        return false;
    }
    // Separators hug the preceding token.
    if c == "," || c == ";" {
        return false;
    }
    // Inside a turbofish, angle brackets and arguments pack tightly.
    if turbofish_depth > 0 && (c == "<" || c == ">" || p == "<" || p == ">") {
        return false;
    }
    // Unary prefixes bind to their operand.
    if p == "!" || p == "&" {
        return false;
    }
    // Call arguments and indexing attach to the callee.
    if matches!(cur, Tok::Group(Delimiter::Parenthesis | Delimiter::Bracket, _)) {
        return matches!(prev, Tok::Op(op) if op != "." && op != "::" && op != "!" && op != "&");
    }
    true
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
