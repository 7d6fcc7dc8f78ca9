// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lexical normalization of lambda-parameter references.
//!
//! Predicates and selectors are carried as text; the only transformation
//! ever applied is replacing the author's closure parameter with the
//! canonical `state`, so emitters can later rewrite `state.` to
//! `self.state.` without re-parsing.

use regex::Regex;

/// Replace whole-word occurrences of `param` with `state`.
pub(crate) fn normalize_param(body: &str, param: &str) -> String {
    if param == "state" {
        return body.to_string();
    }
    match Regex::new(&format!(r"\b{}\b", regex::escape(param))) {
        Ok(re) => re.replace_all(body, "state").into_owned(),
        // An identifier always forms a valid pattern; tolerate anyway.
        Err(_) => body.to_string(),
    }
}

#[cfg(test)]
#[path = "rewrite_tests.rs"]
mod tests;
