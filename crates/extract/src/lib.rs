// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Extraction: recovers the workflow IR from a lowered invocation arena.
//!
//! Each extractor is a pure function from the parse context to one IR
//! sequence. Malformed constructs are skipped rather than failing the
//! pass; structural diagnostics report what the DSL author got wrong.

mod approvals;
mod assemble;
mod branches;
mod context;
mod context_bindings;
mod diagnostics;
mod error;
mod failures;
mod forks;
mod loops;
mod rewrite;
mod steps;
#[cfg(test)]
mod test_support;
mod walker;

pub use assemble::{extract_state, extract_workflow, Extraction};
pub use context::ParseContext;
pub use error::ExtractError;
pub use walker::{InvocationNode, Walker};
