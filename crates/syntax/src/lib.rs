// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Syntax oracle: a read-only adapter over the host parser (`syn`).
//!
//! The oracle lowers each workflow declaration's fluent chain into an
//! invocation arena — plain values linked by index — so that extraction
//! never touches the syntax tree directly. All results are value-equal
//! across repeated calls for an unchanged declaration.

mod decl;
mod error;
mod invocation;
mod lower;
mod oracle;
mod text;
mod types;
mod unit;

pub use decl::{state_decls, workflow_decls, StateDecl, StateField, StateMarker, WorkflowDecl};
pub use error::OracleError;
pub use invocation::{Argument, Invocation, InvocationArena, InvocationId, LambdaArg};
pub use oracle::Oracle;
pub use text::expr_text;
pub use types::{TypeIndex, TypeKind, TypeResolution};
pub use unit::SourceUnit;
