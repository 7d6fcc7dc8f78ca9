// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Extraction error types.

use thiserror::Error;

/// Errors that abort an extraction pass.
///
/// User mistakes in the DSL never land here — they become diagnostics or
/// skipped constructs. Cancellation is the one condition that stops the
/// pipeline mid-pass.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("generation cancelled")]
    Cancelled,
}
