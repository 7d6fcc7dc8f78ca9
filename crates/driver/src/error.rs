// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Driver error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop the driver (oracle infrastructure and IO). DSL-level
/// problems surface as diagnostics instead.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Oracle(#[from] sg_syntax::OracleError),

    #[error(transparent)]
    Extract(#[from] sg_extract::ExtractError),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
