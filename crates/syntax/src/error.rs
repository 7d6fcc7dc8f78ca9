// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Oracle error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or parsing host source.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error in {file}: {message}")]
    Parse { file: String, message: String },
}

impl OracleError {
    pub(crate) fn parse(file: &str, err: &syn::Error) -> Self {
        let span = err.span().start();
        Self::Parse {
            file: file.to_string(),
            message: format!("{} (line {}, column {})", err, span.line, span.column + 1),
        }
    }
}
