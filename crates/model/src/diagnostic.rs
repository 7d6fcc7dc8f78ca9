// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostic records reported by structural validation.
//!
//! Diagnostics never abort a generation pass by themselves; the driver
//! decides which codes make a workflow unemittable (AGWF001, AGWF004).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic codes for workflow structure (AGWF) and state reducer (AGSR)
/// violations.
pub mod codes {
    /// Workflow name empty or whitespace.
    pub const EMPTY_WORKFLOW_NAME: &str = "AGWF001";
    /// No step invocations found.
    pub const NO_STEPS: &str = "AGWF002";
    /// Duplicate effective name in a non-exclusive context.
    pub const DUPLICATE_STEP_NAME: &str = "AGWF003";
    /// Workflow type declared outside any module.
    pub const NO_MODULE: &str = "AGWF004";
    /// Chain does not begin with `start_with`.
    pub const NO_START_WITH: &str = "AGWF009";
    /// Chain has no `finally` terminator.
    pub const NO_FINALLY: &str = "AGWF010";
    /// `fork` without a matching `join`.
    pub const FORK_WITHOUT_JOIN: &str = "AGWF012";
    /// `repeat_until` body contains no step method.
    pub const EMPTY_LOOP_BODY: &str = "AGWF014";
    /// `#[append]` on a non-collection property.
    pub const APPEND_NOT_COLLECTION: &str = "AGSR001";
    /// `#[merge]` on a non-map property.
    pub const MERGE_NOT_MAP: &str = "AGSR002";
}

/// Severity of a reported diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Position of the offending syntax in the original source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// A single reported violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: String,
    pub severity: Severity,
    pub message: String,
    pub location: SourceLocation,
}

impl Diagnostic {
    pub fn error(code: &str, message: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            code: code.to_string(),
            severity: Severity::Error,
            message: message.into(),
            location,
        }
    }

    pub fn warning(code: &str, message: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            code: code.to_string(),
            severity: Severity::Warning,
            message: message.into(),
            location,
        }
    }

    /// True when this diagnostic prevents emission of the whole workflow.
    pub fn is_fatal(&self) -> bool {
        self.code == codes::EMPTY_WORKFLOW_NAME || self.code == codes::NO_MODULE
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} [{}] at {}",
            self.severity, self.message, self.code, self.location
        )
    }
}

#[cfg(test)]
#[path = "diagnostic_tests.rs"]
mod tests;
