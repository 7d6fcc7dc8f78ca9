// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostic record tests.

use super::*;

#[test]
fn display_includes_code_and_location() {
    let d = Diagnostic::error(
        codes::DUPLICATE_STEP_NAME,
        "duplicate step 'Polish'",
        SourceLocation::new("flows.rs", 12, 9),
    );
    assert_eq!(
        d.to_string(),
        "error: duplicate step 'Polish' [AGWF003] at flows.rs:12:9"
    );
}

#[test]
fn fatal_codes_skip_the_workflow() {
    let loc = SourceLocation::default();
    assert!(Diagnostic::error(codes::EMPTY_WORKFLOW_NAME, "", loc.clone()).is_fatal());
    assert!(Diagnostic::error(codes::NO_MODULE, "", loc.clone()).is_fatal());
    assert!(!Diagnostic::error(codes::FORK_WITHOUT_JOIN, "", loc.clone()).is_fatal());
    assert!(!Diagnostic::warning(codes::NO_FINALLY, "", loc).is_fatal());
}

#[test]
fn severity_orders_error_above_warning() {
    assert!(Severity::Error > Severity::Warning);
}

#[test]
fn serializes_to_lowercase_severity() {
    let d = Diagnostic::warning(codes::NO_STEPS, "no steps", SourceLocation::default());
    let json = serde_json::to_value(&d).unwrap();
    assert_eq!(json["severity"], "warning");
    assert_eq!(json["code"], "AGWF002");
}
