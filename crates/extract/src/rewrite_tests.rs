// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parameter normalization tests.

use super::*;
use yare::parameterized;

#[parameterized(
    short_param = { "s.total > 0", "s", "state.total > 0" },
    already_state = { "state.total > 0", "state", "state.total > 0" },
    multiple_uses = { "s.approved && s.total > 0", "s", "state.approved && state.total > 0" },
    word_boundary = { "s.status == status_of(s)", "s", "state.status == status_of(state)" },
)]
fn normalizes(body: &str, param: &str, expected: &str) {
    assert_eq!(normalize_param(body, param), expected);
}

#[test]
fn does_not_touch_identifiers_containing_the_param() {
    assert_eq!(normalize_param("sum > s.total", "s"), "sum > state.total");
}
