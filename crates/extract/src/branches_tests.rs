// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Branch extraction tests.

use super::*;
use crate::test_support::decl_from_chain;
use sg_model::CancelFlag;

fn branches_of(chain: &str) -> Vec<BranchModel> {
    let (decl, types) = decl_from_chain(chain);
    let ctx = ParseContext::create(&decl, &types, CancelFlag::new()).unwrap();
    extract_branches(&ctx).unwrap()
}

#[test]
fn enum_branch_extracts_cases_and_rejoin() {
    let branches = branches_of(
        "Workflow::<S>::create(\"x\")\
         .start_with::<Assess>()\
         .branch(|s| s.kind, \
            when(OrderKind::Auto, |p| p.then::<AutoProc>()), \
            when(OrderKind::Manual, |p| p.then::<ManualProc>()), \
            otherwise(|p| p.then::<Escalate>()))\
         .then::<Notify>()\
         .finally::<End>()",
    );
    assert_eq!(branches.len(), 1);
    let b = &branches[0];
    assert_eq!(b.branch_id, "BranchByKind");
    assert_eq!(b.previous_step_name, "Assess");
    assert_eq!(b.discriminator_property_path, "kind");
    assert!(b.is_enum_discriminator);
    assert!(!b.is_method_discriminator);
    assert_eq!(b.discriminator_type_name, "OrderKind");
    assert_eq!(b.rejoin_step_name.as_deref(), Some("Notify"));
    assert_eq!(b.cases.len(), 3);
    assert_eq!(b.cases[0].case_value_literal, "OrderKind::Auto");
    assert_eq!(b.cases[0].step_names, ["AutoProc"]);
    assert_eq!(b.cases[2].case_value_literal, "default");
}

#[test]
fn string_and_numeric_case_values_keep_literal_text() {
    let branches = branches_of(
        "Workflow::<S>::create(\"x\")\
         .start_with::<Assess>()\
         .branch(|s| s.tier, \
            when(\"gold\", |p| p.then::<GoldPath>()), \
            when(2, |p| p.then::<SilverPath>()), \
            when(true, |p| p.then::<FlagPath>()))\
         .finally::<End>()",
    );
    let values: Vec<_> = branches[0]
        .cases
        .iter()
        .map(|c| c.case_value_literal.as_str())
        .collect();
    assert_eq!(values, ["\"gold\"", "2", "true"]);
}

#[test]
fn method_discriminator_is_flagged() {
    let branches = branches_of(
        "Workflow::<S>::create(\"x\")\
         .start_with::<Assess>()\
         .branch(|s| s.risk_level(), when(1, |p| p.then::<LowRisk>()))\
         .finally::<End>()",
    );
    let b = &branches[0];
    assert!(b.is_method_discriminator);
    assert_eq!(b.discriminator_property_path, "risk_level()");
    assert_eq!(b.branch_id, "BranchByRiskLevel");
}

#[test]
fn consecutive_branches_link_into_a_chain() {
    let branches = branches_of(
        "Workflow::<S>::create(\"x\")\
         .start_with::<Assess>()\
         .branch(|s| s.kind, when(OrderKind::Auto, |p| p.then::<AutoProc>()))\
         .branch(|s| s.size, when(1, |p| p.then::<Small>()))\
         .then::<Notify>()\
         .finally::<End>()",
    );
    // One head; the second branch hangs off it.
    assert_eq!(branches.len(), 1);
    let head = &branches[0];
    assert_eq!(head.previous_step_name, "Assess");
    let tail = head.next_consecutive_branch.as_deref().unwrap();
    assert!(tail.is_consecutive());
    assert_eq!(tail.discriminator_property_path, "size");
    // Rejoin skips the consecutive run.
    assert_eq!(head.rejoin_step_name.as_deref(), Some("Notify"));
    assert_eq!(tail.rejoin_step_name.as_deref(), Some("Notify"));
}

#[test]
fn loop_exit_branches_are_skipped() {
    let branches = branches_of(
        "Workflow::<S>::create(\"x\")\
         .start_with::<A>()\
         .repeat_until(|s| s.done, \"Polish\", |l| l.then::<Buff>(), 5)\
         .branch(|s| s.kind, when(OrderKind::Auto, |p| p.then::<AutoProc>()))\
         .finally::<End>()",
    );
    assert!(branches.is_empty());
}

#[test]
fn terminal_case_is_marked() {
    let branches = branches_of(
        "Workflow::<S>::create(\"x\")\
         .start_with::<Assess>()\
         .branch(|s| s.kind, \
            when(OrderKind::Auto, |p| p.then::<AutoProc>().complete()), \
            otherwise(|p| p.then::<Escalate>()))\
         .finally::<End>()",
    );
    let b = &branches[0];
    assert!(b.cases[0].is_terminal);
    assert!(!b.cases[1].is_terminal);
}

#[test]
fn branch_inside_a_loop_carries_the_prefix() {
    let branches = branches_of(
        "Workflow::<S>::create(\"x\")\
         .start_with::<A>()\
         .repeat_until(|s| s.done, \"Review\", |l| l\
            .then::<Score>()\
            .branch(|s| s.kind, when(OrderKind::Auto, |p| p.then::<Fast>()))\
            .then::<Log>(), 3)\
         .finally::<End>()",
    );
    assert_eq!(branches.len(), 1);
    let b = &branches[0];
    assert_eq!(b.loop_prefix.as_deref(), Some("Review"));
    assert_eq!(b.previous_step_name, "Review_Score");
    assert_eq!(b.rejoin_step_name.as_deref(), Some("Review_Log"));
}
