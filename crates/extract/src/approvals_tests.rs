// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Approval extraction tests.

use super::*;
use crate::test_support::decl_from_chain;
use sg_model::CancelFlag;

fn approvals_of(chain: &str) -> Vec<ApprovalModel> {
    let (decl, types) = decl_from_chain(chain);
    let ctx = ParseContext::create(&decl, &types, CancelFlag::new()).unwrap();
    extract_approvals(&ctx).unwrap()
}

#[test]
fn approval_point_name_strips_the_approver_suffix() {
    let approvals = approvals_of(
        "Workflow::<S>::create(\"x\")\
         .start_with::<Submit>()\
         .await_approval::<ComplianceApprover>(|a| a)\
         .finally::<Done>()",
    );
    assert_eq!(approvals.len(), 1);
    let a = &approvals[0];
    assert_eq!(a.approval_point_name, "Compliance");
    assert_eq!(a.approver_type_name, "ComplianceApprover");
    assert_eq!(a.preceding_step_name, "Submit");
    assert!(!a.has_rejection_handler());
    assert!(!a.has_escalation_handler());
}

#[test]
fn bare_approver_type_falls_back_to_an_ordinal_name() {
    let approvals = approvals_of(
        "Workflow::<S>::create(\"x\")\
         .start_with::<Submit>()\
         .await_approval::<Approver>(|a| a)\
         .finally::<Done>()",
    );
    assert_eq!(approvals[0].approval_point_name, "Approval1");
}

#[test]
fn rejection_and_timeout_handlers_collect_steps() {
    let approvals = approvals_of(
        "Workflow::<S>::create(\"x\")\
         .start_with::<Submit>()\
         .await_approval::<ComplianceApprover>(|a| a\
            .on_rejection(|h| h.then::<NotifyReject>().complete())\
            .on_timeout(|h| h.then::<Remind>()))\
         .finally::<Done>()",
    );
    let a = &approvals[0];
    assert_eq!(a.rejection_steps, ["NotifyReject"]);
    assert!(a.is_rejection_terminal);
    assert_eq!(a.escalation_steps, ["Remind"]);
    assert!(!a.is_escalation_terminal);
}

#[test]
fn escalation_produces_a_nested_approval() {
    let approvals = approvals_of(
        "Workflow::<S>::create(\"x\")\
         .start_with::<Submit>()\
         .await_approval::<ManagerApprover>(|a| a\
            .on_timeout(|h| h.escalate_to::<DirectorApprover>(|e| e\
                .on_rejection(|r| r.then::<Abort>().complete()))))\
         .finally::<Done>()",
    );
    let a = &approvals[0];
    assert_eq!(a.nested_escalation_approvals.len(), 1);
    let nested = &a.nested_escalation_approvals[0];
    assert_eq!(nested.approval_point_name, "Director");
    assert_eq!(nested.preceding_step_name, "Escalation");
    assert!(nested.is_rejection_terminal);
    assert_eq!(nested.rejection_steps, ["Abort"]);
}

#[test]
fn approval_inside_a_branch_lambda_uses_the_sentinel() {
    let approvals = approvals_of(
        "Workflow::<S>::create(\"x\")\
         .start_with::<Assess>()\
         .branch(|s| s.kind, \
            when(OrderKind::Manual, |p| p.await_approval::<ReviewApprover>(|a| a)))\
         .finally::<Done>()",
    );
    assert_eq!(approvals[0].preceding_step_name, "BranchPath");
}
