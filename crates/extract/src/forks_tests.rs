// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fork extraction tests.

use super::*;
use crate::test_support::decl_from_chain;
use sg_model::CancelFlag;

fn forks_of(chain: &str) -> Vec<ForkModel> {
    let (decl, types) = decl_from_chain(chain);
    let ctx = ParseContext::create(&decl, &types, CancelFlag::new()).unwrap();
    extract_forks(&ctx).unwrap()
}

#[test]
fn two_path_fork_extracts_paths_and_join() {
    let forks = forks_of(
        "Workflow::<S>::create(\"x\")\
         .start_with::<Gather>()\
         .fork(|p| p.then::<Alpha>(), |p| p.then::<Beta>())\
         .join::<Synth>()\
         .finally::<Report>()",
    );
    assert_eq!(forks.len(), 1);
    let f = &forks[0];
    assert_eq!(f.fork_id, "Fork1");
    assert_eq!(f.previous_step_name, "Gather");
    assert_eq!(f.join_step_name, "Synth");
    assert_eq!(f.paths.len(), 2);
    assert_eq!(f.paths[0].step_names, ["Alpha"]);
    assert_eq!(f.paths[1].step_names, ["Beta"]);
    assert_eq!(f.paths[1].path_index, 1);
}

#[test]
fn instance_named_paths_use_effective_names() {
    let forks = forks_of(
        "Workflow::<S>::create(\"x\")\
         .start_with::<Gather>()\
         .fork(|p| p.then::<Analyze>(\"Technical\"), |p| p.then::<Analyze>(\"Fundamental\"))\
         .join::<Combine>()\
         .finally::<Done>()",
    );
    let f = &forks[0];
    assert_eq!(f.paths[0].step_names, ["Technical"]);
    assert_eq!(f.paths[1].step_names, ["Fundamental"]);
}

#[test]
fn fork_without_join_produces_no_model() {
    let forks = forks_of(
        "Workflow::<S>::create(\"x\")\
         .start_with::<Gather>()\
         .fork(|p| p.then::<Alpha>(), |p| p.then::<Beta>())\
         .then::<Oops>()\
         .finally::<Report>()",
    );
    assert!(forks.is_empty());
}

#[test]
fn path_failure_handlers_are_recorded() {
    let forks = forks_of(
        "Workflow::<S>::create(\"x\")\
         .start_with::<Gather>()\
         .fork(\
            |p| p.then::<Alpha>().on_failure(|h| h.then::<AlphaFallback>()), \
            |p| p.then::<Beta>().on_failure(|h| h.then::<Abort>().complete()))\
         .join::<Synth>()\
         .finally::<Report>()",
    );
    let f = &forks[0];
    assert!(f.paths[0].has_failure_handler);
    assert!(!f.paths[0].is_terminal_on_failure);
    assert_eq!(
        f.paths[0].failure_handler_step_names.as_deref(),
        Some(&["AlphaFallback".to_string()][..])
    );
    assert!(f.paths[1].is_terminal_on_failure);
}

#[test]
fn multi_step_paths_keep_order() {
    let forks = forks_of(
        "Workflow::<S>::create(\"x\")\
         .start_with::<Gather>()\
         .fork(|p| p.then::<Fetch>().then::<Clean>(), |p| p.then::<Survey>())\
         .join::<Merge>()\
         .finally::<Done>()",
    );
    assert_eq!(forks[0].paths[0].step_names, ["Fetch", "Clean"]);
}
