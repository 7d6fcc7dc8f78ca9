// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end boundary scenarios: one DSL chain in, asserted artifact
//! facts out.

use crate::prelude::Project;

// Scenario 1: plain linear flow.
#[test]
fn linear_order_flow() {
    let project = Project::with_chain(
        "Workflow::<OrderState>::create(\"process-order\")\
         .start_with::<ValidateOrder>()\
         .then::<ProcessPayment>()\
         .then::<SendConfirmation>()\
         .finally::<Complete>()",
    );
    let report = project.generate();
    assert!(report.diagnostics.is_empty(), "{:?}", report.diagnostics);

    let phase = project.artifact("ProcessOrderPhase.g.rs");
    for variant in [
        "NotStarted",
        "ValidateOrder",
        "ProcessPayment",
        "SendConfirmation",
        "Complete",
        "Completed",
        "Failed",
    ] {
        assert!(phase.contains(&format!("    {variant},")), "missing {variant}");
    }
    assert!(!phase.contains("ValidationFailed"));

    let transitions = project.artifact("ProcessOrderTransitions.g.rs");
    assert!(transitions.contains(
        "ProcessOrderPhase::ValidateOrder => &[ProcessOrderPhase::ProcessPayment, ProcessOrderPhase::Failed],"
    ));

    let diagram = project.artifact("ProcessOrderDiagram.g.md");
    assert!(diagram.contains("[*] --> ValidateOrder"));
    assert!(diagram.contains("Complete --> [*]"));
}

// Scenario 2: validation guard with yield-style early exit.
#[test]
fn validation_guard_flow() {
    let project = Project::with_chain(
        "Workflow::<OrderState>::create(\"process-order\")\
         .start_with::<A>()\
         .then::<B>()\
         .validate_state(|s| s.total > 0, \"must be positive\")\
         .then::<C>()\
         .finally::<D>()",
    );
    project.generate();

    assert!(project.artifact("ProcessOrderPhase.g.rs").contains("ValidationFailed,"));

    let saga = project.artifact("ProcessOrderSaga.g.rs");
    assert!(saga.contains(
        "pub fn handle_start_b(&mut self, command: StartBCommand) -> Vec<ProcessOrderMessage> {"
    ));
    assert!(saga.contains("if !(self.state.total > 0) {"));
    assert!(saga.contains("self.phase = ProcessOrderPhase::ValidationFailed;"));
    assert!(saga.contains("return messages;"));
}

// Scenario 3: loop phases, iteration guard, exit predicate, diagram note.
#[test]
fn refinement_loop_flow() {
    let project = Project::with_chain(
        "Workflow::<OrderState>::create(\"process-order\")\
         .start_with::<Draft>()\
         .repeat_until(|s| s.approved, \"Refinement\", |l| l.then::<Critique>().then::<Refine>(), 5)\
         .then::<Publish>()\
         .finally::<Done>()",
    );
    project.generate();

    let phase = project.artifact("ProcessOrderPhase.g.rs");
    assert!(phase.contains("Refinement_Critique,"));
    assert!(phase.contains("Refinement_Refine,"));

    let saga = project.artifact("ProcessOrderSaga.g.rs");
    assert!(saga.contains("if self.refinement_iteration_count >= 5 {"));
    assert!(saga.contains("if self.should_exit_refinement_loop() {"));
    assert!(saga.contains("self.refinement_iteration_count += 1;"));
    assert!(saga.contains("StartRefinement_CritiqueCommand"));

    let diagram = project.artifact("ProcessOrderDiagram.g.md");
    assert!(diagram.contains("note right of Refinement_Critique : Loop: Refinement (max 5)"));
}

// Scenario 4: branch routing with a choice node.
#[test]
fn branch_routing_flow() {
    let project = Project::with_chain(
        "Workflow::<OrderState>::create(\"process-order\")\
         .start_with::<Assess>()\
         .branch(|s| s.kind, \
            when(OrderKind::Auto, |p| p.then::<AutoProc>()), \
            when(OrderKind::Manual, |p| p.then::<ManualProc>()), \
            otherwise(|p| p.then::<Escalate>()))\
         .then::<Notify>()\
         .finally::<End>()",
    );
    project.generate();

    let saga = project.artifact("ProcessOrderSaga.g.rs");
    assert!(saga.contains(
        "pub fn handle_assess_completed(&mut self, event: AssessCompleted) -> ProcessOrderMessage {"
    ));
    assert!(saga.contains("match self.state.kind {"));
    // Every case rejoins at Notify.
    assert!(saga.contains(
        "pub fn handle_auto_proc_completed(&mut self, event: AutoProcCompleted) -> StartNotifyCommand {"
    ));
    assert!(saga.contains(
        "pub fn handle_escalate_completed(&mut self, event: EscalateCompleted) -> StartNotifyCommand {"
    ));

    let diagram = project.artifact("ProcessOrderDiagram.g.md");
    assert!(diagram.contains("state BranchByKind <<choice>>"));
    assert!(diagram.contains("BranchByKind --> AutoProc : OrderKind.Auto"));
    assert!(diagram.contains("BranchByKind --> Escalate : default"));
}

// Scenario 5: fork/join with the outstanding-paths counter.
#[test]
fn fork_join_flow() {
    let project = Project::with_chain(
        "Workflow::<OrderState>::create(\"process-order\")\
         .start_with::<Gather>()\
         .fork(|p| p.then::<Alpha>(), |p| p.then::<Beta>())\
         .join::<Synth>()\
         .finally::<Report>()",
    );
    let report = project.generate();
    // Distinct path types: no duplicate-name diagnostic.
    assert!(report.diagnostics.is_empty(), "{:?}", report.diagnostics);

    let commands = project.artifact("ProcessOrderCommands.g.rs");
    assert!(commands.contains("pub struct ExecuteAlphaWorkerCommand {"));
    assert!(commands.contains("pub struct ExecuteBetaWorkerCommand {"));

    let saga = project.artifact("ProcessOrderSaga.g.rs");
    assert!(saga.contains("self.fork1_outstanding_paths = 2;"));
    assert!(saga.contains("ProcessOrderMessage::StartAlpha("));
    assert!(saga.contains("ProcessOrderMessage::StartBeta("));
    assert!(saga.contains("if self.fork1_outstanding_paths == 0 {"));
    assert!(saga.contains("ProcessOrderMessage::StartSynth("));
}

// Scenario 6: instance-named fork paths share one handler and worker
// command per type.
#[test]
fn instance_named_fork_flow() {
    let project = Project::with_chain(
        "Workflow::<OrderState>::create(\"process-order\")\
         .start_with::<Gather>()\
         .fork(|p| p.then::<Analyze>(\"Technical\"), |p| p.then::<Analyze>(\"Fundamental\"))\
         .join::<Combine>()\
         .finally::<Done>()",
    );
    let report = project.generate();
    assert!(report.diagnostics.is_empty(), "{:?}", report.diagnostics);

    let phase = project.artifact("ProcessOrderPhase.g.rs");
    assert!(phase.contains("Technical,"));
    assert!(phase.contains("Fundamental,"));

    let commands = project.artifact("ProcessOrderCommands.g.rs");
    assert_eq!(
        commands.matches("pub struct ExecuteAnalyzeWorkerCommand {").count(),
        1
    );

    let handlers = project.artifact("ProcessOrderHandlers.g.rs");
    assert_eq!(handlers.matches("pub struct AnalyzeHandler {").count(), 1);
}

// The reducer artifact, from a separate state declaration.
#[test]
fn reducer_from_state_declaration() {
    let project = Project::with_source(
        r#"
#[workflow_state]
pub struct OrderState {
    pub total: f64,
    #[append]
    pub notes: Vec<String>,
    #[merge]
    pub attributes: HashMap<String, String>,
}
"#,
    );
    project.generate();

    let reducer = project.artifact("OrderStateReducer.g.rs");
    assert!(reducer.contains("pub fn reduce(current: OrderState, update: OrderState) -> OrderState {"));
    assert!(reducer.contains("total: update.total,"));
    assert!(reducer.contains("merged.extend(update.notes);"));
    assert!(reducer.contains("attributes: merge_maps(current.attributes, update.attributes),"));
}
