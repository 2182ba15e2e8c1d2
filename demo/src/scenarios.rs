//! Demo scenarios: five plans run against the simulated environment.
//!
//! Each scenario wires real Attestor components — whitelist gate, critic,
//! hash-chained audit sink — around the simulator and prints what the
//! orchestrator decided and why.

use std::sync::Arc;

use attestor_contracts::{
    action::{ActionDraft, ActionKind, Context},
    error::AttestorResult,
    execution::StepOutcome,
    observation::{Observation, ObservationKind},
    plan::{Plan, PlanItem},
};
use attestor_core::traits::AuditSink;
use attestor_core::Orchestrator;
use attestor_policy::WhitelistPolicy;
use attestor_verify::Critic;

use crate::sim::SimEnvironment;

const WHITELIST: &str = r#"
    [desktop]
    allowed_apps = ["notepad.exe", "calc"]

    [web]
    allowed_domains = ["example.com"]

    [file]
    allowed_paths = ["/sim/*"]
"#;

/// A sink wrapper so the scenario can inspect the log after the run.
struct SharedSink(Arc<attestor_audit::InMemoryAuditSink>);

impl AuditSink for SharedSink {
    fn commit(
        &self,
        plan_id: &attestor_contracts::plan::PlanId,
        record: &attestor_contracts::execution::StepRecord,
    ) -> AttestorResult<()> {
        self.0.commit(plan_id, record)
    }

    fn finalize(&self, plan_id: &attestor_contracts::plan::PlanId) -> AttestorResult<()> {
        self.0.finalize(plan_id)
    }
}

fn build_orchestrator(
    env: &SimEnvironment,
) -> AttestorResult<(Orchestrator, Arc<attestor_audit::InMemoryAuditSink>)> {
    let gate = WhitelistPolicy::from_toml_str(WHITELIST)?;

    let critic = Critic::new()
        .with_primary(Context::Desktop, env.uia())
        .with_primary(Context::Web, env.dom())
        .with_primary(Context::File, env.filesystem())
        .with_advisory(env.vision(), env.screen());

    let sink = Arc::new(attestor_audit::InMemoryAuditSink::new());

    let orchestrator = Orchestrator::new(
        Box::new(gate),
        Box::new(env.clone()),
        Box::new(env.clone()),
        Box::new(critic),
        Box::new(SharedSink(sink.clone())),
    );
    Ok((orchestrator, sink))
}

fn report(plan: &Plan, outcomes: &[StepOutcome], sink: &attestor_audit::InMemoryAuditSink) {
    for (index, outcome) in outcomes.iter().enumerate() {
        match outcome {
            StepOutcome::Action(a) => {
                println!(
                    "  [{index}] action   success={} attempts={} confidence={:.2} reason={} ({})",
                    a.success,
                    a.attempts,
                    a.confidence,
                    a.reason
                        .map(|r| r.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                    a.message,
                );
                for evidence in &a.evidence {
                    println!(
                        "        evidence {} → {} ({})",
                        evidence.source, evidence.result, evidence.details
                    );
                }
            }
            StepOutcome::Observation(o) => {
                println!(
                    "  [{index}] observe  status={:?} content={:?}",
                    o.status,
                    o.content.as_deref().unwrap_or("-"),
                );
            }
        }
    }
    // The outcome list has one entry per attempt; an item's final attempt
    // is the one that either succeeded or carries a terminal reason.
    let executed_items = outcomes
        .iter()
        .filter(|outcome| match outcome {
            StepOutcome::Action(a) => a.success || a.reason.is_some(),
            StepOutcome::Observation(_) => true,
        })
        .count();
    if executed_items < plan.len() {
        println!(
            "  ({} remaining item(s) skipped after terminal failure)",
            plan.len() - executed_items
        );
    }

    let intact = sink.verify_integrity(plan.id());
    match sink.export_log(plan.id()) {
        Some(log) => println!(
            "  audit: {} event(s), chain intact: {intact}, terminal hash {}…",
            log.events.len(),
            &log.terminal_hash[..12.min(log.terminal_hash.len())],
        ),
        None => println!("  audit: empty, chain intact: {intact}"),
    }
    println!();
}

/// Launch, type with verification, observe, read a file, close — everything
/// passes.
pub fn happy_path() -> AttestorResult<()> {
    println!("Scenario: happy path");

    let env = SimEnvironment::new();
    env.seed_file("/sim/notes.txt", "meeting at noon");
    let (orchestrator, sink) = build_orchestrator(&env)?;

    let plan = Plan::new(vec![
        PlanItem::Action(
            ActionDraft::new(ActionKind::LaunchApp, Context::Desktop)
                .target("notepad.exe")
                .build()?,
        ),
        PlanItem::Action(
            ActionDraft::new(ActionKind::TypeText, Context::Desktop)
                .text("Hello World")
                .verify("text_visible", "Hello World")
                .build()?,
        ),
        PlanItem::Observation(Observation::new(
            ObservationKind::DescribeScreen,
            Context::Desktop,
            None,
        )?),
        PlanItem::Observation(Observation::new(
            ObservationKind::ReadText,
            Context::File,
            Some("/sim/notes.txt".to_string()),
        )?),
        PlanItem::Action(
            ActionDraft::new(ActionKind::CloseApp, Context::Desktop)
                .target("notepad.exe")
                .build()?,
        ),
    ]);

    let outcomes = orchestrator.execute(&plan)?;
    report(&plan, &outcomes, &sink);
    Ok(())
}

/// An app outside the whitelist: zero attempts, terminal denial, plan
/// aborted before the remaining items.
pub fn policy_denial() -> AttestorResult<()> {
    println!("Scenario: policy denial");

    let env = SimEnvironment::new();
    let (orchestrator, sink) = build_orchestrator(&env)?;

    let plan = Plan::new(vec![
        PlanItem::Action(
            ActionDraft::new(ActionKind::LaunchApp, Context::Desktop)
                .target("cmd.exe")
                .build()?,
        ),
        PlanItem::Action(
            ActionDraft::new(ActionKind::LaunchApp, Context::Desktop)
                .target("notepad.exe")
                .build()?,
        ),
    ]);

    let outcomes = orchestrator.execute(&plan)?;
    report(&plan, &outcomes, &sink);
    Ok(())
}

/// The environment silently drops the first launch; the executor's claim
/// is caught by verification and the retry lands the effect.
pub fn retry_recovery() -> AttestorResult<()> {
    println!("Scenario: retry recovery");

    let env = SimEnvironment::new();
    env.drop_launches("notepad.exe", 1);
    let (orchestrator, sink) = build_orchestrator(&env)?;

    let plan = Plan::new(vec![PlanItem::Action(
        ActionDraft::new(ActionKind::LaunchApp, Context::Desktop)
            .target("notepad.exe")
            .build()?,
    )]);

    let outcomes = orchestrator.execute(&plan)?;
    report(&plan, &outcomes, &sink);
    Ok(())
}

/// Every launch is dropped: both attempts fail verification and the action
/// ends as retry_exhausted.
pub fn retry_exhaustion() -> AttestorResult<()> {
    println!("Scenario: retry exhaustion");

    let env = SimEnvironment::new();
    env.drop_launches("calc", u32::MAX);
    let (orchestrator, sink) = build_orchestrator(&env)?;

    let plan = Plan::new(vec![
        PlanItem::Action(
            ActionDraft::new(ActionKind::LaunchApp, Context::Desktop)
                .target("calc")
                .build()?,
        ),
        PlanItem::Observation(Observation::new(
            ObservationKind::DescribeScreen,
            Context::Desktop,
            None,
        )?),
    ]);

    let outcomes = orchestrator.execute(&plan)?;
    report(&plan, &outcomes, &sink);
    Ok(())
}

/// Typing is swallowed before it reaches the screen: the verification
/// intent fails terminally on its first and only attempt.
pub fn verify_intent_failure() -> AttestorResult<()> {
    println!("Scenario: verification-intent failure");

    let env = SimEnvironment::new();
    env.swallow_typing();
    let (orchestrator, sink) = build_orchestrator(&env)?;

    let plan = Plan::new(vec![
        PlanItem::Action(
            ActionDraft::new(ActionKind::LaunchApp, Context::Desktop)
                .target("notepad.exe")
                .build()?,
        ),
        PlanItem::Action(
            ActionDraft::new(ActionKind::TypeText, Context::Desktop)
                .text("Hello World")
                .verify("text_visible", "Hello World")
                .build()?,
        ),
        PlanItem::Action(
            ActionDraft::new(ActionKind::CloseApp, Context::Desktop)
                .target("notepad.exe")
                .build()?,
        ),
    ]);

    let outcomes = orchestrator.execute(&plan)?;
    report(&plan, &outcomes, &sink);
    Ok(())
}
