//! The Attestor orchestrator: the deterministic policy-bound plan runner.
//!
//! The orchestrator enforces the execution model for every plan item:
//!
//!   Policy → [ActionExecutor::act] → Verify → (retry?) → Audit
//!
//! The security invariant is absolute: `ActionExecutor::act()` is NEVER
//! called unless `PolicyGate::evaluate()` returns `PolicyDecision::Allow`
//! for that action. This is enforced structurally — the code path to
//! `act()` is only reachable after the gate passes.
//!
//! Retry rules:
//! - Ordinary actions get at most [`MAX_ATTEMPTS`] attempts; a second
//!   failure is `RetryExhausted`.
//! - Verification-intent actions (those carrying a `VerifySpec`) are
//!   terminal on their first failure: `VerificationFailed`, no retry.
//! - A policy denial makes zero attempts and is `PolicyDenied`.
//! - Observations never retry and never abort the plan.
//!
//! Every attempt's outcome appears in the returned result list, so a caller
//! sees the failed first attempt of a retried action as well as its final
//! verdict. The audit log is coarser: exactly one record is committed per
//! executed item, after its final attempt. Any terminal action failure
//! aborts the remaining plan; already-committed records stand.

use tracing::{debug, info, warn};

use attestor_contracts::{
    action::Action,
    error::AttestorResult,
    execution::{ActionOutcome, FailureReason, StepOutcome, StepRecord},
    plan::{Plan, PlanItem},
};

use crate::traits::{ActionExecutor, AuditSink, Observer, PolicyGate, Verifier};

/// Maximum execution attempts for an ordinary action.
pub const MAX_ATTEMPTS: u32 = 2;

/// The central orchestrator that drives a single plan execution.
///
/// Owns the trusted components — policy gate, verifier, audit sink — and
/// the untrusted effectors, and enforces the pipeline ordering on every
/// call to `execute()`.
pub struct Orchestrator {
    policy: Box<dyn PolicyGate>,
    executor: Box<dyn ActionExecutor>,
    observer: Box<dyn Observer>,
    verifier: Box<dyn Verifier>,
    audit: Box<dyn AuditSink>,
}

impl Orchestrator {
    /// Create a new orchestrator from its five components.
    pub fn new(
        policy: Box<dyn PolicyGate>,
        executor: Box<dyn ActionExecutor>,
        observer: Box<dyn Observer>,
        verifier: Box<dyn Verifier>,
        audit: Box<dyn AuditSink>,
    ) -> Self {
        Self {
            policy,
            executor,
            observer,
            verifier,
            audit,
        }
    }

    /// Execute a plan item by item, in order.
    ///
    /// Returns one `StepOutcome` per execution *attempt*: an observation
    /// contributes exactly one entry, a retried action one entry per
    /// attempt (so an exhausted action appears twice, the first entry with
    /// `reason: None` and the last with its terminal reason). When an
    /// action fails terminally the remaining items are skipped.
    ///
    /// # Errors
    ///
    /// Returns `Err` only for infrastructure failures: a policy gate that
    /// could not evaluate, or an audit sink that could not persist a record.
    /// Terminal plan failures (denial, verification failure, retry
    /// exhaustion) are NOT errors — they travel as `FailureReason` data on
    /// the committed outcome.
    pub fn execute(&self, plan: &Plan) -> AttestorResult<Vec<StepOutcome>> {
        let plan_id = plan.id().clone();
        info!(plan_id = %plan_id, items = plan.len(), "plan execution starting");

        let mut outcomes = Vec::with_capacity(plan.len());

        for (index, item) in plan.items().iter().enumerate() {
            let mut aborts = false;

            match item {
                PlanItem::Observation(observation) => {
                    debug!(
                        plan_id = %plan_id,
                        index,
                        kind = %observation.kind(),
                        "running observation"
                    );
                    // Observations bypass the policy gate and never retry.
                    let outcome = StepOutcome::Observation(self.observer.observe(observation));
                    let record = StepRecord::new(index, item.clone(), outcome.clone());
                    self.audit.commit(&plan_id, &record)?;
                    outcomes.push(outcome);
                }
                PlanItem::Action(action) => {
                    let attempts = self.run_action(action)?;

                    // Exactly one commit per executed item, holding the
                    // final attempt's outcome. The result list gets every
                    // attempt.
                    if let Some(last) = attempts.last() {
                        aborts = last.is_terminal_failure();
                        let record = StepRecord::new(
                            index,
                            item.clone(),
                            StepOutcome::Action(last.clone()),
                        );
                        self.audit.commit(&plan_id, &record)?;
                    }
                    outcomes.extend(attempts.into_iter().map(StepOutcome::Action));
                }
            }

            if aborts {
                warn!(
                    plan_id = %plan_id,
                    index,
                    remaining = plan.len() - index - 1,
                    "terminal action failure, aborting remaining plan"
                );
                break;
            }
        }

        self.audit.finalize(&plan_id)?;
        info!(
            plan_id = %plan_id,
            executed = outcomes.len(),
            "plan execution finished"
        );
        Ok(outcomes)
    }

    /// Run one action through the full gate → act → verify → retry pipeline.
    ///
    /// Returns the outcome of every attempt, in order. The last entry is
    /// the item's final verdict; it alone is committed to the audit log.
    fn run_action(&self, action: &Action) -> AttestorResult<Vec<ActionOutcome>> {
        // ── Policy gate ──────────────────────────────────────────────────
        //
        // This is the primary trust gate. No executor logic runs until Allow.
        let decision = self.policy.evaluate(action)?;
        if let attestor_contracts::policy::PolicyDecision::Deny { reason } = decision {
            warn!(
                kind = %action.kind(),
                context = %action.context(),
                reason = %reason,
                "policy denied action"
            );
            return Ok(vec![ActionOutcome::denied(reason)]);
        }

        // Verification intents get a single attempt; everything else two.
        let max_attempts = if action.is_verify_intent() {
            1
        } else {
            MAX_ATTEMPTS
        };

        let mut attempts = Vec::with_capacity(max_attempts as usize);
        for attempt in 1..=max_attempts {
            debug!(
                kind = %action.kind(),
                context = %action.context(),
                attempt,
                "executing action"
            );

            // The executor's claim is not trusted; an error here feeds
            // verification instead of aborting the plan.
            let act_error = match self.executor.act(action) {
                Ok(message) => {
                    debug!(kind = %action.kind(), %message, "executor reported");
                    None
                }
                Err(e) => {
                    warn!(kind = %action.kind(), error = %e, "executor failed, verifying anyway");
                    Some(e.to_string())
                }
            };

            let mut verified = self.verifier.verify(action);
            verified.attempts = attempt;
            verified.reason = None;
            if verified.error.is_none() {
                verified.error = act_error;
            }

            if verified.success {
                attempts.push(verified);
                break;
            }

            // Classify the failure. Only the final attempt carries a
            // terminal reason; an intermediate failure stays retryable.
            if action.is_verify_intent() {
                verified.reason = Some(FailureReason::VerificationFailed);
            } else if attempt == max_attempts {
                verified.reason = Some(FailureReason::RetryExhausted);
            }
            let terminal = verified.reason.is_some();
            attempts.push(verified);
            if terminal {
                break;
            }

            info!(
                kind = %action.kind(),
                attempt,
                "verification failed, retrying"
            );
        }

        Ok(attempts)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use attestor_contracts::{
        action::{Action, ActionDraft, ActionKind, Context},
        error::{AttestorError, AttestorResult},
        evidence::{Evidence, EvidenceResult, EvidenceSource},
        execution::{
            ActionOutcome, FailureReason, ObservationOutcome, StepOutcome, StepRecord,
        },
        observation::{Observation, ObservationKind},
        plan::{Plan, PlanId, PlanItem},
        policy::PolicyDecision,
    };

    use crate::traits::{ActionExecutor, AuditSink, Observer, PolicyGate, Verifier};

    use super::Orchestrator;

    // ── Mock helpers ─────────────────────────────────────────────────────────

    fn launch(target: &str) -> Action {
        ActionDraft::new(ActionKind::LaunchApp, Context::Desktop)
            .target(target)
            .build()
            .unwrap()
    }

    fn verify_intent(expected: &str) -> Action {
        ActionDraft::new(ActionKind::TypeText, Context::Desktop)
            .text(expected)
            .verify("text_visible", expected)
            .build()
            .unwrap()
    }

    fn read_file(path: &str) -> Observation {
        Observation::new(ObservationKind::ReadText, Context::File, Some(path.into())).unwrap()
    }

    /// A gate that always returns a pre-configured decision.
    struct MockPolicy {
        decision: PolicyDecision,
    }

    impl PolicyGate for MockPolicy {
        fn evaluate(&self, _action: &Action) -> AttestorResult<PolicyDecision> {
            Ok(self.decision.clone())
        }
    }

    fn allow_all() -> Box<MockPolicy> {
        Box::new(MockPolicy {
            decision: PolicyDecision::Allow,
        })
    }

    /// An executor that counts calls and optionally fails every time.
    struct MockExecutor {
        act_count: Arc<Mutex<u32>>,
        fail: bool,
    }

    impl MockExecutor {
        fn new() -> (Box<Self>, Arc<Mutex<u32>>) {
            let count = Arc::new(Mutex::new(0));
            (
                Box::new(Self {
                    act_count: count.clone(),
                    fail: false,
                }),
                count,
            )
        }

        fn failing() -> (Box<Self>, Arc<Mutex<u32>>) {
            let count = Arc::new(Mutex::new(0));
            (
                Box::new(Self {
                    act_count: count.clone(),
                    fail: true,
                }),
                count,
            )
        }
    }

    impl ActionExecutor for MockExecutor {
        fn act(&self, _action: &Action) -> AttestorResult<String> {
            *self.act_count.lock().unwrap() += 1;
            if self.fail {
                Err(AttestorError::Execution {
                    reason: "window manager rejected the request".to_string(),
                })
            } else {
                Ok("done".to_string())
            }
        }
    }

    /// An observer that counts calls and returns a pre-configured outcome.
    struct MockObserver {
        observe_count: Arc<Mutex<u32>>,
        outcome: ObservationOutcome,
    }

    impl MockObserver {
        fn succeeding() -> (Box<Self>, Arc<Mutex<u32>>) {
            let count = Arc::new(Mutex::new(0));
            (
                Box::new(Self {
                    observe_count: count.clone(),
                    outcome: ObservationOutcome::success("file contents"),
                }),
                count,
            )
        }

        fn failing() -> (Box<Self>, Arc<Mutex<u32>>) {
            let count = Arc::new(Mutex::new(0));
            (
                Box::new(Self {
                    observe_count: count.clone(),
                    outcome: ObservationOutcome::failed("file missing"),
                }),
                count,
            )
        }
    }

    impl Observer for MockObserver {
        fn observe(&self, _observation: &Observation) -> ObservationOutcome {
            *self.observe_count.lock().unwrap() += 1;
            self.outcome.clone()
        }
    }

    /// A verifier that replays a scripted sequence of verdicts.
    struct MockVerifier {
        verdicts: Mutex<VecDeque<bool>>,
    }

    impl MockVerifier {
        fn scripted(verdicts: &[bool]) -> Box<Self> {
            Box::new(Self {
                verdicts: Mutex::new(verdicts.iter().copied().collect()),
            })
        }
    }

    impl Verifier for MockVerifier {
        fn verify(&self, _action: &Action) -> ActionOutcome {
            let success = self
                .verdicts
                .lock()
                .unwrap()
                .pop_front()
                .expect("verifier called more times than scripted");
            let result = if success {
                EvidenceResult::Success
            } else {
                EvidenceResult::Fail
            };
            ActionOutcome {
                success,
                message: "verified against accessibility tree".to_string(),
                error: None,
                reason: None,
                confidence: if success { 1.0 } else { 0.3 },
                evidence: vec![Evidence::new(EvidenceSource::Uia, result, "window state")],
                attempts: 0,
            }
        }
    }

    /// An audit sink that records every call for later inspection.
    struct MockAudit {
        records: Arc<Mutex<Vec<StepRecord>>>,
        finalized: Arc<Mutex<Vec<PlanId>>>,
    }

    impl MockAudit {
        fn new() -> (Box<Self>, Arc<Mutex<Vec<StepRecord>>>, Arc<Mutex<Vec<PlanId>>>) {
            let records = Arc::new(Mutex::new(vec![]));
            let finalized = Arc::new(Mutex::new(vec![]));
            (
                Box::new(Self {
                    records: records.clone(),
                    finalized: finalized.clone(),
                }),
                records,
                finalized,
            )
        }
    }

    impl AuditSink for MockAudit {
        fn commit(&self, _plan_id: &PlanId, record: &StepRecord) -> AttestorResult<()> {
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }

        fn finalize(&self, plan_id: &PlanId) -> AttestorResult<()> {
            self.finalized.lock().unwrap().push(plan_id.clone());
            Ok(())
        }
    }

    // ── Test cases ────────────────────────────────────────────────────────────

    /// Core security test: a policy Deny must prevent the executor from
    /// being called under any circumstances, and must abort the plan.
    #[test]
    fn test_policy_deny_blocks_executor_and_aborts() {
        let (executor, act_count) = MockExecutor::new();
        let (audit, records, finalized) = MockAudit::new();
        let (observer, _) = MockObserver::succeeding();

        let orchestrator = Orchestrator::new(
            Box::new(MockPolicy {
                decision: PolicyDecision::deny("app not in whitelist"),
            }),
            executor,
            observer,
            MockVerifier::scripted(&[]),
            audit,
        );

        let plan = Plan::new(vec![
            PlanItem::Action(launch("evil.exe")),
            PlanItem::Action(launch("notepad.exe")),
            PlanItem::Observation(read_file("notes.txt")),
        ]);
        let outcomes = orchestrator.execute(&plan).unwrap();

        // The executor must NEVER have been called.
        assert_eq!(*act_count.lock().unwrap(), 0, "act() must not run on Deny");

        // Only the denied item executed; the rest were skipped.
        assert_eq!(outcomes.len(), 1);
        match &outcomes[0] {
            StepOutcome::Action(outcome) => {
                assert!(!outcome.success);
                assert_eq!(outcome.reason, Some(FailureReason::PolicyDenied));
                assert_eq!(outcome.attempts, 0);
                assert_eq!(outcome.error.as_deref(), Some("app not in whitelist"));
            }
            other => panic!("expected an action outcome, got {:?}", other),
        }

        // The denial was committed, and the log finalized despite the abort.
        assert_eq!(records.lock().unwrap().len(), 1);
        assert_eq!(finalized.lock().unwrap().len(), 1);
    }

    /// A denial in the middle of the plan: the item before it stands, the
    /// denied item is committed, and nothing after it is ever attempted.
    #[test]
    fn test_mid_plan_denial_stops_later_items() {
        struct DenyByName {
            denied: &'static str,
        }

        impl PolicyGate for DenyByName {
            fn evaluate(&self, action: &Action) -> AttestorResult<PolicyDecision> {
                if action.target() == Some(self.denied) {
                    Ok(PolicyDecision::deny(format!(
                        "desktop app '{}' is not in the whitelist",
                        self.denied
                    )))
                } else {
                    Ok(PolicyDecision::Allow)
                }
            }
        }

        let (executor, act_count) = MockExecutor::new();
        let (audit, records, _) = MockAudit::new();
        let (observer, _) = MockObserver::succeeding();

        let orchestrator = Orchestrator::new(
            Box::new(DenyByName { denied: "evil.exe" }),
            executor,
            observer,
            MockVerifier::scripted(&[true]),
            audit,
        );

        let plan = Plan::new(vec![
            PlanItem::Action(launch("notepad.exe")),
            PlanItem::Action(launch("evil.exe")),
            PlanItem::Action(launch("calc.exe")),
        ]);
        let outcomes = orchestrator.execute(&plan).unwrap();

        // Only the first item reached the executor.
        assert_eq!(*act_count.lock().unwrap(), 1);

        assert_eq!(outcomes.len(), 2);
        match &outcomes[0] {
            StepOutcome::Action(first) => assert!(first.success),
            other => panic!("expected an action outcome, got {:?}", other),
        }
        match &outcomes[1] {
            StepOutcome::Action(denied) => {
                assert!(!denied.success);
                assert_eq!(denied.reason, Some(FailureReason::PolicyDenied));
                assert_eq!(denied.attempts, 0);
            }
            other => panic!("expected an action outcome, got {:?}", other),
        }

        // Two records: the success and the denial. The third item has none.
        assert_eq!(records.lock().unwrap().len(), 2);
    }

    /// An ordinary action that fails verification twice exhausts its two
    /// attempts: the result list carries both attempts (the first still
    /// retryable, the second terminal), one record is committed, and the
    /// remaining plan is aborted.
    #[test]
    fn test_retry_exhaustion_reports_both_attempts() {
        let (executor, act_count) = MockExecutor::new();
        let (audit, records, _) = MockAudit::new();
        let (observer, observe_count) = MockObserver::succeeding();

        let orchestrator = Orchestrator::new(
            allow_all(),
            executor,
            observer,
            MockVerifier::scripted(&[false, false]),
            audit,
        );

        let plan = Plan::new(vec![
            PlanItem::Action(launch("notepad.exe")),
            PlanItem::Observation(read_file("notes.txt")),
        ]);
        let outcomes = orchestrator.execute(&plan).unwrap();

        // Two attempts, each re-running the action.
        assert_eq!(*act_count.lock().unwrap(), 2);

        // One result per attempt.
        assert_eq!(outcomes.len(), 2);
        match (&outcomes[0], &outcomes[1]) {
            (StepOutcome::Action(first), StepOutcome::Action(last)) => {
                assert!(!first.success);
                assert_eq!(first.attempts, 1);
                assert_eq!(first.reason, None, "first failure must stay retryable");
                assert!(!last.success);
                assert_eq!(last.attempts, 2);
                assert_eq!(last.reason, Some(FailureReason::RetryExhausted));
            }
            other => panic!("expected two action outcomes, got {:?}", other),
        }

        // One commit for the exhausted action, none for the skipped item.
        let records = records.lock().unwrap();
        assert_eq!(records.len(), 1);
        match &records[0].outcome {
            StepOutcome::Action(committed) => {
                assert_eq!(committed.attempts, 2, "only the final attempt is committed");
                assert_eq!(committed.reason, Some(FailureReason::RetryExhausted));
            }
            other => panic!("expected an action record, got {:?}", other),
        }
        assert_eq!(*observe_count.lock().unwrap(), 0);
    }

    /// A failure followed by a success on retry continues the plan with no
    /// terminal reason.
    #[test]
    fn test_retry_then_success_continues() {
        let (executor, act_count) = MockExecutor::new();
        let (audit, records, _) = MockAudit::new();
        let (observer, observe_count) = MockObserver::succeeding();

        let orchestrator = Orchestrator::new(
            allow_all(),
            executor,
            observer,
            MockVerifier::scripted(&[false, true]),
            audit,
        );

        let plan = Plan::new(vec![
            PlanItem::Action(launch("notepad.exe")),
            PlanItem::Observation(read_file("notes.txt")),
        ]);
        let outcomes = orchestrator.execute(&plan).unwrap();

        assert_eq!(*act_count.lock().unwrap(), 2);
        // Failed attempt, successful retry, observation.
        assert_eq!(outcomes.len(), 3);
        match &outcomes[0] {
            StepOutcome::Action(first) => {
                assert!(!first.success);
                assert_eq!(first.attempts, 1);
                assert_eq!(first.reason, None);
            }
            other => panic!("expected an action outcome, got {:?}", other),
        }
        match &outcomes[1] {
            StepOutcome::Action(outcome) => {
                assert!(outcome.success);
                assert_eq!(outcome.attempts, 2);
                assert_eq!(outcome.reason, None);
            }
            other => panic!("expected an action outcome, got {:?}", other),
        }

        // Both items committed, observation ran once.
        assert_eq!(records.lock().unwrap().len(), 2);
        assert_eq!(*observe_count.lock().unwrap(), 1);
    }

    /// A verification-intent action is terminal on its first failure: one
    /// attempt, `VerificationFailed`, plan aborted.
    #[test]
    fn test_verify_intent_fails_terminally_on_first_attempt() {
        let (executor, act_count) = MockExecutor::new();
        let (audit, records, _) = MockAudit::new();
        let (observer, _) = MockObserver::succeeding();

        let orchestrator = Orchestrator::new(
            allow_all(),
            executor,
            observer,
            MockVerifier::scripted(&[false]),
            audit,
        );

        let plan = Plan::new(vec![
            PlanItem::Action(verify_intent("Hello World")),
            PlanItem::Action(launch("notepad.exe")),
        ]);
        let outcomes = orchestrator.execute(&plan).unwrap();

        // No retry for a verification intent.
        assert_eq!(*act_count.lock().unwrap(), 1);

        assert_eq!(outcomes.len(), 1);
        match &outcomes[0] {
            StepOutcome::Action(outcome) => {
                assert!(!outcome.success);
                assert_eq!(outcome.attempts, 1);
                assert_eq!(outcome.reason, Some(FailureReason::VerificationFailed));
            }
            other => panic!("expected an action outcome, got {:?}", other),
        }

        assert_eq!(records.lock().unwrap().len(), 1);
    }

    /// A failed observation is committed and the plan continues — the
    /// following action still runs.
    #[test]
    fn test_failed_observation_is_non_fatal() {
        let (executor, act_count) = MockExecutor::new();
        let (audit, records, _) = MockAudit::new();
        let (observer, _) = MockObserver::failing();

        let orchestrator = Orchestrator::new(
            allow_all(),
            executor,
            observer,
            MockVerifier::scripted(&[true]),
            audit,
        );

        let plan = Plan::new(vec![
            PlanItem::Observation(read_file("missing.txt")),
            PlanItem::Action(launch("notepad.exe")),
        ]);
        let outcomes = orchestrator.execute(&plan).unwrap();

        assert_eq!(outcomes.len(), 2, "plan must continue past a failed observation");
        assert!(!outcomes[0].aborts_plan());
        assert_eq!(*act_count.lock().unwrap(), 1);
        assert_eq!(records.lock().unwrap().len(), 2);
    }

    /// An executor error does not abort: verification still runs, and a
    /// passing verdict makes the step a success carrying the error detail.
    #[test]
    fn test_executor_error_feeds_verification() {
        let (executor, act_count) = MockExecutor::failing();
        let (audit, _, _) = MockAudit::new();
        let (observer, _) = MockObserver::succeeding();

        let orchestrator = Orchestrator::new(
            allow_all(),
            executor,
            observer,
            MockVerifier::scripted(&[true]),
            audit,
        );

        let plan = Plan::new(vec![PlanItem::Action(launch("notepad.exe"))]);
        let outcomes = orchestrator.execute(&plan).unwrap();

        assert_eq!(*act_count.lock().unwrap(), 1);
        match &outcomes[0] {
            StepOutcome::Action(outcome) => {
                // Ground truth comes from the verifier, not the executor.
                assert!(outcome.success);
                assert_eq!(outcome.attempts, 1);
                // The executor's error is preserved for diagnostics.
                assert!(outcome
                    .error
                    .as_deref()
                    .is_some_and(|e| e.contains("window manager")));
            }
            other => panic!("expected an action outcome, got {:?}", other),
        }
    }

    /// Every executed item is committed exactly once, in plan order, and
    /// the log is finalized exactly once.
    #[test]
    fn test_commit_once_per_item_and_finalize() {
        let (executor, _) = MockExecutor::new();
        let (audit, records, finalized) = MockAudit::new();
        let (observer, _) = MockObserver::succeeding();

        let orchestrator = Orchestrator::new(
            allow_all(),
            executor,
            observer,
            MockVerifier::scripted(&[true, true]),
            audit,
        );

        let plan = Plan::new(vec![
            PlanItem::Action(launch("notepad.exe")),
            PlanItem::Observation(read_file("notes.txt")),
            PlanItem::Action(launch("calc.exe")),
        ]);
        let outcomes = orchestrator.execute(&plan).unwrap();
        assert_eq!(outcomes.len(), 3);

        let records = records.lock().unwrap();
        assert_eq!(records.len(), 3);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.index, i, "records must be committed in plan order");
        }

        let finalized = finalized.lock().unwrap();
        assert_eq!(finalized.len(), 1);
        assert_eq!(&finalized[0], plan.id());
    }

    /// A failing audit sink is fatal: the error propagates to the caller.
    #[test]
    fn test_audit_write_failure_is_fatal() {
        struct BrokenAudit;
        impl AuditSink for BrokenAudit {
            fn commit(&self, _plan_id: &PlanId, _record: &StepRecord) -> AttestorResult<()> {
                Err(AttestorError::AuditWriteFailed {
                    reason: "disk full".to_string(),
                })
            }
            fn finalize(&self, _plan_id: &PlanId) -> AttestorResult<()> {
                Ok(())
            }
        }

        let (executor, _) = MockExecutor::new();
        let (observer, _) = MockObserver::succeeding();

        let orchestrator = Orchestrator::new(
            allow_all(),
            executor,
            observer,
            MockVerifier::scripted(&[true]),
            Box::new(BrokenAudit),
        );

        let plan = Plan::new(vec![PlanItem::Action(launch("notepad.exe"))]);
        let result = orchestrator.execute(&plan);

        match result {
            Err(AttestorError::AuditWriteFailed { reason }) => {
                assert_eq!(reason, "disk full");
            }
            other => panic!("expected AuditWriteFailed, got {:?}", other),
        }
    }

    /// An empty plan executes nothing but still finalizes its audit log.
    #[test]
    fn test_empty_plan() {
        let (executor, act_count) = MockExecutor::new();
        let (audit, records, finalized) = MockAudit::new();
        let (observer, _) = MockObserver::succeeding();

        let orchestrator = Orchestrator::new(
            allow_all(),
            executor,
            observer,
            MockVerifier::scripted(&[]),
            audit,
        );

        let plan = Plan::new(vec![]);
        let outcomes = orchestrator.execute(&plan).unwrap();

        assert!(outcomes.is_empty());
        assert_eq!(*act_count.lock().unwrap(), 0);
        assert!(records.lock().unwrap().is_empty());
        assert_eq!(finalized.lock().unwrap().len(), 1);
    }
}
