//! Core trait definitions for the Attestor execution pipeline.
//!
//! These traits define the complete trust boundary:
//!
//! - `PolicyGate`      — trusted gate (evaluated before any action runs)
//! - `ActionExecutor`  — untrusted effector (performs the state change)
//! - `Observer`        — untrusted reader (answers read-only queries)
//! - `Verifier`        — trusted checker (decides whether the effect landed)
//! - `AuditSink`       — trusted sink (records every executed item immutably)
//!
//! The orchestrator wires them together in the correct order. Implementations
//! of `ActionExecutor` are never called unless the policy gate first returns
//! Allow. The executor's own success report is never trusted: the `Verifier`
//! alone decides whether an action succeeded.
//!
//! The three authority traits (`PrimaryAuthority`, `AdvisoryAuthority`,
//! `ScreenCapture`) are the seams a `Verifier` implementation queries the
//! environment through.

use attestor_contracts::{
    action::Action,
    error::AttestorResult,
    evidence::EvidenceSource,
    execution::{ActionOutcome, ObservationOutcome, StepRecord},
    observation::Observation,
    plan::PlanId,
    policy::PolicyDecision,
    verify::{AdvisoryCheck, AdvisoryCheckKind, AdvisoryVerdict, PrimaryVerdict, Screenshot},
};

/// The policy gate: the first and most critical gate in the pipeline.
///
/// Implementations are **trusted** and must be deterministic. Evaluation
/// should be fast (microseconds), so load configuration up front and avoid
/// I/O in `evaluate()`.
pub trait PolicyGate: Send + Sync {
    /// Evaluate whether the given action is permitted.
    ///
    /// The orchestrator calls this before any executor logic runs. A `Deny`
    /// decision prevents `ActionExecutor::act()` from being called, produces
    /// an outcome with zero attempts, and aborts the remaining plan.
    ///
    /// Observations are never passed through this gate — read-only queries
    /// are presumed safe.
    fn evaluate(&self, action: &Action) -> AttestorResult<PolicyDecision>;
}

/// The action executor: the untrusted hands of the runtime.
///
/// Implementations perform the actual state change (launch, type, close)
/// against their environment. Their return value is treated as a *claim*,
/// not a verdict: success is decided exclusively by the `Verifier`, and an
/// `Err` here feeds into verification rather than aborting the plan.
pub trait ActionExecutor: Send + Sync {
    /// Perform the action, returning a human-readable result description.
    fn act(&self, action: &Action) -> AttestorResult<String>;
}

/// The observer: answers read-only queries against the environment.
///
/// Observation outcomes carry no control-flow weight — a failed observation
/// is committed as-is and the plan moves on.
pub trait Observer: Send + Sync {
    /// Answer the query. Infallible by contract: environment errors are
    /// reported inside the outcome, never as an `Err`.
    fn observe(&self, observation: &Observation) -> ObservationOutcome;
}

/// The verifier: the sole authority on whether an action succeeded.
///
/// Implementations are **trusted**. They must not trust the executor's
/// claim; they query the environment through independent authorities and
/// return an outcome whose `success` equals the primary authority's verdict.
///
/// The `attempts` and `reason` fields of the returned outcome are owned by
/// the orchestrator, which overwrites them with the retry bookkeeping.
pub trait Verifier: Send + Sync {
    /// Verify the action's intended effect against the environment.
    fn verify(&self, action: &Action) -> ActionOutcome;
}

/// The audit sink: the immutable execution record.
///
/// Every executed plan item — denied, failed, or succeeded — produces
/// exactly one `StepRecord` that must be persisted by this sink, after the
/// item's final attempt. A failed write is fatal: the plan stops and
/// `AttestorError::AuditWriteFailed` propagates to the caller.
pub trait AuditSink: Send + Sync {
    /// Append one step record to the plan's audit log.
    ///
    /// Implementations must treat this as an append-only operation.
    /// Records written here are never modified or deleted by the runtime.
    fn commit(&self, plan_id: &PlanId, record: &StepRecord) -> AttestorResult<()>;

    /// Mark a plan's audit log as complete.
    ///
    /// Called once when the plan finishes, whether it ran to the end or
    /// aborted on a terminal failure. Implementations may use this to flush,
    /// seal, or sign the log.
    fn finalize(&self, plan_id: &PlanId) -> AttestorResult<()>;
}

/// A primary verification authority: the ground-truth source for one context.
///
/// Desktop → accessibility tree, Web → DOM, File → filesystem. A primary's
/// verdict is final for `success`; nothing can override it.
pub trait PrimaryAuthority: Send + Sync {
    /// The evidence source this authority reports as.
    fn source(&self) -> EvidenceSource;

    /// Query the environment for the action's intended effect.
    ///
    /// An `Err` means the authority itself could not answer (e.g. the
    /// accessibility tree was unreachable); the verifier records it as a
    /// failed verdict.
    fn query(&self, action: &Action) -> AttestorResult<PrimaryVerdict>;
}

/// The advisory verification authority (vision).
///
/// Lower trust than any primary: its verdict moves confidence only and can
/// never flip `success`. Consulted as a fallback when the primary fails, or
/// alone when no primary covers the context.
pub trait AdvisoryAuthority: Send + Sync {
    /// Whether this authority understands the given check kind.
    fn supports(&self, kind: AdvisoryCheckKind) -> bool;

    /// Answer the check against the captured screen region.
    fn query(&self, screenshot: &Screenshot, check: &AdvisoryCheck) -> AdvisoryVerdict;
}

/// Captures the active screen region for advisory checks.
///
/// A fresh capture is taken per advisory consultation — stale screenshots
/// are never reused across attempts.
pub trait ScreenCapture: Send + Sync {
    /// Capture the active region, or `None` if capture is unavailable.
    fn capture_active_region(&self) -> Option<Screenshot>;
}
