//! Per-item execution outcomes and audit records.
//!
//! `StepOutcome` is what the orchestrator returns to the caller for each
//! plan item. `StepRecord` is what gets written to the audit log — exactly
//! one per executed item, after its final attempt.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::evidence::Evidence;
use crate::plan::PlanItem;

/// Why an Action failed terminally.
///
/// `None` on an outcome means success or a still-retryable failure. This
/// field replaces the original design's mutable "last failure reason"
/// global: the reason is threaded through every outcome value instead of
/// being stored as shared state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// The verification engine rejected the action's effect, or a
    /// verification-intent assertion failed. Never retried.
    VerificationFailed,
    /// The action failed verification on both of its two permitted attempts.
    RetryExhausted,
    /// The policy gate denied the action before any attempt was made.
    PolicyDenied,
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::VerificationFailed => write!(f, "verification_failed"),
            FailureReason::RetryExhausted => write!(f, "retry_exhausted"),
            FailureReason::PolicyDenied => write!(f, "policy_denied"),
        }
    }
}

/// The outcome of one execution attempt of an Action.
///
/// The orchestrator reports one of these per attempt; the final attempt's
/// outcome is the item's verdict and the one written to the audit log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionOutcome {
    /// Ground truth: did the action achieve its intended effect?
    ///
    /// Always equal to the primary authority's verdict. Advisory evidence
    /// can only move `confidence`, never this field.
    pub success: bool,
    /// Human-readable result description.
    pub message: String,
    /// Error detail when something went wrong.
    pub error: Option<String>,
    /// Terminal failure classification; `None` means success or retryable.
    pub reason: Option<FailureReason>,
    /// Diagnostic-only score in [0, 1] derived from the evidence pattern.
    /// Never used for control flow.
    pub confidence: f64,
    /// The evidence this verdict rests on, in collection order (0–2 entries).
    pub evidence: Vec<Evidence>,
    /// The 1-based attempt this outcome records, so the final attempt's
    /// value is the total made. 0 for a policy denial.
    pub attempts: u32,
}

impl ActionOutcome {
    /// The outcome of a policy denial: zero attempts, no evidence.
    pub fn denied(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self {
            success: false,
            message: "policy denied action".to_string(),
            error: Some(reason),
            reason: Some(FailureReason::PolicyDenied),
            confidence: 0.0,
            evidence: Vec::new(),
            attempts: 0,
        }
    }

    /// True when this outcome must stop the plan: any failure that carries
    /// a terminal reason.
    pub fn is_terminal_failure(&self) -> bool {
        !self.success && self.reason.is_some()
    }
}

/// How an Observation query ended.
///
/// Observations carry no success semantics that gate plan continuation;
/// a `NotFound` or `Error` outcome is committed as-is and the plan moves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObservationStatus {
    Success,
    NotFound,
    Error,
}

/// The outcome of executing one Observation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationOutcome {
    pub status: ObservationStatus,
    /// Text content, attribute value, or description when the query
    /// succeeded.
    pub content: Option<String>,
    /// Error message when `status` is `NotFound` or `Error`.
    pub error: Option<String>,
}

impl ObservationOutcome {
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            status: ObservationStatus::Success,
            content: Some(content.into()),
            error: None,
        }
    }

    pub fn not_found(error: impl Into<String>) -> Self {
        Self {
            status: ObservationStatus::NotFound,
            content: None,
            error: Some(error.into()),
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            status: ObservationStatus::Error,
            content: None,
            error: Some(error.into()),
        }
    }
}

/// The outcome of one plan item, whichever kind it was.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StepOutcome {
    Action(ActionOutcome),
    Observation(ObservationOutcome),
}

impl StepOutcome {
    /// True when this outcome requires the orchestrator to abort the
    /// remaining plan. Observations are always non-fatal.
    pub fn aborts_plan(&self) -> bool {
        match self {
            StepOutcome::Action(a) => a.is_terminal_failure(),
            StepOutcome::Observation(_) => false,
        }
    }
}

/// An immutable record of one executed plan item, written to the audit log.
///
/// Every executed item — denied, failed, or succeeded — produces exactly one
/// `StepRecord` after its final attempt. Records are never modified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    /// Zero-based position of the item in its plan.
    pub index: usize,
    /// The item that was executed.
    pub item: PlanItem,
    /// The final outcome.
    pub outcome: StepOutcome,
    /// Wall-clock time the record was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl StepRecord {
    pub fn new(index: usize, item: PlanItem, outcome: StepOutcome) -> Self {
        Self {
            index,
            item,
            outcome,
            timestamp: Utc::now(),
        }
    }
}
