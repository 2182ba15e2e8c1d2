//! Runtime error types for the Attestor execution pipeline.
//!
//! All fallible operations in the Attestor crates return `AttestorResult<T>`.
//! Terminal plan failures (policy denial, verification failure, retry
//! exhaustion) are NOT errors — they travel as `FailureReason` data on the
//! committed outcome. Error variants here cover the genuinely exceptional
//! paths: malformed inputs, bad configuration, and failed audit writes.

use thiserror::Error;

/// The unified error type for the Attestor runtime.
#[derive(Debug, Error)]
pub enum AttestorError {
    /// An Action or Observation violated a construction-time invariant.
    ///
    /// This is fatal before execution begins: it aborts plan construction,
    /// never plan execution, and is not part of any retry logic.
    #[error("validation error: {reason}")]
    Validation { reason: String },

    /// The policy whitelist could not be read or parsed.
    ///
    /// Callers that must keep running fall back to a deny-all gate — the
    /// whitelist fails closed, never open.
    #[error("configuration error: {reason}")]
    Config { reason: String },

    /// The audit sink could not persist a step record.
    ///
    /// Fatal — a step that cannot be audited cannot be committed.
    #[error("audit write failed: {reason}")]
    AuditWriteFailed { reason: String },

    /// The external executor reported a failure while performing an action.
    ///
    /// The orchestrator converts this into verification input; it never
    /// aborts the plan on its own.
    #[error("execution failed: {reason}")]
    Execution { reason: String },
}

/// Convenience alias used throughout the Attestor crates.
pub type AttestorResult<T> = Result<T, AttestorError>;
