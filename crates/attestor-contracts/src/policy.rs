//! Policy decision types.
//!
//! The policy gate consumes an `Action` and produces a `PolicyDecision`.
//! Attestor is deny-by-default: anything other than `Allow` is terminal —
//! the orchestrator makes zero execution attempts and aborts the plan.

use serde::{Deserialize, Serialize};

/// The decision emitted by the policy gate for a single Action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyDecision {
    /// The action is permitted. Execution continues.
    Allow,

    /// The action is permanently denied.
    ///
    /// Always terminal: no retry, and no further plan items execute.
    Deny {
        /// Human-readable explanation, written to the audit log.
        reason: String,
    },
}

impl PolicyDecision {
    pub fn deny(reason: impl Into<String>) -> Self {
        PolicyDecision::Deny {
            reason: reason.into(),
        }
    }

    pub fn is_allow(&self) -> bool {
        matches!(self, PolicyDecision::Allow)
    }
}
