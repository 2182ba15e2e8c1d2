//! In-memory implementation of `AuditSink`.
//!
//! `InMemoryAuditSink` is the reference implementation of the `AuditSink`
//! trait. It keeps one hash chain per plan in a `HashMap` protected by a
//! `Mutex`, making it safe to pass across threads while the orchestrator
//! calls `commit()` and `finalize()`.
//!
//! Use `export_log()` after a plan completes to obtain a sealed `AuditLog`,
//! and `verify_integrity()` at any time to confirm a chain has not been
//! tampered with in memory.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::info;

use attestor_contracts::{
    error::{AttestorError, AttestorResult},
    execution::StepRecord,
    plan::PlanId,
};
use attestor_core::traits::AuditSink;

use crate::{
    chain::{hash_event, verify_chain},
    event::{AuditEvent, AuditLog},
};

// ── Internal mutable state ────────────────────────────────────────────────────

/// The hash chain for one plan.
pub(crate) struct ChainState {
    /// All events committed so far, in append order.
    pub(crate) events: Vec<AuditEvent>,

    /// The next sequence number to assign (starts at 0).
    pub(crate) sequence: u64,

    /// The `this_hash` of the last committed event, or `GENESIS_HASH`
    /// before any event exists.
    pub(crate) last_hash: String,
}

impl ChainState {
    fn new() -> Self {
        Self {
            events: Vec::new(),
            sequence: 0,
            last_hash: AuditEvent::GENESIS_HASH.to_string(),
        }
    }
}

// ── Public sink ───────────────────────────────────────────────────────────────

/// An in-memory, append-only audit sink backed by per-plan SHA-256 hash
/// chains.
///
/// # Thread safety
///
/// `commit()` and `finalize()` both acquire a `Mutex` internally. Multiple
/// threads may hold clones of the sink's `Arc` without additional
/// synchronization.
pub struct InMemoryAuditSink {
    pub(crate) chains: Arc<Mutex<HashMap<String, ChainState>>>,
}

impl InMemoryAuditSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self {
            chains: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Export a sealed `AuditLog` for the given plan.
    ///
    /// Returns `None` when no event has ever been committed for the plan.
    pub fn export_log(&self, plan_id: &PlanId) -> Option<AuditLog> {
        let chains = self.chains.lock().expect("audit state lock poisoned");
        let chain = chains.get(&plan_id.to_string())?;
        let terminal_hash = chain
            .events
            .last()
            .map(|e| e.this_hash.clone())
            .unwrap_or_default();

        Some(AuditLog {
            plan_id: plan_id.to_string(),
            events: chain.events.clone(),
            finalized_at: Utc::now(),
            terminal_hash,
        })
    }

    /// Verify that a plan's in-memory chain has not been tampered with.
    ///
    /// Delegates to `verify_chain`, which checks both prev-hash linkage and
    /// hash correctness for every event. A plan with no events is valid.
    pub fn verify_integrity(&self, plan_id: &PlanId) -> bool {
        let chains = self.chains.lock().expect("audit state lock poisoned");
        chains
            .get(&plan_id.to_string())
            .map(|chain| verify_chain(&chain.events))
            .unwrap_or(true)
    }
}

impl Default for InMemoryAuditSink {
    fn default() -> Self {
        Self::new()
    }
}

// ── AuditSink impl ────────────────────────────────────────────────────────────

impl AuditSink for InMemoryAuditSink {
    /// Append one step record to the plan's hash chain.
    ///
    /// Computes `this_hash` from (plan_id, sequence, prev_hash, record),
    /// wraps the record in an `AuditEvent`, appends it, then advances the
    /// sequence counter and `last_hash`.
    ///
    /// Returns `Err(AuditWriteFailed)` only if the internal mutex is
    /// poisoned, which cannot happen under normal operation.
    fn commit(&self, plan_id: &PlanId, record: &StepRecord) -> AttestorResult<()> {
        let mut chains = self
            .chains
            .lock()
            .map_err(|e| AttestorError::AuditWriteFailed {
                reason: format!("audit state lock poisoned: {e}"),
            })?;

        let key = plan_id.to_string();
        let chain = chains.entry(key.clone()).or_insert_with(ChainState::new);

        let prev_hash = chain.last_hash.clone();
        let sequence = chain.sequence;

        let this_hash = hash_event(&key, sequence, record, &prev_hash);

        let event = AuditEvent {
            sequence,
            plan_id: key,
            record: record.clone(),
            prev_hash,
            this_hash: this_hash.clone(),
        };

        chain.events.push(event);
        chain.sequence += 1;
        chain.last_hash = this_hash;

        Ok(())
    }

    /// Mark the plan as complete in the audit log.
    ///
    /// Logs a structured message via `tracing`. Implementations that persist
    /// to disk or a database would flush/seal here; the in-memory sink has
    /// nothing to flush.
    fn finalize(&self, plan_id: &PlanId) -> AttestorResult<()> {
        let chains = self
            .chains
            .lock()
            .map_err(|e| AttestorError::AuditWriteFailed {
                reason: format!("audit state lock poisoned: {e}"),
            })?;

        let (event_count, terminal_hash) = chains
            .get(&plan_id.to_string())
            .map(|chain| (chain.events.len(), chain.last_hash.clone()))
            .unwrap_or((0, AuditEvent::GENESIS_HASH.to_string()));

        info!(
            plan_id = %plan_id,
            event_count,
            terminal_hash = %terminal_hash,
            "audit log finalized"
        );

        Ok(())
    }
}
