//! # attestor-audit
//!
//! Immutable, append-only, SHA-256 hash-chained audit trail for the
//! Attestor runtime.
//!
//! ## Overview
//!
//! Every plan item the orchestrator commits is wrapped in an `AuditEvent`
//! that links to the previous event via its SHA-256 hash. Tampering with
//! any event — even a single byte — breaks the chain and is detected by
//! `verify_chain`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use attestor_audit::{InMemoryAuditSink, AuditEvent};
//! use attestor_core::traits::AuditSink;
//!
//! let sink = InMemoryAuditSink::new();
//! sink.commit(&plan_id, &step_record)?;
//! sink.finalize(&plan_id)?;
//!
//! assert!(sink.verify_integrity(&plan_id));
//! let log = sink.export_log(&plan_id);
//! ```

pub mod chain;
pub mod event;
pub mod memory;

pub use chain::{hash_event, verify_chain};
pub use event::{AuditEvent, AuditLog};
pub use memory::InMemoryAuditSink;

// ── Tests ─────────────────────────────────────────────────────────────────────
