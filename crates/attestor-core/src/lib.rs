//! # attestor-core
//!
//! The deterministic, policy-bound plan orchestrator for Attestor.
//!
//! This crate provides:
//! - The trait seams of the runtime (`PolicyGate`, `ActionExecutor`,
//!   `Observer`, `Verifier`, `AuditSink`, and the verification authority
//!   traits)
//! - The `Orchestrator` that wires them together in the correct trust order
//!
//! ## Usage
//!
//! ```rust,ignore
//! use attestor_core::{Orchestrator, traits::{PolicyGate, ActionExecutor, Observer, Verifier, AuditSink}};
//! ```

pub mod orchestrator;
pub mod traits;

pub use orchestrator::{Orchestrator, MAX_ATTEMPTS};
