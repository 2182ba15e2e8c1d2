//! # attestor-verify
//!
//! Multi-source verification for the Attestor runtime.
//!
//! This crate provides [`engine::Critic`], which implements the
//! [`attestor_core::traits::Verifier`] trait. Verification follows a strict
//! authority hierarchy:
//!
//! 1. **Primary** — the context's ground-truth authority (accessibility
//!    tree for desktop, DOM for web, filesystem for file). Its verdict is
//!    the outcome's `success`, always.
//! 2. **Advisory** — vision, consulted only after a primary failure. Moves
//!    the confidence score; can never flip `success`.
//!
//! The confidence table lives in [`confidence`] as a pure function of the
//! collected evidence.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use attestor_contracts::action::Context;
//! use attestor_verify::engine::Critic;
//!
//! let critic = Critic::new()
//!     .with_primary(Context::Desktop, Box::new(uia_authority))
//!     .with_advisory(Box::new(vision), Box::new(screen));
//! // Pass `critic` to `attestor_core::Orchestrator::new(...)`.
//! ```

pub mod confidence;
pub mod engine;

pub use confidence::confidence_for;
pub use engine::Critic;
