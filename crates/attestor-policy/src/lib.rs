//! # attestor-policy
//!
//! A TOML-driven, deny-by-default whitelist gate for the Attestor runtime.
//!
//! ## Overview
//!
//! This crate provides [`WhitelistPolicy`], which implements the
//! [`PolicyGate`](attestor_core::traits::PolicyGate) trait. Each execution
//! context carries its own whitelist — desktop applications, web domains,
//! file paths — declared in a TOML file. Anything not listed is denied.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use attestor_policy::engine::WhitelistPolicy;
//!
//! let gate = WhitelistPolicy::load_or_deny_all(Path::new("whitelist.toml"));
//! // Pass `gate` to `attestor_core::Orchestrator::new(...)`.
//! ```
//!
//! ## Fail-closed loading
//!
//! A missing or malformed whitelist never widens access:
//! [`WhitelistPolicy::load_or_deny_all`] substitutes an empty configuration
//! that denies every action.

pub mod engine;
pub mod rule;

pub use engine::WhitelistPolicy;
pub use rule::{DesktopRules, FileRules, WebRules, WhitelistConfig};

// ── Tests ─────────────────────────────────────────────────────────────────────
