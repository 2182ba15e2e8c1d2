//! TOML-driven whitelist gate implementation.
//!
//! `WhitelistPolicy` loads a `WhitelistConfig` from a TOML string or file
//! and implements the `PolicyGate` trait from attestor-core.
//!
//! Evaluation algorithm, per context:
//!
//! - Desktop: `launch_app` and `close_app` require the target app to be in
//!   `allowed_apps`; `type_text` goes to the focused window of an
//!   already-permitted app and is allowed.
//! - Web: `launch_app` (navigation) requires the URL's host to match
//!   `allowed_domains`; `type_text` and `close_app` operate within an
//!   already-permitted page and are allowed.
//! - File: `launch_app` (open) and `type_text` (write) require the target
//!   path to match `allowed_paths`.
//!
//! Anything not explicitly whitelisted is denied. A configuration that
//! cannot be loaded is replaced by `deny_all()` — the gate fails closed,
//! never open.

use std::path::Path;

use tracing::{debug, warn};

use attestor_contracts::{
    action::{Action, ActionKind, Context},
    error::{AttestorError, AttestorResult},
    policy::PolicyDecision,
};
use attestor_core::traits::PolicyGate;

use crate::rule::WhitelistConfig;

/// A `PolicyGate` implementation backed by a TOML whitelist.
///
/// Construct via `from_toml_str`, `from_file`, or `load_or_deny_all`, then
/// pass to the orchestrator.
///
/// ```rust,ignore
/// use attestor_policy::engine::WhitelistPolicy;
///
/// let gate = WhitelistPolicy::load_or_deny_all(Path::new("whitelist.toml"));
/// ```
#[derive(Debug)]
pub struct WhitelistPolicy {
    config: WhitelistConfig,
}

impl WhitelistPolicy {
    /// Build a gate from an already-parsed configuration.
    pub fn new(config: WhitelistConfig) -> Self {
        Self { config }
    }

    /// A gate that denies every action in every context.
    pub fn deny_all() -> Self {
        Self {
            config: WhitelistConfig::deny_all(),
        }
    }

    /// Parse `s` as TOML and build a `WhitelistPolicy`.
    ///
    /// Returns `AttestorError::Config` if the TOML is malformed or does not
    /// match the `WhitelistConfig` schema.
    pub fn from_toml_str(s: &str) -> AttestorResult<Self> {
        let config: WhitelistConfig = toml::from_str(s).map_err(|e| AttestorError::Config {
            reason: format!("failed to parse whitelist TOML: {e}"),
        })?;
        Ok(Self { config })
    }

    /// Read the file at `path` and parse it as a TOML whitelist.
    pub fn from_file(path: &Path) -> AttestorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| AttestorError::Config {
            reason: format!("failed to read whitelist file '{}': {e}", path.display()),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Load the whitelist at `path`, falling back to `deny_all()` when the
    /// file is missing or malformed.
    ///
    /// This is the fail-closed entry point for long-running callers: a bad
    /// configuration can only make the gate stricter.
    pub fn load_or_deny_all(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(gate) => gate,
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "whitelist unavailable, denying all actions"
                );
                Self::deny_all()
            }
        }
    }
}

impl PolicyGate for WhitelistPolicy {
    fn evaluate(&self, action: &Action) -> AttestorResult<PolicyDecision> {
        debug!(
            kind = %action.kind(),
            context = %action.context(),
            target = action.target().unwrap_or("<none>"),
            "evaluating whitelist"
        );

        let target = action.target().unwrap_or("");

        let decision = match (action.context(), action.kind()) {
            // Typing goes to the focused window of an app that was itself
            // whitelisted at launch time.
            (Context::Desktop, ActionKind::TypeText) => PolicyDecision::Allow,

            (Context::Desktop, ActionKind::LaunchApp | ActionKind::CloseApp) => {
                if self.config.app_allowed(target) {
                    PolicyDecision::Allow
                } else {
                    PolicyDecision::deny(format!(
                        "desktop app '{target}' is not in the whitelist"
                    ))
                }
            }

            (Context::Web, ActionKind::LaunchApp) => {
                if self.config.domain_allowed(target) {
                    PolicyDecision::Allow
                } else {
                    PolicyDecision::deny(format!(
                        "domain of '{target}' is not in the whitelist"
                    ))
                }
            }

            // Typing into and closing an already-permitted page.
            (Context::Web, ActionKind::TypeText | ActionKind::CloseApp) => PolicyDecision::Allow,

            (Context::File, ActionKind::LaunchApp | ActionKind::TypeText) => {
                if self.config.path_allowed(target) {
                    PolicyDecision::Allow
                } else {
                    PolicyDecision::deny(format!(
                        "file path '{target}' is not in the whitelist"
                    ))
                }
            }

            // Unconstructible: close_app is rejected for the file context at
            // build time. Deny anyway rather than assume.
            (Context::File, ActionKind::CloseApp) => {
                PolicyDecision::deny("close_app is not supported in the file context")
            }
        };

        if let PolicyDecision::Deny { reason } = &decision {
            warn!(
                kind = %action.kind(),
                context = %action.context(),
                reason = %reason,
                "whitelist denied action"
            );
        }

        Ok(decision)
    }
}
