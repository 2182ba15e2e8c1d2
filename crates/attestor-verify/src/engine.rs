//! The Critic: the multi-source verification engine.
//!
//! `Critic` implements the `Verifier` trait from `attestor-core`.
//! Verification runs in a strict authority order:
//!
//! 1. **Primary** — the context's ground-truth authority (accessibility
//!    tree, DOM, or filesystem) is queried for the action's intended effect.
//!    Its verdict IS the outcome's `success`.
//! 2. **Advisory** — only when the primary fails (or no primary covers the
//!    context), a fresh screenshot is captured and the vision authority is
//!    consulted. Its verdict moves the confidence score and nothing else.
//!
//! A primary success never consults the advisory; there is nothing a lower
//! authority could add. With no primary configured for a context the step
//! cannot be verified and is reported failed regardless of what vision sees.

use std::collections::HashMap;

use tracing::{debug, warn};

use attestor_contracts::{
    action::{Action, Context},
    evidence::{Evidence, EvidenceResult, EvidenceSource},
    execution::ActionOutcome,
    verify::{AdvisoryCheck, AdvisoryCheckKind, PrimaryVerdict},
};
use attestor_core::traits::{AdvisoryAuthority, PrimaryAuthority, ScreenCapture, Verifier};

use crate::confidence::confidence_for;

/// The Attestor verification engine.
///
/// Holds one primary authority per context and an optional advisory
/// authority with its screen capture source. Contexts without a registered
/// primary fall through to the advisory-only path, which can never produce
/// a success.
pub struct Critic {
    primaries: HashMap<Context, Box<dyn PrimaryAuthority>>,
    advisory: Option<Box<dyn AdvisoryAuthority>>,
    capture: Option<Box<dyn ScreenCapture>>,
}

impl Critic {
    /// Create a critic with no authorities registered.
    pub fn new() -> Self {
        Self {
            primaries: HashMap::new(),
            advisory: None,
            capture: None,
        }
    }

    /// Register the primary authority for a context, replacing any previous
    /// registration.
    pub fn with_primary(mut self, context: Context, authority: Box<dyn PrimaryAuthority>) -> Self {
        self.primaries.insert(context, authority);
        self
    }

    /// Register the advisory authority and its screenshot source.
    pub fn with_advisory(
        mut self,
        authority: Box<dyn AdvisoryAuthority>,
        capture: Box<dyn ScreenCapture>,
    ) -> Self {
        self.advisory = Some(authority);
        self.capture = Some(capture);
        self
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    /// Derive the advisory question for an action.
    ///
    /// An explicit `VerifySpec` is used as-is when its kind is one the
    /// advisory authority understands. Otherwise the check falls back to
    /// "is the action's text (or target) visible".
    fn advisory_check(action: &Action) -> Option<AdvisoryCheck> {
        if let Some(spec) = action.verify() {
            let kind = AdvisoryCheckKind::parse(&spec.kind)?;
            return Some(AdvisoryCheck::new(kind, spec.expected.clone()));
        }
        let expected = action.text().or(action.target())?;
        Some(AdvisoryCheck::new(AdvisoryCheckKind::TextVisible, expected))
    }

    /// Consult the advisory authority, if configured and applicable.
    ///
    /// Returns the evidence to append, or `None` when advisory input is
    /// unavailable: no authority, no supported check, or capture failed.
    /// A fresh screenshot is captured per consultation.
    fn consult_advisory(&self, action: &Action) -> Option<Evidence> {
        let advisory = self.advisory.as_ref()?;
        let capture = self.capture.as_ref()?;

        let check = Self::advisory_check(action)?;
        if !advisory.supports(check.kind) {
            debug!(kind = ?check.kind, "advisory authority does not support check");
            return None;
        }

        let Some(screenshot) = capture.capture_active_region() else {
            warn!("screen capture unavailable, skipping advisory check");
            return None;
        };

        let verdict = advisory.query(&screenshot, &check);
        debug!(verdict = ?verdict, expected = %check.expected, "advisory verdict");
        Some(Evidence::new(
            EvidenceSource::Vision,
            verdict.into(),
            format!("advisory check for '{}'", check.expected),
        ))
    }
}

impl Default for Critic {
    fn default() -> Self {
        Self::new()
    }
}

impl Verifier for Critic {
    /// Verify the action against the authority hierarchy.
    ///
    /// The returned outcome's `success` always equals the primary verdict
    /// (false when no primary covers the context). The advisory verdict is
    /// folded into `confidence` and the evidence list only.
    fn verify(&self, action: &Action) -> ActionOutcome {
        let mut evidence: Vec<Evidence> = Vec::with_capacity(2);

        let (success, message, error) = match self.primaries.get(&action.context()) {
            Some(primary) => {
                let source = primary.source();
                match primary.query(action) {
                    Ok(PrimaryVerdict::Success { details }) => {
                        debug!(%source, %details, "primary verified action");
                        evidence.push(Evidence::new(source, EvidenceResult::Success, details));
                        (true, format!("verified by {source}"), None)
                    }
                    Ok(PrimaryVerdict::Fail { details }) => {
                        warn!(%source, %details, "primary rejected action");
                        evidence.push(Evidence::new(
                            source,
                            EvidenceResult::Fail,
                            details.clone(),
                        ));
                        (false, format!("rejected by {source}"), Some(details))
                    }
                    Err(e) => {
                        // An unreachable authority cannot attest to anything.
                        warn!(%source, error = %e, "primary authority unavailable");
                        let details = e.to_string();
                        evidence.push(Evidence::new(
                            source,
                            EvidenceResult::Fail,
                            details.clone(),
                        ));
                        (false, format!("{source} unavailable"), Some(details))
                    }
                }
            }
            None => {
                warn!(context = %action.context(), "no primary authority for context");
                (
                    false,
                    format!("no primary authority for context '{}'", action.context()),
                    None,
                )
            }
        };

        // The advisory is a fallback, never a second opinion on a success.
        if !success {
            if let Some(advisory_evidence) = self.consult_advisory(action) {
                evidence.push(advisory_evidence);
            }
        }

        let confidence = confidence_for(&evidence);
        debug!(
            kind = %action.kind(),
            context = %action.context(),
            success,
            confidence,
            sources = evidence.len(),
            "verification complete"
        );

        ActionOutcome {
            success,
            message,
            error,
            reason: None,
            confidence,
            evidence,
            attempts: 0,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
