//! Authority verdict and advisory check types.
//!
//! Primary authorities (accessibility tree, DOM, filesystem) answer with a
//! binary verdict. The advisory authority (vision) answers with a
//! three-valued verdict that can move confidence but never flip success.

use serde::{Deserialize, Serialize};

use crate::evidence::EvidenceResult;

/// The binary ground-truth verdict from a primary authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrimaryVerdict {
    Success { details: String },
    Fail { details: String },
}

impl PrimaryVerdict {
    pub fn success(details: impl Into<String>) -> Self {
        PrimaryVerdict::Success {
            details: details.into(),
        }
    }

    pub fn fail(details: impl Into<String>) -> Self {
        PrimaryVerdict::Fail {
            details: details.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PrimaryVerdict::Success { .. })
    }

    pub fn details(&self) -> &str {
        match self {
            PrimaryVerdict::Success { details } | PrimaryVerdict::Fail { details } => details,
        }
    }
}

/// The three-valued verdict from the advisory authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdvisoryVerdict {
    Verified,
    NotVerified,
    Unknown,
}

impl From<AdvisoryVerdict> for EvidenceResult {
    fn from(v: AdvisoryVerdict) -> Self {
        match v {
            AdvisoryVerdict::Verified => EvidenceResult::Verified,
            AdvisoryVerdict::NotVerified => EvidenceResult::NotVerified,
            AdvisoryVerdict::Unknown => EvidenceResult::Unknown,
        }
    }
}

/// The checks the advisory authority understands.
///
/// Only these two are ever delegated to vision; any other check kind is
/// treated as "advisory not configured" and skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryCheckKind {
    /// Is the expected text visible on screen?
    TextVisible,
    /// Does the layout contain the expected region?
    LayoutContains,
}

impl AdvisoryCheckKind {
    /// Map a `VerifySpec::kind` string to a supported advisory check.
    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "text_visible" => Some(AdvisoryCheckKind::TextVisible),
            "layout_contains" => Some(AdvisoryCheckKind::LayoutContains),
            _ => None,
        }
    }
}

/// A single advisory question: check `kind` for `expected`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisoryCheck {
    pub kind: AdvisoryCheckKind,
    pub expected: String,
}

impl AdvisoryCheck {
    pub fn new(kind: AdvisoryCheckKind, expected: impl Into<String>) -> Self {
        Self {
            kind,
            expected: expected.into(),
        }
    }
}

/// A captured screen region, fed only to the advisory authority.
///
/// The encoding is opaque to the core; adapters agree on it out of band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screenshot {
    pub bytes: Vec<u8>,
}

impl Screenshot {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}
