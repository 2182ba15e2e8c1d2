//! Verification evidence records.
//!
//! One `Evidence` value is one unit of verification proof. Evidence is owned
//! exclusively by the outcome that produced it — never shared, never mutated
//! after creation.

use serde::{Deserialize, Serialize};

/// The source a piece of evidence came from.
///
/// `Uia`, `Dom`, and `File` are primary authorities — the ground-truth
/// source for their context. `Vision` is the advisory authority: lower
/// trust, consulted only as a fallback, never able to override a primary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EvidenceSource {
    Uia,
    Dom,
    File,
    Vision,
}

impl EvidenceSource {
    /// True for the ground-truth sources (everything except `Vision`).
    pub fn is_primary(self) -> bool {
        !matches!(self, EvidenceSource::Vision)
    }
}

impl std::fmt::Display for EvidenceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvidenceSource::Uia => write!(f, "UIA"),
            EvidenceSource::Dom => write!(f, "DOM"),
            EvidenceSource::File => write!(f, "FILE"),
            EvidenceSource::Vision => write!(f, "VISION"),
        }
    }
}

/// The verdict recorded by a single evidence source.
///
/// Primary authorities report `Success` or `Fail`; the advisory authority
/// reports `Verified`, `NotVerified`, or `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvidenceResult {
    Success,
    Fail,
    Verified,
    NotVerified,
    Unknown,
}

impl std::fmt::Display for EvidenceResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvidenceResult::Success => write!(f, "SUCCESS"),
            EvidenceResult::Fail => write!(f, "FAIL"),
            EvidenceResult::Verified => write!(f, "VERIFIED"),
            EvidenceResult::NotVerified => write!(f, "NOT_VERIFIED"),
            EvidenceResult::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// One unit of verification proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    /// Where the verdict came from.
    pub source: EvidenceSource,
    /// The verdict itself.
    pub result: EvidenceResult,
    /// Free-text context, for logging and diagnostics only.
    pub details: String,
}

impl Evidence {
    pub fn new(
        source: EvidenceSource,
        result: EvidenceResult,
        details: impl Into<String>,
    ) -> Self {
        Self {
            source,
            result,
            details: details.into(),
        }
    }
}
