//! The Observation value type.
//!
//! Observations are immutable, read-only query descriptors. They bypass the
//! policy gate (presumed safe), never carry verification metadata or
//! coordinates — both are structurally impossible — and never trigger
//! retries.

use serde::{Deserialize, Serialize};

use crate::action::Context;
use crate::error::{AttestorError, AttestorResult};

/// The kind of read-only query an Observation performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObservationKind {
    /// Extract text from an element or file.
    ReadText,
    /// Check element existence or attributes.
    QueryElement,
    /// Describe the whole current view.
    DescribeScreen,
    /// Search for an element by description.
    FindElement,
    /// Identify layout regions in the current view.
    ListVisualRegions,
    /// Extract structured text blocks from the current view.
    IdentifyTextBlocks,
}

impl ObservationKind {
    /// Kinds that operate on the whole current view and therefore may omit
    /// `target`.
    fn is_whole_view(self) -> bool {
        matches!(
            self,
            ObservationKind::DescribeScreen
                | ObservationKind::ListVisualRegions
                | ObservationKind::IdentifyTextBlocks
        )
    }
}

impl std::fmt::Display for ObservationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ObservationKind::ReadText => "read_text",
            ObservationKind::QueryElement => "query_element",
            ObservationKind::DescribeScreen => "describe_screen",
            ObservationKind::FindElement => "find_element",
            ObservationKind::ListVisualRegions => "list_visual_regions",
            ObservationKind::IdentifyTextBlocks => "identify_text_blocks",
        };
        write!(f, "{s}")
    }
}

/// An immutable, read-only query descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    kind: ObservationKind,
    context: Context,
    target: Option<String>,
}

impl Observation {
    /// Construct an Observation, validating the target rule.
    ///
    /// Whole-view kinds (`describe_screen`, `list_visual_regions`,
    /// `identify_text_blocks`) may omit `target`; every other kind requires
    /// one.
    pub fn new(
        kind: ObservationKind,
        context: Context,
        target: Option<String>,
    ) -> AttestorResult<Self> {
        let has_target = target.as_deref().is_some_and(|t| !t.is_empty());
        if !has_target && !kind.is_whole_view() {
            return Err(AttestorError::Validation {
                reason: format!("observation '{kind}' requires 'target'"),
            });
        }
        Ok(Self {
            kind,
            context,
            target,
        })
    }

    pub fn kind(&self) -> ObservationKind {
        self.kind
    }

    pub fn context(&self) -> Context {
        self.context
    }

    /// The query target; `None` means "the whole current view".
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }
}
