//! Plan types: the ordered, immutable item list produced by the planner.
//!
//! The core never mutates or re-derives a plan. Items are consumed exactly
//! once, in list order; a failed item is retried in place, never re-planned.

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::observation::Observation;

/// Unique identifier for a single plan execution.
///
/// Appears in every audit record produced while the plan runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlanId(pub uuid::Uuid);

impl PlanId {
    /// Create a new, unique plan ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for PlanId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PlanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry in a plan: a state-changing Action or a read-only Observation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PlanItem {
    Action(Action),
    Observation(Observation),
}

impl PlanItem {
    pub fn is_action(&self) -> bool {
        matches!(self, PlanItem::Action(_))
    }
}

/// An ordered, immutable sequence of plan items.
///
/// Built once by the external planner; executed item-by-item with
/// abort-on-terminal-failure semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    id: PlanId,
    items: Vec<PlanItem>,
}

impl Plan {
    pub fn new(items: Vec<PlanItem>) -> Self {
        Self {
            id: PlanId::new(),
            items,
        }
    }

    pub fn id(&self) -> &PlanId {
        &self.id
    }

    pub fn items(&self) -> &[PlanItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
