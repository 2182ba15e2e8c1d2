//! The Action value type and its construction-time validation.
//!
//! An `Action` is an immutable description of a state-changing operation.
//! It can only be obtained by building an `ActionDraft`, which checks every
//! field-combination rule before an `Action` exists — a malformed draft
//! never reaches the policy gate, let alone an executor.

use serde::{Deserialize, Serialize};

use crate::error::{AttestorError, AttestorResult};

/// The execution context an item runs in.
///
/// Each context has exactly one primary verification authority:
/// Desktop → accessibility tree, Web → DOM, File → filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Context {
    Desktop,
    Web,
    File,
}

impl std::fmt::Display for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Context::Desktop => write!(f, "desktop"),
            Context::Web => write!(f, "web"),
            Context::File => write!(f, "file"),
        }
    }
}

/// The kind of state change an Action performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Start an application (Desktop), navigate to a URL (Web), or open a
    /// file for reading (File).
    LaunchApp,
    /// Type text into the focused window (Desktop), a selector (Web), or
    /// write a file (File).
    TypeText,
    /// Close an application or browser page. Invalid in the File context.
    CloseApp,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionKind::LaunchApp => write!(f, "launch_app"),
            ActionKind::TypeText => write!(f, "type_text"),
            ActionKind::CloseApp => write!(f, "close_app"),
        }
    }
}

/// Verification metadata attached to an Action by the planner.
///
/// Its presence marks the Action as a *verification intent*: a logical
/// assertion about the environment ("confirm text X is visible"). Failed
/// assertions are terminal on the first attempt — they are never retried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifySpec {
    /// Check discriminant, e.g. `"text_visible"` or `"layout_contains"`.
    pub kind: String,
    /// The expected text or region description.
    pub expected: String,
}

/// An immutable description of a state-changing operation.
///
/// Fields are private: once built, no field may change. There is no
/// coordinates field at all — coordinate-based clicking is a permanent
/// safety exclusion enforced at the `ActionDraft` boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    kind: ActionKind,
    context: Context,
    target: Option<String>,
    text: Option<String>,
    verify: Option<VerifySpec>,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn context(&self) -> Context {
        self.context
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn verify(&self) -> Option<&VerifySpec> {
        self.verify.as_ref()
    }

    /// True when this Action is a verification intent.
    ///
    /// Verification intents fail terminally on the first attempt; the
    /// orchestrator never retries them.
    pub fn is_verify_intent(&self) -> bool {
        self.verify.is_some()
    }
}

/// The only construction path for an `Action`.
///
/// A draft carries the raw planner fields, including the forbidden
/// `coordinates` slot, so that a plan deserialized from an external planner
/// is rejected here rather than silently truncated. `build()` applies every
/// field-combination rule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionDraft {
    pub kind: Option<ActionKind>,
    pub context: Option<Context>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub verify: Option<VerifySpec>,
    /// Must always be absent. Any value is a construction error — a
    /// deliberate, permanent safety constraint, not a temporary limitation.
    #[serde(default)]
    pub coordinates: Option<(i64, i64)>,
}

impl ActionDraft {
    /// Start a draft for the given kind and context.
    pub fn new(kind: ActionKind, context: Context) -> Self {
        Self {
            kind: Some(kind),
            context: Some(context),
            ..Self::default()
        }
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn verify(mut self, kind: impl Into<String>, expected: impl Into<String>) -> Self {
        self.verify = Some(VerifySpec {
            kind: kind.into(),
            expected: expected.into(),
        });
        self
    }

    /// Validate every field-combination rule and produce the immutable
    /// `Action`.
    ///
    /// Rules:
    /// - `coordinates` must be absent in every context.
    /// - `launch_app` requires `target` (app name, URL, or path).
    /// - `type_text` requires `text`; in the Web context it also requires
    ///   `target` (the element selector); in the File context it requires
    ///   `target` (the path to write).
    /// - `close_app` is invalid in the File context and requires `target`
    ///   elsewhere.
    ///
    /// A violation returns `AttestorError::Validation` — fatal before any
    /// execution attempt, with no observable side effects.
    pub fn build(self) -> AttestorResult<Action> {
        let kind = self
            .kind
            .ok_or_else(|| validation("action draft is missing 'kind'"))?;
        let context = self
            .context
            .ok_or_else(|| validation("action draft is missing 'context'"))?;

        if self.coordinates.is_some() {
            return Err(validation(
                "coordinates are not allowed on any action (permanent safety constraint)",
            ));
        }

        let has_target = self.target.as_deref().is_some_and(|t| !t.is_empty());
        let has_text = self.text.as_deref().is_some_and(|t| !t.is_empty());

        match (kind, context) {
            (ActionKind::LaunchApp, _) if !has_target => {
                return Err(validation(format!(
                    "launch_app ({context}) requires 'target'"
                )));
            }
            (ActionKind::TypeText, _) if !has_text => {
                return Err(validation(format!("type_text ({context}) requires 'text'")));
            }
            (ActionKind::TypeText, Context::Web) if !has_target => {
                return Err(validation("type_text (web) requires 'target' selector"));
            }
            (ActionKind::TypeText, Context::File) if !has_target => {
                return Err(validation("type_text (file) requires 'target' file path"));
            }
            (ActionKind::CloseApp, Context::File) => {
                return Err(validation("close_app is not supported in the file context"));
            }
            (ActionKind::CloseApp, _) if !has_target => {
                return Err(validation(format!(
                    "close_app ({context}) requires 'target'"
                )));
            }
            _ => {}
        }

        Ok(Action {
            kind,
            context,
            target: self.target,
            text: self.text,
            verify: self.verify,
        })
    }
}

fn validation(reason: impl Into<String>) -> AttestorError {
    AttestorError::Validation {
        reason: reason.into(),
    }
}
