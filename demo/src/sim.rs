//! A simulated desktop/web/file environment for the demo scenarios.
//!
//! `SimEnvironment` stands in for the real adapters: it executes actions
//! against an in-memory model of open windows, typed text, the current web
//! page, and a small filesystem. The authority types query the same shared
//! state independently, so a sabotaged executor is caught by verification
//! exactly as it would be against a real desktop.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use attestor_contracts::{
    action::{Action, ActionKind, Context},
    error::{AttestorError, AttestorResult},
    evidence::EvidenceSource,
    execution::ObservationOutcome,
    observation::{Observation, ObservationKind},
    verify::{AdvisoryCheck, AdvisoryCheckKind, AdvisoryVerdict, PrimaryVerdict, Screenshot},
};
use attestor_core::traits::{
    ActionExecutor, AdvisoryAuthority, Observer, PrimaryAuthority, ScreenCapture,
};

// ── Shared state ──────────────────────────────────────────────────────────────

#[derive(Default)]
struct SimState {
    open_windows: HashSet<String>,
    typed_text: Vec<String>,
    current_url: Option<String>,
    files: HashMap<String, String>,
    /// Remaining times a launch of this app silently fails to land.
    dropped_launches: HashMap<String, u32>,
    /// When set, typed text is swallowed before it reaches the screen.
    swallow_typing: bool,
}

impl SimState {
    fn normalize(app: &str) -> String {
        let lower = app.trim().to_ascii_lowercase();
        lower
            .strip_suffix(".exe")
            .map(str::to_string)
            .unwrap_or(lower)
    }

    /// Render everything a screenshot of this state would show.
    fn render(&self) -> String {
        let mut screen = String::new();
        for window in &self.open_windows {
            screen.push_str(window);
            screen.push('\n');
        }
        for text in &self.typed_text {
            screen.push_str(text);
            screen.push('\n');
        }
        if let Some(url) = &self.current_url {
            screen.push_str(url);
            screen.push('\n');
        }
        screen
    }
}

/// Handle on the simulated environment. Cloning shares the state.
#[derive(Clone)]
pub struct SimEnvironment {
    state: Arc<Mutex<SimState>>,
}

impl SimEnvironment {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SimState::default())),
        }
    }

    /// Pre-load a file into the simulated filesystem.
    pub fn seed_file(&self, path: &str, contents: &str) {
        self.state
            .lock()
            .unwrap()
            .files
            .insert(path.to_string(), contents.to_string());
    }

    /// Make the next `count` launches of `app` fail to open a window while
    /// the executor still reports success.
    pub fn drop_launches(&self, app: &str, count: u32) {
        self.state
            .lock()
            .unwrap()
            .dropped_launches
            .insert(SimState::normalize(app), count);
    }

    /// Swallow typed text so it never reaches the screen.
    pub fn swallow_typing(&self) {
        self.state.lock().unwrap().swallow_typing = true;
    }
}

impl Default for SimEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

// ── Effector impls ────────────────────────────────────────────────────────────

impl ActionExecutor for SimEnvironment {
    fn act(&self, action: &Action) -> AttestorResult<String> {
        let mut state = self.state.lock().unwrap();
        let target = action.target().unwrap_or("");

        match (action.context(), action.kind()) {
            (Context::Desktop, ActionKind::LaunchApp) => {
                let app = SimState::normalize(target);
                if let Some(remaining) = state.dropped_launches.get_mut(&app) {
                    if *remaining > 0 {
                        *remaining -= 1;
                        // The launch is silently dropped; the executor still
                        // claims success. Verification catches the lie.
                        return Ok(format!("launched '{app}'"));
                    }
                }
                state.open_windows.insert(app.clone());
                Ok(format!("launched '{app}'"))
            }
            (Context::Desktop, ActionKind::TypeText) => {
                let text = action.text().unwrap_or("").to_string();
                if !state.swallow_typing {
                    state.typed_text.push(text.clone());
                }
                Ok(format!("typed {} characters", text.len()))
            }
            (Context::Desktop, ActionKind::CloseApp) => {
                let app = SimState::normalize(target);
                state.open_windows.remove(&app);
                Ok(format!("closed '{app}'"))
            }
            (Context::Web, ActionKind::LaunchApp) => {
                state.current_url = Some(target.to_string());
                Ok(format!("navigated to '{target}'"))
            }
            (Context::Web, ActionKind::TypeText) => {
                let text = action.text().unwrap_or("").to_string();
                state.typed_text.push(text);
                Ok(format!("typed into '{target}'"))
            }
            (Context::Web, ActionKind::CloseApp) => {
                state.current_url = None;
                Ok("closed page".to_string())
            }
            (Context::File, ActionKind::LaunchApp) => {
                if state.files.contains_key(target) {
                    Ok(format!("opened '{target}'"))
                } else {
                    Err(AttestorError::Execution {
                        reason: format!("file '{target}' does not exist"),
                    })
                }
            }
            (Context::File, ActionKind::TypeText) => {
                let text = action.text().unwrap_or("").to_string();
                state.files.insert(target.to_string(), text);
                Ok(format!("wrote '{target}'"))
            }
            (Context::File, ActionKind::CloseApp) => Err(AttestorError::Execution {
                reason: "close_app is not supported in the file context".to_string(),
            }),
        }
    }
}

impl Observer for SimEnvironment {
    fn observe(&self, observation: &Observation) -> ObservationOutcome {
        let state = self.state.lock().unwrap();
        let target = observation.target().unwrap_or("");

        match observation.kind() {
            ObservationKind::ReadText => match observation.context() {
                Context::File => match state.files.get(target) {
                    Some(contents) => ObservationOutcome::success(contents.clone()),
                    None => ObservationOutcome::not_found(format!("no file at '{target}'")),
                },
                _ => {
                    let screen = state.render();
                    if screen.contains(target) {
                        ObservationOutcome::success(target)
                    } else {
                        ObservationOutcome::not_found(format!("'{target}' not on screen"))
                    }
                }
            },
            ObservationKind::QueryElement | ObservationKind::FindElement => {
                let app = SimState::normalize(target);
                if state.open_windows.contains(&app) {
                    ObservationOutcome::success(format!("window '{app}' present"))
                } else {
                    ObservationOutcome::not_found(format!("no element matching '{target}'"))
                }
            }
            ObservationKind::DescribeScreen => ObservationOutcome::success(state.render()),
            ObservationKind::ListVisualRegions => {
                let regions: Vec<String> = state
                    .open_windows
                    .iter()
                    .map(|w| format!("window:{w}"))
                    .collect();
                ObservationOutcome::success(regions.join(", "))
            }
            ObservationKind::IdentifyTextBlocks => {
                ObservationOutcome::success(state.typed_text.join("\n"))
            }
        }
    }
}

// ── Authority impls ───────────────────────────────────────────────────────────

/// Simulated accessibility-tree authority for the desktop context.
pub struct UiaSim(SimEnvironment);

/// Simulated DOM authority for the web context.
pub struct DomSim(SimEnvironment);

/// Simulated filesystem authority for the file context.
pub struct FileSim(SimEnvironment);

impl SimEnvironment {
    pub fn uia(&self) -> Box<UiaSim> {
        Box::new(UiaSim(self.clone()))
    }

    pub fn dom(&self) -> Box<DomSim> {
        Box::new(DomSim(self.clone()))
    }

    pub fn filesystem(&self) -> Box<FileSim> {
        Box::new(FileSim(self.clone()))
    }

    pub fn vision(&self) -> Box<VisionSim> {
        Box::new(VisionSim(self.clone()))
    }

    pub fn screen(&self) -> Box<ScreenSim> {
        Box::new(ScreenSim(self.clone()))
    }
}

impl PrimaryAuthority for UiaSim {
    fn source(&self) -> EvidenceSource {
        EvidenceSource::Uia
    }

    fn query(&self, action: &Action) -> AttestorResult<PrimaryVerdict> {
        let state = self.0.state.lock().unwrap();
        let target = action.target().unwrap_or("");
        let app = SimState::normalize(target);

        let verdict = match action.kind() {
            ActionKind::LaunchApp => {
                if state.open_windows.contains(&app) {
                    PrimaryVerdict::success(format!("window '{app}' found in tree"))
                } else {
                    PrimaryVerdict::fail(format!("window '{app}' not found in tree"))
                }
            }
            ActionKind::TypeText => {
                let expected = action
                    .verify()
                    .map(|v| v.expected.as_str())
                    .or(action.text())
                    .unwrap_or("");
                if state.typed_text.iter().any(|t| t.contains(expected)) {
                    PrimaryVerdict::success(format!("text '{expected}' present"))
                } else {
                    PrimaryVerdict::fail(format!("text '{expected}' not present"))
                }
            }
            ActionKind::CloseApp => {
                if state.open_windows.contains(&app) {
                    PrimaryVerdict::fail(format!("window '{app}' still open"))
                } else {
                    PrimaryVerdict::success(format!("window '{app}' gone"))
                }
            }
        };
        Ok(verdict)
    }
}

impl PrimaryAuthority for DomSim {
    fn source(&self) -> EvidenceSource {
        EvidenceSource::Dom
    }

    fn query(&self, action: &Action) -> AttestorResult<PrimaryVerdict> {
        let state = self.0.state.lock().unwrap();
        let target = action.target().unwrap_or("");

        let verdict = match action.kind() {
            ActionKind::LaunchApp => match &state.current_url {
                Some(url) if url == target => {
                    PrimaryVerdict::success(format!("document at '{url}'"))
                }
                Some(url) => PrimaryVerdict::fail(format!("document is at '{url}'")),
                None => PrimaryVerdict::fail("no document loaded"),
            },
            ActionKind::TypeText => {
                let expected = action.text().unwrap_or("");
                if state.typed_text.iter().any(|t| t.contains(expected)) {
                    PrimaryVerdict::success(format!("input holds '{expected}'"))
                } else {
                    PrimaryVerdict::fail(format!("input does not hold '{expected}'"))
                }
            }
            ActionKind::CloseApp => match &state.current_url {
                Some(url) => PrimaryVerdict::fail(format!("page '{url}' still open")),
                None => PrimaryVerdict::success("page closed"),
            },
        };
        Ok(verdict)
    }
}

impl PrimaryAuthority for FileSim {
    fn source(&self) -> EvidenceSource {
        EvidenceSource::File
    }

    fn query(&self, action: &Action) -> AttestorResult<PrimaryVerdict> {
        let state = self.0.state.lock().unwrap();
        let target = action.target().unwrap_or("");

        let verdict = match action.kind() {
            ActionKind::LaunchApp => {
                if state.files.contains_key(target) {
                    PrimaryVerdict::success(format!("file '{target}' exists"))
                } else {
                    PrimaryVerdict::fail(format!("file '{target}' does not exist"))
                }
            }
            ActionKind::TypeText => {
                let expected = action.text().unwrap_or("");
                match state.files.get(target) {
                    Some(contents) if contents.contains(expected) => {
                        PrimaryVerdict::success(format!("file '{target}' holds expected text"))
                    }
                    Some(_) => PrimaryVerdict::fail(format!("file '{target}' content differs")),
                    None => PrimaryVerdict::fail(format!("file '{target}' does not exist")),
                }
            }
            ActionKind::CloseApp => PrimaryVerdict::fail("close_app has no file semantics"),
        };
        Ok(verdict)
    }
}

/// Simulated vision authority: checks text against the rendered screen.
pub struct VisionSim(SimEnvironment);

impl AdvisoryAuthority for VisionSim {
    fn supports(&self, kind: AdvisoryCheckKind) -> bool {
        matches!(
            kind,
            AdvisoryCheckKind::TextVisible | AdvisoryCheckKind::LayoutContains
        )
    }

    fn query(&self, screenshot: &Screenshot, check: &AdvisoryCheck) -> AdvisoryVerdict {
        let Ok(screen) = std::str::from_utf8(&screenshot.bytes) else {
            return AdvisoryVerdict::Unknown;
        };
        if screen.contains(&check.expected) {
            AdvisoryVerdict::Verified
        } else {
            AdvisoryVerdict::NotVerified
        }
    }
}

/// Simulated capture source: renders the state as UTF-8 "pixels".
pub struct ScreenSim(SimEnvironment);

impl ScreenCapture for ScreenSim {
    fn capture_active_region(&self) -> Option<Screenshot> {
        let state = self.0.state.lock().unwrap();
        Some(Screenshot::new(state.render().into_bytes()))
    }
}
