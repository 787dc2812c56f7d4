use super::autosave::AutosaveScheduler;
use super::bridge::SandboxBridge;
use super::project::ProjectStore;
use crate::kernel::services::ports::{Settings, User};

pub const SPLIT_MIN_PERCENT: u8 = 25;
pub const SPLIT_MAX_PERCENT: u8 = 75;
pub const SPLIT_DEFAULT_PERCENT: u8 = 50;

/// Per-project session lifecycle.
///
/// `Uninitialized -> Loaded -> Editing <-> Persisting`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Uninitialized,
    Loaded,
    Editing,
    Persisting,
}

impl SessionPhase {
    pub fn can_transition_to(self, next: SessionPhase) -> bool {
        use SessionPhase::*;
        matches!(
            (self, next),
            (Uninitialized, Loaded)
                | (Loaded, Editing)
                | (Editing, Persisting)
                | (Persisting, Editing)
                | (Loaded, Uninitialized)
                | (Editing, Uninitialized)
                | (Persisting, Uninitialized)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorLayout {
    split_percent: u8,
}

impl EditorLayout {
    pub fn new(split_percent: u8) -> Self {
        Self {
            split_percent: split_percent.clamp(SPLIT_MIN_PERCENT, SPLIT_MAX_PERCENT),
        }
    }

    /// Parse the persisted `editorWidth` entry; unreadable values fall back to the default.
    pub fn from_stored(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .map(|v| Self::new(clamp_percent(v)))
            .unwrap_or_default()
    }

    pub fn split_percent(&self) -> u8 {
        self.split_percent
    }

    pub fn set_split_percent(&mut self, percent: f64) -> bool {
        if !percent.is_finite() {
            return false;
        }
        let next = clamp_percent(percent);
        let changed = next != self.split_percent;
        self.split_percent = next;
        changed
    }

    pub fn reset(&mut self) -> bool {
        let changed = self.split_percent != SPLIT_DEFAULT_PERCENT;
        self.split_percent = SPLIT_DEFAULT_PERCENT;
        changed
    }
}

impl Default for EditorLayout {
    fn default() -> Self {
        Self::new(SPLIT_DEFAULT_PERCENT)
    }
}

fn clamp_percent(percent: f64) -> u8 {
    percent
        .clamp(f64::from(SPLIT_MIN_PERCENT), f64::from(SPLIT_MAX_PERCENT))
        .round() as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// User-visible message raised at the call site of a deliberate action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub pending: bool,
    pub error: Option<String>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

#[derive(Debug)]
pub struct AppState {
    pub project: ProjectStore,
    pub bridge: SandboxBridge,
    pub autosave: AutosaveScheduler,
    pub settings: Settings,
    pub layout: EditorLayout,
    pub auth: AuthState,
    pub phase: SessionPhase,
    pub remote_in_flight: usize,
}

impl AppState {
    pub fn new(project: ProjectStore, settings: Settings, layout: EditorLayout) -> Self {
        let settings = settings.normalized();
        Self {
            project,
            bridge: SandboxBridge::new(settings.theme),
            autosave: AutosaveScheduler::new(
                settings.autosave_enabled,
                settings.autosave_interval,
            ),
            settings,
            layout,
            auth: AuthState::default(),
            phase: SessionPhase::Uninitialized,
            remote_in_flight: 0,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/state.rs"]
mod tests;
