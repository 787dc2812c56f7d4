//! Sandbox bridge: two one-directional channels between the project store and
//! the embedded sandbox.
//!
//! - downstream: `reseed` tears the current sandbox instance down and builds a
//!   fresh snapshot. Only identity-level changes call it.
//! - upstream: `on_sandbox_edit` captures edits and `poll` releases them once
//!   the debounce window has been quiet. Upstream updates never reseed.
//!
//! Every snapshot carries a `SandboxInstance`. Edits reported by any other
//! instance are dropped, and teardown discards the pending update, so trailing
//! edits of a replaced sandbox cannot reach the new project identity.

use std::time::{Duration, Instant};

use super::preview_theme::{self, ENTRY_PATH, STYLESHEET_IMPORT, STYLESHEET_PATH};
use super::project::Files;
use crate::kernel::services::ports::Theme;

pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SandboxInstance(u64);

impl SandboxInstance {
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReseedReason {
    Mount,
    ProjectLoaded,
    ActiveFileSwitched,
    Structural,
}

impl ReseedReason {
    pub fn as_str(self) -> &'static str {
        match self {
            ReseedReason::Mount => "mount",
            ReseedReason::ProjectLoaded => "project_loaded",
            ReseedReason::ActiveFileSwitched => "active_file_switched",
            ReseedReason::Structural => "structural",
        }
    }
}

/// Disposable copy of the project handed to a freshly constructed sandbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxSnapshot {
    pub instance: SandboxInstance,
    pub files: Files,
    pub active_file: String,
    pub stylesheet: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamUpdate {
    pub instance: SandboxInstance,
    pub files: Files,
}

#[derive(Debug)]
struct PendingUpstream {
    deadline: Instant,
    files: Files,
    coalesced: usize,
}

#[derive(Debug)]
pub struct SandboxBridge {
    window: Duration,
    theme: Theme,
    live: Option<SandboxInstance>,
    next_instance: u64,
    focused: String,
    pending: Option<PendingUpstream>,
}

impl SandboxBridge {
    pub fn new(theme: Theme) -> Self {
        Self::with_window(DEBOUNCE_WINDOW, theme)
    }

    pub fn with_window(window: Duration, theme: Theme) -> Self {
        Self {
            window,
            theme,
            live: None,
            next_instance: 1,
            focused: String::new(),
            pending: None,
        }
    }

    pub fn live_instance(&self) -> Option<SandboxInstance> {
        self.live
    }

    pub fn focused(&self) -> &str {
        &self.focused
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Tear down the live instance and build a replacement from `files`.
    pub fn reseed(
        &mut self,
        reason: ReseedReason,
        files: &Files,
        active_file: &str,
    ) -> SandboxSnapshot {
        self.teardown();

        let instance = SandboxInstance(self.next_instance);
        self.next_instance += 1;
        self.live = Some(instance);
        self.focused = active_file.to_string();

        let stylesheet = preview_theme::stylesheet(self.theme);
        tracing::debug!(
            instance = instance.get(),
            reason = reason.as_str(),
            files = files.len(),
            "sandbox reseed"
        );

        SandboxSnapshot {
            instance,
            files: inject_presentation(files, &stylesheet),
            active_file: active_file.to_string(),
            stylesheet,
        }
    }

    /// Release the live instance together with any pending upstream update.
    pub fn teardown(&mut self) {
        if let Some(pending) = self.pending.take() {
            tracing::debug!(
                coalesced = pending.coalesced,
                "discarding pending sandbox edits on teardown"
            );
        }
        self.live = None;
        self.focused.clear();
    }

    /// Record a sandbox-side edit. Each call restarts the quiescence window.
    ///
    /// Returns `false` when the edit comes from an instance that is no longer live.
    pub fn on_sandbox_edit(
        &mut self,
        instance: SandboxInstance,
        files: Files,
        now: Instant,
    ) -> bool {
        if self.live != Some(instance) {
            tracing::debug!(instance = instance.get(), "ignoring edit from stale sandbox");
            return false;
        }

        let coalesced = self.pending.as_ref().map_or(0, |p| p.coalesced) + 1;
        self.pending = Some(PendingUpstream {
            deadline: now + self.window,
            files,
            coalesced,
        });
        true
    }

    /// Sandbox tab switch. Returns the path to mirror into the host's active file.
    pub fn on_sandbox_active_file(
        &mut self,
        instance: SandboxInstance,
        path: &str,
    ) -> Option<String> {
        if self.live != Some(instance) || path.is_empty() || self.focused == path {
            return None;
        }
        self.focused = path.to_string();
        Some(path.to_string())
    }

    /// Host-side selection that the live sandbox already shows needs no reseed.
    pub fn is_focused(&self, path: &str) -> bool {
        self.live.is_some() && self.focused == path
    }

    /// Release the pending update once its window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<UpstreamUpdate> {
        let deadline = self.pending.as_ref()?.deadline;
        if now < deadline {
            return None;
        }
        let instance = self.live?;
        let pending = self.pending.take()?;
        tracing::debug!(
            instance = instance.get(),
            coalesced = pending.coalesced,
            "sandbox edits flushed upstream"
        );
        Some(UpstreamUpdate {
            instance,
            files: strip_presentation(pending.files),
        })
    }

    /// Swap the injected stylesheet for the live instance. No reseed.
    pub fn set_theme(&mut self, theme: Theme) -> Option<(SandboxInstance, String)> {
        if self.theme == theme {
            return None;
        }
        self.theme = theme;
        let instance = self.live?;
        Some((instance, preview_theme::stylesheet(theme)))
    }
}

pub fn inject_presentation(files: &Files, stylesheet: &str) -> Files {
    let mut out = files.clone();
    if let Some(entry) = out.get_mut(ENTRY_PATH) {
        if !entry.starts_with(STYLESHEET_IMPORT) {
            entry.insert_str(0, STYLESHEET_IMPORT);
        }
    }
    out.insert(STYLESHEET_PATH.to_string(), stylesheet.to_string());
    out
}

pub fn strip_presentation(mut files: Files) -> Files {
    files.shift_remove(STYLESHEET_PATH);
    if let Some(entry) = files.get_mut(ENTRY_PATH) {
        if let Some(rest) = entry.strip_prefix(STYLESHEET_IMPORT) {
            *entry = rest.to_string();
        }
    }
    files
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/bridge.rs"]
mod tests;
