//! Reducer over `AppState`. Pure: every IO need leaves as an `Effect`.
//!
//! Trigger predicates are kept apart on purpose:
//! - content echoes (debounced sandbox edits) update files and may persist,
//!   but never reseed the sandbox;
//! - identity changes (mount, load, host-side file switch, create/delete,
//!   explicit replace) bump `ProjectStore::identity` and reseed.

use super::bridge::ReseedReason;
use super::state::{Notice, SessionPhase};
use super::{Action, AppState, Effect};

mod auth;
mod explorer;
mod remote;

pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

impl DispatchResult {
    fn unchanged() -> Self {
        Self {
            effects: Vec::new(),
            state_changed: false,
        }
    }

    fn changed(effects: Vec<Effect>) -> Self {
        Self {
            effects,
            state_changed: true,
        }
    }
}

pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::Mount { now } => self.mount(now),
            Action::Unmount => self.unmount(),
            Action::Tick { now } => self.tick(now),
            Action::SandboxEdited {
                instance,
                files,
                now,
            } => {
                self.state.bridge.on_sandbox_edit(instance, files, now);
                DispatchResult::unchanged()
            }
            Action::SandboxActiveFileChanged { instance, path } => {
                let Some(path) = self.state.bridge.on_sandbox_active_file(instance, &path) else {
                    return DispatchResult::unchanged();
                };
                // One-way echo: the sandbox already shows `path`, so no reseed.
                DispatchResult {
                    effects: Vec::new(),
                    state_changed: self.state.project.set_active_file(&path),
                }
            }
            Action::LocalSaveStarted => DispatchResult {
                effects: Vec::new(),
                state_changed: self.transition(SessionPhase::Persisting),
            },
            Action::LocalSaveFinished { saved } => {
                if !saved {
                    tracing::debug!("local save failed; will retry on next save");
                }
                DispatchResult {
                    effects: Vec::new(),
                    state_changed: self.transition(SessionPhase::Editing),
                }
            }
            Action::SetAutosave {
                enabled,
                interval_secs,
                now,
            } => {
                let was_enabled = self.state.autosave.enabled();
                let changed = self.state.autosave.configure(enabled, interval_secs, now);
                if !changed {
                    return DispatchResult::unchanged();
                }
                self.state.settings.autosave_enabled = self.state.autosave.enabled();
                self.state.settings.autosave_interval = self.state.autosave.interval_secs();
                let mut effects = vec![Effect::PersistSettings(self.state.settings.clone())];
                // Leaving timer mode flushes edits made since the last boundary.
                if was_enabled && !enabled && self.state.phase != SessionPhase::Uninitialized {
                    effects.push(self.save_local_effect());
                }
                DispatchResult::changed(effects)
            }
            Action::ToggleTheme => {
                let theme = self.state.settings.theme.toggled();
                self.state.settings.theme = theme;
                let mut effects = vec![Effect::PersistSettings(self.state.settings.clone())];
                if let Some((instance, stylesheet)) = self.state.bridge.set_theme(theme) {
                    effects.push(Effect::RestyleSandbox {
                        instance,
                        stylesheet,
                    });
                }
                DispatchResult::changed(effects)
            }
            Action::SetSplitPercent { percent } => {
                if !self.state.layout.set_split_percent(percent) {
                    return DispatchResult::unchanged();
                }
                DispatchResult::changed(vec![Effect::PersistEditorWidth(
                    self.state.layout.split_percent(),
                )])
            }
            Action::ResetLayout => {
                if !self.state.layout.reset() {
                    return DispatchResult::unchanged();
                }
                DispatchResult::changed(vec![Effect::PersistEditorWidth(
                    self.state.layout.split_percent(),
                )])
            }
            Action::CreateFile { .. }
            | Action::DeleteFile { .. }
            | Action::SelectFile { .. }
            | Action::ReplaceFiles { .. }
            | Action::NewProject { .. } => self.reduce_explorer_action(action),
            Action::SaveProject
            | Action::LoadProject { .. }
            | Action::RemoteSaveFinished { .. }
            | Action::RemoteLoadFinished { .. } => self.reduce_remote_action(action),
            Action::Login { .. }
            | Action::Register { .. }
            | Action::RestoreSession { .. }
            | Action::AuthFinished { .. }
            | Action::TokenValidated { .. }
            | Action::Logout => self.reduce_auth_action(action),
        }
    }

    fn mount(&mut self, now: std::time::Instant) -> DispatchResult {
        if self.state.phase != SessionPhase::Uninitialized {
            return DispatchResult::unchanged();
        }
        self.transition(SessionPhase::Loaded);

        let mut effects = vec![Effect::PersistActiveProject(self.state.project.id().clone())];
        effects.push(self.reseed(ReseedReason::Mount));
        self.state.autosave.start(now);

        self.transition(SessionPhase::Editing);
        DispatchResult::changed(effects)
    }

    fn unmount(&mut self) -> DispatchResult {
        if self.state.phase == SessionPhase::Uninitialized {
            return DispatchResult::unchanged();
        }
        self.state.bridge.teardown();
        self.state.autosave.teardown();
        self.transition(SessionPhase::Uninitialized);
        DispatchResult::changed(Vec::new())
    }

    fn tick(&mut self, now: std::time::Instant) -> DispatchResult {
        if self.state.phase == SessionPhase::Uninitialized {
            return DispatchResult::unchanged();
        }

        let mut effects = Vec::new();
        let mut state_changed = false;

        if let Some(update) = self.state.bridge.poll(now) {
            // The bridge already dropped edits of torn-down instances; this guards
            // against an update surviving a reseed inside the same tick.
            if self.state.bridge.live_instance() == Some(update.instance)
                && self.state.project.set_files(update.files)
            {
                state_changed = true;
                if self.state.autosave.on_content_changed() {
                    effects.push(self.save_local_effect());
                }
            }
        }

        if self.state.autosave.poll(now) {
            effects.push(self.save_local_effect());
        }

        DispatchResult {
            effects,
            state_changed,
        }
    }

    pub(super) fn transition(&mut self, next: SessionPhase) -> bool {
        let prev = self.state.phase;
        if prev == next {
            return false;
        }
        if !prev.can_transition_to(next) {
            tracing::debug!(?prev, ?next, "ignoring session phase transition");
            return false;
        }
        self.state.phase = next;
        true
    }

    pub(super) fn save_local_effect(&self) -> Effect {
        Effect::SaveLocal {
            project_id: self.state.project.id().clone(),
            files: self.state.project.files().clone(),
        }
    }

    /// Identity-level change: rebuild the sandbox from the current files.
    pub(super) fn reseed(&mut self, reason: ReseedReason) -> Effect {
        if reason != ReseedReason::Mount {
            self.state.project.bump_identity();
        }
        let snapshot = self.state.bridge.reseed(
            reason,
            self.state.project.files(),
            self.state.project.active_file(),
        );
        Effect::ReseedSandbox(snapshot)
    }

    pub(super) fn notify(effects: &mut Vec<Effect>, notice: Notice) {
        effects.push(Effect::Notify(notice));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
