//! Workbench: owns the store and every adapter, and drives them from one loop.
//!
//! Nothing here decides sync policy. User and sandbox events become
//! `Action`s, the store answers with `Effect`s, and the workbench executes
//! those against storage, the async runtime and the sandbox host.

use crate::kernel::error::ValidationError;
use crate::kernel::project::starter_files;
use crate::kernel::services::adapters::{
    ensure_storage_dir, AppMessage, AsyncRuntime, BackendConfig, FileStorage, HttpBackend,
    PersistenceAdapter,
};
use crate::kernel::services::ports::{KeyValueStore, RemoteBackend, SandboxHost};
use crate::kernel::{
    Action, AppState, Files, Notice, ProjectId, ProjectStore, SandboxInstance, SessionPhase,
    Store,
};
use std::collections::VecDeque;
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::Instant;

mod effects;
mod tick;

const NOTICE_CAP: usize = 64;

/// Startup overrides, highest precedence first.
#[derive(Debug, Clone, Default)]
pub struct MountOptions {
    /// `--backend` flag.
    pub backend_url: Option<String>,
    /// `CIPHERSTUDIO_BACKEND_URL`, when the caller chose to read it.
    pub backend_env: Option<String>,
    /// `--project` flag; otherwise the stored active project is restored.
    pub project_id: Option<String>,
}

impl MountOptions {
    pub fn with_env(mut self) -> Self {
        self.backend_env = std::env::var(crate::kernel::services::adapters::BACKEND_URL_ENV).ok();
        self
    }
}

pub struct Workbench {
    store: Store,
    persistence: PersistenceAdapter,
    sandbox: Box<dyn SandboxHost>,
    runtime: AsyncRuntime,
    rx: Receiver<AppMessage>,
    backend: BackendConfig,
    token: Option<String>,
    notices: VecDeque<Notice>,
}

impl Workbench {
    /// Mount on the platform storage directory with the HTTP backend.
    ///
    /// Fails when no storage directory can be resolved or created.
    pub fn open(
        options: MountOptions,
        sandbox: Box<dyn SandboxHost>,
        now: Instant,
    ) -> std::io::Result<Self> {
        let dir = ensure_storage_dir()?;
        let storage = FileStorage::open(dir)?;
        Self::mount(
            Box::new(storage),
            Arc::new(HttpBackend::new()),
            sandbox,
            options,
            now,
        )
    }

    /// Fails when `options.project_id` names a session key.
    pub fn mount(
        storage: Box<dyn KeyValueStore>,
        remote: Arc<dyn RemoteBackend>,
        sandbox: Box<dyn SandboxHost>,
        options: MountOptions,
        now: Instant,
    ) -> std::io::Result<Self> {
        let persistence = PersistenceAdapter::new(storage, remote);

        let requested = match options.project_id.as_deref().map(ProjectId::parse) {
            Some(Ok(id)) => Some(id),
            Some(Err(ValidationError::EmptyProjectId)) | None => None,
            Some(Err(err)) => {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    err.to_string(),
                ));
            }
        };
        let project_id = requested
            .or_else(|| persistence.active_project_id())
            .unwrap_or_else(ProjectId::generate);
        let files = persistence
            .load_local(&project_id)
            .unwrap_or_else(starter_files);
        let settings = persistence.settings();
        let layout = persistence.editor_layout();
        let stored_backend = persistence.backend_url();
        let backend = BackendConfig::resolve(
            options.backend_url.as_deref(),
            options.backend_env.as_deref(),
            stored_backend.as_deref(),
        );
        let token = persistence.token();

        let (tx, rx) = std::sync::mpsc::channel();
        let runtime = AsyncRuntime::new(tx)?;

        tracing::info!(
            project = %project_id,
            files = files.len(),
            backend = backend.base_url(),
            autosave = settings.autosave_enabled,
            "mounting workbench"
        );

        let state = AppState::new(ProjectStore::new(project_id, files), settings, layout);
        let mut workbench = Self {
            store: Store::new(state),
            persistence,
            sandbox,
            runtime,
            rx,
            backend,
            token: token.clone(),
            notices: VecDeque::new(),
        };

        workbench.dispatch(Action::Mount { now });
        if let Some(token) = token {
            workbench.dispatch(Action::RestoreSession { token });
        }
        Ok(workbench)
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    pub fn project_id(&self) -> &ProjectId {
        self.store.state().project.id()
    }

    pub fn files(&self) -> &Files {
        self.store.state().project.files()
    }

    pub fn active_file(&self) -> &str {
        self.store.state().project.active_file()
    }

    pub fn phase(&self) -> SessionPhase {
        self.store.state().phase
    }

    pub fn backend(&self) -> &BackendConfig {
        &self.backend
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    // sandbox -> host

    pub fn sandbox_edited(&mut self, instance: SandboxInstance, files: Files, now: Instant) {
        self.dispatch(Action::SandboxEdited {
            instance,
            files,
            now,
        });
    }

    pub fn sandbox_active_file_changed(&mut self, instance: SandboxInstance, path: &str) -> bool {
        self.dispatch(Action::SandboxActiveFileChanged {
            instance,
            path: path.to_string(),
        })
    }

    // explorer

    pub fn create_file(&mut self, name: &str) -> bool {
        self.dispatch(Action::CreateFile {
            name: name.to_string(),
        })
    }

    /// Deletion only proceeds once the user confirmed it.
    pub fn delete_file(&mut self, path: &str, confirmed: bool) -> bool {
        self.dispatch(Action::DeleteFile {
            path: path.to_string(),
            confirmed,
        })
    }

    pub fn select_file(&mut self, path: &str) -> bool {
        self.dispatch(Action::SelectFile {
            path: path.to_string(),
        })
    }

    pub fn replace_files(&mut self, files: Files) -> bool {
        self.dispatch(Action::ReplaceFiles { files })
    }

    pub fn new_project(&mut self) -> bool {
        self.dispatch(Action::NewProject {
            project_id: ProjectId::generate(),
        })
    }

    // persistence

    pub fn save_project(&mut self) -> bool {
        self.dispatch(Action::SaveProject)
    }

    pub fn load_project(&mut self, project_id: &str) -> bool {
        self.dispatch(Action::LoadProject {
            project_id: project_id.to_string(),
        })
    }

    /// Write the current files locally regardless of the autosave mode.
    pub fn flush_local(&mut self) -> bool {
        let state = self.store.state();
        let project_id = state.project.id().clone();
        let files = state.project.files().clone();
        self.save_local(&project_id, &files)
    }

    pub fn set_backend_url(&mut self, url: &str) {
        self.backend.set_base_url(url);
        let stored = self.backend.base_url().to_string();
        self.persistence.store_backend_url(&stored);
    }

    // settings / layout

    pub fn set_autosave(&mut self, enabled: bool, interval_secs: u64, now: Instant) -> bool {
        self.dispatch(Action::SetAutosave {
            enabled,
            interval_secs,
            now,
        })
    }

    pub fn toggle_theme(&mut self) -> bool {
        self.dispatch(Action::ToggleTheme)
    }

    pub fn set_split_percent(&mut self, percent: f64) -> bool {
        self.dispatch(Action::SetSplitPercent { percent })
    }

    pub fn reset_layout(&mut self) -> bool {
        self.dispatch(Action::ResetLayout)
    }

    // auth

    pub fn login(&mut self, email: &str, password: &str) -> bool {
        self.dispatch(Action::Login {
            email: email.to_string(),
            password: password.to_string(),
        })
    }

    pub fn register(
        &mut self,
        email: &str,
        password: &str,
        confirm_password: &str,
        name: &str,
    ) -> bool {
        self.dispatch(Action::Register {
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm_password.to_string(),
            name: name.to_string(),
        })
    }

    pub fn logout(&mut self) -> bool {
        self.dispatch(Action::Logout)
    }

    /// Cancel timers and release the sandbox. Nothing is written afterwards.
    pub fn shutdown(&mut self) {
        if self.store.state().phase != SessionPhase::Uninitialized {
            self.dispatch(Action::Unmount);
            tracing::info!(project = %self.project_id(), "workbench unmounted");
        }
    }

    fn push_notice(&mut self, notice: Notice) {
        tracing::info!(level = ?notice.level, text = %notice.text, "notice");
        self.notices.push_back(notice);
        while self.notices.len() > NOTICE_CAP {
            self.notices.pop_front();
        }
    }
}

impl Drop for Workbench {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/app/workbench.rs"]
mod tests;
