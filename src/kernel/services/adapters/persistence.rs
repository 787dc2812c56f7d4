//! Persistence adapter: local key-value snapshots plus the remote project API.
//!
//! Local saves never fail loudly. Storage errors are logged and reported as a
//! `LocalSaveOutcome` so the session keeps running; remote calls hand back
//! owned futures for the async runtime to drive.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::kernel::error::{PersistenceError, RemoteError};
use crate::kernel::project::{Files, ProjectId};
use crate::kernel::services::ports::storage::{
    is_reserved_key_name, project_key, ACTIVE_PROJECT_KEY, BACKEND_KEY, EDITOR_WIDTH_KEY,
    SETTINGS_KEY, THEME_KEY, TOKEN_KEY,
};
use crate::kernel::services::ports::{
    BoxFuture, KeyValueStore, RemoteBackend, RemoteProject, RemoteSaveRequest, RequestContext,
    Settings, Theme,
};
use crate::kernel::state::EditorLayout;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalSaveOutcome {
    Saved { bytes: usize },
    Failed { reason: String },
}

impl LocalSaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, LocalSaveOutcome::Saved { .. })
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedRecord {
    project_id: String,
    files: Files,
    saved_at: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredProject {
    Record(PersistedRecord),
    Bare(Files),
}

pub struct PersistenceAdapter {
    storage: Box<dyn KeyValueStore>,
    remote: Arc<dyn RemoteBackend>,
}

impl PersistenceAdapter {
    pub fn new(storage: Box<dyn KeyValueStore>, remote: Arc<dyn RemoteBackend>) -> Self {
        Self { storage, remote }
    }

    pub fn remote(&self) -> &Arc<dyn RemoteBackend> {
        &self.remote
    }

    pub fn save_local(&mut self, project_id: &ProjectId, files: &Files) -> LocalSaveOutcome {
        match self.try_save_local(project_id, files) {
            Ok(bytes) => {
                tracing::debug!(project = %project_id, files = files.len(), bytes, "saved locally");
                LocalSaveOutcome::Saved { bytes }
            }
            Err(e) => {
                tracing::warn!(project = %project_id, error = %e, "local save failed");
                LocalSaveOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    fn try_save_local(
        &mut self,
        project_id: &ProjectId,
        files: &Files,
    ) -> Result<usize, PersistenceError> {
        if is_reserved_key_name(project_id.as_str()) {
            return Err(PersistenceError::ReservedKey(project_id.as_str().to_string()));
        }
        let record = PersistedRecord {
            project_id: project_id.as_str().to_string(),
            files: files.clone(),
            saved_at: Utc::now(),
        };
        let body = serde_json::to_string(&record)?;
        self.storage.set(&project_key(project_id.as_str()), &body)?;
        Ok(body.len())
    }

    /// `None` when nothing is stored or the stored value does not parse.
    pub fn load_local(&self, project_id: &ProjectId) -> Option<Files> {
        if is_reserved_key_name(project_id.as_str()) {
            return None;
        }
        let raw = match self.storage.get(&project_key(project_id.as_str())) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(project = %project_id, error = %e, "local load failed");
                return None;
            }
        };
        match serde_json::from_str::<StoredProject>(&raw) {
            Ok(StoredProject::Record(record)) => Some(record.files),
            Ok(StoredProject::Bare(files)) => Some(files),
            Err(e) => {
                tracing::warn!(project = %project_id, error = %e, "stored project is malformed");
                None
            }
        }
    }

    pub fn save_remote(
        &self,
        ctx: RequestContext,
        request: RemoteSaveRequest,
    ) -> BoxFuture<Result<(), RemoteError>> {
        if ctx.base_url.trim().is_empty() {
            return Box::pin(async { Err(RemoteError::MissingBackend) });
        }
        self.remote.save_project(ctx, request)
    }

    pub fn load_remote(
        &self,
        ctx: RequestContext,
        project_id: String,
    ) -> BoxFuture<Result<RemoteProject, RemoteError>> {
        if ctx.base_url.trim().is_empty() {
            return Box::pin(async { Err(RemoteError::MissingBackend) });
        }
        self.remote.load_project(ctx, project_id)
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "storage read failed");
                None
            }
        }
    }

    fn write(&mut self, key: &str, value: &str) {
        if let Err(e) = self.storage.set(key, value) {
            tracing::warn!(key, error = %e, "storage write failed");
        }
    }

    fn erase(&mut self, key: &str) {
        if let Err(e) = self.storage.remove(key) {
            tracing::warn!(key, error = %e, "storage remove failed");
        }
    }

    pub fn active_project_id(&self) -> Option<ProjectId> {
        let raw = self.read(ACTIVE_PROJECT_KEY)?;
        ProjectId::parse(&raw)
            .inspect_err(|e| tracing::warn!(error = %e, "ignoring stored active project id"))
            .ok()
    }

    pub fn store_active_project_id(&mut self, project_id: &ProjectId) {
        self.write(ACTIVE_PROJECT_KEY, project_id.as_str());
    }

    /// Stored settings with the standalone theme key taking precedence.
    pub fn settings(&self) -> Settings {
        let mut settings = self
            .read(SETTINGS_KEY)
            .and_then(|raw| match serde_json::from_str::<Settings>(&raw) {
                Ok(settings) => Some(settings),
                Err(e) => {
                    tracing::warn!(error = %e, "stored settings are malformed");
                    None
                }
            })
            .unwrap_or_default();
        if let Some(theme) = self.read(THEME_KEY).as_deref().and_then(Theme::parse) {
            settings.theme = theme;
        }
        settings.normalized()
    }

    pub fn store_settings(&mut self, settings: &Settings) {
        match serde_json::to_string(settings) {
            Ok(body) => self.write(SETTINGS_KEY, &body),
            Err(e) => tracing::warn!(error = %e, "settings encode failed"),
        }
        self.write(THEME_KEY, settings.theme.as_str());
    }

    pub fn editor_layout(&self) -> EditorLayout {
        EditorLayout::from_stored(self.read(EDITOR_WIDTH_KEY).as_deref())
    }

    pub fn store_editor_width(&mut self, percent: u8) {
        self.write(EDITOR_WIDTH_KEY, &percent.to_string());
    }

    pub fn backend_url(&self) -> Option<String> {
        self.read(BACKEND_KEY)
    }

    pub fn store_backend_url(&mut self, url: &str) {
        self.write(BACKEND_KEY, url);
    }

    pub fn token(&self) -> Option<String> {
        self.read(TOKEN_KEY).filter(|t| !t.trim().is_empty())
    }

    pub fn store_token(&mut self, token: &str) {
        self.write(TOKEN_KEY, token);
    }

    pub fn clear_token(&mut self) {
        self.erase(TOKEN_KEY);
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/persistence.rs"]
mod tests;
