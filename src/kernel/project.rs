//! Project store: the single in-memory source of truth for `path -> content`.
//!
//! Every mutation replaces the whole file map. `revision` counts replacements,
//! `identity` counts identity-level changes (load, host-side file switch,
//! structural create/delete) that require the sandbox to be reseeded.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ValidationError;
use super::preview_theme::STYLESHEET_PATH;
use super::services::ports::storage::is_reserved_key_name;

pub type Files = IndexMap<String, String>;

pub const DEFAULT_ACTIVE_FILE: &str = "App.jsx";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Trimmed, user-supplied id. Ids that would land on a session key are refused.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let id = raw.trim();
        if id.is_empty() {
            return Err(ValidationError::EmptyProjectId);
        }
        if is_reserved_key_name(id) {
            return Err(ValidationError::ReservedProjectId(id.to_string()));
        }
        Ok(Self(id.to_string()))
    }

    /// 8 hex chars: the first group of a v4 UUID.
    pub fn generate() -> Self {
        let uuid = uuid::Uuid::new_v4().to_string();
        let head = uuid.split('-').next().unwrap_or(uuid.as_str());
        Self(head.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn starter_files() -> Files {
    let mut files = Files::new();
    files.insert(
        "index.js".to_string(),
        "import React from \"react\";\n\
         import { createRoot } from \"react-dom/client\";\n\
         import App from \"./App\";\n\
         createRoot(document.getElementById(\"root\")).render(<App />);"
            .to_string(),
    );
    files.insert(
        "App.jsx".to_string(),
        "import React from \"react\";\n\
         export default function App(){ return <div style={{padding:20}}>Hello from CipherStudio</div> }"
            .to_string(),
    );
    files.insert(
        "package.json".to_string(),
        r#"{"name":"cipherstudio","version":"1.0.0","dependencies":{"react":"^18.2.0","react-dom":"^18.2.0"}}"#
            .to_string(),
    );
    files
}

#[derive(Debug, Clone)]
pub struct ProjectStore {
    id: ProjectId,
    files: Files,
    active_file: String,
    revision: u64,
    identity: u64,
}

impl ProjectStore {
    pub fn new(id: ProjectId, files: Files) -> Self {
        let files = release_reserved_path(files);
        let active_file = initial_active_file(&files);
        Self {
            id,
            files,
            active_file,
            revision: 0,
            identity: 0,
        }
    }

    pub fn id(&self) -> &ProjectId {
        &self.id
    }

    pub fn files(&self) -> &Files {
        &self.files
    }

    pub fn active_file(&self) -> &str {
        &self.active_file
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn identity(&self) -> u64 {
        self.identity
    }

    /// Full, atomic replace. Returns `false` when `next` equals the current map.
    ///
    /// The active file is repaired if it no longer names a key.
    pub fn set_files(&mut self, next: Files) -> bool {
        let next = release_reserved_path(next);
        if next == self.files {
            return false;
        }
        self.files = next;
        self.revision += 1;
        if !self.active_file_is_valid() {
            self.active_file = self.files.keys().next().cloned().unwrap_or_default();
        }
        true
    }

    /// No-op unless `path` is a current key; the empty string is always accepted.
    pub fn set_active_file(&mut self, path: &str) -> bool {
        if !path.is_empty() && !self.files.contains_key(path) {
            return false;
        }
        if self.active_file == path {
            return false;
        }
        self.active_file = path.to_string();
        true
    }

    /// Swap in a different project wholesale (remote load, new project).
    ///
    /// The caller reseeds the sandbox, which bumps `identity`.
    pub fn replace_project(&mut self, id: ProjectId, files: Files) {
        let files = release_reserved_path(files);
        self.active_file = if files.contains_key(&self.active_file) {
            self.active_file.clone()
        } else {
            initial_active_file(&files)
        };
        self.id = id;
        self.files = files;
        self.revision += 1;
    }

    pub fn bump_identity(&mut self) -> u64 {
        self.identity += 1;
        self.identity
    }

    fn active_file_is_valid(&self) -> bool {
        if self.active_file.is_empty() {
            self.files.is_empty()
        } else {
            self.files.contains_key(&self.active_file)
        }
    }
}

/// Moves a user file sitting on the generated stylesheet path to a free
/// `user-theme*.css` key at the same position.
pub fn release_reserved_path(mut files: Files) -> Files {
    let Some((index, _, content)) = files.shift_remove_full(STYLESHEET_PATH) else {
        return files;
    };
    let mut name = "user-theme.css".to_string();
    let mut n = 2;
    while files.contains_key(&name) {
        name = format!("user-theme-{n}.css");
        n += 1;
    }
    tracing::info!(path = %name, "renamed file on reserved stylesheet path");
    files.shift_insert(index, name, content);
    files
}

fn initial_active_file(files: &Files) -> String {
    if files.contains_key(DEFAULT_ACTIVE_FILE) {
        return DEFAULT_ACTIVE_FILE.to_string();
    }
    files.keys().next().cloned().unwrap_or_default()
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/project.rs"]
mod tests;
