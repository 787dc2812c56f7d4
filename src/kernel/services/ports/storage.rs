//! Keyed local storage contract (one string value per key).

use std::io;

pub const KEY_PREFIX: &str = "cipherstudio:";
pub const ACTIVE_PROJECT_KEY: &str = "cipherstudio:activeProjectId";
pub const BACKEND_KEY: &str = "cipherstudio:backend";
pub const EDITOR_WIDTH_KEY: &str = "cipherstudio:editorWidth";
pub const SETTINGS_KEY: &str = "cipherstudio:settings";
pub const THEME_KEY: &str = "cipherstudio:theme";
pub const TOKEN_KEY: &str = "cipherstudio:token";

/// Names under `KEY_PREFIX` that hold session data, never a project record.
pub const RESERVED_KEY_NAMES: &[&str] = &[
    "activeProjectId",
    "backend",
    "editorWidth",
    "settings",
    "theme",
    "token",
];

pub fn is_reserved_key_name(name: &str) -> bool {
    RESERVED_KEY_NAMES.contains(&name)
}

pub fn project_key(project_id: &str) -> String {
    format!("{KEY_PREFIX}{project_id}")
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> io::Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;
    fn remove(&mut self, key: &str) -> io::Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        (**self).remove(key)
    }
}
