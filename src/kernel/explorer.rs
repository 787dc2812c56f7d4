//! File explorer controller: structural create/delete/select against the project store.

use super::error::ValidationError;
use super::preview_theme::STYLESHEET_PATH;
use super::project::{Files, ProjectStore};

pub const DEFAULT_EXTENSION: &str = ".js";

const RECOGNIZED_EXTENSIONS: &[&str] = &[
    ".js", ".jsx", ".ts", ".tsx", ".mjs", ".css", ".json", ".md", ".html",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Script,
    Style,
    Data,
    Doc,
    Other,
}

impl FileKind {
    pub fn of(path: &str) -> Self {
        let lower = path.to_ascii_lowercase();
        if [".js", ".jsx", ".ts", ".tsx", ".mjs"]
            .iter()
            .any(|ext| lower.ends_with(ext))
        {
            FileKind::Script
        } else if lower.ends_with(".css") {
            FileKind::Style
        } else if lower.ends_with(".json") {
            FileKind::Data
        } else if lower.ends_with(".md") {
            FileKind::Doc
        } else {
            FileKind::Other
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FileKind::Script => "script",
            FileKind::Style => "style",
            FileKind::Data => "data",
            FileKind::Doc => "doc",
            FileKind::Other => "other",
        }
    }
}

pub fn normalize_file_name(name: &str) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyFileName);
    }
    if has_recognized_extension(name) {
        Ok(name.to_string())
    } else {
        Ok(format!("{name}{DEFAULT_EXTENSION}"))
    }
}

fn has_recognized_extension(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    RECOGNIZED_EXTENSIONS
        .iter()
        .any(|ext| lower.len() > ext.len() && lower.ends_with(ext))
}

pub fn default_body(path: &str) -> &'static str {
    match FileKind::of(path) {
        FileKind::Data => "{}",
        FileKind::Style => "/* Add your styles here */",
        _ => "// Write your code here",
    }
}

/// Inserts a new file and makes it active. Returns the normalized key.
///
/// On error the store is untouched.
pub fn create_file(store: &mut ProjectStore, name: &str) -> Result<String, ValidationError> {
    let path = normalize_file_name(name)?;
    if path == STYLESHEET_PATH {
        return Err(ValidationError::ReservedName(path));
    }
    if store.files().contains_key(&path) {
        return Err(ValidationError::DuplicateFile(path));
    }

    let mut next: Files = store.files().clone();
    next.insert(path.clone(), default_body(&path).to_string());
    store.set_files(next);
    store.set_active_file(&path);
    Ok(path)
}

/// Removes `path`. If it was active, the first remaining key (or empty) becomes active.
///
/// Returns `false` when `path` does not exist.
pub fn delete_file(store: &mut ProjectStore, path: &str) -> bool {
    if !store.files().contains_key(path) {
        return false;
    }

    // set_files repairs a dangling active file to the first remaining key.
    let mut next: Files = store.files().clone();
    next.shift_remove(path);
    store.set_files(next);
    true
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/explorer.rs"]
mod tests;
