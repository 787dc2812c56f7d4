//! Headless sandbox host: keeps the last snapshot it was seeded with.
//!
//! Stands in for an embedded preview when none is attached (CLI, tests).
//! Edits made "inside" it go back through the workbench like real ones.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::kernel::bridge::{SandboxInstance, SandboxSnapshot};
use crate::kernel::preview_theme::STYLESHEET_PATH;
use crate::kernel::services::ports::SandboxHost;

#[derive(Default)]
struct HeadlessInner {
    current: Option<SandboxSnapshot>,
    reseeds: usize,
    restyles: usize,
}

/// Cloning shares the same sandbox.
#[derive(Clone, Default)]
pub struct HeadlessSandbox {
    inner: Arc<Mutex<HeadlessInner>>,
}

impl HeadlessSandbox {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Option<MutexGuard<'_, HeadlessInner>> {
        self.inner.lock().ok()
    }

    pub fn snapshot(&self) -> Option<SandboxSnapshot> {
        self.lock().and_then(|inner| inner.current.clone())
    }

    pub fn instance(&self) -> Option<SandboxInstance> {
        self.lock()
            .and_then(|inner| inner.current.as_ref().map(|s| s.instance))
    }

    pub fn reseed_count(&self) -> usize {
        self.lock().map(|inner| inner.reseeds).unwrap_or(0)
    }

    pub fn restyle_count(&self) -> usize {
        self.lock().map(|inner| inner.restyles).unwrap_or(0)
    }
}

impl SandboxHost for HeadlessSandbox {
    fn reseed(&mut self, snapshot: SandboxSnapshot) {
        if let Some(mut inner) = self.lock() {
            tracing::debug!(instance = snapshot.instance.get(), "headless sandbox seeded");
            inner.current = Some(snapshot);
            inner.reseeds += 1;
        }
    }

    fn restyle(&mut self, instance: SandboxInstance, stylesheet: &str) {
        let Some(mut inner) = self.lock() else {
            return;
        };
        let Some(current) = inner.current.as_mut() else {
            return;
        };
        if current.instance != instance {
            return;
        }
        current.stylesheet = stylesheet.to_string();
        current
            .files
            .insert(STYLESHEET_PATH.to_string(), stylesheet.to_string());
        inner.restyles += 1;
    }
}
