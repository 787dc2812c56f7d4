//! Backend URL resolution.
//!
//! Precedence: explicit flag, then `CIPHERSTUDIO_BACKEND_URL`, then the stored
//! `cipherstudio:backend` value, then the local development default.

use crate::kernel::services::ports::RequestContext;

pub const BACKEND_URL_ENV: &str = "CIPHERSTUDIO_BACKEND_URL";
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:4000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendSource {
    Flag,
    Env,
    Stored,
    Default,
    /// Set during the session.
    User,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    base_url: String,
    source: BackendSource,
}

fn clean(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| v.trim_end_matches('/').to_string())
}

impl BackendConfig {
    pub fn resolve(flag: Option<&str>, env: Option<&str>, stored: Option<&str>) -> Self {
        let candidates = [
            (flag, BackendSource::Flag),
            (env, BackendSource::Env),
            (stored, BackendSource::Stored),
        ];
        for (value, source) in candidates {
            if let Some(base_url) = clean(value) {
                return Self { base_url, source };
            }
        }
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            source: BackendSource::Default,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn source(&self) -> BackendSource {
        self.source
    }

    /// An empty value clears the URL; remote calls then report a missing backend.
    pub fn set_base_url(&mut self, url: &str) {
        self.base_url = clean(Some(url)).unwrap_or_default();
        self.source = BackendSource::User;
    }

    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty()
    }

    pub fn context(&self, token: Option<String>) -> RequestContext {
        RequestContext::new(self.base_url.clone()).with_token(token)
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/config.rs"]
mod tests;
