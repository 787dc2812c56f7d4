//! Remote backend contract: project save/load and auth endpoints.

use serde::{Deserialize, Serialize};

use super::runtime::BoxFuture;
use crate::kernel::error::{AuthError, RemoteError};
use crate::kernel::project::Files;

/// Per-call connection settings. Passed explicitly, never stored globally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub base_url: String,
    pub token: Option<String>,
}

impl RequestContext {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteSaveRequest {
    pub project_id: String,
    pub files: Files,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteProject {
    #[serde(default)]
    pub project_id: Option<String>,
    pub files: Files,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    Login {
        email: String,
        password: String,
    },
    Register {
        email: String,
        password: String,
        name: String,
    },
}

impl Credentials {
    /// Shown when the server gives no message of its own.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Credentials::Login { .. } => "Login failed",
            Credentials::Register { .. } => "Registration failed",
        }
    }
}

pub trait RemoteBackend: Send + Sync {
    fn save_project(
        &self,
        ctx: RequestContext,
        request: RemoteSaveRequest,
    ) -> BoxFuture<Result<(), RemoteError>>;

    /// A response without `files` resolves to `RemoteError::NotFound`.
    fn load_project(
        &self,
        ctx: RequestContext,
        project_id: String,
    ) -> BoxFuture<Result<RemoteProject, RemoteError>>;

    fn authenticate(
        &self,
        ctx: RequestContext,
        credentials: Credentials,
    ) -> BoxFuture<Result<AuthSession, AuthError>>;

    fn validate_token(&self, ctx: RequestContext) -> BoxFuture<Result<User, AuthError>>;
}
