//! HTTP implementation of `RemoteBackend`.
//!
//! - POST `/api/projects/save` with `{ projectId, files, title }`
//! - GET  `/api/projects/load/<id>` returning `{ projectId?, files }`
//! - POST `/api/auth/login`, `/api/auth/register` returning `{ token, user }`
//! - GET  `/api/auth/validate` with a bearer token, returning `{ user }`

use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use serde_json::json;

use crate::kernel::error::{AuthError, RemoteError};
use crate::kernel::services::ports::{
    AuthSession, BoxFuture, Credentials, RemoteBackend, RemoteProject, RemoteSaveRequest,
    RequestContext, User,
};

#[derive(Clone, Default)]
pub struct HttpBackend {
    http: Client,
}

#[derive(Deserialize)]
struct LoadResponse {
    #[serde(default, rename = "projectId")]
    project_id: Option<String>,
    #[serde(default)]
    files: Option<crate::kernel::project::Files>,
}

#[derive(Deserialize)]
struct ValidateResponse {
    user: User,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl HttpBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

fn authorize(builder: RequestBuilder, ctx: &RequestContext) -> RequestBuilder {
    match ctx.token.as_deref() {
        Some(token) => builder.bearer_auth(token),
        None => builder,
    }
}

fn require_base(ctx: &RequestContext) -> Result<(), RemoteError> {
    if ctx.base_url.trim().is_empty() {
        return Err(RemoteError::MissingBackend);
    }
    Ok(())
}

fn load_url(ctx: &RequestContext, project_id: &str) -> Result<Url, RemoteError> {
    let mut url = Url::parse(&ctx.url("/api/projects/load"))
        .map_err(|e| RemoteError::Transport(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| RemoteError::Transport(format!("invalid backend url: {}", ctx.base_url)))?
        .push(project_id);
    Ok(url)
}

fn check_status(response: Response) -> Result<Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(RemoteError::Status(status.as_u16()))
    }
}

/// Server-provided `message`, if the error body carries one.
async fn error_message(response: Response) -> Option<String> {
    let body = response.json::<ErrorBody>().await.ok()?;
    body.message.filter(|m| !m.trim().is_empty())
}

impl RemoteBackend for HttpBackend {
    fn save_project(
        &self,
        ctx: RequestContext,
        request: RemoteSaveRequest,
    ) -> BoxFuture<Result<(), RemoteError>> {
        let http = self.http.clone();
        Box::pin(async move {
            require_base(&ctx)?;
            let builder = http.post(ctx.url("/api/projects/save")).json(&request);
            let response = authorize(builder, &ctx).send().await?;
            check_status(response)?;
            Ok(())
        })
    }

    fn load_project(
        &self,
        ctx: RequestContext,
        project_id: String,
    ) -> BoxFuture<Result<RemoteProject, RemoteError>> {
        let http = self.http.clone();
        Box::pin(async move {
            require_base(&ctx)?;
            let url = load_url(&ctx, &project_id)?;
            let response = authorize(http.get(url), &ctx).send().await?;
            if response.status() == StatusCode::NOT_FOUND {
                return Err(RemoteError::NotFound(project_id));
            }
            let body: LoadResponse = check_status(response)?.json().await?;
            match body.files {
                Some(files) => Ok(RemoteProject {
                    project_id: body.project_id,
                    files,
                }),
                None => Err(RemoteError::NotFound(project_id)),
            }
        })
    }

    fn authenticate(
        &self,
        ctx: RequestContext,
        credentials: Credentials,
    ) -> BoxFuture<Result<AuthSession, AuthError>> {
        let http = self.http.clone();
        Box::pin(async move {
            require_base(&ctx)?;
            let (path, body) = match &credentials {
                Credentials::Login { email, password } => (
                    "/api/auth/login",
                    json!({ "email": email, "password": password }),
                ),
                Credentials::Register {
                    email,
                    password,
                    name,
                } => (
                    "/api/auth/register",
                    json!({ "email": email, "password": password, "name": name }),
                ),
            };
            let response = http
                .post(ctx.url(path))
                .json(&body)
                .send()
                .await
                .map_err(RemoteError::from)?;
            if !response.status().is_success() {
                let message = error_message(response)
                    .await
                    .unwrap_or_else(|| credentials.failure_message().to_string());
                return Err(AuthError::Rejected(message));
            }
            let session: AuthSession = response.json().await.map_err(RemoteError::from)?;
            Ok(session)
        })
    }

    fn validate_token(&self, ctx: RequestContext) -> BoxFuture<Result<User, AuthError>> {
        let http = self.http.clone();
        Box::pin(async move {
            require_base(&ctx)?;
            if ctx.token.is_none() {
                return Err(AuthError::InvalidToken);
            }
            let builder = http.get(ctx.url("/api/auth/validate"));
            let response = authorize(builder, &ctx)
                .send()
                .await
                .map_err(RemoteError::from)?;
            match response.status() {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AuthError::InvalidToken),
                status if !status.is_success() => {
                    Err(RemoteError::Status(status.as_u16()).into())
                }
                _ => {
                    let body: ValidateResponse =
                        response.json().await.map_err(RemoteError::from)?;
                    Ok(body.user)
                }
            }
        })
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/http.rs"]
mod tests;
