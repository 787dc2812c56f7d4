use crate::kernel::error::{AuthError, RemoteError};
use crate::kernel::project::ProjectId;
use crate::kernel::services::ports::{AuthSession, RemoteProject, User};

/// Completion of a background task, drained by the workbench on tick.
#[derive(Debug)]
pub enum AppMessage {
    RemoteSaved {
        project_id: ProjectId,
        result: Result<(), RemoteError>,
    },
    RemoteLoaded {
        requested: String,
        result: Result<RemoteProject, RemoteError>,
    },
    AuthFinished {
        result: Result<AuthSession, String>,
    },
    TokenValidated {
        result: Result<User, AuthError>,
    },
}
