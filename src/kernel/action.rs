use std::time::Instant;

use super::bridge::SandboxInstance;
use super::error::{AuthError, RemoteError};
use super::project::{Files, ProjectId};
use crate::kernel::services::ports::{AuthSession, RemoteProject, User};

#[derive(Debug)]
pub enum Action {
    Mount {
        now: Instant,
    },
    Unmount,
    Tick {
        now: Instant,
    },

    // sandbox -> host
    SandboxEdited {
        instance: SandboxInstance,
        files: Files,
        now: Instant,
    },
    SandboxActiveFileChanged {
        instance: SandboxInstance,
        path: String,
    },

    // explorer
    CreateFile {
        name: String,
    },
    DeleteFile {
        path: String,
        confirmed: bool,
    },
    SelectFile {
        path: String,
    },
    ReplaceFiles {
        files: Files,
    },
    NewProject {
        project_id: ProjectId,
    },

    // persistence
    LocalSaveStarted,
    LocalSaveFinished {
        saved: bool,
    },
    SaveProject,
    LoadProject {
        project_id: String,
    },
    RemoteSaveFinished {
        project_id: ProjectId,
        result: Result<(), RemoteError>,
    },
    RemoteLoadFinished {
        requested: String,
        result: Result<RemoteProject, RemoteError>,
    },

    // settings / layout
    SetAutosave {
        enabled: bool,
        interval_secs: u64,
        now: Instant,
    },
    ToggleTheme,
    SetSplitPercent {
        percent: f64,
    },
    ResetLayout,

    // auth
    Login {
        email: String,
        password: String,
    },
    Register {
        email: String,
        password: String,
        confirm_password: String,
        name: String,
    },
    RestoreSession {
        token: String,
    },
    AuthFinished {
        result: Result<AuthSession, String>,
    },
    TokenValidated {
        result: Result<User, AuthError>,
    },
    Logout,
}
