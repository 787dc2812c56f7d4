use super::bridge::{SandboxInstance, SandboxSnapshot};
use super::project::{Files, ProjectId};
use super::state::Notice;
use crate::kernel::services::ports::{Credentials, RemoteSaveRequest, Settings};

#[derive(Debug, Clone)]
pub enum Effect {
    SaveLocal {
        project_id: ProjectId,
        files: Files,
    },
    PersistActiveProject(ProjectId),
    PersistSettings(Settings),
    PersistEditorWidth(u8),
    SaveRemote(RemoteSaveRequest),
    LoadRemote {
        project_id: String,
    },
    ReseedSandbox(SandboxSnapshot),
    RestyleSandbox {
        instance: SandboxInstance,
        stylesheet: String,
    },
    Notify(Notice),
    Authenticate(Credentials),
    ValidateToken {
        token: String,
    },
    StoreToken(String),
    ClearToken,
}
