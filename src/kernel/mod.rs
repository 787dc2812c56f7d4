//! Headless application core (state/action/effect).

pub mod action;
pub mod auth;
pub mod autosave;
pub mod bridge;
pub mod effect;
pub mod error;
pub mod explorer;
pub mod preview_theme;
pub mod project;
pub mod services;
pub mod state;
pub mod store;

pub use action::Action;
pub use autosave::{AutosaveMode, AutosaveScheduler};
pub use bridge::{ReseedReason, SandboxBridge, SandboxInstance, SandboxSnapshot, UpstreamUpdate};
pub use effect::Effect;
pub use error::{AuthError, PersistenceError, RemoteError, ValidationError};
pub use project::{Files, ProjectId, ProjectStore};
pub use state::{AppState, AuthState, EditorLayout, Notice, NoticeLevel, SessionPhase};
pub use store::{DispatchResult, Store};
