use super::Workbench;
use crate::kernel::error::AuthError;
use crate::kernel::services::adapters::AppMessage;
use crate::kernel::services::ports::Credentials;
use crate::kernel::{Action, Effect, Files, ProjectId};

impl Workbench {
    pub(super) fn dispatch(&mut self, action: Action) -> bool {
        let result = self.store.dispatch(action);
        for effect in result.effects {
            self.run_effect(effect);
        }
        result.state_changed
    }

    /// Local write bracketed by the `Persisting` phase.
    pub(super) fn save_local(&mut self, project_id: &ProjectId, files: &Files) -> bool {
        self.dispatch(Action::LocalSaveStarted);
        let saved = self.persistence.save_local(project_id, files).is_saved();
        self.dispatch(Action::LocalSaveFinished { saved });
        saved
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::SaveLocal { project_id, files } => {
                self.save_local(&project_id, &files);
            }
            Effect::PersistActiveProject(project_id) => {
                self.persistence.store_active_project_id(&project_id);
            }
            Effect::PersistSettings(settings) => {
                self.persistence.store_settings(&settings);
            }
            Effect::PersistEditorWidth(percent) => {
                self.persistence.store_editor_width(percent);
            }
            Effect::SaveRemote(request) => {
                let project_id = ProjectId::new(request.project_id.clone());
                let ctx = self.backend.context(self.token.clone());
                let task = self.persistence.save_remote(ctx, request);
                self.runtime.spawn(task, move |result| AppMessage::RemoteSaved {
                    project_id,
                    result,
                });
            }
            Effect::LoadRemote { project_id } => {
                let ctx = self.backend.context(self.token.clone());
                let task = self.persistence.load_remote(ctx, project_id.clone());
                self.runtime.spawn(task, move |result| AppMessage::RemoteLoaded {
                    requested: project_id,
                    result,
                });
            }
            Effect::ReseedSandbox(snapshot) => {
                self.sandbox.reseed(snapshot);
            }
            Effect::RestyleSandbox {
                instance,
                stylesheet,
            } => {
                self.sandbox.restyle(instance, &stylesheet);
            }
            Effect::Notify(notice) => self.push_notice(notice),
            Effect::Authenticate(credentials) => {
                let ctx = self.backend.context(None);
                let task = self
                    .persistence
                    .remote()
                    .authenticate(ctx, credentials.clone());
                self.runtime.spawn(task, move |result| AppMessage::AuthFinished {
                    result: result.map_err(|err| auth_failure_message(&credentials, err)),
                });
            }
            Effect::ValidateToken { token } => {
                let ctx = self.backend.context(Some(token));
                let task = self.persistence.remote().validate_token(ctx);
                self.runtime
                    .spawn(task, |result| AppMessage::TokenValidated { result });
            }
            Effect::StoreToken(token) => {
                self.persistence.store_token(&token);
                self.token = Some(token);
            }
            Effect::ClearToken => {
                self.persistence.clear_token();
                self.token = None;
            }
        }
    }
}

/// Server-provided text when there is one, otherwise the generic message.
fn auth_failure_message(credentials: &Credentials, err: AuthError) -> String {
    match err {
        AuthError::Rejected(message) => message,
        other => {
            tracing::warn!(error = %other, "authentication request failed");
            credentials.failure_message().to_string()
        }
    }
}
