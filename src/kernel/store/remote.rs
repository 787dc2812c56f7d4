use crate::kernel::bridge::ReseedReason;
use crate::kernel::error::RemoteError;
use crate::kernel::project::ProjectId;
use crate::kernel::services::ports::RemoteSaveRequest;
use crate::kernel::state::Notice;
use crate::kernel::{Action, Effect};

pub fn remote_title(project_id: &ProjectId) -> String {
    format!("CipherStudio {project_id}")
}

impl super::Store {
    pub(super) fn reduce_remote_action(&mut self, action: Action) -> super::DispatchResult {
        match action {
            Action::SaveProject => {
                let project_id = self.state.project.id().clone();
                self.state.remote_in_flight += 1;
                super::DispatchResult::changed(vec![Effect::SaveRemote(RemoteSaveRequest {
                    title: remote_title(&project_id),
                    project_id: project_id.as_str().to_string(),
                    files: self.state.project.files().clone(),
                })])
            }
            Action::LoadProject { project_id } => {
                let project_id = match ProjectId::parse(&project_id) {
                    Ok(id) => id.as_str().to_string(),
                    Err(err) => {
                        let mut effects = Vec::new();
                        Self::notify(&mut effects, Notice::error(err.to_string()));
                        return super::DispatchResult {
                            effects,
                            state_changed: false,
                        };
                    }
                };
                self.state.remote_in_flight += 1;
                super::DispatchResult::changed(vec![Effect::LoadRemote { project_id }])
            }
            Action::RemoteSaveFinished { project_id, result } => {
                self.state.remote_in_flight = self.state.remote_in_flight.saturating_sub(1);
                let mut effects = Vec::new();
                match result {
                    Ok(()) => {
                        tracing::info!(project = %project_id, "remote save ok");
                        Self::notify(&mut effects, Notice::info("Project saved successfully!"));
                    }
                    Err(RemoteError::MissingBackend) => {
                        Self::notify(&mut effects, Notice::error("Set backend URL."));
                    }
                    Err(err) => {
                        tracing::warn!(project = %project_id, error = %err, "remote save failed");
                        Self::notify(&mut effects, Notice::error(format!("Save failed: {err}")));
                    }
                }
                super::DispatchResult::changed(effects)
            }
            Action::RemoteLoadFinished { requested, result } => {
                self.state.remote_in_flight = self.state.remote_in_flight.saturating_sub(1);
                let mut effects = Vec::new();
                let remote = match result {
                    Ok(remote) => remote,
                    Err(err) => {
                        let text = match &err {
                            RemoteError::NotFound(_) => "No project found.".to_string(),
                            RemoteError::MissingBackend => "Set backend URL.".to_string(),
                            other => format!("Load failed: {other}"),
                        };
                        tracing::info!(project = %requested, error = %err, "remote load rejected");
                        Self::notify(&mut effects, Notice::error(text));
                        return super::DispatchResult {
                            effects,
                            state_changed: false,
                        };
                    }
                };

                let project_id = remote
                    .project_id
                    .and_then(|id| ProjectId::parse(&id).ok())
                    .unwrap_or_else(|| ProjectId::new(requested));
                self.state
                    .project
                    .replace_project(project_id.clone(), remote.files);

                effects.push(Effect::PersistActiveProject(project_id));
                if self.state.autosave.on_content_changed() {
                    effects.push(self.save_local_effect());
                }
                effects.push(self.reseed(ReseedReason::ProjectLoaded));
                Self::notify(&mut effects, Notice::info("Project loaded successfully!"));
                super::DispatchResult::changed(effects)
            }
            _ => super::DispatchResult::unchanged(),
        }
    }
}
