use crate::kernel::bridge::ReseedReason;
use crate::kernel::explorer;
use crate::kernel::project::starter_files;
use crate::kernel::state::Notice;
use crate::kernel::{Action, Effect};

impl super::Store {
    pub(super) fn reduce_explorer_action(&mut self, action: Action) -> super::DispatchResult {
        match action {
            Action::CreateFile { name } => {
                let mut effects = Vec::new();
                match explorer::create_file(&mut self.state.project, &name) {
                    Ok(path) => {
                        tracing::debug!(path = %path, "file created");
                        // Structural changes are written through regardless of autosave mode.
                        effects.push(self.save_local_effect());
                        effects.push(self.reseed(ReseedReason::Structural));
                        super::DispatchResult::changed(effects)
                    }
                    Err(err) => {
                        Self::notify(&mut effects, Notice::error(err.to_string()));
                        super::DispatchResult {
                            effects,
                            state_changed: false,
                        }
                    }
                }
            }
            Action::DeleteFile { path, confirmed } => {
                if !confirmed || !explorer::delete_file(&mut self.state.project, &path) {
                    return super::DispatchResult::unchanged();
                }
                tracing::debug!(path = %path, "file deleted");
                let effects = vec![
                    self.save_local_effect(),
                    self.reseed(ReseedReason::Structural),
                ];
                super::DispatchResult::changed(effects)
            }
            Action::SelectFile { path } => {
                if !self.state.project.files().contains_key(&path) {
                    return super::DispatchResult::unchanged();
                }
                if self.state.project.active_file() == path && self.state.bridge.is_focused(&path)
                {
                    return super::DispatchResult::unchanged();
                }
                self.state.project.set_active_file(&path);
                let effects = vec![self.reseed(ReseedReason::ActiveFileSwitched)];
                super::DispatchResult::changed(effects)
            }
            Action::ReplaceFiles { files } => {
                if !self.state.project.set_files(files) {
                    return super::DispatchResult::unchanged();
                }
                let effects = vec![
                    self.save_local_effect(),
                    self.reseed(ReseedReason::Structural),
                ];
                super::DispatchResult::changed(effects)
            }
            Action::NewProject { project_id } => {
                self.state
                    .project
                    .replace_project(project_id.clone(), starter_files());
                let effects = vec![
                    Effect::PersistActiveProject(project_id),
                    self.save_local_effect(),
                    self.reseed(ReseedReason::ProjectLoaded),
                ];
                super::DispatchResult::changed(effects)
            }
            _ => super::DispatchResult::unchanged(),
        }
    }
}
