use crate::kernel::auth;
use crate::kernel::services::ports::Credentials;
use crate::kernel::{Action, Effect};

impl super::Store {
    pub(super) fn reduce_auth_action(&mut self, action: Action) -> super::DispatchResult {
        match action {
            Action::Login { email, password } => {
                if let Err(err) = auth::validate_login(&email, &password) {
                    self.state.auth.error = Some(err.to_string());
                    return super::DispatchResult::changed(Vec::new());
                }
                self.state.auth.pending = true;
                self.state.auth.error = None;
                super::DispatchResult::changed(vec![Effect::Authenticate(Credentials::Login {
                    email,
                    password,
                })])
            }
            Action::Register {
                email,
                password,
                confirm_password,
                name,
            } => {
                if let Err(err) =
                    auth::validate_registration(&email, &password, &confirm_password, &name)
                {
                    self.state.auth.error = Some(err.to_string());
                    return super::DispatchResult::changed(Vec::new());
                }
                self.state.auth.pending = true;
                self.state.auth.error = None;
                super::DispatchResult::changed(vec![Effect::Authenticate(
                    Credentials::Register {
                        email,
                        password,
                        name: name.trim().to_string(),
                    },
                )])
            }
            Action::RestoreSession { token } => {
                if token.trim().is_empty() {
                    return super::DispatchResult::unchanged();
                }
                self.state.auth.pending = true;
                super::DispatchResult::changed(vec![Effect::ValidateToken { token }])
            }
            Action::AuthFinished { result } => {
                self.state.auth.pending = false;
                match result {
                    Ok(session) => {
                        self.state.auth.user = Some(session.user);
                        self.state.auth.error = None;
                        super::DispatchResult::changed(vec![Effect::StoreToken(session.token)])
                    }
                    Err(message) => {
                        self.state.auth.user = None;
                        self.state.auth.error = Some(message);
                        super::DispatchResult::changed(vec![Effect::ClearToken])
                    }
                }
            }
            Action::TokenValidated { result } => {
                self.state.auth.pending = false;
                match result {
                    Ok(user) => {
                        self.state.auth.user = Some(user);
                        super::DispatchResult::changed(Vec::new())
                    }
                    Err(err) => {
                        tracing::info!(error = %err, "stored token rejected");
                        self.state.auth.user = None;
                        super::DispatchResult::changed(vec![Effect::ClearToken])
                    }
                }
            }
            Action::Logout => {
                self.state.auth.user = None;
                self.state.auth.error = None;
                super::DispatchResult::changed(vec![Effect::ClearToken])
            }
            _ => super::DispatchResult::unchanged(),
        }
    }
}
