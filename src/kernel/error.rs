use thiserror::Error;

/// Input rejected before any state is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("File name cannot be empty")]
    EmptyFileName,
    #[error("File already exists: {0}")]
    DuplicateFile(String),
    #[error("File name is reserved: {0}")]
    ReservedName(String),
    #[error("Enter a project id to load")]
    EmptyProjectId,
    #[error("Project id is reserved: {0}")]
    ReservedProjectId(String),
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("Name must be at least {min} characters")]
    NameTooShort { min: usize },
    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// Local storage failures. Never surfaced to the caller of a save; logged instead.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage io: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage encode: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("project id collides with a session key: {0}")]
    ReservedKey(String),
}

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Set backend URL.")]
    MissingBackend,
    #[error("No project found: {0}")]
    NotFound(String),
    #[error("backend returned status {0}")]
    Status(u16),
    #[error("{0}")]
    Transport(String),
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl RemoteError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RemoteError::NotFound(_))
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RemoteError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            RemoteError::Status(status.as_u16())
        } else {
            RemoteError::Transport(err.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    /// Server rejected the credentials; carries the message shown to the user.
    #[error("{0}")]
    Rejected(String),
    #[error("session expired or token invalid")]
    InvalidToken,
    #[error(transparent)]
    Remote(#[from] RemoteError),
}
