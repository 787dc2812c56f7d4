//! Service adapters: OS/runtime specific implementations (storage/HTTP/async).

pub mod config;
pub mod http;
pub mod paths;
pub mod persistence;
pub mod runtime;
pub mod sandbox;
pub mod storage;

pub use config::{BackendConfig, BackendSource, BACKEND_URL_ENV, DEFAULT_BACKEND_URL};
pub use http::HttpBackend;
pub use paths::{ensure_log_dir, ensure_storage_dir, get_log_dir, get_storage_dir};
pub use persistence::{LocalSaveOutcome, PersistenceAdapter};
pub use runtime::{AppMessage, AsyncRuntime};
pub use sandbox::HeadlessSandbox;
pub use storage::{FileStorage, MemoryStorage};
