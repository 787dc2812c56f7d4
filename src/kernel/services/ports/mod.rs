//! Service ports: traits + data contracts.

pub mod remote;
pub mod runtime;
pub mod sandbox;
pub mod settings;
pub mod storage;

pub use remote::{
    AuthSession, Credentials, RemoteBackend, RemoteProject, RemoteSaveRequest, RequestContext,
    User,
};
pub use runtime::BoxFuture;
pub use sandbox::SandboxHost;
pub use settings::{Settings, Theme};
pub use storage::KeyValueStore;
