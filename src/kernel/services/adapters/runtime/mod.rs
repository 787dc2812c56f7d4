//! Async runtime adapter: drives remote calls and posts results back to the workbench.

mod message;
mod runtime;

pub use message::AppMessage;
pub use runtime::AsyncRuntime;
