use super::message::AppMessage;
use crate::kernel::services::ports::BoxFuture;
use std::io;
use std::sync::mpsc::Sender;

pub struct AsyncRuntime {
    runtime: tokio::runtime::Runtime,
    tx: Sender<AppMessage>,
}

impl AsyncRuntime {
    pub fn new(tx: Sender<AppMessage>) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .or_else(|e| {
                tracing::error!(
                    error = %e,
                    "Failed to create multi-thread tokio runtime, falling back to current-thread"
                );
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
            })?;
        Ok(Self { runtime, tx })
    }

    pub fn tokio_handle(&self) -> tokio::runtime::Handle {
        self.runtime.handle().clone()
    }

    /// Drive `task` in the background and post its output as a message.
    pub fn spawn<T, F>(&self, task: BoxFuture<T>, into_message: F)
    where
        T: Send + 'static,
        F: FnOnce(T) -> AppMessage + Send + 'static,
    {
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let output = task.await;
            if tx.send(into_message(output)).is_err() {
                tracing::debug!("receiver dropped before task completed");
            }
        });
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/runtime.rs"]
mod tests;
