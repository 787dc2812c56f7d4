//! cipherstudio - file-state sync core for a multi-file project editor
//!
//! Module layout:
//! - kernel: project store, sandbox bridge, autosave scheduler, explorer
//!   operations and the reducer that ties them together (`Store`)
//! - kernel::services: ports (storage/remote/sandbox contracts) and adapters
//!   (file storage, HTTP backend, async runtime)
//! - app: application layer (`Workbench`)

pub mod app;
pub mod kernel;
