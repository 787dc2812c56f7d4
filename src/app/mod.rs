//! Application layer: the workbench that hosts the sync core.

pub mod workbench;

pub use workbench::{MountOptions, Workbench};
