//! Embedded sandbox contract. The sandbox itself is an external collaborator;
//! the host only ever hands it whole snapshots or a replacement stylesheet.

use crate::kernel::bridge::{SandboxInstance, SandboxSnapshot};

pub trait SandboxHost {
    /// Discard the running sandbox and construct a new one from `snapshot`.
    fn reseed(&mut self, snapshot: SandboxSnapshot);

    /// Replace the injected presentation stylesheet of a live instance.
    fn restyle(&mut self, instance: SandboxInstance, stylesheet: &str);
}
