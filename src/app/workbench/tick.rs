use super::Workbench;
use crate::kernel::services::adapters::AppMessage;
use crate::kernel::Action;
use std::sync::mpsc;
use std::time::{Duration, Instant};

const MAX_MESSAGE_DRAIN_PER_TICK: usize = 256;

impl Workbench {
    /// Drain finished background work, then let the store advance its timers.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = self.poll_messages();
        changed |= self.dispatch(Action::Tick { now });
        changed
    }

    /// Earliest instant at which `tick` has something to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        let state = self.store.state();
        match (state.bridge.next_deadline(), state.autosave.next_fire()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Whether any remote call or auth request is still outstanding.
    pub fn has_pending_remote(&self) -> bool {
        let state = self.store.state();
        state.remote_in_flight > 0 || state.auth.pending
    }

    /// Block until outstanding remote work has reported back or `timeout` passes.
    ///
    /// Returns `false` on timeout.
    pub fn settle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.has_pending_remote() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            match self.rx.recv_timeout(remaining) {
                Ok(msg) => {
                    self.handle_message(msg);
                }
                Err(mpsc::RecvTimeoutError::Timeout) => return false,
                Err(mpsc::RecvTimeoutError::Disconnected) => return false,
            }
        }
        true
    }

    fn poll_messages(&mut self) -> bool {
        let mut changed = false;
        let mut drained = 0usize;
        loop {
            if drained >= MAX_MESSAGE_DRAIN_PER_TICK {
                break;
            }
            match self.rx.try_recv() {
                Ok(msg) => {
                    drained += 1;
                    changed |= self.handle_message(msg);
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    tracing::warn!("async runtime channel disconnected");
                    break;
                }
            }
        }
        changed
    }

    pub fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::RemoteSaved { project_id, result } => {
                self.dispatch(Action::RemoteSaveFinished { project_id, result })
            }
            AppMessage::RemoteLoaded { requested, result } => {
                self.dispatch(Action::RemoteLoadFinished { requested, result })
            }
            AppMessage::AuthFinished { result } => self.dispatch(Action::AuthFinished { result }),
            AppMessage::TokenValidated { result } => {
                self.dispatch(Action::TokenValidated { result })
            }
        }
    }
}
