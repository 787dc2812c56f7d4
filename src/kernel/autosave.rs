//! Autosave scheduler.
//!
//! Manual mode persists on every content change. Timer mode persists on a
//! recurring deadline instead; the two never run together.

use std::time::{Duration, Instant};

pub const MIN_INTERVAL_SECS: u64 = 5;
pub const MAX_INTERVAL_SECS: u64 = 300;
pub const DEFAULT_INTERVAL_SECS: u64 = 30;

pub fn clamp_interval(secs: u64) -> u64 {
    secs.clamp(MIN_INTERVAL_SECS, MAX_INTERVAL_SECS)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutosaveMode {
    Manual,
    Timer,
}

/// Live timer handle; dropping it cancels the schedule.
#[derive(Debug)]
struct IntervalTimer {
    period: Duration,
    next_fire: Instant,
}

#[derive(Debug)]
pub struct AutosaveScheduler {
    enabled: bool,
    interval_secs: u64,
    timer: Option<IntervalTimer>,
}

impl AutosaveScheduler {
    pub fn new(enabled: bool, interval_secs: u64) -> Self {
        Self {
            enabled,
            interval_secs: clamp_interval(interval_secs),
            timer: None,
        }
    }

    pub fn mode(&self) -> AutosaveMode {
        if self.enabled {
            AutosaveMode::Timer
        } else {
            AutosaveMode::Manual
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn interval_secs(&self) -> u64 {
        self.interval_secs
    }

    pub fn is_armed(&self) -> bool {
        self.timer.is_some()
    }

    pub fn next_fire(&self) -> Option<Instant> {
        self.timer.as_ref().map(|t| t.next_fire)
    }

    /// (Re)start the schedule from `now`. Any previous timer is released first.
    pub fn start(&mut self, now: Instant) {
        self.timer = None;
        if !self.enabled {
            return;
        }
        let period = Duration::from_secs(self.interval_secs);
        self.timer = Some(IntervalTimer {
            period,
            next_fire: now + period,
        });
    }

    /// Changing either knob cancels the running timer and restarts it from zero.
    pub fn configure(&mut self, enabled: bool, interval_secs: u64, now: Instant) -> bool {
        let interval_secs = clamp_interval(interval_secs);
        let changed = enabled != self.enabled || interval_secs != self.interval_secs;
        self.enabled = enabled;
        self.interval_secs = interval_secs;
        if changed || (enabled && self.timer.is_none()) {
            self.start(now);
        }
        changed
    }

    /// Whether a content change must be persisted right away.
    pub fn on_content_changed(&self) -> bool {
        !self.enabled
    }

    /// Returns `true` once per elapsed interval boundary.
    ///
    /// Missed boundaries collapse into a single fire.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(timer) = self.timer.as_mut() else {
            return false;
        };
        if now < timer.next_fire {
            return false;
        }
        while timer.next_fire <= now {
            timer.next_fire += timer.period;
        }
        true
    }

    pub fn teardown(&mut self) {
        self.timer = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/autosave.rs"]
mod tests;
