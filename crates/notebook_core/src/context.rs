use std::time::{Duration, Instant};

use crate::schedule::Throttler;

pub type AppId = u32;
pub type ProcessId = u32;

/// The application that currently has focus on the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct AppContext {
    pub appid: AppId,
    pub pid: ProcessId,
}

impl AppContext {
    pub fn new(appid: AppId, pid: ProcessId) -> Self {
        Self { appid, pid }
    }
}

/// A host "focus changed" notification.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FocusEvent {
    pub appid: AppId,
    pub pid: ProcessId,
    pub exe_name: String,
    pub window_id: u64,
}

impl FocusEvent {
    pub fn context(&self) -> AppContext {
        AppContext::new(self.appid, self.pid)
    }
}

/// Decides which focus notifications require a resynchronization.
///
/// Every notification updates the host's view of the focused application, even when
/// the throttle drops it; only admitted notifications can request a refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextTracker {
    throttle: Throttler,
    host: AppContext,
    last_pid: ProcessId,
    tracked_appid: AppId,
}

impl ContextTracker {
    pub fn new(interval: Duration, initial: AppContext) -> Self {
        Self {
            throttle: Throttler::new(interval),
            host: initial,
            last_pid: initial.pid,
            tracked_appid: initial.appid,
        }
    }

    /// Returns `true` when the event should trigger a full refresh.
    pub fn observe(&mut self, event: &FocusEvent, now: Instant) -> bool {
        self.host = event.context();
        if !self.throttle.admit(now) {
            return false;
        }
        let changed = event.pid != self.last_pid || event.appid != self.tracked_appid;
        if changed {
            self.last_pid = event.pid;
        }
        changed
    }

    /// The most recently reported focused application.
    pub fn host_context(&self) -> AppContext {
        self.host
    }

    /// Records the application whose pages are now being synchronized.
    pub fn track(&mut self, context: AppContext) {
        self.tracked_appid = context.appid;
    }

    pub fn tracked_appid(&self) -> AppId {
        self.tracked_appid
    }
}
