use std::time::{Duration, Instant};

use crate::registry::PageIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmState {
    Unarmed,
    Armed {
        page: PageIndex,
        armed_at: Instant,
        expires_at: Instant,
    },
}

/// Result of a delete click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// First tap: the prompt is now showing for this page.
    Armed,
    /// Second tap inside the window: the page must be deleted.
    Confirmed(PageIndex),
}

/// Tap-to-confirm guard for destructive actions. At most one page is armed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirmation {
    timeout: Duration,
    state: ConfirmState,
}

impl DeleteConfirmation {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            state: ConfirmState::Unarmed,
        }
    }

    pub fn click(&mut self, page: PageIndex, now: Instant) -> ConfirmOutcome {
        match self.state {
            ConfirmState::Armed {
                page: armed,
                expires_at,
                ..
            } if armed == page && now < expires_at => {
                self.state = ConfirmState::Unarmed;
                ConfirmOutcome::Confirmed(page)
            }
            // Re-arming replaces any earlier arm, including one for another page.
            _ => {
                self.state = ConfirmState::Armed {
                    page,
                    armed_at: now,
                    expires_at: now + self.timeout,
                };
                ConfirmOutcome::Armed
            }
        }
    }

    /// Reverts to unarmed once the window has passed. Returns `true` if it expired now.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.state {
            ConfirmState::Armed { expires_at, .. } if now >= expires_at => {
                self.state = ConfirmState::Unarmed;
                true
            }
            _ => false,
        }
    }

    pub fn disarm(&mut self) {
        self.state = ConfirmState::Unarmed;
    }

    pub fn state(&self) -> ConfirmState {
        self.state
    }

    pub fn armed_page(&self) -> Option<PageIndex> {
        match self.state {
            ConfirmState::Armed { page, .. } => Some(page),
            ConfirmState::Unarmed => None,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            ConfirmState::Armed { expires_at, .. } => Some(expires_at),
            ConfirmState::Unarmed => None,
        }
    }
}
