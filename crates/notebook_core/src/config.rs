use std::time::Duration;

/// Capacity and timing windows of the panel state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelConfig {
    /// Number of page slots per application.
    pub max_pages: usize,
    /// Debounce of full refreshes.
    pub refresh_wait: Duration,
    /// Throttle window of focus-change notifications.
    pub focus_change_wait: Duration,
    /// Debounce of page selection changes.
    pub selection_wait: Duration,
    /// Debounce of delete button clicks.
    pub delete_click_wait: Duration,
    /// How long an armed delete waits for its confirming click.
    pub confirm_timeout: Duration,
    /// Debounce between a finished stroke and the autosave.
    pub autosave_wait: Duration,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            max_pages: 8,
            refresh_wait: Duration::from_millis(500),
            focus_change_wait: Duration::from_millis(500),
            selection_wait: Duration::from_millis(500),
            delete_click_wait: Duration::from_millis(250),
            confirm_timeout: Duration::from_millis(4000),
            autosave_wait: Duration::from_millis(1000),
        }
    }
}
