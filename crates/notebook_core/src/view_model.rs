use crate::{PageIndex, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PanelView {
    pub title: String,
    /// Dropdown, eraser and delete controls are disabled.
    pub controls_disabled: bool,
    /// Pages in display order.
    pub entries: Vec<PageEntryView>,
    pub selected: PageIndex,
    /// Delete button shows "Tap to confirm".
    pub delete_prompt: bool,
    pub eraser: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageEntryView {
    pub index: PageIndex,
    pub label: String,
    pub timestamp: Timestamp,
}

pub(crate) fn entry_label(index: PageIndex, timestamp: Timestamp, now_ms: Timestamp) -> String {
    if timestamp == 0 {
        format!("Page {index} - Empty")
    } else {
        format!("Page {index} - {}", format_age(timestamp, now_ms))
    }
}

const SECOND: i64 = 1000;
const MINUTE: i64 = 60 * SECOND;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Compact relative age such as `5m ago`. Future timestamps read `0s ago`.
pub fn format_age(timestamp: Timestamp, now_ms: Timestamp) -> String {
    let elapsed = now_ms - timestamp;
    if elapsed <= 0 {
        return "0s ago".to_string();
    }
    let (value, unit) = match elapsed {
        e if e < MINUTE => (e / SECOND, "s"),
        e if e < HOUR => (e / MINUTE, "m"),
        e if e < DAY => (e / HOUR, "h"),
        e if e < WEEK => (e / DAY, "d"),
        e if e < MONTH => (e / WEEK, "w"),
        e if e < YEAR => (e / MONTH, "mo"),
        e => (e / YEAR, "y"),
    };
    format!("{value}{unit} ago")
}
