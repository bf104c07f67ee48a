//! Panel settings loaded from `notebook.ron`.
//!
//! Every field is optional in the file; missing fields fall back to defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notebook_core::PanelConfig;
use notebook_engine::ClientSettings;
use notebook_logging::{notebook_info, notebook_warn};
use serde::{Deserialize, Serialize};

pub const SETTINGS_FILENAME: &str = "notebook.ron";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct PersistedSettings {
    max_pages: usize,
    refresh_wait_ms: u64,
    focus_change_wait_ms: u64,
    selection_wait_ms: u64,
    delete_click_wait_ms: u64,
    confirm_timeout_ms: u64,
    autosave_wait_ms: u64,
    remote_timeout_ms: u64,
    store_dir: PathBuf,
}

impl Default for PersistedSettings {
    fn default() -> Self {
        let panel = PanelConfig::default();
        let client = ClientSettings::default();
        Self {
            max_pages: panel.max_pages,
            refresh_wait_ms: millis(panel.refresh_wait),
            focus_change_wait_ms: millis(panel.focus_change_wait),
            selection_wait_ms: millis(panel.selection_wait),
            delete_click_wait_ms: millis(panel.delete_click_wait),
            confirm_timeout_ms: millis(panel.confirm_timeout),
            autosave_wait_ms: millis(panel.autosave_wait),
            remote_timeout_ms: millis(client.timeout),
            store_dir: PathBuf::from("./notebook"),
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub panel: PanelConfig,
    pub client: ClientSettings,
    pub store_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        PersistedSettings::default().into()
    }
}

impl From<PersistedSettings> for Settings {
    fn from(persisted: PersistedSettings) -> Self {
        let max_pages = if persisted.max_pages == 0 {
            notebook_warn!("max_pages must be at least 1; using 1");
            1
        } else {
            persisted.max_pages
        };
        Self {
            panel: PanelConfig {
                max_pages,
                refresh_wait: Duration::from_millis(persisted.refresh_wait_ms),
                focus_change_wait: Duration::from_millis(persisted.focus_change_wait_ms),
                selection_wait: Duration::from_millis(persisted.selection_wait_ms),
                delete_click_wait: Duration::from_millis(persisted.delete_click_wait_ms),
                confirm_timeout: Duration::from_millis(persisted.confirm_timeout_ms),
                autosave_wait: Duration::from_millis(persisted.autosave_wait_ms),
            },
            client: ClientSettings {
                timeout: Duration::from_millis(persisted.remote_timeout_ms),
            },
            store_dir: persisted.store_dir,
        }
    }
}

/// Reads settings from `path`. A missing or unreadable file yields defaults.
pub fn load_settings(path: &Path) -> Settings {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            notebook_info!("No settings at {:?}; using defaults", path);
            return Settings::default();
        }
        Err(err) => {
            notebook_warn!("Failed to read settings {:?}: {}", path, err);
            return Settings::default();
        }
    };

    match ron::from_str::<PersistedSettings>(&contents) {
        Ok(persisted) => persisted.into(),
        Err(err) => {
            notebook_warn!("Failed to parse settings {:?}: {}", path, err);
            Settings::default()
        }
    }
}
