//! Settings service
//!
//! Manages gallery settings persistence using JSON file storage.

use crate::config::{
    DEFAULT_SEARCH_DEBOUNCE_MS, MAX_SEARCH_DEBOUNCE_MS, MIN_SEARCH_DEBOUNCE_MS, SETTINGS_FILE_NAME,
};
use crate::error::{HubError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

/// Gallery settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubSettings {
    /// Quiet period before search input refreshes the grid
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    /// Whether deletes ask for confirmation
    #[serde(default = "default_true")]
    pub confirm_deletes: bool,
}

fn default_search_debounce_ms() -> u64 {
    DEFAULT_SEARCH_DEBOUNCE_MS
}

fn default_true() -> bool {
    true
}

impl Default for HubSettings {
    fn default() -> Self {
        Self {
            search_debounce_ms: default_search_debounce_ms(),
            confirm_deletes: true,
        }
    }
}

impl HubSettings {
    /// Search debounce clamped to the supported range
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(
            self.search_debounce_ms
                .clamp(MIN_SEARCH_DEBOUNCE_MS, MAX_SEARCH_DEBOUNCE_MS),
        )
    }
}

/// Service for loading and saving settings
#[derive(Clone)]
pub struct SettingsService {
    settings_path: PathBuf,
}

impl SettingsService {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            settings_path: data_dir.join(SETTINGS_FILE_NAME),
        }
    }

    /// Load settings from disk or create default if not exists
    pub async fn load(&self) -> Result<HubSettings> {
        if !self.settings_path.exists() {
            tracing::info!("Settings file not found, creating default settings");
            let default = HubSettings::default();
            self.save(&default).await?;
            return Ok(default);
        }

        let content = fs::read_to_string(&self.settings_path).await?;
        let settings: HubSettings = serde_json::from_str(&content)
            .map_err(|e| HubError::Config(format!("Failed to parse settings: {}", e)))?;

        Ok(settings)
    }

    /// Save settings to disk
    pub async fn save(&self, settings: &HubSettings) -> Result<()> {
        let content = serde_json::to_string_pretty(settings)?;

        fs::write(&self.settings_path, content).await?;
        tracing::debug!("Settings saved to {:?}", self.settings_path);

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.settings_path
    }
}
