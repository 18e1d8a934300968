//! Application state and initialization
//!
//! This module manages the central application state and lifecycle.
//! The store is created here but only opened when first used.

use crate::config::{DATABASE_FILE_NAME, DEFAULT_DATA_DIR_NAME, HANDLES_DIR_NAME};
use crate::error::{HubError, Result};
use crate::gallery::Gallery;
use crate::services::{HubSettings, SettingsService};
use crate::store::LazyStore;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Central application state, created once per process
#[derive(Clone)]
pub struct AppState {
    pub data_dir: PathBuf,
    pub store: Arc<LazyStore>,
    pub settings: HubSettings,
}

impl AppState {
    /// Application setup - called once on startup
    pub async fn setup(data_dir: PathBuf) -> Result<Self> {
        tracing::info!("Data directory: {:?}", data_dir);

        std::fs::create_dir_all(&data_dir)?;
        std::fs::create_dir_all(data_dir.join(HANDLES_DIR_NAME))?;

        let settings = SettingsService::new(&data_dir).load().await?;
        let store = Arc::new(LazyStore::new(data_dir.join(DATABASE_FILE_NAME)));

        tracing::debug!("Application initialized");

        Ok(Self {
            data_dir,
            store,
            settings,
        })
    }

    /// Build a gallery over the shared store
    pub async fn gallery(&self) -> Result<(Gallery, mpsc::UnboundedReceiver<String>)> {
        let (gallery, fired) = Gallery::new(
            self.store.clone(),
            self.data_dir.join(HANDLES_DIR_NAME),
            self.settings.search_debounce(),
        );
        gallery.initialize().await?;
        Ok((gallery, fired))
    }
}

/// Pick the data directory: explicit path first, then the platform default
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }

    dirs::data_dir()
        .map(|dir| dir.join(DEFAULT_DATA_DIR_NAME))
        .ok_or_else(|| HubError::Config("Could not determine a data directory".to_string()))
}
