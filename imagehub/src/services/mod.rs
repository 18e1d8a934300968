//! Services module
//!
//! Supporting services around the gallery: settings persistence and
//! reading picked files.

pub mod intake;
pub mod settings;

pub use intake::read_upload;
pub use settings::{HubSettings, SettingsService};
