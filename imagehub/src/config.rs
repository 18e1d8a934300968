//! Application configuration constants
//!
//! Central location for names, defaults and validation boundaries used
//! throughout the application.

// ===== Storage =====

/// File name of the local database inside the data directory
pub const DATABASE_FILE_NAME: &str = "image-hub.db";

/// Directory (inside the data directory) holding live display handles
pub const HANDLES_DIR_NAME: &str = "handles";

/// File inside a handle session directory naming the owning process
pub const SESSION_OWNER_FILE_NAME: &str = "owner.pid";

/// Settings file name inside the data directory
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Directory name used under the platform data dir when none is given
pub const DEFAULT_DATA_DIR_NAME: &str = "image-hub";

// ===== Records =====

/// Title stored when the user leaves the title empty
pub const DEFAULT_TITLE: &str = "Untitled";

/// Alt text for a card whose record has no title
pub const DEFAULT_ALT_TEXT: &str = "image";

// ===== Gallery =====

/// Default quiet period before a search input triggers a refresh
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 220;

/// Minimum search debounce in milliseconds.
/// Lower values refresh on nearly every keystroke.
pub const MIN_SEARCH_DEBOUNCE_MS: u64 = 50;

/// Maximum search debounce in milliseconds
pub const MAX_SEARCH_DEBOUNCE_MS: u64 = 2_000;

/// Placeholder shown when a filter matches nothing
pub const EMPTY_STATE_LABEL: &str = "No posts";
