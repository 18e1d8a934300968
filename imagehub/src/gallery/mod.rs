//! Gallery module
//!
//! The render side of Image Hub:
//! - `view`: render passes, cards and store mutations
//! - `editor`: upload intake state machine
//! - `events`: UI event dispatch
//! - `debounce`: search input coalescing

pub mod debounce;
pub mod editor;
pub mod events;
pub mod view;

pub use debounce::Debouncer;
pub use editor::{parse_tags, strip_extension, Editor, EditorForm, PendingUpload};
pub use events::{Outcome, UiEvent};
pub use view::{normalize_filter, select_records, Card, Gallery, GridContent, GridView, Saved};
