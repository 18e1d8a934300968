//! Terminal commands
//!
//! - `images`: add, list, delete and open
//! - `browse`: interactive gallery with debounced search
//! - `output`: terminal formatting

pub mod browse;
pub mod images;
pub mod output;

pub use browse::browse;
pub use images::{add, delete, list, open};
