//! Storage module
//!
//! Provides revocable display handles for stored image blobs.

pub mod handles;
pub mod session;

pub use handles::{DisplayHandle, HandlePool};
pub use session::HandleSession;
