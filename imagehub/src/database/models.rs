//! Database models
//!
//! Rust structs representing stored images and the rows they map to.

use crate::config::DEFAULT_TITLE;
use crate::error::{HubError, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Binary image payload: raw bytes plus their content type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageBlob {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl ImageBlob {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A stored image post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub id: i64,
    pub blob: ImageBlob,
    pub title: String,
    pub tags: Vec<String>,
    /// Milliseconds since the Unix epoch
    pub created: i64,
    /// Lowercased title and tags, used for substring filtering
    pub search_text: String,
}

/// Row layout of the `images` table
#[derive(Debug, FromRow)]
pub(crate) struct ImageRow {
    pub id: i64,
    pub data: Vec<u8>,
    pub mime_type: String,
    pub title: String,
    /// JSON-encoded array of strings
    pub tags: String,
    pub created: i64,
    pub search_text: String,
}

impl TryFrom<ImageRow> for ImageRecord {
    type Error = HubError;

    fn try_from(row: ImageRow) -> Result<Self> {
        Ok(Self {
            id: row.id,
            blob: ImageBlob::new(row.data, row.mime_type),
            title: row.title,
            tags: serde_json::from_str(&row.tags)?,
            created: row.created,
            search_text: row.search_text,
        })
    }
}

/// Insert request for a new image
#[derive(Debug)]
pub struct NewImage<'a> {
    pub blob: &'a ImageBlob,
    pub title: String,
    pub tags: &'a [String],
    pub created: i64,
    pub search_text: String,
}

impl<'a> NewImage<'a> {
    /// Build an insert request stamped with the current time.
    ///
    /// An empty title is stored as "Untitled", but the search text is
    /// derived from the title as given.
    pub fn new(blob: &'a ImageBlob, title: &str, tags: &'a [String]) -> Self {
        let stored_title = if title.is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            title.to_string()
        };

        Self {
            blob,
            title: stored_title,
            tags,
            created: Utc::now().timestamp_millis(),
            search_text: build_search_text(title, tags),
        }
    }

    /// Override the creation timestamp
    pub fn created_at(mut self, created: i64) -> Self {
        self.created = created;
        self
    }
}

/// Lowercase concatenation of the title and tags, space-joined
pub fn build_search_text(title: &str, tags: &[String]) -> String {
    format!("{} {}", title, tags.join(" ")).to_lowercase()
}
