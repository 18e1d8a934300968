//! Repository layer for the image collection
//!
//! Every operation is a single statement, so each one is atomic on its own.

use super::models::*;
use crate::error::{HubError, Result};
use sqlx::SqlitePool;

/// Repository for image records
#[derive(Clone)]
pub struct ImageRepository {
    pool: SqlitePool,
}

impl ImageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new image, returning its assigned id
    pub async fn insert(&self, new: &NewImage<'_>) -> Result<i64> {
        let tags_json = serde_json::to_string(new.tags)?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO images (data, mime_type, title, tags, created, search_text)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(new.blob.bytes.as_slice())
        .bind(&new.blob.mime_type)
        .bind(&new.title)
        .bind(&tags_json)
        .bind(new.created)
        .bind(&new.search_text)
        .fetch_one(&self.pool)
        .await
        .map_err(HubError::WriteFailed)?;

        tracing::debug!("Created image: {} ({} bytes)", id, new.blob.len());
        Ok(id)
    }

    /// List every stored image in insertion order
    pub async fn list_all(&self) -> Result<Vec<ImageRecord>> {
        let rows = sqlx::query_as::<_, ImageRow>(
            r#"
            SELECT id, data, mime_type, title, tags, created, search_text
            FROM images
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(HubError::ReadFailed)?;

        rows.into_iter().map(ImageRecord::try_from).collect()
    }

    /// Delete an image. Deleting a missing id is not an error.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let rows = sqlx::query("DELETE FROM images WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(HubError::WriteFailed)?
            .rows_affected();

        if rows == 0 {
            tracing::debug!("Delete of missing image ignored: {}", id);
        } else {
            tracing::debug!("Deleted image: {}", id);
        }

        Ok(())
    }
}
