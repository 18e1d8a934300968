//! Image store
//!
//! The gallery talks to storage through [`ImageStore`]. [`LazyStore`] is the
//! production implementation: it opens the database on first use and hands
//! out the same repository for the rest of the process lifetime.

use crate::database::{create_pool, ImageBlob, ImageRecord, ImageRepository, NewImage};
use crate::error::{HubError, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::sync::OnceCell;

/// Create, list and delete operations over the image collection
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist a new image and return its id
    async fn add(&self, blob: &ImageBlob, title: &str, tags: &[String]) -> Result<i64>;

    /// Every stored image, in no particular order
    async fn list_all(&self) -> Result<Vec<ImageRecord>>;

    /// Remove an image if present
    async fn delete_by_id(&self, id: i64) -> Result<()>;
}

#[async_trait]
impl ImageStore for ImageRepository {
    async fn add(&self, blob: &ImageBlob, title: &str, tags: &[String]) -> Result<i64> {
        self.insert(&NewImage::new(blob, title, tags)).await
    }

    async fn list_all(&self) -> Result<Vec<ImageRecord>> {
        ImageRepository::list_all(self).await
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        self.delete(id).await
    }
}

/// Database handle opened once, on first use
pub struct LazyStore {
    db_path: PathBuf,
    repo: OnceCell<ImageRepository>,
}

impl LazyStore {
    pub fn new(db_path: PathBuf) -> Self {
        Self {
            db_path,
            repo: OnceCell::new(),
        }
    }

    /// Open the database, initializing the schema on the first call.
    ///
    /// Concurrent first calls wait on a single initialization. A failed
    /// open leaves the store unopened so a later call can try again.
    pub async fn open(&self) -> Result<&ImageRepository> {
        self.repo
            .get_or_try_init(|| async {
                let pool = create_pool(&self.db_path).await?;
                Ok::<_, HubError>(ImageRepository::new(pool))
            })
            .await
    }

    pub fn is_open(&self) -> bool {
        self.repo.initialized()
    }
}

#[async_trait]
impl ImageStore for LazyStore {
    async fn add(&self, blob: &ImageBlob, title: &str, tags: &[String]) -> Result<i64> {
        let repo = self.open().await?;
        let id = repo.insert(&NewImage::new(blob, title, tags)).await?;
        tracing::info!("Stored image {} ({})", id, title);
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<ImageRecord>> {
        self.open().await?.list_all().await
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        self.open().await?.delete(id).await?;
        tracing::info!("Deleted image {}", id);
        Ok(())
    }
}
