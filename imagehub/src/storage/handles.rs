//! Display handles
//!
//! A display handle is a short-lived file inside the handle directory that
//! holds one blob's bytes, addressed by a `file://` URL. Creating a handle
//! writes the file; revoking it removes the file.
//!
//! Example: a PNG blob is spooled to "handles/<session>/cards/7f0c...e1.png"

use crate::database::ImageBlob;
use crate::error::Result;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Revocable reference to a spooled blob
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayHandle {
    id: Uuid,
    path: PathBuf,
}

impl DisplayHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn url(&self) -> String {
        format!("file://{}", self.path.display())
    }
}

/// Owner of a set of live display handles
///
/// Every handle created through the pool stays live until it is revoked
/// or the pool is dropped.
pub struct HandlePool {
    root: PathBuf,
    live: Vec<DisplayHandle>,
}

impl HandlePool {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            live: Vec::new(),
        }
    }

    /// Create the handle directory
    pub async fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        tracing::debug!("Handle pool initialized at: {:?}", self.root);
        Ok(())
    }

    /// Spool a blob and return a new live handle for it
    pub async fn create(&mut self, blob: &ImageBlob) -> Result<DisplayHandle> {
        let id = Uuid::new_v4();
        let path = self.root.join(format!("{}.{}", id, extension_for(&blob.mime_type)));

        // Write to temp file first so a handle never points at a partial file
        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(&blob.bytes).await?;
        file.flush().await?;
        drop(file);
        fs::rename(&temp_path, &path).await?;

        let handle = DisplayHandle { id, path };
        self.live.push(handle.clone());

        tracing::debug!("Created display handle: {} ({} bytes)", handle.id, blob.len());
        Ok(handle)
    }

    /// Revoke a single handle. Revoking an unknown handle is a no-op.
    pub async fn revoke(&mut self, handle: &DisplayHandle) -> Result<()> {
        let Some(pos) = self.live.iter().position(|h| h.id == handle.id) else {
            return Ok(());
        };

        let handle = self.live.swap_remove(pos);
        remove_if_present(&handle.path).await?;

        tracing::debug!("Revoked display handle: {}", handle.id);
        Ok(())
    }

    /// Revoke every live handle.
    ///
    /// The live set is empty afterwards even if removing a file failed;
    /// the first failure is returned once all removals were attempted.
    pub async fn revoke_all(&mut self) -> Result<usize> {
        let handles = std::mem::take(&mut self.live);
        let count = handles.len();
        let mut first_error = None;

        for handle in handles {
            if let Err(e) = remove_if_present(&handle.path).await {
                tracing::warn!("Failed to revoke display handle {}: {}", handle.id, e);
                first_error.get_or_insert(e);
            }
        }

        if let Some(e) = first_error {
            return Err(e.into());
        }

        if count > 0 {
            tracing::debug!("Revoked {} display handles", count);
        }
        Ok(count)
    }

    /// Handles that have been created and not yet revoked
    pub fn live(&self) -> &[DisplayHandle] {
        &self.live
    }

    pub fn is_live(&self, handle: &DisplayHandle) -> bool {
        self.live.iter().any(|h| h.id == handle.id)
    }
}

impl Drop for HandlePool {
    fn drop(&mut self) {
        for handle in self.live.drain(..) {
            let _ = std::fs::remove_file(&handle.path);
        }
    }
}

async fn remove_if_present(path: &Path) -> std::io::Result<()> {
    match fs::remove_file(path).await {
        Err(e) if e.kind() != ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

/// File extension for a content type, "bin" when unknown
fn extension_for(mime_type: &str) -> &'static str {
    mime_guess::get_mime_extensions_str(mime_type)
        .and_then(|exts| exts.first().copied())
        .unwrap_or("bin")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn create_test_pool() -> (HandlePool, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let pool = HandlePool::new(temp_dir.path().join("handles"));
        pool.initialize().await.unwrap();
        (pool, temp_dir)
    }

    fn blob(bytes: &[u8]) -> ImageBlob {
        ImageBlob::new(bytes.to_vec(), "image/png")
    }

    #[tokio::test]
    async fn test_create_spools_bytes() {
        let (mut pool, _temp) = create_test_pool().await;

        let handle = pool.create(&blob(b"png bytes")).await.unwrap();

        assert_eq!(std::fs::read(handle.path()).unwrap(), b"png bytes");
        assert!(handle.url().starts_with("file://"));
        assert_eq!(handle.path().extension().unwrap(), "png");
        assert!(pool.is_live(&handle));
    }

    #[tokio::test]
    async fn test_same_blob_gets_distinct_handles() {
        let (mut pool, _temp) = create_test_pool().await;
        let data = blob(b"same");

        let a = pool.create(&data).await.unwrap();
        let b = pool.create(&data).await.unwrap();

        assert_ne!(a.path(), b.path());

        pool.revoke(&a).await.unwrap();
        assert!(!a.path().exists());
        assert!(b.path().exists());
    }

    #[tokio::test]
    async fn test_revoke_all() {
        let (mut pool, _temp) = create_test_pool().await;

        let handles = vec![
            pool.create(&blob(b"1")).await.unwrap(),
            pool.create(&blob(b"2")).await.unwrap(),
            pool.create(&blob(b"3")).await.unwrap(),
        ];

        assert_eq!(pool.revoke_all().await.unwrap(), 3);
        assert!(pool.live().is_empty());
        for handle in &handles {
            assert!(!handle.path().exists());
        }

        // Nothing left to revoke
        assert_eq!(pool.revoke_all().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_revoke_tolerates_missing_file() {
        let (mut pool, _temp) = create_test_pool().await;

        let handle = pool.create(&blob(b"x")).await.unwrap();
        std::fs::remove_file(handle.path()).unwrap();

        pool.revoke(&handle).await.unwrap();
        pool.revoke(&handle).await.unwrap();
        assert!(pool.live().is_empty());
    }

    #[tokio::test]
    async fn test_drop_revokes_live_handles() {
        let (mut pool, _temp) = create_test_pool().await;

        let handle = pool.create(&blob(b"x")).await.unwrap();
        drop(pool);

        assert!(!handle.path().exists());
    }

    #[tokio::test]
    async fn test_initialize_keeps_existing_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("handles");
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("other.png"), b"in use").unwrap();

        let pool = HandlePool::new(root.clone());
        pool.initialize().await.unwrap();

        assert_eq!(std::fs::read(root.join("other.png")).unwrap(), b"in use");
    }

    #[test]
    fn test_unknown_mime_falls_back() {
        assert_eq!(extension_for("application/x-made-up"), "bin");
        assert_eq!(extension_for("image/gif"), "gif");
    }
}
