//! Gallery view
//!
//! Renders the stored images as filterable cards and mediates every
//! user-triggered store mutation. The view owns the display handles of
//! the current render pass and revokes them before starting the next one.

use super::debounce::Debouncer;
use super::editor::{parse_tags, Editor, EditorForm, PendingUpload};
use crate::config::{DEFAULT_ALT_TEXT, DEFAULT_TITLE};
use crate::database::ImageRecord;
use crate::error::{HubError, Result};
use crate::storage::{DisplayHandle, HandlePool, HandleSession};
use crate::store::ImageStore;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// One rendered image post
#[derive(Debug, Clone, Serialize)]
pub struct Card {
    pub id: i64,
    #[serde(rename = "image", serialize_with = "serialize_handle")]
    pub handle: DisplayHandle,
    pub title: String,
    /// Tags joined with ", "
    pub tags: String,
    pub alt: String,
    pub created: i64,
}

impl Card {
    fn from_record(record: &ImageRecord, handle: DisplayHandle) -> Self {
        let title = if record.title.is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            record.title.clone()
        };
        let alt = if record.title.is_empty() {
            DEFAULT_ALT_TEXT.to_string()
        } else {
            record.title.clone()
        };

        Self {
            id: record.id,
            handle,
            title,
            tags: record.tags.join(", "),
            alt,
            created: record.created,
        }
    }

    /// URL the "open" action navigates to
    pub fn open_url(&self) -> String {
        self.handle.url()
    }
}

fn serialize_handle<S>(handle: &DisplayHandle, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&handle.url())
}

/// What the grid shows
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "cards", rename_all = "snake_case")]
pub enum GridContent {
    /// The store holds no images at all
    NoRecords,
    /// Images exist but none match the filter
    Empty,
    Cards(Vec<Card>),
}

/// Result of one render pass
#[derive(Debug, Clone, Serialize)]
pub struct GridView {
    /// Number of stored images, before filtering
    pub total: usize,
    pub filter: String,
    pub content: GridContent,
}

impl GridView {
    pub fn cards(&self) -> &[Card] {
        match &self.content {
            GridContent::Cards(cards) => cards,
            GridContent::NoRecords | GridContent::Empty => &[],
        }
    }

    /// True when the placeholder is shown instead of cards
    pub fn is_placeholder(&self) -> bool {
        !matches!(self.content, GridContent::Cards(_))
    }
}

/// Order records newest first and keep those whose search text contains
/// `filter`. An empty filter keeps everything.
pub fn select_records(mut records: Vec<ImageRecord>, filter: &str) -> Vec<ImageRecord> {
    records.sort_by(|a, b| b.created.cmp(&a.created));
    if !filter.is_empty() {
        records.retain(|record| record.search_text.contains(filter));
    }
    records
}

/// Normalize raw search box input into a filter
pub fn normalize_filter(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Outcome of saving the editor.
///
/// The record is stored whenever this is returned; `view` is the render
/// pass that followed and may have failed on its own.
#[derive(Debug)]
pub struct Saved {
    pub id: i64,
    pub view: Result<GridView>,
}

pub struct Gallery {
    store: Arc<dyn ImageStore>,
    cards: HandlePool,
    previews: HandlePool,
    card_handles: HashMap<i64, DisplayHandle>,
    editor: Editor,
    search_input: String,
    search: Debouncer<String>,
    // Dropped after the pools so their files are gone first
    session: HandleSession,
}

impl Gallery {
    /// Create a gallery spooling handles into its own session directory
    /// under `handles_root`.
    ///
    /// Settled search input arrives on the returned receiver; feed each
    /// value back through [`Gallery::refresh`].
    pub fn new(
        store: Arc<dyn ImageStore>,
        handles_root: PathBuf,
        search_debounce: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (search, fired) = Debouncer::new(search_debounce);
        let session = HandleSession::new(handles_root);
        let gallery = Self {
            store,
            cards: HandlePool::new(session.dir().join("cards")),
            previews: HandlePool::new(session.dir().join("previews")),
            card_handles: HashMap::new(),
            editor: Editor::new(),
            search_input: String::new(),
            search,
            session,
        };
        (gallery, fired)
    }

    /// Prepare the handle directories
    pub async fn initialize(&self) -> Result<()> {
        self.session.initialize().await?;
        self.cards.initialize().await?;
        self.previews.initialize().await?;
        Ok(())
    }

    /// Run one render pass with an already normalized filter.
    ///
    /// A failed pass leaves no card handles alive.
    pub async fn refresh(&mut self, filter: &str) -> Result<GridView> {
        self.card_handles.clear();
        self.cards.revoke_all().await?;

        match self.render(filter).await {
            Ok(view) => Ok(view),
            Err(e) => {
                self.card_handles.clear();
                if let Err(revoke_err) = self.cards.revoke_all().await {
                    tracing::warn!("Failed to revoke handles of a failed pass: {}", revoke_err);
                }
                Err(e)
            }
        }
    }

    async fn render(&mut self, filter: &str) -> Result<GridView> {
        let all = self.store.list_all().await?;
        let total = all.len();
        let visible = select_records(all, filter);

        let content = if total == 0 {
            GridContent::NoRecords
        } else if visible.is_empty() {
            GridContent::Empty
        } else {
            let mut cards = Vec::with_capacity(visible.len());
            for record in &visible {
                let handle = self.cards.create(&record.blob).await?;
                self.card_handles.insert(record.id, handle.clone());
                cards.push(Card::from_record(record, handle));
            }
            GridContent::Cards(cards)
        };

        tracing::debug!(
            "Rendered {} of {} images (filter: {:?})",
            visible.len(),
            total,
            filter
        );

        Ok(GridView {
            total,
            filter: filter.to_string(),
            content,
        })
    }

    /// Refresh with whatever is currently in the search box
    pub async fn refresh_current(&mut self) -> Result<GridView> {
        let filter = self.current_filter();
        self.refresh(&filter).await
    }

    /// Record search box input and schedule a debounced refresh
    pub fn search_input(&mut self, raw: impl Into<String>) {
        self.search_input = raw.into();
        self.search.trigger(normalize_filter(&self.search_input));
    }

    pub fn current_filter(&self) -> String {
        normalize_filter(&self.search_input)
    }

    /// Hold a picked file and open the editor with a live preview
    pub async fn pick_file(&mut self, pending: PendingUpload) -> Result<&EditorForm> {
        let preview = self.previews.create(&pending.blob).await?;
        if let Some(previous) = self.editor.open(pending, preview) {
            self.previews.revoke(&previous.preview).await?;
        }

        let form = self
            .editor
            .form()
            .ok_or_else(|| HubError::Generic("Editor did not open".to_string()))?;
        tracing::info!("Editing upload: {}", form.pending.file_name);
        Ok(form)
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> bool {
        self.editor.set_title(title)
    }

    pub fn set_tags(&mut self, tags: impl Into<String>) -> bool {
        self.editor.set_tags(tags)
    }

    /// Persist the pending file and re-render.
    ///
    /// Returns `None` when nothing was pending. If the store rejects the
    /// write the editor stays open with the file still held. Once the write
    /// succeeds the save is reported as done, whatever the re-render does.
    pub async fn save(&mut self) -> Result<Option<Saved>> {
        let Some(form) = self.editor.form() else {
            return Ok(None);
        };

        let title = form.title_input.trim().to_string();
        let tags = parse_tags(&form.tags_input);

        let id = match self.store.add(&form.pending.blob, &title, &tags).await {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!("Save failed, keeping editor open: {}", e);
                return Err(e);
            }
        };

        tracing::info!("Saved image #{}", id);

        let closed = self.close_editor().await;
        let view = closed.and(self.refresh_current().await);
        if let Err(e) = &view {
            tracing::warn!("Image #{} saved but the grid was not refreshed: {}", id, e);
        }

        Ok(Some(Saved { id, view }))
    }

    /// Discard the pending file without persisting it
    pub async fn cancel(&mut self) -> Result<()> {
        if self.close_editor().await? {
            tracing::info!("Upload discarded");
        }
        Ok(())
    }

    async fn close_editor(&mut self) -> Result<bool> {
        match self.editor.close() {
            Some(form) => {
                self.previews.revoke(&form.preview).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Delete an image the user has confirmed, then re-render
    pub async fn delete(&mut self, id: i64) -> Result<GridView> {
        self.store.delete_by_id(id).await?;
        self.refresh_current().await
    }

    /// Handle URL of a card from the current pass
    pub fn open(&self, id: i64) -> Result<String> {
        self.card_handles
            .get(&id)
            .map(DisplayHandle::url)
            .ok_or(HubError::ImageNotFound(id))
    }

    /// Card handles alive right now
    pub fn live_handles(&self) -> &[DisplayHandle] {
        self.cards.live()
    }

    /// Preview handles alive right now
    pub fn live_previews(&self) -> &[DisplayHandle] {
        self.previews.live()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{initialize_database, ImageBlob, ImageRepository, NewImage};
    use async_trait::async_trait;
    use sqlx::sqlite::SqlitePoolOptions;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tempfile::TempDir;

    const DEBOUNCE: Duration = Duration::from_millis(220);

    async fn memory_repo() -> ImageRepository {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        initialize_database(&pool).await.unwrap();
        ImageRepository::new(pool)
    }

    async fn create_test_gallery() -> (Gallery, ImageRepository, TempDir) {
        let repo = memory_repo().await;
        let temp_dir = TempDir::new().unwrap();
        let (gallery, _fired) = Gallery::new(
            Arc::new(repo.clone()),
            temp_dir.path().join("handles"),
            DEBOUNCE,
        );
        gallery.initialize().await.unwrap();
        (gallery, repo, temp_dir)
    }

    fn png() -> ImageBlob {
        ImageBlob::new(b"\x89PNG".to_vec(), "image/png")
    }

    fn record(id: i64, created: i64, search_text: &str) -> ImageRecord {
        ImageRecord {
            id,
            blob: png(),
            title: format!("Image {}", id),
            tags: vec![],
            created,
            search_text: search_text.to_string(),
        }
    }

    async fn insert(repo: &ImageRepository, title: &str, tags: &[&str], created: i64) -> i64 {
        let tags: Vec<String> = tags.iter().map(|t| t.to_string()).collect();
        repo.insert(&NewImage::new(&png(), title, &tags).created_at(created))
            .await
            .unwrap()
    }

    #[test]
    fn test_select_sorts_newest_first_and_is_stable() {
        let records = vec![
            record(1, 10, "a"),
            record(2, 30, "b"),
            record(3, 20, "c"),
            record(4, 30, "d"),
        ];

        let ids: Vec<i64> = select_records(records, "").iter().map(|r| r.id).collect();

        assert_eq!(ids, vec![2, 4, 3, 1]);
    }

    #[test]
    fn test_select_filter_is_subset_of_unfiltered() {
        let records = vec![
            record(1, 1, "cat pet"),
            record(2, 2, "dog pet"),
            record(3, 3, "bird"),
        ];

        let all = select_records(records.clone(), "");
        let pets = select_records(records, "pet");

        let expected: Vec<i64> = all
            .iter()
            .filter(|r| r.search_text.contains("pet"))
            .map(|r| r.id)
            .collect();
        let ids: Vec<i64> = pets.iter().map(|r| r.id).collect();
        assert_eq!(ids, expected);
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_normalize_filter() {
        assert_eq!(normalize_filter("  Cat  "), "cat");
        assert_eq!(normalize_filter(""), "");
    }

    #[tokio::test]
    async fn test_refresh_newest_first() {
        let (mut gallery, repo, _temp) = create_test_gallery().await;
        let older = insert(&repo, "Old", &[], 1_000).await;
        let newer = insert(&repo, "New", &[], 2_000).await;

        let view = gallery.refresh("").await.unwrap();

        let ids: Vec<i64> = view.cards().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![newer, older]);
        assert_eq!(view.total, 2);
    }

    #[tokio::test]
    async fn test_refresh_filters_and_keeps_total() {
        let (mut gallery, repo, _temp) = create_test_gallery().await;
        let cat = insert(&repo, "Cat", &[], 1).await;
        insert(&repo, "Dog", &[], 2).await;

        let view = gallery.refresh("cat").await.unwrap();
        assert_eq!(view.total, 2);
        assert_eq!(view.cards().len(), 1);
        assert_eq!(view.cards()[0].id, cat);

        let view = gallery.refresh("zzz").await.unwrap();
        assert_eq!(view.total, 2);
        assert!(matches!(view.content, GridContent::Empty));
        assert!(gallery.live_handles().is_empty());
    }

    #[tokio::test]
    async fn test_empty_store_is_distinct_from_no_matches() {
        let (mut gallery, _repo, _temp) = create_test_gallery().await;

        let view = gallery.refresh("").await.unwrap();

        assert_eq!(view.total, 0);
        assert!(matches!(view.content, GridContent::NoRecords));
        assert!(view.is_placeholder());
    }

    #[tokio::test]
    async fn test_card_fields() {
        let (mut gallery, repo, _temp) = create_test_gallery().await;
        insert(&repo, "Cat", &["pet", "orange"], 1).await;

        let view = gallery.refresh("").await.unwrap();
        let card = &view.cards()[0];

        assert_eq!(card.title, "Cat");
        assert_eq!(card.alt, "Cat");
        assert_eq!(card.tags, "pet, orange");
        assert_eq!(std::fs::read(card.handle.path()).unwrap(), b"\x89PNG");
        assert_eq!(gallery.open(card.id).unwrap(), card.open_url());
    }

    #[tokio::test]
    async fn test_only_latest_pass_handles_are_live() {
        let (mut gallery, repo, _temp) = create_test_gallery().await;
        insert(&repo, "One", &[], 1).await;
        insert(&repo, "Two", &[], 2).await;

        let mut earlier = Vec::new();
        for _ in 0..4 {
            let view = gallery.refresh("").await.unwrap();
            earlier.extend(view.cards().iter().map(|c| c.handle.clone()));
        }
        let latest = gallery.refresh("").await.unwrap();

        let live = gallery.live_handles();
        assert_eq!(live.len(), 2);
        for card in latest.cards() {
            assert!(live.contains(&card.handle));
            assert!(card.handle.path().exists());
        }
        for handle in &earlier {
            assert!(!live.contains(handle));
            assert!(!handle.path().exists());
        }
    }

    #[tokio::test]
    async fn test_pick_save_flow() {
        let (mut gallery, repo, _temp) = create_test_gallery().await;

        let form = gallery
            .pick_file(PendingUpload::new("kitten.png", png()))
            .await
            .unwrap();
        assert_eq!(form.title_input, "kitten");
        let preview = form.preview.clone();
        assert!(preview.path().exists());

        gallery.set_title("  Kitten  ");
        gallery.set_tags("pet, small cute");

        let saved = gallery.save().await.unwrap().unwrap();

        assert!(!gallery.editor().is_open());
        assert!(!preview.path().exists());
        assert!(gallery.live_previews().is_empty());
        assert_eq!(saved.view.unwrap().cards()[0].id, saved.id);

        let stored = repo.list_all().await.unwrap();
        assert_eq!(stored[0].title, "Kitten");
        assert_eq!(stored[0].tags, vec!["pet", "small", "cute"]);
        assert_eq!(stored[0].search_text, "kitten pet small cute");
    }

    #[tokio::test]
    async fn test_save_preserves_search_term() {
        let (mut gallery, repo, _temp) = create_test_gallery().await;
        insert(&repo, "Dog", &[], 1).await;

        gallery.search_input("  CAT ");
        gallery
            .pick_file(PendingUpload::new("cat.png", png()))
            .await
            .unwrap();

        let view = gallery.save().await.unwrap().unwrap().view.unwrap();

        assert_eq!(view.filter, "cat");
        assert_eq!(view.total, 2);
        assert_eq!(view.cards().len(), 1);
    }

    #[tokio::test]
    async fn test_save_without_pending_file() {
        let (mut gallery, _repo, _temp) = create_test_gallery().await;

        assert!(gallery.save().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cancel_discards_pending() {
        let (mut gallery, repo, _temp) = create_test_gallery().await;

        let preview = gallery
            .pick_file(PendingUpload::new("a.png", png()))
            .await
            .unwrap()
            .preview
            .clone();

        gallery.cancel().await.unwrap();

        assert!(!gallery.editor().is_open());
        assert!(!preview.path().exists());
        assert!(repo.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_repick_revokes_old_preview() {
        let (mut gallery, _repo, _temp) = create_test_gallery().await;

        let first = gallery
            .pick_file(PendingUpload::new("a.png", png()))
            .await
            .unwrap()
            .preview
            .clone();
        gallery
            .pick_file(PendingUpload::new("b.png", png()))
            .await
            .unwrap();

        assert!(!first.path().exists());
        assert_eq!(gallery.live_previews().len(), 1);
        assert_eq!(gallery.editor().form().unwrap().title_input, "b");
    }

    #[tokio::test]
    async fn test_delete_then_refresh() {
        let (mut gallery, repo, _temp) = create_test_gallery().await;
        let keep = insert(&repo, "Keep", &[], 1).await;
        let gone = insert(&repo, "Gone", &[], 2).await;

        let view = gallery.delete(gone).await.unwrap();

        let ids: Vec<i64> = view.cards().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![keep]);
        assert!(gallery.open(gone).is_err());

        // Deleting again is harmless
        gallery.delete(gone).await.unwrap();
    }

    struct FailingStore {
        fail_writes: AtomicBool,
        fail_reads: AtomicBool,
        inner: ImageRepository,
    }

    #[async_trait]
    impl ImageStore for FailingStore {
        async fn add(&self, blob: &ImageBlob, title: &str, tags: &[String]) -> Result<i64> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(HubError::WriteFailed(sqlx::Error::PoolClosed));
            }
            self.inner.insert(&NewImage::new(blob, title, tags)).await
        }

        async fn list_all(&self) -> Result<Vec<ImageRecord>> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(HubError::ReadFailed(sqlx::Error::PoolClosed));
            }
            self.inner.list_all().await
        }

        async fn delete_by_id(&self, id: i64) -> Result<()> {
            self.inner.delete(id).await
        }
    }

    async fn create_failing_gallery() -> (Gallery, Arc<FailingStore>, TempDir) {
        let store = Arc::new(FailingStore {
            fail_writes: AtomicBool::new(false),
            fail_reads: AtomicBool::new(false),
            inner: memory_repo().await,
        });
        let temp_dir = TempDir::new().unwrap();
        let (gallery, _fired) =
            Gallery::new(store.clone(), temp_dir.path().join("handles"), DEBOUNCE);
        gallery.initialize().await.unwrap();
        (gallery, store, temp_dir)
    }

    fn spooled_files(dir: &std::path::Path) -> usize {
        std::fs::read_dir(dir)
            .map(|entries| entries.count())
            .unwrap_or(0)
    }

    #[tokio::test]
    async fn test_failed_save_keeps_editor_open() {
        let (mut gallery, store, _temp) = create_failing_gallery().await;
        store.fail_writes.store(true, Ordering::SeqCst);

        gallery
            .pick_file(PendingUpload::new("keep.png", png()))
            .await
            .unwrap();
        gallery.set_title("Keep me");

        let result = gallery.save().await;
        assert!(matches!(result, Err(HubError::WriteFailed(_))));

        let form = gallery.editor().form().unwrap();
        assert_eq!(form.title_input, "Keep me");
        assert!(form.preview.path().exists());

        // Retry succeeds once the store recovers
        store.fail_writes.store(false, Ordering::SeqCst);
        let saved = gallery.save().await.unwrap().unwrap();
        assert_eq!(saved.view.unwrap().cards()[0].title, "Keep me");
    }

    #[tokio::test]
    async fn test_save_reported_when_refresh_fails() {
        let (mut gallery, store, _temp) = create_failing_gallery().await;
        store.fail_reads.store(true, Ordering::SeqCst);

        let preview = gallery
            .pick_file(PendingUpload::new("stored.png", png()))
            .await
            .unwrap()
            .preview
            .clone();

        let saved = gallery.save().await.unwrap().unwrap();

        assert!(matches!(saved.view, Err(HubError::ReadFailed(_))));
        assert!(!gallery.editor().is_open());
        assert!(!preview.path().exists());
        assert!(gallery.live_handles().is_empty());

        // Nothing is pending any more, and the record is there
        assert!(gallery.save().await.unwrap().is_none());
        let stored = store.inner.list_all().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, saved.id);
        assert_eq!(stored[0].title, "stored");

        store.fail_reads.store(false, Ordering::SeqCst);
        let view = gallery.refresh_current().await.unwrap();
        assert_eq!(view.cards()[0].id, saved.id);
    }

    #[tokio::test]
    async fn test_failed_read_leaves_no_handles() {
        let (mut gallery, store, _temp) = create_failing_gallery().await;
        store.inner.insert(&NewImage::new(&png(), "One", &[])).await.unwrap();
        store.inner.insert(&NewImage::new(&png(), "Two", &[])).await.unwrap();

        let view = gallery.refresh("").await.unwrap();
        let earlier: Vec<DisplayHandle> = view.cards().iter().map(|c| c.handle.clone()).collect();
        let cards_dir = earlier[0].path().parent().unwrap().to_path_buf();
        assert_eq!(spooled_files(&cards_dir), 2);

        store.fail_reads.store(true, Ordering::SeqCst);
        let result = gallery.refresh("").await;

        assert!(matches!(result, Err(HubError::ReadFailed(_))));
        assert!(gallery.live_handles().is_empty());
        assert_eq!(spooled_files(&cards_dir), 0);
        for handle in &earlier {
            assert!(!handle.path().exists());
        }
        for card in view.cards() {
            assert!(gallery.open(card.id).is_err());
        }
    }

    #[tokio::test]
    async fn test_failed_spool_leaves_no_handles() {
        let (mut gallery, store, _temp) = create_failing_gallery().await;
        store.inner.insert(&NewImage::new(&png(), "One", &[])).await.unwrap();
        store.inner.insert(&NewImage::new(&png(), "Two", &[])).await.unwrap();

        let view = gallery.refresh("").await.unwrap();
        let cards_dir = view.cards()[0].handle.path().parent().unwrap().to_path_buf();

        // Without its directory no handle can be spooled
        std::fs::remove_dir_all(&cards_dir).unwrap();
        let result = gallery.refresh("").await;

        assert!(matches!(result, Err(HubError::Io(_))));
        assert!(gallery.live_handles().is_empty());
        assert!(gallery.open(view.cards()[0].id).is_err());
        assert_eq!(spooled_files(&cards_dir), 0);
    }

    #[tokio::test]
    async fn test_galleries_on_one_root_keep_their_handles() {
        let repo = memory_repo().await;
        insert(&repo, "Shared", &[], 1).await;
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("handles");

        let (mut first, _fired) = Gallery::new(Arc::new(repo.clone()), root.clone(), DEBOUNCE);
        first.initialize().await.unwrap();
        let handle = first.refresh("").await.unwrap().cards()[0].handle.clone();

        let (mut second, _fired) = Gallery::new(Arc::new(repo), root.clone(), DEBOUNCE);
        second.initialize().await.unwrap();
        second.refresh("").await.unwrap();
        drop(second);

        assert!(first.live_handles().contains(&handle));
        assert_eq!(std::fs::read(handle.path()).unwrap(), b"\x89PNG");

        drop(first);
        assert_eq!(std::fs::read_dir(&root).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_grid_view_json() {
        let (mut gallery, repo, _temp) = create_test_gallery().await;
        insert(&repo, "Cat", &["pet"], 1).await;

        let view = gallery.refresh("").await.unwrap();
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["total"], 1);
        assert_eq!(json["content"]["kind"], "cards");
        let card = &json["content"]["cards"][0];
        assert_eq!(card["title"], "Cat");
        assert_eq!(card["tags"], "pet");
        assert_eq!(card["image"], view.cards()[0].open_url());

        let empty = gallery.refresh("zzz").await.unwrap();
        let json = serde_json::to_value(&empty).unwrap();
        assert_eq!(json["content"]["kind"], "empty");
        assert!(json["content"].get("cards").is_none());
    }

    #[tokio::test]
    async fn test_search_input_is_debounced() {
        let repo = memory_repo().await;
        insert(&repo, "Cat", &[], 1).await;
        insert(&repo, "Dog", &[], 2).await;
        let temp_dir = TempDir::new().unwrap();
        let window = Duration::from_millis(30);
        let (mut gallery, mut fired) =
            Gallery::new(Arc::new(repo), temp_dir.path().join("handles"), window);
        gallery.initialize().await.unwrap();

        gallery.search_input("c");
        gallery.search_input("ca");
        gallery.search_input(" Cat");

        let filter = tokio::time::timeout(Duration::from_secs(5), fired.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(filter, "cat");

        tokio::time::sleep(window * 3).await;
        assert!(fired.try_recv().is_err());

        let view = gallery.refresh(&filter).await.unwrap();
        assert_eq!(view.cards().len(), 1);
    }
}
