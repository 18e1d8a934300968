//! UI event dispatch
//!
//! Maps every event a UI shell can emit onto a gallery action.

use super::editor::PendingUpload;
use super::view::{Gallery, GridView};
use crate::error::Result;

/// Events emitted by a UI shell
#[derive(Debug)]
pub enum UiEvent {
    /// Initial render, or an explicit reload
    Load,
    FilePicked(PendingUpload),
    TitleEdited(String),
    TagsEdited(String),
    Save,
    Cancel,
    /// Click on the dimmed area around the editor
    BackdropClicked,
    DeleteRequested(i64),
    /// The user answered yes to the delete prompt
    DeleteConfirmed(i64),
    OpenRequested(i64),
    /// Raw search box contents after a keystroke
    SearchInput(String),
    /// A debounced search settled on this filter
    SearchFired(String),
}

/// What the shell should show after an event
#[derive(Debug)]
pub enum Outcome {
    Rendered(GridView),
    EditorOpened { title: String, preview_url: String },
    EditorUpdated,
    EditorClosed,
    /// The image is stored; `view` is the re-render that followed
    Saved { id: i64, view: Result<GridView> },
    /// Ask the user before deleting this image
    ConfirmDelete(i64),
    Open(String),
    SearchScheduled,
    /// The event does not apply in the current state
    Ignored,
}

impl Gallery {
    /// Apply one UI event
    pub async fn dispatch(&mut self, event: UiEvent) -> Result<Outcome> {
        let outcome = match event {
            UiEvent::Load => Outcome::Rendered(self.refresh_current().await?),
            UiEvent::FilePicked(pending) => {
                let form = self.pick_file(pending).await?;
                Outcome::EditorOpened {
                    title: form.title_input.clone(),
                    preview_url: form.preview.url(),
                }
            }
            UiEvent::TitleEdited(title) => edited(self.set_title(title)),
            UiEvent::TagsEdited(tags) => edited(self.set_tags(tags)),
            UiEvent::Save => match self.save().await? {
                Some(saved) => Outcome::Saved {
                    id: saved.id,
                    view: saved.view,
                },
                None => Outcome::EditorClosed,
            },
            UiEvent::Cancel | UiEvent::BackdropClicked => {
                if !self.editor().is_open() {
                    return Ok(Outcome::Ignored);
                }
                self.cancel().await?;
                Outcome::EditorClosed
            }
            UiEvent::DeleteRequested(id) => Outcome::ConfirmDelete(id),
            UiEvent::DeleteConfirmed(id) => Outcome::Rendered(self.delete(id).await?),
            UiEvent::OpenRequested(id) => Outcome::Open(self.open(id)?),
            UiEvent::SearchInput(raw) => {
                self.search_input(raw);
                Outcome::SearchScheduled
            }
            UiEvent::SearchFired(filter) => Outcome::Rendered(self.refresh(&filter).await?),
        };

        Ok(outcome)
    }
}

fn edited(applied: bool) -> Outcome {
    if applied {
        Outcome::EditorUpdated
    } else {
        Outcome::Ignored
    }
}
