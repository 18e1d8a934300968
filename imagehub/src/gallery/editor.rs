//! Upload editor
//!
//! Holds a picked file in memory until the user saves or discards it.
//! The editor is either `Closed` or `Open` with exactly one pending file.

use crate::database::ImageBlob;
use crate::storage::DisplayHandle;

/// A picked file that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpload {
    pub file_name: String,
    pub blob: ImageBlob,
}

impl PendingUpload {
    pub fn new(file_name: impl Into<String>, blob: ImageBlob) -> Self {
        Self {
            file_name: file_name.into(),
            blob,
        }
    }

    /// Title suggested for this file: its name without the last extension
    pub fn default_title(&self) -> String {
        strip_extension(&self.file_name).to_string()
    }
}

/// Form contents while the editor is open
#[derive(Debug)]
pub struct EditorForm {
    pub pending: PendingUpload,
    pub preview: DisplayHandle,
    pub title_input: String,
    pub tags_input: String,
}

#[derive(Debug, Default)]
pub enum EditorState {
    #[default]
    Closed,
    Open(EditorForm),
}

/// Upload editor state machine
#[derive(Debug, Default)]
pub struct Editor {
    state: EditorState,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the editor for a picked file, pre-filling the title.
    ///
    /// Returns the form that was replaced when a file was already pending.
    pub fn open(&mut self, pending: PendingUpload, preview: DisplayHandle) -> Option<EditorForm> {
        let form = EditorForm {
            title_input: pending.default_title(),
            tags_input: String::new(),
            pending,
            preview,
        };

        match std::mem::replace(&mut self.state, EditorState::Open(form)) {
            EditorState::Open(previous) => Some(previous),
            EditorState::Closed => None,
        }
    }

    /// Close the editor, handing back whatever was pending
    pub fn close(&mut self) -> Option<EditorForm> {
        match std::mem::take(&mut self.state) {
            EditorState::Open(form) => Some(form),
            EditorState::Closed => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, EditorState::Open(_))
    }

    pub fn form(&self) -> Option<&EditorForm> {
        match &self.state {
            EditorState::Open(form) => Some(form),
            EditorState::Closed => None,
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> bool {
        match &mut self.state {
            EditorState::Open(form) => {
                form.title_input = title.into();
                true
            }
            EditorState::Closed => false,
        }
    }

    pub fn set_tags(&mut self, tags: impl Into<String>) -> bool {
        match &mut self.state {
            EditorState::Open(form) => {
                form.tags_input = tags.into();
                true
            }
            EditorState::Closed => false,
        }
    }
}

/// Drop the final `.ext` suffix of a file name, if any
pub fn strip_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(dot) if dot + 1 < file_name.len() && !file_name[dot + 1..].contains('/') => {
            &file_name[..dot]
        }
        _ => file_name,
    }
}

/// Split a tag field on commas and whitespace, discarding empty tokens
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
