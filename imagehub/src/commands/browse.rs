//! Interactive gallery
//!
//! Plain input lines are search keystrokes and go through the debounced
//! search. Lines starting with ':' are gallery commands.

use super::output::Output;
use anyhow::Result;
use imagehub::app::AppState;
use imagehub::gallery::{Gallery, Outcome, UiEvent};
use imagehub::services::read_upload;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

/// A parsed input line
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Event(UiEventKind),
    Pick(PathBuf),
    Help,
    Quit,
    Unknown(String),
}

/// Events that can be typed directly
#[derive(Debug, PartialEq, Eq)]
enum UiEventKind {
    Load,
    Title(String),
    Tags(String),
    Save,
    Cancel,
    Delete(i64),
    Open(i64),
    Search(String),
}

impl UiEventKind {
    fn into_event(self) -> UiEvent {
        match self {
            UiEventKind::Load => UiEvent::Load,
            UiEventKind::Title(title) => UiEvent::TitleEdited(title),
            UiEventKind::Tags(tags) => UiEvent::TagsEdited(tags),
            UiEventKind::Save => UiEvent::Save,
            UiEventKind::Cancel => UiEvent::Cancel,
            UiEventKind::Delete(id) => UiEvent::DeleteRequested(id),
            UiEventKind::Open(id) => UiEvent::OpenRequested(id),
            UiEventKind::Search(raw) => UiEvent::SearchInput(raw),
        }
    }
}

fn parse_line(line: &str) -> Input {
    let Some(command) = line.trim_start().strip_prefix(':') else {
        return Input::Event(UiEventKind::Search(line.to_string()));
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command.trim(), ""),
    };

    let id = || arg.parse::<i64>().ok();

    match (name, arg.is_empty()) {
        ("q" | "quit", _) => Input::Quit,
        ("help" | "h", _) => Input::Help,
        ("reload", _) => Input::Event(UiEventKind::Load),
        ("add", false) => Input::Pick(PathBuf::from(arg)),
        ("title", _) => Input::Event(UiEventKind::Title(arg.to_string())),
        ("tags", _) => Input::Event(UiEventKind::Tags(arg.to_string())),
        ("save", _) => Input::Event(UiEventKind::Save),
        ("cancel", _) => Input::Event(UiEventKind::Cancel),
        ("delete", false) => match id() {
            Some(id) => Input::Event(UiEventKind::Delete(id)),
            None => Input::Unknown(line.to_string()),
        },
        ("open", false) => match id() {
            Some(id) => Input::Event(UiEventKind::Open(id)),
            None => Input::Unknown(line.to_string()),
        },
        _ => Input::Unknown(line.to_string()),
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

pub async fn browse(state: &AppState) -> Result<()> {
    let out = Output::new();
    let (mut gallery, mut fired) = state.gallery().await?;

    print_help(&out);
    let loaded = gallery.dispatch(UiEvent::Load).await;
    show(&out, loaded);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending_delete: Option<i64> = None;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };

                if let Some(id) = pending_delete.take() {
                    if is_yes(&line) {
                        let deleted = gallery.dispatch(UiEvent::DeleteConfirmed(id)).await;
                        show(&out, deleted);
                    } else {
                        out.status("Kept", &format!("image #{}", id));
                    }
                    continue;
                }

                match parse_line(&line) {
                    Input::Quit => break,
                    Input::Help => print_help(&out),
                    Input::Unknown(text) => out.error(&format!("Unknown command: {}", text.trim())),
                    Input::Pick(path) => pick(&out, &mut gallery, path).await,
                    Input::Event(kind) => {
                        match gallery.dispatch(kind.into_event()).await {
                            Ok(Outcome::ConfirmDelete(id)) => {
                                eprint!("Delete post #{}? [y/N] ", id);
                                pending_delete = Some(id);
                            }
                            other => show(&out, other),
                        }
                    }
                }
            }
            Some(filter) = fired.recv() => {
                let rendered = gallery.dispatch(UiEvent::SearchFired(filter)).await;
                show(&out, rendered);
            }
        }
    }

    out.status("Closing", "gallery");
    Ok(())
}

async fn pick(out: &Output, gallery: &mut Gallery, path: PathBuf) {
    match read_upload(&path).await {
        Ok(pending) => {
            let opened = gallery.dispatch(UiEvent::FilePicked(pending)).await;
            show(out, opened);
        }
        Err(e) => out.error(&format!("{}: {}", path.display(), e)),
    }
}

fn show(out: &Output, outcome: imagehub::error::Result<Outcome>) {
    match outcome {
        Ok(Outcome::Rendered(view)) => out.grid(&view, true),
        Ok(Outcome::EditorOpened { title, preview_url }) => {
            out.status("Editing", &title);
            out.hint(&preview_url);
            out.hint(":title <text>, :tags <a, b>, then :save or :cancel");
        }
        Ok(Outcome::EditorUpdated) => out.status("Updated", "upload form"),
        Ok(Outcome::EditorClosed) => out.status("Closed", "upload form"),
        Ok(Outcome::Saved { id, view }) => {
            out.status("Saved", &format!("image #{}", id));
            match view {
                Ok(view) => out.grid(&view, true),
                Err(e) => out.error(&format!("Gallery not refreshed: {}", e)),
            }
        }
        Ok(Outcome::Open(url)) => println!("{}", url),
        Ok(Outcome::SearchScheduled) => {}
        Ok(Outcome::Ignored) => out.hint("nothing to do"),
        Ok(Outcome::ConfirmDelete(id)) => out.hint(&format!("confirm deletion of #{}", id)),
        Err(e) => out.error(&e.to_string()),
    }
}

fn print_help(out: &Output) {
    out.status("Browse", "type to search, or use a command");
    out.hint(":add <file>     pick an image to upload");
    out.hint(":title <text>   set the upload title");
    out.hint(":tags <a, b>    set the upload tags");
    out.hint(":save/:cancel   finish or discard the upload");
    out.hint(":delete <id>    delete a post");
    out.hint(":open <id>      print a post's image URL");
    out.hint(":reload         re-render the grid");
    out.hint(":quit           leave");
}
