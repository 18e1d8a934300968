//! One-shot image commands
//!
//! Each command drives the gallery through the same events the
//! interactive browser uses.

use super::output::Output;
use anyhow::{bail, Context, Result};
use imagehub::app::AppState;
use imagehub::gallery::{normalize_filter, Outcome, UiEvent};
use imagehub::services::read_upload;
use std::path::Path;

pub async fn add(
    state: &AppState,
    file: &Path,
    title: Option<String>,
    tags: Option<String>,
) -> Result<()> {
    let out = Output::new();
    let (mut gallery, _fired) = state.gallery().await?;

    let pending = read_upload(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    gallery.dispatch(UiEvent::FilePicked(pending)).await?;

    if let Some(title) = title {
        gallery.dispatch(UiEvent::TitleEdited(title)).await?;
    }
    if let Some(tags) = tags {
        gallery.dispatch(UiEvent::TagsEdited(tags)).await?;
    }

    match gallery
        .dispatch(UiEvent::Save)
        .await
        .context("Failed to save image")?
    {
        Outcome::Saved { id, view } => {
            out.status("Saved", &format!("image #{}", id));
            match view {
                Ok(view) => out.grid(&view, false),
                Err(e) => out.error(&format!("Gallery not refreshed: {}", e)),
            }
            Ok(())
        }
        other => bail!("Unexpected outcome: {:?}", other),
    }
}

pub async fn list(state: &AppState, filter: Option<String>) -> Result<()> {
    let out = Output::new();
    let (mut gallery, _fired) = state.gallery().await?;

    let filter = normalize_filter(filter.as_deref().unwrap_or_default());
    let view = gallery
        .dispatch(UiEvent::SearchFired(filter))
        .await
        .context("Failed to list images")?;

    if let Outcome::Rendered(view) = view {
        out.grid(&view, false);
    }
    Ok(())
}

pub async fn delete(state: &AppState, id: i64, yes: bool) -> Result<()> {
    let out = Output::new();
    let (mut gallery, _fired) = state.gallery().await?;

    let Outcome::ConfirmDelete(id) = gallery.dispatch(UiEvent::DeleteRequested(id)).await? else {
        return Ok(());
    };

    let ask = !yes && state.settings.confirm_deletes;
    if ask && !confirm(format!("Delete post #{}?", id)).await? {
        out.status("Skipped", &format!("image #{}", id));
        return Ok(());
    }

    let outcome = gallery
        .dispatch(UiEvent::DeleteConfirmed(id))
        .await
        .with_context(|| format!("Failed to delete image #{}", id))?;

    out.status("Deleted", &format!("image #{}", id));
    if let Outcome::Rendered(view) = outcome {
        out.grid(&view, false);
    }
    Ok(())
}

/// Keep one image's handle alive until the user presses Enter
pub async fn open(state: &AppState, id: i64) -> Result<()> {
    let out = Output::new();
    let (mut gallery, _fired) = state.gallery().await?;

    gallery.dispatch(UiEvent::Load).await?;
    let Outcome::Open(url) = gallery.dispatch(UiEvent::OpenRequested(id)).await? else {
        bail!("Image #{} cannot be opened", id);
    };

    println!("{}", url);
    out.hint("press Enter to release the handle");

    tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        std::io::stdin().read_line(&mut line).map(|_| ())
    })
    .await??;

    drop(gallery);
    out.status("Released", &format!("image #{}", id));
    Ok(())
}

async fn confirm(prompt: String) -> Result<bool> {
    let answer = tokio::task::spawn_blocking(move || {
        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
    })
    .await??;
    Ok(answer)
}
