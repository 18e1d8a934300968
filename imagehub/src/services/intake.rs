//! Upload intake
//!
//! Reads a picked file from disk into a pending upload. Nothing is
//! persisted here; the file is held in memory until the editor saves it.

use crate::database::ImageBlob;
use crate::error::{HubError, Result};
use crate::gallery::PendingUpload;
use std::path::Path;

/// Read an image file into memory
pub async fn read_upload(path: &Path) -> Result<PendingUpload> {
    let file_name = path
        .file_name()
        .map(|name| sanitize_filename(&name.to_string_lossy()))
        .filter(|name| !name.is_empty())
        .ok_or_else(|| HubError::Generic(format!("Not a file: {}", path.display())))?;

    let mime_type = mime_guess::from_path(path).first_or_octet_stream();
    if mime_type.type_().as_str() != "image" {
        return Err(HubError::Generic(format!(
            "Unsupported file type {} for {}",
            mime_type, file_name
        )));
    }

    let bytes = tokio::fs::read(path).await?;

    tracing::info!(
        "Picked file: {} ({}, {} bytes)",
        file_name,
        mime_type,
        bytes.len()
    );

    Ok(PendingUpload::new(
        file_name,
        ImageBlob::new(bytes, mime_type.essence_str()),
    ))
}

/// Strip path separators and null bytes from a file name
fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .filter(|c| *c != '/' && *c != '\\' && *c != '\0')
        .take(255)
        .collect()
}
