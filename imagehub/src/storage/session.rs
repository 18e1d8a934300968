//! Handle sessions
//!
//! Every gallery spools its handles into a session directory of its own
//! under the shared handle root, so several processes can use one data
//! directory at once. A session names its owning process in an owner file.
//! Sessions whose owner is no longer running are swept when a new session
//! starts.

use crate::config::SESSION_OWNER_FILE_NAME;
use crate::error::Result;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use sysinfo::{Pid, ProcessesToUpdate, System};
use tokio::fs;
use uuid::Uuid;

/// Private handle directory of one gallery
#[derive(Debug)]
pub struct HandleSession {
    root: PathBuf,
    id: Uuid,
    dir: PathBuf,
}

impl HandleSession {
    pub fn new(root: PathBuf) -> Self {
        let id = Uuid::new_v4();
        let dir = root.join(id.to_string());
        Self { root, id, dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Claim the session directory, then sweep abandoned sessions.
    ///
    /// The directory is staged under a dot-name and renamed into place once
    /// its owner file is written, so a concurrent sweep never sees it unowned.
    pub async fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await?;

        if !fs::try_exists(&self.dir).await? {
            let staging = self.root.join(format!(".{}.tmp", self.id));
            fs::create_dir_all(&staging).await?;
            fs::write(
                staging.join(SESSION_OWNER_FILE_NAME),
                std::process::id().to_string(),
            )
            .await?;
            fs::rename(&staging, &self.dir).await?;
        }

        let swept = sweep_abandoned(&self.root, &self.dir).await?;
        if swept > 0 {
            tracing::info!("Removed {} abandoned handle sessions", swept);
        }

        tracing::debug!("Handle session started at: {:?}", self.dir);
        Ok(())
    }
}

impl Drop for HandleSession {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_dir_all(&self.dir) {
            if e.kind() != ErrorKind::NotFound {
                tracing::warn!("Failed to remove handle session {:?}: {}", self.dir, e);
            }
        }
    }
}

/// Remove session directories whose owner has exited
async fn sweep_abandoned(root: &Path, own: &Path) -> Result<usize> {
    let mut system = System::new();
    let mut swept = 0usize;

    let mut entries = fs::read_dir(root).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        // Dot-names are sessions still being staged
        let staging = entry.file_name().to_string_lossy().starts_with('.');
        if path == own || staging || !entry.file_type().await?.is_dir() {
            continue;
        }

        if owner_is_running(&mut system, &path).await {
            continue;
        }

        match fs::remove_dir_all(&path).await {
            Ok(()) => swept += 1,
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to remove handle session {:?}: {}", path, e),
        }
    }

    Ok(swept)
}

async fn owner_is_running(system: &mut System, session: &Path) -> bool {
    let Ok(content) = fs::read_to_string(session.join(SESSION_OWNER_FILE_NAME)).await else {
        return false;
    };
    let Ok(pid) = content.trim().parse::<u32>() else {
        return false;
    };
    if pid == std::process::id() {
        return true;
    }

    let pid = Pid::from_u32(pid);
    system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
    system.process(pid).is_some()
}
