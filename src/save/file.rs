//! File-system save trigger.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};
use crate::save::naming::{numbered_filename, sanitize_filename, MAX_UNIQUE_ATTEMPTS};
use crate::save::trigger::SaveTrigger;

/// Saves artifacts into a directory.
///
/// The final name is claimed first with an exclusive create, so a file that
/// already exists is never overwritten. Bytes are then written to a hidden
/// `.<uuid>.part` file and renamed over the claimed name.
#[derive(Debug, Clone)]
pub struct FileSaver {
    directory: PathBuf,
}

impl FileSaver {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

#[async_trait]
impl SaveTrigger for FileSaver {
    async fn save(&self, artifact: Vec<u8>, filename: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.directory).await?;

        let target = claim_target(&self.directory.join(sanitize_filename(filename))).await?;
        let temp_path = self
            .directory
            .join(format!(".{}.part", uuid::Uuid::new_v4()));

        if let Err(e) = write_and_rename(&temp_path, &artifact, &target).await {
            remove_quietly(&temp_path).await;
            remove_quietly(&target).await;
            return Err(e);
        }

        tracing::info!("Saved {} bytes to {}", artifact.len(), target.display());
        Ok(target)
    }
}

/// Create an empty placeholder at the first free candidate name.
async fn claim_target(path: &Path) -> Result<PathBuf> {
    for counter in 0..=MAX_UNIQUE_ATTEMPTS {
        let candidate = numbered_filename(path, counter);
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
            .await
        {
            Ok(_) => return Ok(candidate),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e.into()),
        }
    }

    Err(Error::Download(format!(
        "No free file name for {} after {} attempts",
        path.display(),
        MAX_UNIQUE_ATTEMPTS
    )))
}

async fn write_and_rename(temp_path: &Path, bytes: &[u8], target: &Path) -> Result<()> {
    let mut file = File::create(temp_path).await?;
    file.write_all(bytes).await?;
    file.flush().await?;
    file.sync_all().await?;
    drop(file);

    fs::rename(temp_path, target).await?;
    Ok(())
}

async fn remove_quietly(path: &Path) {
    if let Err(e) = fs::remove_file(path).await {
        if e.kind() != ErrorKind::NotFound {
            tracing::warn!("Failed to remove {}: {}", path.display(), e);
        }
    }
}
