//! Blob sink abstraction for image bytes.
//!
//! The catalog treats image storage as an external collaborator: bytes
//! go in, a stable retrievable locator comes out. Locators are opaque
//! path strings (`/uploads/<name>`) that clients resolve against the
//! storage base URL.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CoreError;

/// URL prefix under which stored blobs are served.
pub const LOCATOR_PREFIX: &str = "/uploads/";

#[async_trait]
pub trait BlobSink: Send + Sync {
    /// Store `bytes`, returning a retrievable locator. `suggested_name`
    /// is advisory; only its extension is preserved.
    async fn store(&self, bytes: &[u8], suggested_name: &str) -> Result<String, CoreError>;

    /// Delete the blob behind `locator`. Deleting an unknown locator is
    /// not an error.
    async fn delete(&self, locator: &str) -> Result<(), CoreError>;
}

/// Filesystem-backed sink. Files land directly under `root` with a
/// generated UUID name, so locators never contain client-chosen paths.
pub struct LocalBlobSink {
    root: PathBuf,
}

impl LocalBlobSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Map a locator back to the file path, rejecting anything that does
    /// not look like a locator this sink issued.
    fn path_for(&self, locator: &str) -> Result<PathBuf, CoreError> {
        let name = locator
            .strip_prefix(LOCATOR_PREFIX)
            .ok_or_else(|| CoreError::Validation(format!("Unknown locator '{locator}'")))?;
        if name.is_empty() || name.contains('/') || name.contains("..") {
            return Err(CoreError::Validation(format!(
                "Unknown locator '{locator}'"
            )));
        }
        Ok(self.root.join(name))
    }
}

/// Extract a safe lowercase file extension from a client-supplied name.
fn safe_extension(suggested_name: &str) -> Option<String> {
    let ext = Path::new(suggested_name).extension()?.to_str()?;
    if ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(ext.to_ascii_lowercase())
    } else {
        None
    }
}

#[async_trait]
impl BlobSink for LocalBlobSink {
    async fn store(&self, bytes: &[u8], suggested_name: &str) -> Result<String, CoreError> {
        let name = match safe_extension(suggested_name) {
            Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
            None => Uuid::new_v4().to_string(),
        };

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| CoreError::Internal(format!("Failed to create upload dir: {e}")))?;
        tokio::fs::write(self.root.join(&name), bytes)
            .await
            .map_err(|e| CoreError::Internal(format!("Failed to store blob: {e}")))?;

        Ok(format!("{LOCATOR_PREFIX}{name}"))
    }

    async fn delete(&self, locator: &str) -> Result<(), CoreError> {
        let path = self.path_for(locator)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CoreError::Internal(format!("Failed to delete blob: {e}"))),
        }
    }
}
