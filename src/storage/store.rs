//! Filesystem-backed image store.
//!
//! The store maps image names to files directly under a single root
//! directory; that flat directory is the service's entire persisted state.
//! Callers must only pass names produced by [`generate_name`] or accepted by
//! [`validate_name`], so joining them onto the root is safe.
//!
//! Writes go through a hidden temporary sibling and a rename, so a partially
//! written image is never visible at its final path.
//!
//! [`generate_name`]: super::name::generate_name
//! [`validate_name`]: super::name::validate_name

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use tracing::debug;

use crate::error::StorageError;

/// Filesystem gateway for stored images.
///
/// Cheap to clone; clones share the same root.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: Arc<PathBuf>,
}

impl ImageStore {
    /// Create a store rooted at the given directory.
    ///
    /// The directory is created lazily on the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Arc::new(root.into()),
        }
    }

    /// The directory under which all images live.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Write an image under the given name, creating the root directory
    /// (and parents) if absent.
    ///
    /// An existing file of the same name is overwritten; with random 128-bit
    /// identifiers a collision is treated as a negligible non-event rather
    /// than an error.
    pub async fn put(&self, name: &str, bytes: &[u8]) -> Result<(), StorageError> {
        fs::create_dir_all(self.root.as_path()).await?;

        let final_path = self.entry_path(name);
        let tmp_path = self.root.join(format!(".{name}.tmp"));

        fs::write(&tmp_path, bytes).await?;
        if let Err(err) = fs::rename(&tmp_path, &final_path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(err.into());
        }

        debug!(name = name, bytes = bytes.len(), "stored image");
        Ok(())
    }

    /// Whether an image with the given name exists.
    pub async fn exists(&self, name: &str) -> bool {
        fs::try_exists(self.entry_path(name)).await.unwrap_or(false)
    }

    /// Delete the image with the given name.
    ///
    /// Returns [`StorageError::NotFound`] if no such image exists.
    pub async fn delete(&self, name: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.entry_path(name)).await {
            Ok(()) => {
                debug!(name = name, "deleted image");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(StorageError::NotFound(name.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }
}
