use crate::models::{ContactId, PhotoReference};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Durable home for the photos of committed contacts.
///
/// Capture temp files are adopted into this directory at confirm time and
/// removed again when their contact is deleted.
pub struct PhotoLibrary {
    photos_dir: PathBuf,
}

impl PhotoLibrary {
    pub fn new(photos_dir: &Path) -> Self {
        Self {
            photos_dir: photos_dir.to_path_buf(),
        }
    }

    pub fn photos_dir(&self) -> &Path {
        &self.photos_dir
    }

    /// Moves a capture file into the library, named after the contact's id.
    ///
    /// Cache and photos dirs share the workspace root, so a rename suffices.
    pub fn adopt(&self, capture: &Path, id: ContactId) -> Result<PathBuf> {
        fs::create_dir_all(&self.photos_dir)?;
        let path = self.photos_dir.join(format!("{id}.jpg"));
        fs::rename(capture, &path).with_context(|| {
            format!(
                "Failed to move capture {} into photo library",
                capture.display()
            )
        })?;
        Ok(path)
    }

    /// Removes the photo file backing `reference`, if it still exists.
    pub fn remove(&self, reference: &PhotoReference) -> Result<()> {
        if reference.local_path.exists() {
            fs::remove_file(&reference.local_path).with_context(|| {
                format!("Failed to remove photo {}", reference.local_path.display())
            })?;
        }
        Ok(())
    }
}
