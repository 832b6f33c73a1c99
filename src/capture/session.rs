use crate::capture::PhotoLibrary;
use crate::models::{ContactId, PhotoReference};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// One capture invocation handed to the platform camera.
///
/// Carries the flow id so the eventual result can be routed back to the flow
/// that asked for it (and dropped if that flow is gone by then).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRequest {
    pub flow_id: Uuid,
    pub destination: PathBuf,
}

/// Platform camera seam.
///
/// `capture` is asynchronous by contract: the host must later deliver exactly
/// one outcome for the request through the coordinator's capture-result
/// entrypoint. Writing the image bytes to `request.destination` is the
/// capability's job.
pub trait CameraCapability {
    fn capture(&mut self, request: CaptureRequest) -> Result<()>;
}

/// Converts a local capture file into the opaque reference a rendering
/// surface hands to its image loader.
pub trait ReferenceResolver {
    fn resolve(&self, local_path: &Path) -> PhotoReference;
}

/// Default resolver producing a provider-scoped `contactbook://` URI.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheProviderResolver;

impl ReferenceResolver for CacheProviderResolver {
    fn resolve(&self, local_path: &Path) -> PhotoReference {
        let file_name = local_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        PhotoReference {
            uri: format!("contactbook://photos/{file_name}"),
            local_path: local_path.to_path_buf(),
        }
    }
}

/// Temp-file destination for the captures of one open flow.
///
/// The same destination is reused (overwritten) across repeated attempts
/// within the flow. The file never outlives the flow: confirm promotes it
/// into the photo library, every other exit path deletes it.
#[derive(Debug)]
pub struct PhotoCaptureSession {
    destination: PathBuf,
}

impl PhotoCaptureSession {
    pub fn new(cache_dir: &Path, flow_id: Uuid, file_prefix: &str) -> Result<Self> {
        fs::create_dir_all(cache_dir)
            .with_context(|| format!("Failed to create capture cache dir {}", cache_dir.display()))?;
        Ok(Self {
            destination: cache_dir.join(format!("{file_prefix}_{flow_id}.jpg")),
        })
    }

    /// Stable for the flow's lifetime.
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn request(&self, flow_id: Uuid) -> CaptureRequest {
        CaptureRequest {
            flow_id,
            destination: self.destination.clone(),
        }
    }

    /// Maps a capture outcome to a photo reference; failure yields nothing
    /// and the caller keeps whatever reference it already had.
    pub fn resolve(&self, success: bool, resolver: &dyn ReferenceResolver) -> Option<PhotoReference> {
        success.then(|| resolver.resolve(&self.destination))
    }

    /// Moves the captured file into the durable library under the committed
    /// contact's id and returns a reference over its new location.
    pub fn promote(
        &self,
        library: &PhotoLibrary,
        id: ContactId,
        resolver: &dyn ReferenceResolver,
    ) -> Result<PhotoReference> {
        let final_path = library.adopt(&self.destination, id)?;
        Ok(resolver.resolve(&final_path))
    }

    /// Deletes the temp file if an attempt left one behind.
    pub fn discard(&self) -> Result<()> {
        if self.destination.exists() {
            fs::remove_file(&self.destination).with_context(|| {
                format!("Failed to remove capture file {}", self.destination.display())
            })?;
        }
        Ok(())
    }
}
