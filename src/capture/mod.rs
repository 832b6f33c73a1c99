//! Camera capture plumbing: per-flow temp destinations, the camera
//! capability seam, and durable photo storage for committed contacts.

mod library;
mod session;

pub use library::PhotoLibrary;
pub use session::{
    CacheProviderResolver, CameraCapability, CaptureRequest, PhotoCaptureSession,
    ReferenceResolver,
};
