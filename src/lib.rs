pub mod book;
pub mod capture;
pub mod config;
pub mod events;
pub mod flows;
pub mod models;
pub mod store;

// Re-export commonly used types for convenience.
pub use book::ContactBook;
pub use capture::{CameraCapability, CaptureRequest, PhotoLibrary, ReferenceResolver};
pub use config::AppConfig;
pub use flows::{AddContactFlow, CaptureDisposition, FlowPhase};
pub use models::{Contact, ContactDraft, ContactId, DraftField, PhotoReference};
pub use store::ContactStore;
