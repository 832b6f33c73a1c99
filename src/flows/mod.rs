mod add_contact;

pub use add_contact::{AddContactFlow, CaptureDisposition, FlowPhase};
