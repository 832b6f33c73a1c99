//! Core contact data model.
//!
//! A `Contact` is immutable once committed; everything mutable lives in the
//! `ContactDraft` held by an open add-contact flow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Identifier handed out by the store when a contact is committed.
///
/// Ids are strictly increasing within one session and never reassigned.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ContactId(pub u64);

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Provider-scoped locator a rendering surface can hand to its image loader.
///
/// The `uri` is the opaque half consumers see; `local_path` is the file it
/// resolves over, kept so the owning side can manage the file's lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoReference {
    pub uri: String,
    pub local_path: PathBuf,
}

/// A finalized, immutable contact record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub photo: Option<PhotoReference>,
    pub created_at: DateTime<Utc>,
}

/// Field selector for draft edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    Name,
    Email,
    Phone,
}

/// In-progress contact under edit inside an open flow.
#[derive(Debug, Clone, Default)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub photo: Option<PhotoReference>,
}

impl ContactDraft {
    /// Plain assignment; validation happens only at the confirm guard.
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::Name => self.name = value,
            DraftField::Email => self.email = value,
            DraftField::Phone => self.phone = value,
        }
    }

    /// True when name, email, and phone are all non-empty after trimming.
    pub fn required_fields_present(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.email.trim().is_empty()
            && !self.phone.trim().is_empty()
    }

    pub fn into_contact(self, id: ContactId) -> Contact {
        Contact {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            photo: self.photo,
            created_at: Utc::now(),
        }
    }
}
