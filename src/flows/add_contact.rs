//! The add-contact flow.
//!
//! A transient state machine that coordinates field entry and the
//! photo-capture sub-flow, producing a committed `Contact` on confirm. One
//! flow owns one capture session; both live exactly as long as the flow.

use crate::capture::{CameraCapability, PhotoCaptureSession, PhotoLibrary, ReferenceResolver};
use crate::config::CaptureSettings;
use crate::models::{ContactDraft, ContactId, DraftField};
use crate::store::ContactStore;
use anyhow::{bail, Result};
use std::path::Path;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowPhase {
    /// Fields under edit; no capture outstanding.
    Editing,
    /// A capture request is with the camera; waiting for its one result.
    PhotoPending,
    Committed,
    Cancelled,
}

/// Outcome of routing a camera result to a flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureDisposition {
    /// The draft now carries a photo reference.
    PhotoAttached,
    /// The capture failed; the draft keeps whatever it had.
    Failed,
    /// No capture was pending for this flow (stale or duplicate result).
    Ignored,
}

pub struct AddContactFlow {
    flow_id: Uuid,
    phase: FlowPhase,
    draft: ContactDraft,
    session: PhotoCaptureSession,
    keep_failed_captures: bool,
}

impl AddContactFlow {
    /// Initializes an empty draft and allocates a fresh temp-file
    /// destination for this flow's captures.
    pub fn open(cache_dir: &Path, settings: &CaptureSettings) -> Result<Self> {
        let flow_id = Uuid::new_v4();
        let session = PhotoCaptureSession::new(cache_dir, flow_id, &settings.temp_file_prefix)?;
        Ok(Self {
            flow_id,
            phase: FlowPhase::Editing,
            draft: ContactDraft::default(),
            session,
            keep_failed_captures: settings.keep_failed_captures,
        })
    }

    pub fn flow_id(&self) -> Uuid {
        self.flow_id
    }

    pub fn phase(&self) -> FlowPhase {
        self.phase
    }

    pub fn draft(&self) -> &ContactDraft {
        &self.draft
    }

    pub fn capture_destination(&self) -> &Path {
        self.session.destination()
    }

    /// Plain assignment; validation happens only at the confirm guard.
    pub fn edit_field(&mut self, field: DraftField, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    /// Hands the camera a request aimed at this flow's destination.
    ///
    /// Rejected while a previous request is still unresolved: the camera
    /// contract delivers exactly one result per request, and overlapping
    /// requests would make that result unattributable.
    pub fn request_photo(&mut self, camera: &mut dyn CameraCapability) -> Result<()> {
        match self.phase {
            FlowPhase::Editing => {}
            FlowPhase::PhotoPending => bail!("A capture request is already pending for this flow"),
            FlowPhase::Committed | FlowPhase::Cancelled => {
                bail!("Flow is closed and no longer accepts capture requests")
            }
        }
        camera.capture(self.session.request(self.flow_id))?;
        self.phase = FlowPhase::PhotoPending;
        Ok(())
    }

    /// Applies the camera's one result for the outstanding request.
    ///
    /// Success attaches the resolved reference to the draft; a later
    /// successful retake overwrites it. A failed capture leaves the draft
    /// untouched and surfaces no error; a filesystem fault while releasing
    /// the failed attempt's bytes is a different fault class and does
    /// propagate. A result with no capture pending is ignored.
    pub fn apply_capture_result(
        &mut self,
        success: bool,
        resolver: &dyn ReferenceResolver,
    ) -> Result<CaptureDisposition> {
        if self.phase != FlowPhase::PhotoPending {
            return Ok(CaptureDisposition::Ignored);
        }
        self.phase = FlowPhase::Editing;
        match self.session.resolve(success, resolver) {
            Some(reference) => {
                self.draft.photo = Some(reference);
                Ok(CaptureDisposition::PhotoAttached)
            }
            None => {
                if !self.keep_failed_captures {
                    self.session.discard()?;
                }
                Ok(CaptureDisposition::Failed)
            }
        }
    }

    /// Confirm is surfaced to callers as disabled, never as an error, while
    /// any required field is empty or whitespace-only or a capture is still
    /// pending.
    pub fn can_confirm(&self) -> bool {
        self.phase == FlowPhase::Editing && self.draft.required_fields_present()
    }

    /// Commits the draft: takes a fresh id from the store, promotes the
    /// captured photo into the library, and appends the finished contact.
    ///
    /// Returns `None` and leaves the flow open while the guard blocks it.
    /// The draft is consumed only after the fallible file work succeeds, so
    /// a filesystem fault leaves the entered fields intact and the flow
    /// editable.
    pub fn confirm(
        &mut self,
        store: &mut ContactStore,
        library: &PhotoLibrary,
        resolver: &dyn ReferenceResolver,
    ) -> Result<Option<ContactId>> {
        if !self.can_confirm() {
            return Ok(None);
        }
        let id = store.next_id();
        let photo = if self.draft.photo.is_some() {
            Some(self.session.promote(library, id, resolver)?)
        } else {
            // A failed attempt may have left bytes at the destination.
            self.session.discard()?;
            None
        };
        let mut draft = std::mem::take(&mut self.draft);
        draft.photo = photo;
        store.add(draft.into_contact(id));
        self.phase = FlowPhase::Committed;
        Ok(Some(id))
    }

    /// Valid from any phase; discards the draft and deletes the temp
    /// capture file. A camera result arriving after this is ignored.
    pub fn cancel(&mut self) -> Result<()> {
        self.phase = FlowPhase::Cancelled;
        self.draft = ContactDraft::default();
        self.session.discard()
    }
}
