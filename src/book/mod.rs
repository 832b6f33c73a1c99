//! The session coordinator.
//!
//! `ContactBook` is the single sequential control context the rest of the
//! system talks to: it owns the committed-contact store, the photo library,
//! the activity journal, and at most one live add-contact flow. Camera
//! results enter here and are routed to the live flow only, so a result that
//! arrives after cancellation lands on nothing.

use crate::capture::{CacheProviderResolver, CameraCapability, PhotoLibrary, ReferenceResolver};
use crate::config::{self, AppConfig, WorkspacePaths};
use crate::events::{ActivityLog, EventType};
use crate::flows::{AddContactFlow, CaptureDisposition, FlowPhase};
use crate::models::{Contact, ContactDraft, ContactId, DraftField};
use crate::store::ContactStore;
use anyhow::{bail, Context, Result};
use serde_json::json;
use uuid::Uuid;

pub struct ContactBook {
    pub config: AppConfig,
    pub paths: WorkspacePaths,
    store: ContactStore,
    library: PhotoLibrary,
    log: ActivityLog,
    resolver: Box<dyn ReferenceResolver>,
    active_flow: Option<AddContactFlow>,
}

impl ContactBook {
    pub fn new() -> Result<Self> {
        let paths = config::ensure_workspace_structure()?;
        let config = config::load_or_default()?;
        Ok(Self::from_parts(config, paths))
    }

    pub fn with_config(config: AppConfig) -> Result<Self> {
        let paths = config::ensure_workspace_structure()?;
        Ok(Self::from_parts(config, paths))
    }

    fn from_parts(config: AppConfig, paths: WorkspacePaths) -> Self {
        let library = PhotoLibrary::new(&paths.photos_dir);
        let log = ActivityLog::new(&paths.log_dir);
        Self {
            config,
            paths,
            store: ContactStore::new(),
            library,
            log,
            resolver: Box::new(CacheProviderResolver),
            active_flow: None,
        }
    }

    /// Swaps in a different reference resolver (e.g. a platform provider).
    pub fn with_resolver(mut self, resolver: Box<dyn ReferenceResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Starts the add-contact flow. Only one flow is live at a time.
    pub fn open_add_flow(&mut self) -> Result<Uuid> {
        if self.active_flow.is_some() {
            bail!("An add-contact flow is already open");
        }
        let flow = AddContactFlow::open(&self.paths.cache_dir, &self.config.capture)?;
        let flow_id = flow.flow_id();
        self.log
            .append(EventType::FlowOpened, json!({ "flow_id": flow_id }))?;
        self.active_flow = Some(flow);
        Ok(flow_id)
    }

    pub fn edit_field(&mut self, field: DraftField, value: &str) -> Result<()> {
        let flow = self
            .active_flow
            .as_mut()
            .context("No open add-contact flow")?;
        flow.edit_field(field, value);
        Ok(())
    }

    /// Asks the camera for a photo aimed at the live flow's destination.
    pub fn request_photo(&mut self, camera: &mut dyn CameraCapability) -> Result<()> {
        let flow = self
            .active_flow
            .as_mut()
            .context("No open add-contact flow")?;
        flow.request_photo(camera)?;
        let flow_id = flow.flow_id();
        self.log
            .append(EventType::CaptureRequested, json!({ "flow_id": flow_id }))?;
        Ok(())
    }

    /// Routes a camera outcome to the live flow.
    ///
    /// The flow-id check makes a stale result (for a cancelled or already
    /// committed flow) provably a no-op: it is reported as ignored and
    /// touches no draft.
    pub fn deliver_capture_result(
        &mut self,
        flow_id: Uuid,
        success: bool,
    ) -> Result<CaptureDisposition> {
        let disposition = match self.active_flow.as_mut() {
            Some(flow) if flow.flow_id() == flow_id => {
                flow.apply_capture_result(success, self.resolver.as_ref())?
            }
            _ => CaptureDisposition::Ignored,
        };
        self.log.append(
            EventType::CaptureResolved,
            json!({
                "flow_id": flow_id,
                "success": success,
                "applied": disposition != CaptureDisposition::Ignored,
            }),
        )?;
        Ok(disposition)
    }

    /// Whether the live flow's confirm action is currently enabled.
    pub fn can_confirm(&self) -> bool {
        self.active_flow
            .as_ref()
            .map_or(false, AddContactFlow::can_confirm)
    }

    /// Commits the live flow's draft.
    ///
    /// Returns `None` while required fields block the confirm; the flow
    /// stays open for further edits. On success the flow is discarded.
    pub fn confirm(&mut self) -> Result<Option<ContactId>> {
        let Some(flow) = self.active_flow.as_mut() else {
            return Ok(None);
        };
        let committed = flow.confirm(&mut self.store, &self.library, self.resolver.as_ref())?;
        if let Some(id) = committed {
            self.active_flow = None;
            self.log
                .append(EventType::ContactAdded, json!({ "contact_id": id }))?;
        }
        Ok(committed)
    }

    /// Cancels the live flow; a no-op when none is open. The draft is
    /// discarded and the flow's temp capture file deleted.
    pub fn cancel(&mut self) -> Result<()> {
        if let Some(mut flow) = self.active_flow.take() {
            let flow_id = flow.flow_id();
            flow.cancel()?;
            self.log
                .append(EventType::FlowCancelled, json!({ "flow_id": flow_id }))?;
        }
        Ok(())
    }

    /// Deletes the contact currently at `index` along with its photo file.
    /// Silent no-op when the index is out of bounds.
    pub fn delete_contact(&mut self, index: usize) -> Result<()> {
        let Some(contact) = self.store.delete(index) else {
            return Ok(());
        };
        self.remove_photo_and_log(&contact)
    }

    /// Deletes the contact with `id`, valid regardless of intervening
    /// mutations. Silent no-op when no such contact exists.
    pub fn remove_contact(&mut self, id: ContactId) -> Result<()> {
        let Some(contact) = self.store.remove(id) else {
            return Ok(());
        };
        self.remove_photo_and_log(&contact)
    }

    fn remove_photo_and_log(&mut self, contact: &Contact) -> Result<()> {
        if let Some(reference) = &contact.photo {
            self.library.remove(reference)?;
        }
        self.log
            .append(EventType::ContactDeleted, json!({ "contact_id": contact.id }))?;
        Ok(())
    }

    /// Read-only ordered view for the rendering surface.
    pub fn contacts(&self) -> &[Contact] {
        self.store.snapshot()
    }

    pub fn draft(&self) -> Option<&ContactDraft> {
        self.active_flow.as_ref().map(AddContactFlow::draft)
    }

    pub fn flow_phase(&self) -> Option<FlowPhase> {
        self.active_flow.as_ref().map(AddContactFlow::phase)
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.log
    }
}
