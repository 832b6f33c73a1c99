//! Append-only activity journal.
//!
//! Every store or flow mutation is recorded as one JSONL line so a session
//! can be inspected after the fact. Contact state itself stays in memory;
//! only the journal touches disk.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const ACTIVITY_LOG_FILE_NAME: &str = "activity.jsonl";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    FlowOpened,
    CaptureRequested,
    CaptureResolved,
    FlowCancelled,
    ContactAdded,
    ContactDeleted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub event_id: Uuid,
    pub event_type: EventType,
    pub timestamp: DateTime<Utc>,
    pub details: serde_json::Value,
}

/// File-backed journal of session activity.
pub struct ActivityLog {
    path: PathBuf,
}

impl ActivityLog {
    pub fn new(log_dir: &Path) -> Self {
        Self {
            path: log_dir.join(ACTIVITY_LOG_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, event_type: EventType, details: serde_json::Value) -> Result<Uuid> {
        let event = ActivityEvent {
            event_id: Uuid::new_v4(),
            event_type,
            timestamp: Utc::now(),
            details,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(serde_json::to_string(&event)?.as_bytes())?;
        file.write_all(b"\n")?;
        Ok(event.event_id)
    }

    pub fn load(&self) -> Result<Vec<ActivityEvent>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.path)?;
        let mut events = Vec::new();
        for line in data.lines().filter(|l| !l.trim().is_empty()) {
            let event: ActivityEvent = serde_json::from_str(line)?;
            events.push(event);
        }
        Ok(events)
    }
}
