use anyhow::Result;
use contactbook::{CameraCapability, CaptureRequest, ContactBook};
use std::env;
use std::fs;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tempfile::TempDir;

// Tests in one binary run in parallel but share the process environment;
// holding this for the harness lifetime keeps CONTACTBOOK_HOME stable.
static HOME_LOCK: Mutex<()> = Mutex::new(());

/// Gives a test an isolated Contactbook home for its whole duration.
pub struct Harness {
    home: TempDir,
    _guard: MutexGuard<'static, ()>,
}

impl Harness {
    pub fn new() -> Self {
        let guard = HOME_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let home = TempDir::new().expect("failed to create temp home");
        env::set_var("CONTACTBOOK_HOME", home.path());
        Self {
            home,
            _guard: guard,
        }
    }

    pub fn home_path(&self) -> &Path {
        self.home.path()
    }

    pub fn book(&self) -> ContactBook {
        ContactBook::new().expect("failed to initialize ContactBook")
    }
}

/// Camera stand-in: records each request and writes bytes to the destination
/// the way a real capture would. The test decides the delivered outcome.
pub struct ScriptedCamera {
    pub requests: Vec<CaptureRequest>,
    pub write_bytes: bool,
}

impl ScriptedCamera {
    pub fn new() -> Self {
        Self {
            requests: Vec::new(),
            write_bytes: true,
        }
    }

    pub fn last_request(&self) -> &CaptureRequest {
        self.requests.last().expect("no capture request recorded")
    }
}

impl CameraCapability for ScriptedCamera {
    fn capture(&mut self, request: CaptureRequest) -> Result<()> {
        if self.write_bytes {
            fs::write(&request.destination, b"jpeg-bytes")?;
        }
        self.requests.push(request);
        Ok(())
    }
}
