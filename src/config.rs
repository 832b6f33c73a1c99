//! Install configuration and workspace layout for Contactbook.
//!
//! Stored in a machine-readable TOML file located at:
//!   %APPDATA%/Contactbook/config/config.toml on Windows
//!   $XDG_DATA_HOME/Contactbook/config/config.toml on Linux
//!   ~/Library/Application Support/Contactbook/config/config.toml on macOS
//!
//! The config tracks per-install capture preferences. Contact state itself is
//! never persisted; only config, captured photos, and the activity journal
//! live under the workspace root.

use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Standard relative path to the config file (resolved per OS at runtime).
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Root configuration persisted per installation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Camera-capture options (temp file naming, failed-attempt retention).
    #[serde(default)]
    pub capture: CaptureSettings,
}

/// Capture-related preferences tied to the local install.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureSettings {
    /// File-name prefix for per-flow capture destinations in the cache dir.
    #[serde(default = "default_temp_file_prefix")]
    pub temp_file_prefix: String,
    /// Whether bytes written by a failed capture attempt stay on disk until
    /// the next attempt overwrites them.
    #[serde(default = "default_keep_failed_captures")]
    pub keep_failed_captures: bool,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            temp_file_prefix: default_temp_file_prefix(),
            keep_failed_captures: default_keep_failed_captures(),
        }
    }
}

fn default_temp_file_prefix() -> String {
    "capture".to_string()
}

const fn default_keep_failed_captures() -> bool {
    false
}

/// Filesystem locations for everything Contactbook writes.
#[derive(Debug, Clone)]
pub struct WorkspacePaths {
    pub root: PathBuf,
    /// Per-flow temp capture destinations live here.
    pub cache_dir: PathBuf,
    /// Durable photo library for committed contacts.
    pub photos_dir: PathBuf,
    /// Activity journal (JSONL).
    pub log_dir: PathBuf,
}

/// Returns the root directory where Contactbook stores data.
///
/// Order of precedence:
/// 1. `CONTACTBOOK_HOME` environment variable.
/// 2. OS-specific data directory via `directories::BaseDirs`.
pub fn workspace_root() -> Result<PathBuf> {
    if let Ok(path) = env::var("CONTACTBOOK_HOME") {
        return Ok(PathBuf::from(path));
    }
    let base_dirs = BaseDirs::new().context("Unable to determine OS data directory")?;
    Ok(base_dirs.data_dir().join("Contactbook"))
}

pub fn config_dir() -> Result<PathBuf> {
    Ok(workspace_root()?.join("config"))
}

/// Path to the config file.
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Ensures the workspace directory tree exists and returns its layout.
pub fn ensure_workspace_structure() -> Result<WorkspacePaths> {
    let root = workspace_root()?;
    let paths = WorkspacePaths {
        cache_dir: root.join("cache"),
        photos_dir: root.join("photos"),
        log_dir: root.join("log"),
        root,
    };
    for dir in [&paths.cache_dir, &paths.photos_dir, &paths.log_dir] {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create workspace dir {}", dir.display()))?;
    }
    fs::create_dir_all(config_dir()?)?;
    Ok(paths)
}

/// Loads the install config, falling back to defaults when absent.
pub fn load_or_default() -> Result<AppConfig> {
    let path = config_file_path()?;
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config at {}", path.display()))?;
    let config = toml::from_str(&raw)
        .with_context(|| format!("Malformed config at {}", path.display()))?;
    Ok(config)
}

pub fn save(config: &AppConfig) -> Result<()> {
    let path = config_file_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let raw = toml::to_string_pretty(config)?;
    fs::write(&path, raw)
        .with_context(|| format!("Failed to write config at {}", path.display()))?;
    Ok(())
}
