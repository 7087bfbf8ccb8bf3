//! Application settings and paths.
//!
//! Settings live in an optional JSON file under the XDG config directory
//! (`~/.config/port-scanner/settings.json` on Linux). A missing file means
//! built-in defaults.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application directory paths following XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/port-scanner)
    pub config_dir: PathBuf,
}

impl Paths {
    /// Locate the platform directories, if the platform has any.
    pub fn discover() -> Option<Self> {
        let project = ProjectDirs::from("com", "port-scanner", "port-scanner")?;
        Some(Self {
            config_dir: project.config_dir().to_path_buf(),
        })
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Default connection timeout in seconds.
    pub default_timeout_secs: f64,
    /// Default number of concurrent probes per host.
    pub default_threads: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            default_timeout_secs: 1.0,
            default_threads: 100,
        }
    }
}

impl AppSettings {
    /// Load settings from the default location.
    pub fn load() -> ConfigResult<Self> {
        let Some(paths) = Paths::discover() else {
            return Ok(Self::default());
        };

        let file = paths.settings_file();
        if !file.exists() {
            debug!(path = %file.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        debug!(path = %path.display(), "loaded settings file");
        serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))
    }
}
