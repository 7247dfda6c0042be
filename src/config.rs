//! Runtime configuration: an optional JSON file, overridden by CLI flags.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    /// The config file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid JSON or has unknown keys.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The platform does not provide a data directory.
    #[error("could not determine XDG data directory")]
    NoDataDir,
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Whether submitted reports ask for a veterinarian's review.
    #[serde(default = "default_true")]
    pub request_doctor: bool,

    /// JSON animal catalog replacing the built-in one.
    #[serde(default)]
    pub catalog: Option<PathBuf>,

    /// Directory for the outbox and the log file.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            request_doctor: true,
            catalog: None,
            data_dir: None,
        }
    }
}

impl Config {
    /// Loads configuration.
    ///
    /// With an explicit path the file must exist. Without one, the default
    /// location (`~/.config/zooport/config.json`) is used when present and
    /// built-in defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => match fs::read_to_string(path) {
                Ok(content) => Ok(serde_json::from_str(&content)?),
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    Err(ConfigError::NotFound(path.to_path_buf()))
                }
                Err(e) => Err(e.into()),
            },
            None => match default_config_path() {
                Some(path) => Self::load_or_default(&path),
                None => Ok(Self::default()),
            },
        }
    }

    /// Loads the file at `path`, or returns defaults if it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Returns the data directory, falling back to `~/.local/share/zooport`.
    pub fn resolve_data_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_dir()
                .map(|d| d.join("zooport"))
                .ok_or(ConfigError::NoDataDir),
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("zooport").join("config.json"))
}
