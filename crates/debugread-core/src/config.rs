//! User configuration (`~/.consul-debug-read/config.yaml`).
//!
//! The file carries the location of the extracted debug bundle and, optionally,
//! overrides for the telemetry reference fetch.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DebugReadError, Result};
use crate::telemetry::TELEMETRY_URL;

/// Directory under `$HOME` holding the user config.
pub const CONFIG_DIR_NAME: &str = ".consul-debug-read";
/// Config file name inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.yaml";
/// Default timeout for the telemetry reference fetch.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// Settings read from the user config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReaderConfig {
    #[serde(rename = "DebugDirectoryPath", default)]
    pub debug_directory_path: String,

    #[serde(
        rename = "TelemetryURL",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub telemetry_url: Option<String>,

    #[serde(
        rename = "FetchTimeoutSecs",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub fetch_timeout_secs: Option<u64>,
}

impl ReaderConfig {
    /// Config pointing at a bundle directory with every other setting defaulted.
    pub fn for_directory(dir: impl Into<String>) -> Self {
        Self {
            debug_directory_path: dir.into(),
            ..Self::default()
        }
    }

    /// Read and validate the config at `path`.
    ///
    /// Fails fast when `DebugDirectoryPath` is absent or empty.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| DebugReadError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg: ReaderConfig =
            serde_yaml::from_str(&contents).map_err(|source| DebugReadError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        if cfg.debug_directory_path.trim().is_empty() {
            return Err(DebugReadError::MissingConfigValue {
                path: path.to_path_buf(),
                key: "DebugDirectoryPath",
            });
        }
        Ok(cfg)
    }

    /// Write the config as YAML, creating the parent directory if needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        let write_err = |reason: String| DebugReadError::ConfigWrite {
            path: path.to_path_buf(),
            reason,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| write_err(e.to_string()))?;
        }
        let yaml = serde_yaml::to_string(self).map_err(|e| write_err(e.to_string()))?;
        fs::write(path, yaml).map_err(|e| write_err(e.to_string()))
    }

    pub fn debug_directory(&self) -> PathBuf {
        PathBuf::from(&self.debug_directory_path)
    }

    pub fn telemetry_url(&self) -> &str {
        self.telemetry_url.as_deref().unwrap_or(TELEMETRY_URL)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(
            self.fetch_timeout_secs
                .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS),
        )
    }
}

/// Default config location: `$HOME/.consul-debug-read/config.yaml`.
///
/// Falls back to the working directory when `HOME` is unset.
pub fn default_config_path() -> PathBuf {
    let home = std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)
}
