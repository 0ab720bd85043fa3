//! Application configuration module
//!
//! Settings are stored with `confy` in the OS-specific config directory.
//! The engine itself never touches disk; hosts turn [`Settings`] into
//! [`CompareOptions`] and hand those to the pipeline.

use crate::constant::{
    APP_NAME, APP_ORGANIZATION, APP_QUALIFIER, DEFAULT_REPORT_NAME, EMPTY_LINE_MARKER,
    DIFF_TIMEOUT, PREVIEW_MAX_CHARS,
};
use crate::diff::CompareOptions;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Confy(#[from] confy::ConfyError),
}

pub struct Config {
    pub settings: Settings,
}

impl Config {
    /// Load configuration from disk, creating default if it doesn't exist
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Save current configuration to disk
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings: Settings = confy::load_path(path)?;
        info!("Load config from {:?}", path);
        Ok(Self { settings })
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        confy::store_path(path, &self.settings)?;
        info!("Save config to {:?}", path);
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(confy::get_configuration_file_path(APP_NAME, None)?)
    }

    /// Get the application data directory
    /// Falls back to a local "data" directory if platform dirs are unavailable
    pub fn data_dir(&self) -> PathBuf {
        if let Some(proj_dirs) = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME) {
            proj_dirs.data_dir().to_path_buf()
        } else {
            PathBuf::from("data")
        }
    }

    /// Directory that exported reports are written to
    pub fn export_dir(&self) -> PathBuf {
        self.settings
            .export_dir
            .clone()
            .unwrap_or_else(|| self.data_dir().join("reports"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::load().unwrap_or_else(|e| {
            warn!("Failed to load config, using defaults: {}", e);
            Self {
                settings: Settings::default(),
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Filename stem for exported reports
    #[serde(default = "default_report_name")]
    pub report_name: String,

    /// Navigation preview length in characters
    #[serde(default = "default_preview_length")]
    pub preview_length: usize,

    /// Shown in place of blank lines
    #[serde(default = "default_empty_line_marker")]
    pub empty_line_marker: String,

    /// Where reports go; the data directory when unset
    #[serde(default)]
    pub export_dir: Option<PathBuf>,

    /// Treat whitespace-only differences as no change
    #[serde(default)]
    pub ignore_whitespace_only: bool,

    /// Time budget for finding a minimal diff, in milliseconds
    #[serde(default = "default_diff_timeout_ms")]
    pub diff_timeout_ms: u64,
}

impl Settings {
    pub fn compare_options(&self) -> CompareOptions {
        CompareOptions {
            preview_length: self.preview_length,
            empty_line_marker: self.empty_line_marker.clone(),
            diff_timeout: Duration::from_millis(self.diff_timeout_ms),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            report_name: default_report_name(),
            preview_length: default_preview_length(),
            empty_line_marker: default_empty_line_marker(),
            export_dir: None,
            ignore_whitespace_only: false,
            diff_timeout_ms: default_diff_timeout_ms(),
        }
    }
}

fn default_report_name() -> String {
    DEFAULT_REPORT_NAME.to_string()
}

fn default_preview_length() -> usize {
    PREVIEW_MAX_CHARS
}

fn default_empty_line_marker() -> String {
    EMPTY_LINE_MARKER.to_string()
}

fn default_diff_timeout_ms() -> u64 {
    DIFF_TIMEOUT.as_millis() as u64
}
