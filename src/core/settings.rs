//! TOML settings loading
//!
//! Embedding applications can keep relaymq's ambient configuration in a small
//! TOML document:
//!
//! ```toml
//! [logging]
//! level = "relaymq=debug"
//! format = "ext"
//! file = "/var/log/app/relaymq.log"
//! color = false
//!
//! [fetch]
//! timeout_ms = 250
//! ```
//!
//! Every key is optional; missing keys fall back to [`Settings::default`].

use crate::core::error::{CoreError, CoreResult};
use crate::core::logging::{self, LogFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level settings document
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub fetch: FetchSettings,
}

/// `[logging]` table
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    /// flexi_logger level specification, e.g. `"info"` or `"relaymq=trace"`
    pub level: String,
    pub format: LogFormat,
    pub file: Option<PathBuf>,
    pub color: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
            file: None,
            color: false,
        }
    }
}

/// `[fetch]` table
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetchSettings {
    /// Upper bound for a configured fetch; absent means block indefinitely
    pub timeout_ms: Option<u64>,
}

impl FetchSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

impl Settings {
    /// Parse settings from a TOML string and validate them
    pub fn from_toml_str(contents: &str) -> CoreResult<Self> {
        let settings: Settings = toml::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read and parse a settings file
    pub fn load(path: &Path) -> CoreResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| CoreError::SettingsIo {
            path: path.to_path_buf(),
            source,
        })?;
        log::trace!("Loaded settings file {}", path.display());
        Self::from_toml_str(&contents)
    }

    fn validate(&self) -> CoreResult<()> {
        flexi_logger::LogSpecification::parse(&self.logging.level).map_err(|e| {
            CoreError::InvalidSetting {
                key: "logging.level".to_string(),
                message: e.to_string(),
            }
        })?;

        if self.fetch.timeout_ms == Some(0) {
            return Err(CoreError::InvalidSetting {
                key: "fetch.timeout_ms".to_string(),
                message: "must be greater than zero; omit it to block indefinitely".to_string(),
            });
        }

        Ok(())
    }

    /// Start the global logger from the `[logging]` table
    pub fn init_logging(&self) -> CoreResult<()> {
        logging::init_logging(
            Some(&self.logging.level),
            self.logging.format,
            self.logging.file.as_deref(),
            self.logging.color,
        )
    }
}
