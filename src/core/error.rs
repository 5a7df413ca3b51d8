//! Core Error Types
//!
//! Errors raised by the ambient services (logging setup, settings loading).
//! Queue routing itself has no error type: its failure modes are absorbed as
//! no-ops or resolved by blocking.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Logging setup failed: {source}")]
    Logging {
        #[from]
        source: flexi_logger::FlexiLoggerError,
    },

    #[error("Logger handle not initialised. Call init_logging first.")]
    LoggingNotInitialised,

    #[error("Failed to read settings file {}: {source}", .path.display())]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings: {source}")]
    SettingsParse {
        #[from]
        source: toml::de::Error,
    },

    #[error("Invalid setting '{key}': {message}")]
    InvalidSetting { key: String, message: String },
}

impl CoreError {
    /// True when the error stems from user-supplied configuration rather than the system
    pub fn is_user_actionable(&self) -> bool {
        matches!(
            self,
            CoreError::SettingsParse { .. } | CoreError::InvalidSetting { .. }
        )
    }
}

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Log an error with the operation it interrupted
///
/// User-actionable errors are logged as-is; system errors get the operation
/// context first and the full debug form at debug level.
pub fn log_error_with_context(error: &CoreError, operation_context: &str) {
    if error.is_user_actionable() {
        log::error!("{}", error);
    } else {
        log::error!("{} failed: {}", operation_context, error);
        log::debug!("{} error details: {:?}", operation_context, error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_setting_display() {
        let err = CoreError::InvalidSetting {
            key: "logging.level".to_string(),
            message: "unknown level".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid setting 'logging.level': unknown level"
        );
        assert!(err.is_user_actionable());
    }

    #[test]
    fn test_io_error_is_system_error() {
        let err = CoreError::SettingsIo {
            path: PathBuf::from("/nonexistent/relaymq.toml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(!err.is_user_actionable());
        assert!(err.to_string().contains("/nonexistent/relaymq.toml"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_parse_error_converts() {
        let parse_err = toml::from_str::<toml::Table>("not = = valid").unwrap_err();
        let err: CoreError = parse_err.into();
        assert!(matches!(err, CoreError::SettingsParse { .. }));
        log_error_with_context(&err, "Settings load");
    }
}
