/// Structured error types for threadmark-core.
///
/// Uses `thiserror` for better API surface and error composition. The
/// formatting core itself never returns these — malformed content degrades
/// to empty or generic output — so the variants here cover loading inputs
/// and configuration, the only fallible edges.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for threadmark-core operations
#[derive(Error, Debug)]
pub enum ExportError {
    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// JSON parsing or serialization failed
    #[error("JSON error at {context}: {source}")]
    Json {
        context: String,
        source: serde_json::Error,
    },

    /// Input file is not a conversation export (wrong JSON shape)
    #[error("Invalid export in file {path:?}: {reason}")]
    InvalidFormat { path: PathBuf, reason: String },

    /// File or directory not found
    #[error("Path not found: {path:?}")]
    PathNotFound { path: PathBuf },

    /// Configuration error
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

/// Result type alias for threadmark-core operations
pub type Result<T> = std::result::Result<T, ExportError>;

impl ExportError {
    /// Create a JSON error with context
    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }

    /// Create an invalid format error
    pub fn invalid_format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a path not found error
    pub fn path_not_found(path: impl Into<PathBuf>) -> Self {
        Self::PathNotFound { path: path.into() }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ExportError::invalid_format("/tmp/test.json", "not a conversation export");
        assert!(err.to_string().contains("Invalid export"));
        assert!(err.to_string().contains("/tmp/test.json"));

        let err = ExportError::config("bad vocabulary table");
        assert_eq!(err.to_string(), "Configuration error: bad vocabulary table");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let export_err: ExportError = io_err.into();

        assert!(matches!(export_err, ExportError::Io { .. }));
    }
}
