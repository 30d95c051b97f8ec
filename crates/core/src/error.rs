//! Error types for cipin operations.
//!
//! [`CipinError`] covers the failures that end an analysis request: a page
//! that could not be fetched, unreadable local input, and invalid
//! configuration. Decoding problems and empty pages are not errors; they
//! degrade to best-effort text and empty rankings.
//!
//! # Example
//!
//! ```rust
//! use cipin_core::{CipinError, FetchStatus};
//!
//! let err = CipinError::Fetch { url: "https://example.com".to_string(), status: FetchStatus::HttpError(404) };
//! assert!(err.to_string().contains("https://example.com"));
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::fetch::FetchStatus;

/// Main error type for cipin.
#[derive(Error, Debug)]
pub enum CipinError {
    /// The page could not be retrieved.
    ///
    /// Covers any remote status other than 200 as well as transport failures
    /// (invalid URL, DNS, refused connection, timeout). The message always
    /// names the URL so it can be shown to the user as is.
    #[error("Unable to access URL: {url} ({status})")]
    Fetch { url: String, status: FetchStatus },

    /// File not found.
    ///
    /// Returned when reading a local HTML page, stop-word list, dictionary or
    /// config file that doesn't exist.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Standard I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Config file that is not valid TOML or does not match the schema.
    #[error("Invalid config file: {0}")]
    TomlError(#[from] toml::de::Error),

    /// A user dictionary jieba refused to load.
    #[error("Dictionary error: {0}")]
    Dictionary(String),

    /// Output serialization failure.
    #[error("Failed to serialize output: {0}")]
    Serialize(String),
}

impl From<serde_json::Error> for CipinError {
    fn from(err: serde_json::Error) -> Self {
        CipinError::Serialize(err.to_string())
    }
}

impl From<csv::Error> for CipinError {
    fn from(err: csv::Error) -> Self {
        CipinError::Serialize(err.to_string())
    }
}

/// Result type alias for CipinError.
pub type Result<T> = std::result::Result<T, CipinError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::NetworkFailure;

    #[test]
    fn test_fetch_error_names_url() {
        let err = CipinError::Fetch { url: "https://example.com/missing".to_string(), status: FetchStatus::HttpError(404) };
        let message = err.to_string();
        assert!(message.contains("https://example.com/missing"));
        assert!(message.contains("404"));
    }

    #[test]
    fn test_timeout_error() {
        let err = CipinError::Fetch {
            url: "https://example.com".to_string(),
            status: FetchStatus::NetworkError(NetworkFailure::Timeout { timeout: 30 }),
        };
        assert!(err.to_string().contains("30"));
    }

    #[test]
    fn test_csv_error_is_serialize_error() {
        let err: CipinError = csv::Error::from(std::io::Error::other("sink closed")).into();
        assert!(matches!(err, CipinError::Serialize(_)));
    }

    #[test]
    fn test_config_error_display() {
        let err = CipinError::Config("encoding must not be empty".to_string());
        assert!(err.to_string().contains("Configuration error"));
    }
}
