//! Error types for the seeding library.

use thiserror::Error;

/// Main error type for seeding operations.
///
/// Only fatal conditions travel through this type. Failures scoped to a
/// single document are recorded as [`crate::load::ItemError`] instead.
#[derive(Error, Debug)]
pub enum SeedError {
    /// Configuration error (invalid YAML, missing fields, missing credential)
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (dump file missing or unreadable)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Transport-level failure talking to the document store
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The document store answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// The document store could not be reached at all
    #[error("Target unreachable: {0}")]
    Unreachable(String),

    /// The run finished but some documents failed to load
    #[error("Seeding finished with errors ({categories} categories, {listings} listings)")]
    ItemErrors { categories: usize, listings: usize },
}

impl SeedError {
    /// Create an API error from a status code and message body.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        SeedError::Api {
            status,
            message: message.into(),
        }
    }

    /// Process exit code for this error. Every failure maps to 1.
    pub fn exit_code(&self) -> u8 {
        1
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for seeding operations.
pub type Result<T> = std::result::Result<T, SeedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = SeedError::api(401, "Invalid API key");
        assert_eq!(err.to_string(), "HTTP 401: Invalid API key");
    }

    #[test]
    fn test_exit_code_is_always_one() {
        assert_eq!(SeedError::Config("x".into()).exit_code(), 1);
        assert_eq!(
            SeedError::ItemErrors {
                categories: 0,
                listings: 3
            }
            .exit_code(),
            1
        );
    }

    #[test]
    fn test_format_detailed_includes_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "dump.sql");
        let err = SeedError::Io(io);
        let detailed = err.format_detailed();
        assert!(detailed.starts_with("Error: IO error: dump.sql"));
    }
}
