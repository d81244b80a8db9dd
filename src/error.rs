//! Error types for roster storage and session configuration.
//!
//! The timing engine, the personal-best tracker and the history queries are
//! total functions and never produce errors. Everything fallible lives at the
//! storage boundary or in configuration loading, and is described here.
//!
//! ## Error Categories
//!
//! - **Storage Errors**: the backing store rejected or failed an operation
//! - **Unavailable**: the store could not be reached at all
//! - **Not Found**: a swimmer id that the store does not know
//! - **Validation Errors**: input refused before it reached the store
//! - **Parse / Config Errors**: malformed configuration or document data
//!
//! ## Recovery and Retry
//!
//! ```rust
//! use poolside::ClubError;
//!
//! let error = ClubError::unavailable("backend offline");
//! if error.is_retryable() {
//!     for suggestion in error.recovery_suggestions() {
//!         println!("  - {}", suggestion);
//!     }
//! }
//! ```

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for store and configuration operations.
pub type Result<T, E = ClubError> = std::result::Result<T, E>;

/// Main error type for store and configuration operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ClubError {
    /// Raised by `SwimmerStore` implementations whose backend rejected or
    /// failed a request; the in-memory store never produces it.
    #[error("Store operation '{operation}' failed: {reason}")]
    Storage {
        operation: String,
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Store unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Swimmer '{id}' not found")]
    NotFound { id: String },

    #[error("Invalid input: {reason}")]
    Validation { reason: String },

    #[error("Parse error in {context}: {details}")]
    Parse { context: String, details: String },

    #[error("Invalid configuration: {details}")]
    Config { details: String },

    #[error("Configuration file error: {path}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// For `SwimmerStore` implementations that talk to a remote service.
    #[error("Operation timed out after {duration:?}")]
    Timeout { duration: Duration },
}

impl ClubError {
    /// Returns whether this error is potentially recoverable through retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClubError::Storage { .. } => true,
            ClubError::Unavailable { .. } => true,
            ClubError::Timeout { .. } => true,
            ClubError::NotFound { .. } => false,
            ClubError::Validation { .. } => false,
            ClubError::Parse { .. } => false,
            ClubError::Config { .. } => false,
            ClubError::File { .. } => false,
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            ClubError::Storage { .. } => vec![
                "Retry the operation",
                "Check the store's access rules for this account",
                "Reload the roster in case the document changed",
            ],
            ClubError::Unavailable { .. } => vec![
                "Check network connectivity",
                "Verify the store credentials are configured",
                "Retry once the backend is reachable",
            ],
            ClubError::Timeout { .. } => vec![
                "Increase timeout duration",
                "Check backend responsiveness",
            ],
            ClubError::NotFound { .. } => vec![
                "Refresh the roster",
                "Check whether the swimmer was removed in another session",
            ],
            ClubError::Validation { .. } => vec![
                "Correct the input and try again",
            ],
            ClubError::Parse { .. } => vec![
                "Check the stored document shape",
                "Verify source data integrity",
            ],
            ClubError::Config { .. } => vec![
                "Check configuration values against the documented options",
                "Remove the offending key to fall back to its default",
            ],
            ClubError::File { .. } => vec![
                "Check file exists and is readable",
                "Check file permissions",
            ],
        }
    }

    /// Helper constructor for store failures, for external `SwimmerStore`
    /// implementations.
    pub fn storage(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        ClubError::Storage { operation: operation.into(), reason: reason.into(), source: None }
    }

    /// Helper constructor for store failures with an underlying cause.
    pub fn storage_with_source(
        operation: impl Into<String>,
        reason: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        ClubError::Storage {
            operation: operation.into(),
            reason: reason.into(),
            source: Some(source),
        }
    }

    /// Helper constructor for an unreachable store.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        ClubError::Unavailable { reason: reason.into() }
    }

    /// Helper constructor for unknown swimmer ids.
    pub fn not_found(id: impl Into<String>) -> Self {
        ClubError::NotFound { id: id.into() }
    }

    /// Helper constructor for rejected input.
    pub fn validation(reason: impl Into<String>) -> Self {
        ClubError::Validation { reason: reason.into() }
    }

    /// Helper constructor for configuration errors.
    pub fn config(details: impl Into<String>) -> Self {
        ClubError::Config { details: details.into() }
    }

    /// Helper constructor for file errors with path context.
    pub fn file_error(path: PathBuf, source: std::io::Error) -> Self {
        ClubError::File { path, source }
    }
}

impl From<serde_yaml_ng::Error> for ClubError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        ClubError::Parse { context: "YAML configuration".to_string(), details: err.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
          #[test]
          fn error_messages_carry_their_context(
            operation in "[a-z_]+",
            reason in ".*",
            id in "[a-zA-Z0-9]+",
            secs in 1u64..600u64
          ) {
            let storage = ClubError::storage(operation.clone(), reason.clone());
            let missing = ClubError::not_found(id.clone());
            let timeout = ClubError::Timeout { duration: Duration::from_secs(secs) };

            let storage_msg = storage.to_string();
            prop_assert!(storage_msg.contains(&operation));
            prop_assert!(storage_msg.contains(&reason));
            prop_assert!(missing.to_string().contains(&id));
            prop_assert!(!timeout.to_string().is_empty());
          }

          #[test]
          fn source_chain_reaches_the_root_cause(base_message in "[a-z ]{1,40}") {
            let root: Box<dyn std::error::Error + Send + Sync> =
              Box::new(std::io::Error::other(base_message.clone()));
            let error = ClubError::storage_with_source("update_swimmer", "write rejected", root);

            let source = std::error::Error::source(&error);
            prop_assert!(source.is_some());
            prop_assert_eq!(source.map(|s| s.to_string()), Some(base_message));
          }
        }
    }

    #[test]
    fn error_traits_validation() {
        fn assert_send_sync_static<T: Send + Sync + 'static>() {}
        assert_send_sync_static::<ClubError>();

        let error = ClubError::unavailable("test");
        let _: &dyn std::error::Error = &error;
    }

    #[test]
    fn retry_classification() {
        assert!(ClubError::unavailable("offline").is_retryable());
        assert!(ClubError::storage("update_swimmer", "rejected").is_retryable());
        assert!(!ClubError::not_found("abc").is_retryable());
        assert!(!ClubError::validation("empty name").is_retryable());
        assert!(!ClubError::config("bad tick").is_retryable());
    }

    #[test]
    fn every_variant_has_suggestions() {
        let errors = [
            ClubError::storage("op", "r"),
            ClubError::unavailable("r"),
            ClubError::not_found("id"),
            ClubError::validation("r"),
            ClubError::config("d"),
            ClubError::Parse { context: "c".into(), details: "d".into() },
            ClubError::Timeout { duration: Duration::from_secs(1) },
            ClubError::file_error(
                PathBuf::from("/tmp/poolside.yaml"),
                std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
            ),
        ];

        for error in &errors {
            let suggestions = error.recovery_suggestions();
            assert!(!suggestions.is_empty(), "no suggestions for {error}");
            for suggestion in suggestions {
                assert!(suggestion.len() > 5);
            }
        }
    }

    #[test]
    fn yaml_errors_convert_to_parse() {
        let err = serde_yaml_ng::from_str::<u32>("not: [a number").unwrap_err();
        let converted: ClubError = err.into();
        assert!(matches!(converted, ClubError::Parse { .. }));
    }
}
