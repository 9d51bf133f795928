//! Error types for outline extraction.
//!
//! An empty extraction is not an error: it is reported through
//! [`RunOutcome::Empty`](crate::pipeline::RunOutcome). Everything here is a
//! failure that aborts the current run and bubbles to the trigger registry.

use crate::core::{BlockId, PageRef};
use serde_json::json;
use std::collections::HashMap;
use thiserror::Error;

/// The main error type for extraction runs.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The configured expression failed to compile.
    #[error("Invalid extraction pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The expression source as configured.
        pattern: String,
        /// The compile error.
        #[source]
        source: regex::Error,
    },

    /// A call into the outline host failed.
    #[error("{0}")]
    Host(#[from] HostError),

    /// Settings could not be read or did not deserialize.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A trigger fired with a context it cannot act on.
    #[error("Invalid trigger context: {0}")]
    InvalidTrigger(String),

    /// No anchor block could be resolved for a non-empty extraction.
    #[error("No anchor block available for {0}")]
    MissingAnchor(String),
}

impl ExtractError {
    /// Creates an invalid pattern error.
    #[must_use]
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Short machine-readable kind, used in events and logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidPattern { .. } => "invalid_pattern",
            Self::Host(_) => "host",
            Self::Config(_) => "config",
            Self::InvalidTrigger(_) => "invalid_trigger",
            Self::MissingAnchor(_) => "missing_anchor",
        }
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("kind".to_string(), json!(self.kind()));
        map.insert("message".to_string(), json!(self.to_string()));
        if let Self::Host(host) = self {
            map.insert("host_error".to_string(), json!(host.kind()));
        }
        map
    }
}

/// Errors reported by an [`OutlineHost`](crate::host::OutlineHost).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HostError {
    /// The referenced block does not exist.
    #[error("Block not found: {0}")]
    BlockNotFound(BlockId),

    /// The referenced page does not exist.
    #[error("Page not found: {0}")]
    PageNotFound(PageRef),

    /// A storage or transport failure inside the host.
    #[error("Host storage error during {operation}: {reason}")]
    Storage {
        /// The host call that failed.
        operation: String,
        /// The reason reported by the host.
        reason: String,
    },
}

impl HostError {
    /// Creates a storage error.
    #[must_use]
    pub fn storage(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Storage {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Short machine-readable kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::BlockNotFound(_) => "block_not_found",
            Self::PageNotFound(_) => "page_not_found",
            Self::Storage { .. } => "storage",
        }
    }
}

/// Result alias used across the crate.
pub type Result<T, E = ExtractError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pattern_message() {
        let source = regex::Regex::new("(unclosed").unwrap_err();
        let err = ExtractError::invalid_pattern("(unclosed", source);

        assert!(err.to_string().starts_with("Invalid extraction pattern '(unclosed'"));
        assert_eq!(err.kind(), "invalid_pattern");
    }

    #[test]
    fn test_host_error_conversion() {
        let id = BlockId::new();
        let err: ExtractError = HostError::BlockNotFound(id).into();

        assert_eq!(err.kind(), "host");
        assert_eq!(err.to_string(), format!("Block not found: {id}"));
    }

    #[test]
    fn test_error_to_dict() {
        let err: ExtractError = HostError::storage("insert_block", "disk full").into();
        let dict = err.to_dict();

        assert_eq!(dict.get("kind").unwrap(), "host");
        assert_eq!(dict.get("host_error").unwrap(), "storage");
        assert_eq!(
            dict.get("message").unwrap(),
            "Host storage error during insert_block: disk full"
        );
    }
}
