//! Error types for Opal operations.
//!
//! This module provides the common `Error` type and `Result<T>` alias used
//! across all Opal crates. Uses `thiserror` for derive macros.
//!
//! Two conditions are not errors: a clarification response (the ask
//! pipeline returning ranked parent proposals instead of acting) and a
//! bounded traversal stopping early. Both are ordinary results.

use thiserror::Error;

/// Errors that can occur in Opal operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid settings).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid caller input, surfaced before any network call.
    #[error("Validation error: {0}")]
    Validation(String),

    /// No candidate available where at least one is required.
    #[error("No candidates: {0}")]
    NoCandidates(String),

    /// HTTP transport failure (connect, timeout, malformed response).
    #[error("HTTP error: {0}")]
    Http(String),

    /// The remote API reported a non-success status.
    #[error("Upstream error {status}: {detail}")]
    Upstream {
        /// HTTP status code reported by the remote API.
        status: u16,
        /// Response body text, retained for diagnostics.
        detail: String,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a no-candidates error.
    pub fn no_candidates(msg: impl Into<String>) -> Self {
        Self::NoCandidates(msg.into())
    }

    /// Create an HTTP transport error.
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create an HTTP transport error wrapping a source error.
    pub fn http_with_source(msg: impl Into<String>, source: impl std::fmt::Display) -> Self {
        Self::Http(format!("{}: {}", msg.into(), source))
    }

    /// Create an upstream error from a status code and body text.
    pub fn upstream(status: u16, detail: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            detail: detail.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias using Opal's Error type.
pub type Result<T> = std::result::Result<T, Error>;
