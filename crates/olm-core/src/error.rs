//! Error types for olm-core

use std::path::PathBuf;

/// Result type for olm-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a resolution call.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Bundle could not be read or decoded
    #[error(transparent)]
    Manifest(#[from] olm_manifest::Error),
}

/// Errors raised by a [`ConfigSource`](crate::config::ConfigSource).
///
/// These never abort resolution: the agent logs them and continues without
/// overrides.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("No configuration found for {what}")]
    NotFound { what: String },

    #[error("I/O error reading configuration at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration in {origin}: {message}")]
    Invalid { origin: String, message: String },
}

impl ConfigError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    pub fn invalid(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            origin: origin.into(),
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
