//! Error types for olm-manifest

use std::path::PathBuf;

/// Result type for olm-manifest operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or decoding manifests
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Manifest not found: {path}")]
    ManifestNotFound { path: String },

    #[error("Manifest {path} is not valid UTF-8")]
    InvalidUtf8 { path: String },

    #[error("Failed to parse YAML document {index} of {file} (line {line}): {message}")]
    DocumentParse {
        file: String,
        index: usize,
        line: usize,
        message: String,
    },

    #[error("Failed to decode document {index} of {file} (line {line}): {source}")]
    Decode {
        file: String,
        index: usize,
        line: usize,
        #[source]
        source: DecodeError,
    },

    #[error("Invalid bundle key: {key}")]
    InvalidBundleKey { key: String },

    #[error("Failed to render manifests: {0}")]
    Render(#[from] serde_yaml::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors produced by the [`Scheme`](crate::Scheme) while turning a parsed
/// YAML value into a [`ManifestObject`](crate::ManifestObject).
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("document is not a mapping")]
    NotAMapping,

    #[error("missing or non-string '{field}' field")]
    MissingTypeMeta { field: &'static str },

    #[error("list '{kind}' has a non-sequence 'items' field")]
    InvalidList { kind: String },

    #[error("invalid {api_version} {kind}: {source}")]
    Invalid {
        api_version: String,
        kind: String,
        #[source]
        source: serde_yaml::Error,
    },
}
