//! Error types for encounter definition loading

use std::path::PathBuf;
use thiserror::Error;

/// Errors during encounter definition loading and validation
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read encounter file {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse encounter TOML in {path}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to read encounter directory {path}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid encounter definition `{id}`: {reason}")]
    InvalidDefinition { id: String, reason: String },
}
