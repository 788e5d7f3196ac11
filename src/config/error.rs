//! Error definitions for loading and watching the backing file.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, reloading or watching a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The backing file could not be opened or read.
    #[error("can't read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file is not a flat JSON object of string values.
    #[error("can't decode JSON config {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The backing file is not a flat TOML table of string values.
    #[error("can't decode TOML config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The file-change watch could not be registered.
    #[error("can't watch config file: {0}")]
    Watch(#[from] notify::Error),

    /// Construction happened outside a Tokio runtime.
    #[error("shared config must be created inside a Tokio runtime")]
    NoRuntime,

    /// The shared config has been closed.
    #[error("shared config is closed")]
    Closed,
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
