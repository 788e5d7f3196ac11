//! Configuration loading from disk.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::config::error::{ConfigError, ConfigResult};

/// Flat key → value mapping held by the actor.
pub type ConfigMap = HashMap<String, String>;

/// On-disk encoding of the backing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// A single JSON object of string values.
    Json,
    /// A single TOML table of string values.
    Toml,
}

impl ConfigFormat {
    /// Pick the format from the file extension. Anything that isn't `.toml` is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Json,
        }
    }
}

/// Read and decode the whole file as a flat string → string mapping.
///
/// Blocking; used for the initial load before any task is spawned.
/// Never touches any live map; the caller decides whether to install the result.
pub fn load_map(path: &Path) -> ConfigResult<ConfigMap> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    decode_map(path, &content)
}

/// Read the raw file contents without blocking the runtime.
pub async fn read_source(path: &Path) -> ConfigResult<String> {
    tokio::fs::read_to_string(path).await.map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode `content` using the format implied by `path`.
pub fn decode_map(path: &Path, content: &str) -> ConfigResult<ConfigMap> {
    match ConfigFormat::from_path(path) {
        ConfigFormat::Json => serde_json::from_str(content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        }),
        ConfigFormat::Toml => toml::from_str(content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        }),
    }
}
