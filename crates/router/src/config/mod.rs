mod storage;

#[cfg(test)]
mod tests;

pub use storage::*;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Top-level attachstore configuration, loaded from a TOML file.
///
/// # Example
///
/// ```toml
/// [storage]
/// mode = "file"
/// filestore = "/var/lib/attachstore/filestore"
/// on_remote_write_failure = "fail"
///
/// [params]
/// aws_bucket_name = "attachments"
/// aws_region = "eu-west-1"
/// aws_prefix_file_name = "prod_"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct AttachstoreConfig {
    /// Storage routing configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Initial values for the parameter store read by the connection resolver.
    #[serde(default)]
    pub params: HashMap<String, String>,
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid TOML or has the wrong shape.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl AttachstoreConfig {
    /// Parse configuration from a TOML string.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }
}
