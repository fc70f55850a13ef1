use std::path::PathBuf;

use attachstore_core::StorageMode;
use serde::Deserialize;

/// What to do when a remote upload fails after content was found eligible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteWriteFailure {
    /// Surface the failure to the caller; nothing is written locally.
    #[default]
    Fail,
    /// Log the failure and write the content to the local filestore instead.
    FallbackToLocal,
}

/// Configuration for content routing and local storage.
#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    /// `"file"` routes content to a backing store, `"db"` keeps it inline.
    #[serde(default)]
    pub mode: StorageMode,

    /// Root directory of the local filestore.
    #[serde(default = "default_filestore")]
    pub filestore: PathBuf,

    /// Behaviour when a remote upload fails.
    #[serde(default)]
    pub on_remote_write_failure: RemoteWriteFailure,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            mode: StorageMode::default(),
            filestore: default_filestore(),
            on_remote_write_failure: RemoteWriteFailure::default(),
        }
    }
}

fn default_filestore() -> PathBuf {
    PathBuf::from("filestore")
}
