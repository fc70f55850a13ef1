use thiserror::Error;

/// Errors that can occur while storing or loading attachment content.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The local filestore failed to read or write.
    #[error("local storage error: {0}")]
    Local(String),

    /// The remote object store rejected or failed a request.
    #[error("remote storage error: {0}")]
    Remote(String),

    /// The stored reference is malformed or escapes the storage root.
    #[error("invalid stored reference: {0}")]
    InvalidReference(String),

    /// Configuration is missing or invalid.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Local(err.to_string())
    }
}
