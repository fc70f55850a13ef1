use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::StoreError;
use crate::fingerprint::Fingerprint;
use crate::reference::StoredReference;

/// The host's local filestore.
///
/// Local storage owns its naming scheme; the router returns whatever name
/// [`LocalStore::write`] hands back.
#[async_trait]
pub trait LocalStore: Send + Sync {
    /// Persist `data` and return the name it can be read back under.
    ///
    /// `checksum` is the content fingerprint, already computed by the caller.
    async fn write(&self, data: Bytes, checksum: &Fingerprint)
    -> Result<StoredReference, StoreError>;

    /// Read content by name. Returns `None` if nothing is stored under it.
    async fn read(&self, name: &str) -> Result<Option<Bytes>, StoreError>;
}

/// Minimal S3-style object protocol used by the router.
///
/// Implementations make a single attempt per call.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload `body` under `key`, tagging it with `content_type`.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), StoreError>;

    /// Download the object stored under `key`.
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes, StoreError>;

    /// Whether an object exists under `key`.
    async fn object_exists(&self, bucket: &str, key: &str) -> Result<bool, StoreError>;
}

/// A ready-to-use remote client paired with its target bucket.
///
/// Handles are resolved per operation and never cached.
#[derive(Clone)]
pub struct ConnectionHandle {
    client: Arc<dyn ObjectStore>,
    bucket: String,
    prefix: Option<String>,
}

impl ConnectionHandle {
    pub fn new(client: Arc<dyn ObjectStore>, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            prefix: None,
        }
    }

    /// Set the object key prefix. Blank prefixes are dropped.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.prefix = (!prefix.is_empty()).then_some(prefix);
        self
    }

    pub fn client(&self) -> &dyn ObjectStore {
        self.client.as_ref()
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }
}

impl fmt::Debug for ConnectionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionHandle")
            .field("client", &"<ObjectStore>")
            .field("bucket", &self.bucket)
            .field("prefix", &self.prefix)
            .finish()
    }
}

/// Produces a [`ConnectionHandle`] from current configuration.
///
/// `None` means remote storage is unavailable. That is a routine outcome and
/// callers fall back to local storage.
#[async_trait]
pub trait ConnectionResolver: Send + Sync {
    async fn resolve(&self) -> Option<ConnectionHandle>;
}
