use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use attachstore_core::{ConnectionHandle, ConnectionResolver, ObjectStore};
use tracing::debug;

/// A [`ConnectionResolver`] that always hands back the same handle, or
/// always reports remote storage as unavailable.
#[derive(Debug)]
pub struct FixedResolver {
    handle: Option<ConnectionHandle>,
    resolutions: AtomicUsize,
}

impl FixedResolver {
    /// Resolve to `client` and `bucket` on every call.
    pub fn new(client: Arc<dyn ObjectStore>, bucket: impl Into<String>) -> Self {
        Self::from_handle(ConnectionHandle::new(client, bucket))
    }

    pub fn from_handle(handle: ConnectionHandle) -> Self {
        Self {
            handle: Some(handle),
            resolutions: AtomicUsize::new(0),
        }
    }

    /// A resolver for which remote storage is never available.
    pub fn unavailable() -> Self {
        Self {
            handle: None,
            resolutions: AtomicUsize::new(0),
        }
    }

    /// Set the object key prefix on the resolved handle.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.handle = self.handle.map(|h| h.with_prefix(prefix));
        self
    }

    /// How many times [`ConnectionResolver::resolve`] has been called.
    pub fn resolution_count(&self) -> usize {
        self.resolutions.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConnectionResolver for FixedResolver {
    async fn resolve(&self) -> Option<ConnectionHandle> {
        self.resolutions.fetch_add(1, Ordering::SeqCst);
        if self.handle.is_none() {
            debug!("fixed resolver: remote storage unavailable");
        }
        self.handle.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryObjectStore;

    #[tokio::test]
    async fn resolves_same_handle_every_time() {
        let store = Arc::new(MemoryObjectStore::new());
        let resolver = FixedResolver::new(store, "attachments").with_prefix("prod_");
        for _ in 0..2 {
            let handle = resolver.resolve().await.unwrap();
            assert_eq!(handle.bucket(), "attachments");
            assert_eq!(handle.prefix(), Some("prod_"));
        }
        assert_eq!(resolver.resolution_count(), 2);
    }

    #[tokio::test]
    async fn unavailable_resolves_to_none() {
        let resolver = FixedResolver::unavailable().with_prefix("ignored_");
        assert!(resolver.resolve().await.is_none());
        assert_eq!(resolver.resolution_count(), 1);
    }
}
