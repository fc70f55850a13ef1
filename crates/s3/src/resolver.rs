use std::sync::Arc;

use async_trait::async_trait;
use attachstore_core::{ConnectionHandle, ConnectionResolver, ParamStore};
use tracing::debug;

use crate::client::S3ObjectStore;
use crate::config::S3Config;

/// Resolves S3 connections from a [`ParamStore`].
///
/// Parameters are read on every call; nothing is cached between operations.
pub struct S3ConnectionResolver {
    params: Arc<dyn ParamStore>,
}

impl std::fmt::Debug for S3ConnectionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3ConnectionResolver")
            .field("params", &"<ParamStore>")
            .finish()
    }
}

impl S3ConnectionResolver {
    pub fn new(params: Arc<dyn ParamStore>) -> Self {
        Self { params }
    }

    /// Read the current configuration, or `None` if it is incomplete.
    pub fn current_config(&self) -> Option<S3Config> {
        match S3Config::from_params(self.params.as_ref()) {
            Ok(config) => Some(config),
            Err(e) => {
                debug!(error = %e, "remote storage unavailable");
                None
            }
        }
    }
}

#[async_trait]
impl ConnectionResolver for S3ConnectionResolver {
    async fn resolve(&self) -> Option<ConnectionHandle> {
        let config = self.current_config()?;
        let store = S3ObjectStore::new(&config).await;
        debug!(bucket = %config.bucket, "resolved S3 connection");
        let handle = ConnectionHandle::new(Arc::new(store), config.bucket);
        Some(match config.prefix {
            Some(prefix) => handle.with_prefix(prefix),
            None => handle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::keys;
    use attachstore_core::MemoryParams;

    #[tokio::test]
    async fn missing_bucket_is_unavailable() {
        let params = Arc::new(MemoryParams::new());
        params.set(keys::REGION, "eu-west-1");
        let resolver = S3ConnectionResolver::new(params);
        assert!(resolver.current_config().is_none());
        assert!(resolver.resolve().await.is_none());
    }

    #[tokio::test]
    async fn incomplete_credentials_are_unavailable() {
        let params = Arc::new(MemoryParams::new());
        params.set(keys::BUCKET, "attachments");
        params.set(keys::SECRET_ACCESS_KEY, "orphaned-secret");
        let resolver = S3ConnectionResolver::new(params);
        assert!(resolver.resolve().await.is_none());
    }

    #[test]
    fn parameter_edits_are_seen_by_next_resolution() {
        let params = Arc::new(MemoryParams::new());
        let resolver = S3ConnectionResolver::new(params.clone());
        assert!(resolver.current_config().is_none());

        params.set(keys::BUCKET, "attachments");
        params.set(keys::KEY_PREFIX, "prod_");
        let config = resolver.current_config().unwrap();
        assert_eq!(config.bucket, "attachments");
        assert_eq!(config.prefix.as_deref(), Some("prod_"));

        params.remove(keys::BUCKET);
        assert!(resolver.current_config().is_none());
    }

    #[cfg(feature = "integration")]
    #[tokio::test]
    async fn complete_config_resolves_handle() {
        let params = Arc::new(MemoryParams::new());
        params.set(keys::BUCKET, "attachments");
        params.set(keys::ENDPOINT_URL, "http://localhost:9000");
        params.set(keys::KEY_PREFIX, "prod_");
        let resolver = S3ConnectionResolver::new(params);
        let handle = resolver.resolve().await.unwrap();
        assert_eq!(handle.bucket(), "attachments");
        assert_eq!(handle.prefix(), Some("prod_"));
    }
}
