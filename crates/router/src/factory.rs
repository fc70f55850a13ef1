use std::sync::Arc;

use attachstore_core::{MemoryParams, ParamStore};
use attachstore_local::FileStore;
use attachstore_s3::S3ConnectionResolver;
use tracing::info;

use crate::config::AttachstoreConfig;
use crate::router::ContentRouter;

/// Build a router over a [`FileStore`] and an [`S3ConnectionResolver`] whose
/// parameters are seeded from the `[params]` table.
pub fn build_router(config: &AttachstoreConfig) -> ContentRouter {
    let params = Arc::new(MemoryParams::from(config.params.clone()));
    build_router_with_params(config, params)
}

/// Build a router reading remote settings from `params`.
///
/// The `[params]` table of `config` is ignored.
pub fn build_router_with_params(
    config: &AttachstoreConfig,
    params: Arc<dyn ParamStore>,
) -> ContentRouter {
    let storage = &config.storage;
    info!(
        filestore = %storage.filestore.display(),
        mode = ?storage.mode,
        on_remote_write_failure = ?storage.on_remote_write_failure,
        "building content router"
    );
    let local = Arc::new(FileStore::new(storage.filestore.clone()));
    let resolver = Arc::new(S3ConnectionResolver::new(params));
    ContentRouter::new(resolver, local)
        .with_storage_mode(storage.mode)
        .with_remote_write_failure(storage.on_remote_write_failure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[tokio::test]
    async fn unconfigured_remote_routes_everything_locally() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AttachstoreConfig::default();
        config.storage.filestore = dir.path().to_owned();
        let router = build_router(&config);

        let data = Bytes::from_static(b"\x89PNG\r\n\x1a\n");
        let reference = router.store(data.clone(), "image/png").await.unwrap();
        assert!(reference.as_str().contains('/'), "expected a filestore name");
        assert!(dir.path().join(reference.as_str()).exists());
        assert_eq!(router.load(reference.as_str()).await, Some(data));
    }
}
