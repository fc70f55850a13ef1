//! Content router for attachstore.
//!
//! [`ContentRouter`] decides, for every blob, whether it goes to the remote
//! bucket or to the local filestore, and reads it back from wherever it was
//! put. Image-like content is offloaded when a remote connection resolves;
//! everything else, and everything while the remote is unavailable, stays
//! local.
//!
//! ```no_run
//! use attachstore_router::{AttachstoreConfig, factory};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AttachstoreConfig::load("attachstore.toml")?;
//! let router = factory::build_router(&config);
//!
//! let reference = router.store(bytes::Bytes::from_static(b"\x89PNG"), "image/png").await?;
//! let content = router.load(reference.as_str()).await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod factory;
pub mod router;

pub use config::{AttachstoreConfig, ConfigError, RemoteWriteFailure, StorageConfig};
pub use router::ContentRouter;
