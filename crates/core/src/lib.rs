//! Core types and storage traits for attachstore.
//!
//! attachstore routes attachment content either to an S3-compatible bucket or
//! to the host's local filestore. This crate holds the pieces every backend
//! and the router share:
//!
//! - [`Fingerprint`]: SHA-1 content digest used as checksum and object stem
//! - [`media`]: media type to extension mapping and the remote eligibility gate
//! - [`StoredReference`]: the opaque name persisted on an attachment record
//! - [`LocalStore`], [`ObjectStore`], [`ConnectionResolver`]: the seams the
//!   router talks through
//! - [`ParamStore`]: read-only key/value configuration lookup

pub mod error;
pub mod fingerprint;
pub mod media;
pub mod params;
pub mod reference;
pub mod store;
pub mod testing;
pub mod values;

pub use error::StoreError;
pub use fingerprint::Fingerprint;
pub use params::{EnvParams, MemoryParams, ParamStore};
pub use reference::StoredReference;
pub use store::{ConnectionHandle, ConnectionResolver, LocalStore, ObjectStore};
pub use values::{AttachmentValues, StorageMode, index_content};
