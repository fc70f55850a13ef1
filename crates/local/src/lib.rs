//! Local filestore backend for attachstore.
//!
//! Content is stored under a root directory, named after its fingerprint and
//! sharded by the first two hex characters: `<root>/da/da39a3ee...`.

pub mod filestore;

pub use filestore::FileStore;
