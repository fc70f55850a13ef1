//! In-memory backends for attachstore.
//!
//! Useful for tests and for hosts that want routing without a real bucket.
//! Each backend counts the calls it receives and can be told to fail, so the
//! router's fallback paths can be exercised deterministically.

pub mod local;
pub mod object;
pub mod resolver;

pub use local::MemoryLocalStore;
pub use object::{MemoryObjectStore, StoredObject};
pub use resolver::FixedResolver;
