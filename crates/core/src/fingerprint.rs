use std::fmt;

use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};

/// Lowercase hex SHA-1 digest of a blob's content.
///
/// Identical content always yields the same fingerprint. It doubles as the
/// checksum handed to the local filestore and as the stem of remote object
/// keys, so it must stay filesystem-safe: 40 characters of `[0-9a-f]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Length of the hex rendering.
    pub const HEX_LEN: usize = 40;

    /// Compute the fingerprint of `data`.
    pub fn of(data: &[u8]) -> Self {
        Self(hex::encode(Sha1::digest(data)))
    }

    /// The hex digest.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
