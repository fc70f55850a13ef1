use std::fmt;

use serde::{Deserialize, Serialize};

use crate::fingerprint::Fingerprint;

/// Opaque name under which attachment content can be retrieved.
///
/// This is the only pointer persisted on the attachment record. It is either
/// a local filestore name or a remote object key built by [`Self::object_key`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoredReference(String);

impl StoredReference {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Build a remote object key: `[prefix]<fingerprint><extension>`.
    ///
    /// An empty prefix is the same as no prefix.
    pub fn object_key(prefix: Option<&str>, fingerprint: &Fingerprint, extension: &str) -> Self {
        let prefix = prefix.unwrap_or_default();
        Self(format!("{prefix}{fingerprint}{extension}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for StoredReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StoredReference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for StoredReference {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&str> for StoredReference {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_key_without_prefix() {
        let fp = Fingerprint::of(b"hello world");
        let key = StoredReference::object_key(None, &fp, ".png");
        assert_eq!(key.as_str(), "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed.png");
    }

    #[test]
    fn object_key_with_prefix() {
        let fp = Fingerprint::of(b"hello world");
        let key = StoredReference::object_key(Some("prod_"), &fp, ".jpg");
        assert_eq!(
            key.as_str(),
            "prod_2aae6c35c94fcfb415dbe95f408b9ce91ee846ed.jpg"
        );
    }

    #[test]
    fn empty_prefix_is_ignored() {
        let fp = Fingerprint::of(b"x");
        assert_eq!(
            StoredReference::object_key(Some(""), &fp, ".gif"),
            StoredReference::object_key(None, &fp, ".gif")
        );
    }
}
