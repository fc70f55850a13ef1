use std::sync::LazyLock;

use bytes::Bytes;
use regex::bytes::Regex;
use serde::{Deserialize, Serialize};

use crate::fingerprint::Fingerprint;
use crate::reference::StoredReference;

/// Runs of at least four printable ASCII characters.
static PRINTABLE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x20-\x7E]{4,}").expect("printable-run regex is valid"));

/// Where attachment content lives by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageMode {
    /// Content goes to a backing store (remote bucket or local filestore).
    #[default]
    File,
    /// Content stays inline on the attachment record.
    Db,
}

/// Field values derived from attachment content, ready to be written onto
/// the attachment record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentValues {
    /// Size of the content in bytes.
    pub file_size: u64,
    /// Content fingerprint.
    pub checksum: Fingerprint,
    /// Searchable text derived from the content, if any.
    pub index_content: Option<String>,
    /// Name in a backing store. `None` when content is kept inline.
    pub store_fname: Option<StoredReference>,
    /// Inline content. Cleared once content is routed to a backing store.
    pub db_datas: Option<Bytes>,
}

/// Derive index text for content of the given media type.
///
/// `text/*` content is indexed by its runs of at least four printable ASCII
/// characters, one per line. Any other type is indexed by its major type
/// (`"image"`, `"application"`, ...). An empty media type yields `None`.
pub fn index_content(data: &[u8], media_type: &str) -> Option<String> {
    let major = media_type.split('/').next().unwrap_or_default();
    if major.is_empty() {
        return None;
    }
    if major != "text" {
        return Some(major.to_owned());
    }
    let words: Vec<&str> = PRINTABLE_RUN
        .find_iter(data)
        .filter_map(|m| std::str::from_utf8(m.as_bytes()).ok())
        .collect();
    Some(words.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_text_is_indexed_by_major_type() {
        assert_eq!(index_content(b"\x89PNG", "image/png").as_deref(), Some("image"));
        assert_eq!(
            index_content(b"%PDF-1.7", "application/pdf").as_deref(),
            Some("application")
        );
    }

    #[test]
    fn text_is_indexed_by_printable_runs() {
        let data = b"hello\x00ab\x01world wide\x02xyz";
        assert_eq!(
            index_content(data, "text/plain").as_deref(),
            Some("hello\nworld wide")
        );
    }

    #[test]
    fn text_without_long_runs_is_empty() {
        assert_eq!(index_content(b"ab\x00cd", "text/csv").as_deref(), Some(""));
    }

    #[test]
    fn missing_media_type_has_no_index() {
        assert!(index_content(b"anything", "").is_none());
    }

    #[test]
    fn storage_mode_serde() {
        let mode: StorageMode = serde_json::from_str("\"db\"").unwrap();
        assert_eq!(mode, StorageMode::Db);
        assert_eq!(StorageMode::default(), StorageMode::File);
    }
}
