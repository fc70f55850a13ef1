//! Media type to extension mapping and the remote eligibility gate.
//!
//! Only image-like content is offloaded to the bucket. The gate is a
//! case-sensitive membership test on the literal extension, whether it came
//! from [`guess_extension`] on the write path or from [`extension_of`] on a
//! stored name.

/// Extensions whose content may be stored remotely.
pub const REMOTE_ELIGIBLE_EXTENSIONS: [&str; 6] = [".jpg", ".jpeg", ".png", ".gif", ".bmp", ".svg"];

/// Whether content with `extension` is routed to remote storage.
pub fn is_remote_eligible(extension: &str) -> bool {
    REMOTE_ELIGIBLE_EXTENSIONS.contains(&extension)
}

/// Guess the preferred file extension (with leading dot) for a media type.
///
/// Matching ignores ASCII case, surrounding whitespace and any `;` parameters.
/// Unknown types yield an empty string, which never passes the gate.
pub fn guess_extension(media_type: &str) -> &'static str {
    let essence = media_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match essence.as_str() {
        // Images
        "image/jpeg" | "image/pjpeg" => ".jpg",
        "image/png" => ".png",
        "image/gif" => ".gif",
        "image/bmp" | "image/x-ms-bmp" => ".bmp",
        "image/svg+xml" => ".svg",
        "image/webp" => ".webp",
        "image/tiff" => ".tiff",
        "image/x-icon" | "image/vnd.microsoft.icon" => ".ico",
        "image/avif" => ".avif",
        "image/heic" => ".heic",

        // Documents
        "application/pdf" => ".pdf",
        "application/msword" => ".doc",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => ".docx",
        "application/vnd.ms-excel" => ".xls",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet" => ".xlsx",
        "application/vnd.ms-powerpoint" => ".ppt",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation" => ".pptx",
        "application/vnd.oasis.opendocument.text" => ".odt",
        "application/vnd.oasis.opendocument.spreadsheet" => ".ods",
        "application/rtf" => ".rtf",

        // Text
        "text/plain" => ".txt",
        "text/html" => ".html",
        "text/css" => ".css",
        "text/csv" => ".csv",
        "text/markdown" => ".md",
        "text/javascript" | "application/javascript" => ".js",
        "application/json" => ".json",
        "application/xml" | "text/xml" => ".xml",

        // Archives
        "application/zip" => ".zip",
        "application/gzip" | "application/x-gzip" => ".gz",
        "application/x-tar" => ".tar",
        "application/x-7z-compressed" => ".7z",

        // Audio / video
        "audio/mpeg" => ".mp3",
        "audio/wav" | "audio/x-wav" => ".wav",
        "audio/ogg" => ".oga",
        "video/mp4" => ".mp4",
        "video/webm" => ".webm",
        "video/quicktime" => ".mov",

        "application/octet-stream" => ".bin",
        _ => "",
    }
}

/// Extension suffix (with leading dot) of a stored name.
///
/// Only the final path segment is considered; leading dots of that segment
/// do not start an extension, so `".png"` and `"dir/.hidden"` have none.
pub fn extension_of(name: &str) -> &str {
    let base = name.rsplit('/').next().unwrap_or(name);
    let stem_start = base.len() - base.trim_start_matches('.').len();
    match base[stem_start..].rfind('.') {
        Some(dot) => &base[stem_start + dot..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_types_map_to_eligible_extensions() {
        for (media_type, ext) in [
            ("image/jpeg", ".jpg"),
            ("image/png", ".png"),
            ("image/gif", ".gif"),
            ("image/bmp", ".bmp"),
            ("image/svg+xml", ".svg"),
        ] {
            assert_eq!(guess_extension(media_type), ext);
            assert!(is_remote_eligible(ext), "{ext} should be eligible");
        }
    }

    #[test]
    fn documents_are_not_eligible() {
        assert_eq!(guess_extension("application/pdf"), ".pdf");
        assert!(!is_remote_eligible(".pdf"));
        assert!(!is_remote_eligible(guess_extension("application/zip")));
        assert!(!is_remote_eligible(guess_extension("image/webp")));
    }

    #[test]
    fn unknown_type_maps_to_empty() {
        assert_eq!(guess_extension("application/x-made-up"), "");
        assert_eq!(guess_extension(""), "");
        assert_eq!(guess_extension("image/jpg"), "");
        assert!(!is_remote_eligible(""));
    }

    #[test]
    fn media_type_matching_is_lenient() {
        assert_eq!(guess_extension("IMAGE/PNG"), ".png");
        assert_eq!(guess_extension(" image/svg+xml ; charset=utf-8"), ".svg");
    }

    #[test]
    fn gate_is_case_sensitive() {
        assert!(is_remote_eligible(".jpeg"));
        assert!(!is_remote_eligible(".JPG"));
        assert!(!is_remote_eligible("png"));
    }

    #[test]
    fn extension_of_plain_names() {
        assert_eq!(extension_of("abc123.png"), ".png");
        assert_eq!(extension_of("prod_abc.tar.gz"), ".gz");
        assert_eq!(extension_of("da/da39a3ee5e6b4b0d3255bfef95601890afd80709"), "");
        assert_eq!(extension_of("noext"), "");
    }

    #[test]
    fn extension_of_ignores_directories_and_leading_dots() {
        assert_eq!(extension_of("some.dir/file"), "");
        assert_eq!(extension_of(".png"), "");
        assert_eq!(extension_of("..hidden.svg"), ".svg");
        assert_eq!(extension_of("images/Logo.PNG"), ".PNG");
        assert_eq!(extension_of("trailing."), ".");
        assert_eq!(extension_of("x\\.png"), ".png");
    }

    #[test]
    fn reference_suffix_dispatch() {
        let image_like = |name: &str| is_remote_eligible(extension_of(name));
        assert!(image_like("abc123.png"));
        assert!(image_like("tenant/abc.svg"));
        assert!(!image_like("ab/abcdef"));
        assert!(!image_like("report.pdf"));
        assert!(!image_like("photo.JPG"));
    }
}
