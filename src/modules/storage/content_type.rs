//! Content type detection from file extensions

const CONTENT_TYPES: &[(&str, &str)] = &[
    // Images
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("svg", "image/svg+xml"),
    ("bmp", "image/bmp"),
    ("tiff", "image/tiff"),
    ("ico", "image/x-icon"),
    // Video
    ("mp4", "video/mp4"),
    ("mov", "video/quicktime"),
    ("avi", "video/x-msvideo"),
    ("webm", "video/webm"),
    ("mkv", "video/x-matroska"),
    ("flv", "video/x-flv"),
    ("wmv", "video/x-ms-wmv"),
    ("m4v", "video/x-m4v"),
    ("3gp", "video/3gpp"),
    // Audio
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("flac", "audio/flac"),
    ("m4a", "audio/mp4"),
    ("aac", "audio/aac"),
    ("ogg", "audio/ogg"),
    ("wma", "audio/x-ms-wma"),
    // Documents
    ("pdf", "application/pdf"),
    ("doc", "application/msword"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("txt", "text/plain"),
    ("json", "application/json"),
];

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Lowercased extension after the last dot, if any
pub fn extension_of(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
}

pub fn content_type_for(filename: &str) -> &'static str {
    extension_of(filename)
        .and_then(|ext| {
            CONTENT_TYPES
                .iter()
                .find(|(known, _)| *known == ext)
                .map(|(_, content_type)| *content_type)
        })
        .unwrap_or(DEFAULT_CONTENT_TYPE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_extensions() {
        assert_eq!(content_type_for("foto.JPG"), "image/jpeg");
        assert_eq!(content_type_for("clip.final.mov"), "video/quicktime");
        assert_eq!(content_type_for("himno.mp3"), "audio/mpeg");
        assert_eq!(content_type_for("guia.pdf"), "application/pdf");
    }

    #[test]
    fn test_unknown_or_missing_extension() {
        assert_eq!(content_type_for("archivo"), DEFAULT_CONTENT_TYPE);
        assert_eq!(content_type_for("archivo.xyz"), DEFAULT_CONTENT_TYPE);
        assert_eq!(content_type_for("archivo."), DEFAULT_CONTENT_TYPE);
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("a.PNG"), Some("png".to_string()));
        assert_eq!(extension_of("noext"), None);
        assert_eq!(extension_of("weird.p/ng"), None);
    }
}
