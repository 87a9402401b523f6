use std::path::Path;

pub const OCTET_STREAM: &str = "application/octet-stream";

// --- Lookup Tables ---

/// Media types the browser players need exactly, regardless of what the
/// registry would say (`mkv` is played through the webm pipeline).
const MEDIA_TYPES: &[(&str, &str)] = &[
    ("mp4", "video/mp4"),
    ("webm", "video/webm"),
    ("ogg", "video/ogg"),
    ("m4v", "video/x-m4v"),
    ("mkv", "video/webm"),
    ("mov", "video/quicktime"),
    ("mp3", "audio/mpeg"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
];

// --- Classification ---

/// How the listing and dispatcher treat a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Other,
}

impl MediaKind {
    pub fn of(content_type: &str) -> Self {
        if content_type.starts_with("image/") {
            MediaKind::Image
        } else if content_type.starts_with("video/") {
            MediaKind::Video
        } else {
            MediaKind::Other
        }
    }

    pub fn is_media(self) -> bool {
        self != MediaKind::Other
    }
}

/// Lowercased extension without the dot, `""` when there is none.
pub fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase()
}

// --- Resolution ---

/// Maps a path to a MIME type. Always returns something usable.
pub fn resolve(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    let ext = extension(path);
    if let Some((_, mime)) = MEDIA_TYPES.iter().find(|(known, _)| *known == ext) {
        return (*mime).to_string();
    }
    // from_ext("") guesses nothing, the guard just keeps that explicit
    match mime_guess::from_ext(&ext).first() {
        Some(mime) if !ext.is_empty() => mime.to_string(),
        _ => OCTET_STREAM.to_string(),
    }
}
