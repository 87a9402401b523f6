/// Glyph and css class for a non-media file card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileIcon {
    pub glyph: &'static str,
    pub class: &'static str,
}

pub const DIRECTORY_GLYPH: &str = "📁";
pub const VIDEO_GLYPH: &str = "🎬";
pub const BROKEN_IMAGE_GLYPH: &str = "🖼️";

const DEFAULT_ICON: FileIcon = FileIcon {
    glyph: "📄",
    class: "icon-generic",
};

const ICONS: &[(&[&str], FileIcon)] = &[
    (&["pdf"], FileIcon { glyph: "📄", class: "icon-pdf" }),
    (&["doc", "docx"], FileIcon { glyph: "📝", class: "icon-doc" }),
    (&["xls", "xlsx"], FileIcon { glyph: "📊", class: "icon-xls" }),
    (&["txt"], FileIcon { glyph: "📄", class: "icon-txt" }),
    (&["zip", "rar", "7z"], FileIcon { glyph: "🗜️", class: "icon-zip" }),
    (&["mp3", "wav", "ogg"], FileIcon { glyph: "🎵", class: "icon-mp3" }),
    (&["flac"], FileIcon { glyph: "🎵", class: "icon-generic" }),
    (&["exe", "msi"], FileIcon { glyph: "⚙️", class: "icon-generic" }),
    (
        &["js", "py", "php", "html", "css", "go", "java"],
        FileIcon { glyph: "💻", class: "icon-generic" },
    ),
];

/// Looks up the icon for a lowercased extension without the dot.
pub fn for_extension(ext: &str) -> FileIcon {
    ICONS
        .iter()
        .find(|(exts, _)| exts.contains(&ext))
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_ICON)
}
