use std::path::Path;

use chrono::{DateTime, Local};
use tokio::fs;
use tracing::{debug, error};

use crate::{
    content_type::{self, MediaKind},
    error::ServeError,
    format,
    path::RequestPath,
};

// --- Listing Model ---

/// One grid cell worth of metadata. Built per request, never cached.
#[derive(Debug, Clone)]
pub struct EntryDescriptor {
    pub name: String,
    pub is_dir: bool,
    pub size: u64,
    pub modified: Option<DateTime<Local>>,
    /// Percent-encoded public URL, always starting with `/`.
    pub path: String,
    /// Empty for directories.
    pub content_type: String,
    pub kind: MediaKind,
    /// Lowercased, without the dot. Empty for directories.
    pub extension: String,
}

impl EntryDescriptor {
    pub fn is_image(&self) -> bool {
        !self.is_dir && self.kind == MediaKind::Image
    }

    pub fn is_video(&self) -> bool {
        !self.is_dir && self.kind == MediaKind::Video
    }

    pub fn display_size(&self) -> String {
        format::file_size(self.size)
    }

    pub fn display_date(&self) -> String {
        self.modified.as_ref().map(format::date).unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct ListingModel {
    pub title: String,
    pub current_path: String,
    /// URL of the parent directory, `None` at the root.
    pub parent_path: Option<String>,
    pub entries: Vec<EntryDescriptor>,
}

// --- Directory Reading ---

/// Directories first, then case-insensitive by name.
pub fn sort_entries(entries: &mut [EntryDescriptor]) {
    entries.sort_by(|a, b| {
        b.is_dir
            .cmp(&a.is_dir)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
}

/// Reads the direct children of `dir_path` into a listing model.
///
/// `dir_path` must be the resolved directory for `relative`. Entries whose
/// metadata cannot be read (broken symlinks, races with deletion) are left
/// out; failing to open the directory itself is a [`ServeError::ReadFailure`].
pub async fn list_directory(
    dir_path: &Path,
    relative: &RequestPath,
) -> Result<ListingModel, ServeError> {
    let mut reader = fs::read_dir(dir_path).await.map_err(|e| {
        error!("Failed to read directory {}: {}", dir_path.display(), e);
        ServeError::ReadFailure(e)
    })?;

    let mut entries = Vec::new();
    while let Some(entry) = reader.next_entry().await? {
        let name = match entry.file_name().into_string() {
            Ok(n) => n,
            Err(_) => {
                debug!("Skipping entry with non-UTF8 filename in {}", dir_path.display());
                continue;
            }
        };

        // Follow symlinks so linked directories list as directories
        let metadata = match fs::metadata(entry.path()).await {
            Ok(m) => m,
            Err(e) => {
                debug!("Skipping {}: {}", entry.path().display(), e);
                continue;
            }
        };

        let is_dir = metadata.is_dir();
        // Directories carry no type or extension, only files get classified
        let (content_type, kind, extension) = if is_dir {
            (String::new(), MediaKind::Other, String::new())
        } else {
            let content_type = content_type::resolve(&name);
            let kind = MediaKind::of(&content_type);
            (content_type, kind, content_type::extension(Path::new(&name)))
        };

        entries.push(EntryDescriptor {
            path: relative.join(&name).url(),
            name,
            is_dir,
            size: metadata.len(),
            modified: metadata.modified().ok().map(format::local_time),
            content_type,
            kind,
            extension,
        });
    }

    // read_dir order is filesystem-defined
    sort_entries(&mut entries);

    Ok(ListingModel {
        title: format!("Index of {}", relative.display()),
        current_path: relative.display(),
        parent_path: relative.parent().map(|p| p.url()),
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in ["beta", "Alpha", "zeta"] {
            std::fs::create_dir(dir.path().join(name)).unwrap();
        }
        for name in ["b.txt", "A.png", "c.MP4", "Notes.pdf"] {
            std::fs::write(dir.path().join(name), b"data").unwrap();
        }
        dir
    }

    fn assert_sorted(entries: &[EntryDescriptor]) {
        let first_file = entries.iter().position(|e| !e.is_dir).unwrap_or(entries.len());
        assert!(entries[first_file..].iter().all(|e| !e.is_dir));
        for group in [&entries[..first_file], &entries[first_file..]] {
            for pair in group.windows(2) {
                assert!(pair[0].name.to_lowercase() <= pair[1].name.to_lowercase());
            }
        }
    }

    #[tokio::test]
    async fn directories_precede_files_in_name_order() {
        let dir = fixture();
        let model = list_directory(dir.path(), &RequestPath::root()).await.unwrap();

        let names: Vec<_> = model.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            ["Alpha", "beta", "zeta", "A.png", "b.txt", "c.MP4", "Notes.pdf"]
        );
        assert_sorted(&model.entries);
    }

    #[tokio::test]
    async fn entries_are_classified() {
        let dir = fixture();
        let model = list_directory(dir.path(), &RequestPath::root()).await.unwrap();
        let find = |name: &str| model.entries.iter().find(|e| e.name == name).unwrap();

        assert!(find("A.png").is_image());
        assert!(find("c.MP4").is_video());
        assert_eq!(find("c.MP4").extension, "mp4");
        assert_eq!(find("Notes.pdf").kind, MediaKind::Other);
        assert_eq!(find("Notes.pdf").content_type, "application/pdf");
        assert!(find("beta").is_dir);
        assert!(find("beta").content_type.is_empty());
        assert_eq!(find("b.txt").size, 4);
    }

    #[tokio::test]
    async fn root_listing_has_no_parent() {
        let dir = fixture();
        let model = list_directory(dir.path(), &RequestPath::root()).await.unwrap();
        assert_eq!(model.title, "Index of /");
        assert_eq!(model.current_path, "/");
        assert_eq!(model.parent_path, None);
        assert_eq!(model.entries[0].path, "/Alpha");
    }

    #[tokio::test]
    async fn nested_listing_links_back_up() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("outer/inner dir");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("clip one.webm"), b"").unwrap();

        let relative = RequestPath::parse("/outer/inner%20dir");
        let model = list_directory(&nested, &relative).await.unwrap();
        assert_eq!(model.title, "Index of /outer/inner dir");
        assert_eq!(model.parent_path.as_deref(), Some("/outer"));
        assert_eq!(model.entries[0].path, "/outer/inner%20dir/clip%20one.webm");

        let top = list_directory(&dir.path().join("outer"), &RequestPath::parse("/outer"))
            .await
            .unwrap();
        assert_eq!(top.parent_path.as_deref(), Some("/"));
    }

    #[tokio::test]
    async fn missing_directory_is_a_read_failure() {
        let dir = TempDir::new().unwrap();
        let err = list_directory(&dir.path().join("gone"), &RequestPath::root())
            .await
            .unwrap_err();
        assert!(matches!(err, ServeError::ReadFailure(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn broken_symlinks_are_skipped() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("real.txt"), b"x").unwrap();
        std::os::unix::fs::symlink(dir.path().join("nowhere"), dir.path().join("dangling"))
            .unwrap();

        let model = list_directory(dir.path(), &RequestPath::root()).await.unwrap();
        let names: Vec<_> = model.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["real.txt"]);
    }

    #[test]
    fn sort_is_stable_for_mixed_case() {
        let entry = |name: &str, is_dir: bool| EntryDescriptor {
            name: name.to_string(),
            is_dir,
            size: 0,
            modified: None,
            path: format!("/{name}"),
            content_type: String::new(),
            kind: MediaKind::Other,
            extension: String::new(),
        };
        let mut entries = vec![
            entry("b", false),
            entry("Z", true),
            entry("a", false),
            entry("c", true),
        ];
        sort_entries(&mut entries);
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["c", "Z", "a", "b"]);
        assert_sorted(&entries);
    }
}
