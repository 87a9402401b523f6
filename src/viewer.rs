use std::path::Path;

use tokio::fs;
use tracing::debug;

use crate::{
    content_type::MediaKind,
    error::ServeError,
    format,
    path::RequestPath,
};

/// Everything the media viewer page shows for one file.
#[derive(Debug, Clone)]
pub struct MediaViewModel {
    pub name: String,
    /// Direct URL of the file itself.
    pub file_path: String,
    pub parent_path: String,
    pub is_image: bool,
    pub is_video: bool,
    pub content_type: String,
    pub size: String,
    pub modified: String,
}

impl MediaViewModel {
    /// Stats `file_path` and builds the view model. A file that vanished
    /// since dispatch is [`ServeError::NotFound`].
    pub async fn load(
        file_path: &Path,
        relative: &RequestPath,
        content_type: &str,
    ) -> Result<Self, ServeError> {
        let metadata = fs::metadata(file_path).await.map_err(|e| {
            debug!("Media stat failed for {}: {}", file_path.display(), e);
            ServeError::not_found()
        })?;

        let kind = MediaKind::of(content_type);
        // Top-level files go back to "/"
        let parent_path = relative
            .parent()
            .unwrap_or_else(RequestPath::root)
            .url();

        Ok(Self {
            name: relative.name().unwrap_or_default().to_string(),
            file_path: relative.url(),
            parent_path,
            is_image: kind == MediaKind::Image,
            is_video: kind == MediaKind::Video,
            content_type: content_type.to_string(),
            size: format::file_size(metadata.len()),
            modified: metadata
                .modified()
                .map(|t| format::timestamp(&format::local_time(t)))
                .unwrap_or_default(),
        })
    }
}
