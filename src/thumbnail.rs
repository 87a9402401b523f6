use axum::{
    extract::Request,
    http::{header, HeaderValue},
    response::Response,
};
use tokio::fs;
use tracing::debug;

use crate::{
    content_type,
    error::ServeError,
    handlers,
    path::{RequestPath, ServeRoot},
};

// --- Constants ---

/// Marker segment the listing page prefixes thumbnail URLs with.
pub const THUMBNAIL_PREFIX: &str = "/_thumbnail";

pub const THUMBNAIL_CACHE_CONTROL: &str = "public, max-age=86400";

/// Returns the path after the thumbnail marker, or `None` for other routes.
pub fn strip_marker(uri_path: &str) -> Option<&str> {
    uri_path
        .strip_prefix(THUMBNAIL_PREFIX)
        .filter(|rest| rest.starts_with('/')) // "/_thumbnails/..." is a normal path
}

// --- Handler ---

/// Serves the original file as its own thumbnail. No scaling is done; the
/// 24h cache directive plus `ServeFile`'s Last-Modified / If-Modified-Since
/// handling is what makes repeated grid renders cheap.
pub async fn serve(root: &ServeRoot, rest: &str, request: Request) -> Result<Response, ServeError> {
    let relative = RequestPath::parse(rest);
    let full_path = root.resolve(&relative).await?;

    let metadata = fs::metadata(&full_path).await?;
    if !metadata.is_file() {
        debug!("Thumbnail requested for non-file {}", full_path.display());
        return Err(ServeError::not_found());
    }

    // Same content type the raw route would send for this file
    let content_type = content_type::resolve(&full_path);
    let mut response = handlers::transfer(&full_path, &content_type, request).await;
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(THUMBNAIL_CACHE_CONTROL),
    );
    Ok(response)
}
