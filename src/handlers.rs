use std::path::Path;

use axum::{
    extract::{Query, Request, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tokio::fs;
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tracing::{debug, info};

use crate::{
    content_type::{self, MediaKind},
    error::ServeError,
    listing, pages,
    path::RequestPath,
    thumbnail,
    viewer::MediaViewModel,
    SharedState,
};

// --- Request Payloads ---

/// Only the `view` key matters. Read as raw pairs so a repeated key can
/// never turn into a 400; the first occurrence wins.
#[derive(Deserialize, Debug, Default)]
#[serde(from = "Vec<(String, String)>")]
pub struct ViewQuery {
    view: Option<String>,
}

impl From<Vec<(String, String)>> for ViewQuery {
    fn from(pairs: Vec<(String, String)>) -> Self {
        let view = pairs
            .into_iter()
            .find(|(key, _)| key == "view")
            .map(|(_, value)| value);
        Self { view }
    }
}

impl ViewQuery {
    fn wants_media_viewer(&self) -> bool {
        self.view.as_deref() == Some("media")
    }
}

// --- Dispatcher ---

/// Single entry point for every GET. Picks exactly one of: thumbnail,
/// directory listing, media viewer, raw file transfer.
pub async fn dispatch(
    State(state): State<SharedState>,
    Query(query): Query<ViewQuery>,
    request: Request,
) -> Response {
    match route(&state, &query, request).await {
        Ok(response) => response,
        Err(e) => e.into_response(),
    }
}

async fn route(
    state: &SharedState,
    query: &ViewQuery,
    request: Request,
) -> Result<Response, ServeError> {
    let uri_path = request.uri().path().to_string();

    // Thumbnails bypass everything else, the marker is not a real directory
    if let Some(rest) = thumbnail::strip_marker(&uri_path) {
        debug!("Thumbnail request for {}", rest);
        return thumbnail::serve(&state.root, rest, request).await;
    }

    // Missing, unreadable or escaping paths all end here as 404
    let relative = RequestPath::parse(&uri_path);
    let full_path = state.root.resolve(&relative).await?;
    let metadata = fs::metadata(&full_path).await?;

    if metadata.is_dir() {
        debug!("Listing directory {}", relative.display());
        let model = listing::list_directory(&full_path, &relative).await?;
        return Ok(pages::listing::render(&model).into_response());
    }

    // The viewer is only offered for images and videos; anything else
    // with ?view=media still downloads as-is
    let content_type = content_type::resolve(&full_path);
    if query.wants_media_viewer() && MediaKind::of(&content_type).is_media() {
        info!("Rendering media viewer for {}", relative.display());
        let view = MediaViewModel::load(&full_path, &relative, &content_type).await?;
        return Ok(pages::viewer::render(&view)?.into_response());
    }

    Ok(transfer(&full_path, &content_type, request).await)
}

// --- File Transfer ---

/// Hands the file to `ServeFile`, which owns Range and conditional requests.
/// Used by both the raw route and the thumbnail route so their headers agree.
pub(crate) async fn transfer(path: &Path, content_type: &str, request: Request) -> Response {
    let mime = content_type
        .parse::<mime_guess::Mime>()
        .unwrap_or(mime_guess::mime::APPLICATION_OCTET_STREAM);
    match ServeFile::new_with_mime(path, &mime).oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}
