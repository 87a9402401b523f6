use axum::response::{IntoResponse, Response};
use http::StatusCode;
use thiserror::Error;
use tracing::error;

/// Failures a single request can end in. None of them are retried.
#[derive(Error, Debug)]
pub enum ServeError {
    /// Missing file or directory, or a path that would leave the served root.
    #[error("{0}")]
    NotFound(String),

    /// The filesystem refused a read (unreadable directory, permissions, ...).
    #[error("{0}")]
    ReadFailure(#[from] std::io::Error),

    /// A page could not be assembled.
    #[error("render failed: {0}")]
    RenderFailure(String),
}

impl ServeError {
    pub fn not_found() -> Self {
        ServeError::NotFound("File not found".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ServeError::NotFound(_) => StatusCode::NOT_FOUND,
            ServeError::ReadFailure(_) | ServeError::RenderFailure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

// --- Response Mapping ---

impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }
        // &'static str / String bodies go out as text/plain
        (status, self.to_string()).into_response()
    }
}
