use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::info;

/// Verbose-mode access log: method, path, final status and duration.
///
/// The status is read off the response the inner service returned, so it is
/// whatever the handler (or `ServeFile`) actually decided, 206/304 included.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();
    info!("Received request: {} {}", method, path);

    let response = next.run(request).await;

    info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        duration = ?start.elapsed(),
        "Served request"
    );
    response
}
