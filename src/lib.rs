//! Static file server with a generated directory grid and an inline
//! image/video viewer.
//!
//! Every GET goes through [`handlers::dispatch`], which classifies the
//! request path against the [`ServeRoot`] and hands it to exactly one of the
//! thumbnail responder, the directory listing, the media viewer, or a raw
//! file transfer.

pub mod config;
pub mod content_type;
pub mod error;
pub mod format;
pub mod handlers;
pub mod icons;
pub mod listing;
pub mod logging;
pub mod pages;
pub mod path;
pub mod thumbnail;
pub mod viewer;

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

pub use error::ServeError;
pub use path::{RequestPath, ServeRoot};

// --- State ---
pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub root: ServeRoot,
}

// --- Router ---

/// Builds the router. Each call returns an independent instance, so tests
/// can spin one up per fixture directory.
pub fn app(root: ServeRoot, verbose: bool) -> Router {
    let state = Arc::new(AppState { root });

    let router = Router::new()
        .route("/", get(handlers::dispatch)) // "/*path" does not match the bare root
        .route("/*path", get(handlers::dispatch))
        .layer(TraceLayer::new_for_http());

    // Outermost layer, so the logged status is the final one
    let router = if verbose {
        router.layer(middleware::from_fn(logging::log_requests))
    } else {
        router
    };

    router.with_state(state)
}
