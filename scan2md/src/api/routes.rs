use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::state::AppState;
use super::{frontend, handlers};

/// Headroom over the upload ceiling so multipart framing never trips the
/// transport limit before the validator can report the exact size.
/// Bodies beyond `max_bytes + BODY_LIMIT_SLACK` are cut off at the
/// transport instead: the `image` field never arrives, so those requests
/// fail as a missing file rather than with a size message.
const BODY_LIMIT_SLACK: usize = 1024 * 1024;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/process", post(handlers::process_image))
        .route("/", get(frontend::serve_root))
        .route("/{*path}", get(frontend::serve_path))
        .layer(DefaultBodyLimit::max(
            state.config.upload.max_bytes + BODY_LIMIT_SLACK,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
