//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, header};
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Every response is JSON, so nothing may be loaded or framed.
const CSP: &str = "default-src 'none'; frame-ancestors 'none'";

/// Create the application router.
///
/// `state.mcp_path` must be a literal path distinct from `/api/split`;
/// `mdsplit_config::Config::validate` enforces this.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let body_limit = DefaultBodyLimit::max(state.max_body_bytes);

    Router::new()
        .route("/health", get(handlers::health::get_health))
        .route("/api/split", post(handlers::split::post_split))
        .route(&state.mcp_path, post(handlers::mcp::post_mcp))
        .layer(body_limit)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(SetResponseHeaderLayer::overriding(
                    header::CONTENT_SECURITY_POLICY,
                    HeaderValue::from_static(CSP),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_FRAME_OPTIONS,
                    HeaderValue::from_static("DENY"),
                )),
        )
        .with_state(state)
}
