//! HTTP route definitions.
//!
//! ```text
//! GET  /       - Usage page
//! POST /crawl  - Crawl a page and resolve XPath expressions
//! GET  /livez  - Liveness probe (Kubernetes)
//! ```

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::http::handlers::{crawl, home};
use crate::http::monitoring;
use crate::state::AppState;

/// Create the main router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let crawl_routes = Router::new()
        .route("/", get(home))
        .route("/crawl", post(crawl))
        .with_state(state);

    // Liveness probe has no state dependency
    let liveness_route = Router::new().route("/livez", get(monitoring::liveness_probe));

    Router::new()
        .merge(crawl_routes)
        .merge(liveness_route)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
