//! # xcrawl API
//!
//! HTTP front end of the xcrawl service.
//!
//! ```text
//! POST /crawl ──► validate body ──► Crawler::crawl ──► full or simplified JSON
//! GET  /      ──► usage page
//! GET  /livez ──► liveness probe
//! ```
//!
//! Request validation lives here; the crawl pipeline in `xcrawl-core` only ever sees a
//! well-formed [`xcrawl_core::CrawlRequest`].

pub mod error;
pub mod http;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use http::routes::create_router;
pub use server::{ApiConfig, ApiServer};
pub use state::AppState;
