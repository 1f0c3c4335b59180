//! Application state.

use std::time::Duration;

use xcrawl_core::Crawler;

/// Application state shared across handlers.
pub struct AppState {
    pub crawler: Crawler,
    /// Deadline for a whole `POST /crawl`; unbounded when `None`.
    pub request_timeout: Option<Duration>,
}

impl AppState {
    pub fn new(crawler: Crawler) -> Self {
        Self {
            crawler,
            request_timeout: None,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }
}
