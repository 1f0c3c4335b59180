//! Error types for the extraction pipeline.

use thiserror::Error;

/// Errors raised by a browser session or one of its element handles.
///
/// Selector-level failures are folded into a [`SelectorOutcome`](crate::SelectorOutcome);
/// everything else ends the crawl with an error status.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to launch browser: {0}")]
    Launch(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Script error: {0}")]
    Script(String),

    #[error("Browser session closed")]
    Closed,

    #[error("Driver error: {0}")]
    Driver(String),
}

/// Errors raised while building a crawl request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CrawlError {
    #[error("At least one selector is required")]
    NoSelectors,

    #[error("Target URL cannot be empty")]
    EmptyUrl,
}
