//! Crawl orchestration.
//!
//! One crawl owns one browser session for its whole lifetime:
//!
//! ```text
//! launch ──► navigate (bounded) ──► settle ──► title ──► resolve selector 1..n
//!    │             │                                              │
//!    └─────────────┴────────────── close session ◄────────────────┘
//! ```
//!
//! A launch or navigation failure ends the crawl with an error status and no selector
//! outcomes. Selector failures are recorded per selector and never stop the crawl.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::error::SessionError;
use crate::resolver::{resolve, ResolveOptions};
use crate::session::{BrowserSession, SessionLauncher};
use crate::types::{CrawlRequest, CrawlResult};

/// Timing knobs for a crawl.
#[derive(Debug, Clone, Copy)]
pub struct CrawlSettings {
    /// Upper bound on navigation, load included.
    pub page_load_timeout: Duration,
    /// Fixed pause after load so deferred content can render.
    pub settle_delay: Duration,
    /// Per-selector presence wait.
    pub selector: ResolveOptions,
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self {
            page_load_timeout: Duration::from_secs(30),
            settle_delay: Duration::from_secs(3),
            selector: ResolveOptions::default(),
        }
    }
}

/// Runs crawls, one fresh browser session each.
#[derive(Clone)]
pub struct Crawler {
    launcher: Arc<dyn SessionLauncher>,
    settings: CrawlSettings,
}

impl Crawler {
    pub fn new(launcher: Arc<dyn SessionLauncher>, settings: CrawlSettings) -> Self {
        Self { launcher, settings }
    }

    pub fn settings(&self) -> &CrawlSettings {
        &self.settings
    }

    /// Crawl `request.url()` and resolve every selector in order.
    ///
    /// Always returns a well-formed result; the session is closed exactly once on every
    /// path that opened one.
    pub async fn crawl(&self, request: &CrawlRequest) -> CrawlResult {
        let crawl_id = Uuid::new_v4();
        let span = info_span!("crawl", %crawl_id, url = request.url());

        async move {
            let mut result = CrawlResult::new(request.url());

            let session = match self.launcher.launch().await {
                Ok(session) => session,
                Err(e) => {
                    error!("Failed to start browser session: {}", e);
                    result.fail(e);
                    return result;
                }
            };

            if let Err(e) = self.run(session.as_ref(), request, &mut result).await {
                error!("Crawl aborted: {}", e);
                result.fail(e);
            }

            if let Err(e) = session.close().await {
                warn!("Failed to close browser session: {}", e);
            }

            info!(
                status = ?result.status,
                selectors = result.results.len(),
                errors = result.error_count,
                "Crawl finished"
            );
            result
        }
        .instrument(span)
        .await
    }

    async fn run(
        &self,
        session: &dyn BrowserSession,
        request: &CrawlRequest,
        result: &mut CrawlResult,
    ) -> Result<(), SessionError> {
        let timeout = self.settings.page_load_timeout;
        tokio::time::timeout(timeout, session.navigate(request.url()))
            .await
            .map_err(|_| {
                SessionError::Timeout(format!(
                    "Page load exceeded {}ms",
                    timeout.as_millis()
                ))
            })??;

        if !self.settings.settle_delay.is_zero() {
            tokio::time::sleep(self.settings.settle_delay).await;
        }

        let title = session.title().await?;

        for xpath in request.selectors() {
            let outcome = resolve(session, xpath, self.settings.selector).await;
            result.push(outcome);
        }

        result.page_title = Some(title);
        Ok(())
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
