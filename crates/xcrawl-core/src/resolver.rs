//! Selector resolution with a bounded presence wait.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, warn};

use crate::classifier::classify;
use crate::error::SessionError;
use crate::session::{BrowserSession, ElementHandle};
use crate::types::{ElementRecord, SelectorOutcome};

/// How long to wait for a selector and how often to re-check.
#[derive(Debug, Clone, Copy)]
pub struct ResolveOptions {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            poll_interval: Duration::from_millis(500),
        }
    }
}

/// Resolve one XPath expression against the session's page.
///
/// Never fails: a wait timeout or any driver error becomes an error outcome.
pub async fn resolve(
    session: &dyn BrowserSession,
    xpath: &str,
    options: ResolveOptions,
) -> SelectorOutcome {
    let elements = match wait_for_elements(session, xpath, options).await {
        Ok(elements) => elements,
        Err(e) => {
            warn!(xpath, "Selector failed: {}", e);
            return SelectorOutcome::error(xpath, e.to_string());
        }
    };

    match classify_all(&elements).await {
        Ok(items) => {
            debug!(xpath, count = items.len(), "Selector resolved");
            SelectorOutcome::success(xpath, items)
        }
        Err(e) => {
            warn!(xpath, "Failed to read matched element: {}", e);
            SelectorOutcome::error(xpath, e.to_string())
        }
    }
}

/// Poll until at least one element matches or the timeout elapses.
async fn wait_for_elements(
    session: &dyn BrowserSession,
    xpath: &str,
    options: ResolveOptions,
) -> Result<Vec<Box<dyn ElementHandle>>, SessionError> {
    let deadline = Instant::now() + options.timeout;
    let timed_out = || {
        SessionError::Timeout(format!(
            "No element matching '{}' appeared within {}ms",
            xpath,
            options.timeout.as_millis()
        ))
    };

    loop {
        let lookup = session.find_elements(xpath);
        let elements = tokio::time::timeout_at(deadline, lookup)
            .await
            .map_err(|_| timed_out())??;
        if !elements.is_empty() {
            return Ok(elements);
        }

        let now = Instant::now();
        if now >= deadline {
            return Err(timed_out());
        }

        tokio::time::sleep(options.poll_interval.min(deadline - now)).await;
    }
}

async fn classify_all(
    elements: &[Box<dyn ElementHandle>],
) -> Result<Vec<ElementRecord>, SessionError> {
    let mut items = Vec::with_capacity(elements.len());
    for (i, element) in elements.iter().enumerate() {
        items.push(classify(element.as_ref(), i + 1).await?);
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockElement, MockLauncher, MockPage};
    use crate::session::SessionLauncher;

    fn options() -> ResolveOptions {
        ResolveOptions {
            timeout: Duration::from_secs(15),
            poll_interval: Duration::from_millis(500),
        }
    }

    async fn session_for(page: MockPage) -> Box<dyn BrowserSession> {
        MockLauncher::new(page).launch().await.unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolve_assigns_positions_in_document_order() {
        let page = MockPage::new("Test").with_elements(
            "//li",
            vec![
                MockElement::new("li").text("one"),
                MockElement::new("li").text("two"),
                MockElement::new("li").text("three"),
            ],
        );
        let session = session_for(page).await;

        let outcome = resolve(session.as_ref(), "//li", options()).await;
        assert!(!outcome.is_error());
        let texts: Vec<_> = outcome
            .items()
            .iter()
            .map(|item| (item.index(), item.as_text().unwrap().text.clone()))
            .collect();
        assert_eq!(
            texts,
            vec![
                (1, "one".to_string()),
                (2, "two".to_string()),
                (3, "three".to_string())
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolve_times_out_without_matches() {
        let session = session_for(MockPage::new("Test")).await;
        let start = Instant::now();

        let outcome = resolve(session.as_ref(), "//div[@id='missing']", options()).await;
        assert!(outcome.is_error());
        assert!(outcome.message().unwrap().contains("15000ms"));
        assert!(start.elapsed() >= Duration::from_secs(15));
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolve_waits_for_late_elements() {
        let page = MockPage::new("Test")
            .with_elements("//img", vec![MockElement::new("img").attr("src", "a.png")])
            .appearing_after("//img", 3);
        let session = session_for(page).await;

        let outcome = resolve(session.as_ref(), "//img", options()).await;
        assert!(!outcome.is_error());
        assert_eq!(outcome.items().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolve_reports_invalid_expression() {
        let page = MockPage::new("Test")
            .with_failure("//[", "The string '//[' is not a valid XPath expression.");
        let session = session_for(page).await;

        let outcome = resolve(session.as_ref(), "//[", options()).await;
        assert!(outcome.is_error());
        assert!(outcome.message().unwrap().contains("not a valid XPath expression"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolve_reports_stale_element() {
        let page = MockPage::new("Test").with_elements(
            "//p",
            vec![MockElement::new("p").text("ok"), MockElement::new("p").stale()],
        );
        let session = session_for(page).await;

        let outcome = resolve(session.as_ref(), "//p", options()).await;
        assert!(outcome.is_error());
        assert!(outcome.message().unwrap().contains("stale"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolve_bounds_slow_lookups() {
        let page = MockPage::new("Test").slow_lookups(Duration::from_secs(10));
        let session = session_for(page).await;
        let start = Instant::now();

        let outcome = resolve(session.as_ref(), "//div", options()).await;
        assert!(outcome.is_error());
        assert!(outcome.message().unwrap().contains("15000ms"));
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(15));
        assert!(elapsed < Duration::from_secs(16));
    }
}
