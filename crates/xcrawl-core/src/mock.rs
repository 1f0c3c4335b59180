//! In-memory browser for tests.
//!
//! [`MockLauncher`] hands out sessions over a scripted [`MockPage`] and records how many
//! sessions were launched and closed, so callers can check teardown behaviour without a
//! real browser.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::SessionError;
use crate::session::{BrowserSession, ElementHandle, SessionLauncher};

/// A scripted DOM element.
#[derive(Debug, Clone, Default)]
pub struct MockElement {
    tag: String,
    attributes: HashMap<String, String>,
    text: String,
    size: (u32, u32),
    stale: bool,
}

impl MockElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Every read fails as if the node had been detached from the document.
    pub fn stale(mut self) -> Self {
        self.stale = true;
        self
    }

    fn check(&self) -> Result<(), SessionError> {
        if self.stale {
            Err(SessionError::Driver(format!(
                "stale element reference: <{}> is no longer attached to the DOM",
                self.tag
            )))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ElementHandle for MockElement {
    async fn tag_name(&self) -> Result<String, SessionError> {
        self.check()?;
        Ok(self.tag.to_lowercase())
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>, SessionError> {
        self.check()?;
        Ok(self.attributes.get(name).cloned())
    }

    async fn text(&self) -> Result<String, SessionError> {
        self.check()?;
        Ok(self.text.clone())
    }

    async fn rendered_size(&self) -> Result<(u32, u32), SessionError> {
        self.check()?;
        Ok(self.size)
    }
}

/// A scripted page.
#[derive(Debug, Clone, Default)]
pub struct MockPage {
    title: String,
    elements: HashMap<String, Vec<MockElement>>,
    appear_after: HashMap<String, usize>,
    failures: HashMap<String, String>,
    navigation_error: Option<String>,
    navigation_delay: Option<Duration>,
    lookup_delay: Option<Duration>,
    title_error: Option<String>,
}

impl MockPage {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Elements returned for `xpath`. Unscripted expressions match nothing.
    pub fn with_elements(mut self, xpath: impl Into<String>, elements: Vec<MockElement>) -> Self {
        self.elements.insert(xpath.into(), elements);
        self
    }

    /// `xpath` matches nothing for the first `polls` lookups.
    pub fn appearing_after(mut self, xpath: impl Into<String>, polls: usize) -> Self {
        self.appear_after.insert(xpath.into(), polls);
        self
    }

    /// Lookups of `xpath` fail with a script error.
    pub fn with_failure(mut self, xpath: impl Into<String>, message: impl Into<String>) -> Self {
        self.failures.insert(xpath.into(), message.into());
        self
    }

    /// Navigation fails with `message`.
    pub fn unreachable(mut self, message: impl Into<String>) -> Self {
        self.navigation_error = Some(message.into());
        self
    }

    /// Navigation takes `delay` before it completes.
    pub fn slow(mut self, delay: Duration) -> Self {
        self.navigation_delay = Some(delay);
        self
    }

    /// Every lookup takes `delay` before it answers.
    pub fn slow_lookups(mut self, delay: Duration) -> Self {
        self.lookup_delay = Some(delay);
        self
    }

    /// Reading the title fails with `message`.
    pub fn with_title_failure(mut self, message: impl Into<String>) -> Self {
        self.title_error = Some(message.into());
        self
    }
}

/// Counters shared between a launcher and its sessions.
#[derive(Debug, Default)]
pub struct SessionStats {
    launched: AtomicUsize,
    closed: AtomicUsize,
    navigations: Mutex<Vec<String>>,
}

impl SessionStats {
    pub fn launched(&self) -> usize {
        self.launched.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().clone()
    }
}

/// Launcher producing [`MockSession`]s over one page.
pub struct MockLauncher {
    page: MockPage,
    stats: Arc<SessionStats>,
    launch_error: Option<String>,
}

impl MockLauncher {
    pub fn new(page: MockPage) -> Self {
        Self {
            page,
            stats: Arc::new(SessionStats::default()),
            launch_error: None,
        }
    }

    /// Every launch fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            page: MockPage::default(),
            stats: Arc::new(SessionStats::default()),
            launch_error: Some(message.into()),
        }
    }

    pub fn stats(&self) -> Arc<SessionStats> {
        self.stats.clone()
    }
}

#[async_trait]
impl SessionLauncher for MockLauncher {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>, SessionError> {
        if let Some(message) = &self.launch_error {
            return Err(SessionError::Launch(message.clone()));
        }
        self.stats.launched.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockSession {
            page: self.page.clone(),
            stats: self.stats.clone(),
            polls: Mutex::new(HashMap::new()),
        }))
    }
}

/// Session over a [`MockPage`].
pub struct MockSession {
    page: MockPage,
    stats: Arc<SessionStats>,
    polls: Mutex<HashMap<String, usize>>,
}

#[async_trait]
impl BrowserSession for MockSession {
    async fn navigate(&self, url: &str) -> Result<(), SessionError> {
        self.stats.navigations.lock().push(url.to_string());
        if let Some(delay) = self.page.navigation_delay {
            tokio::time::sleep(delay).await;
        }
        match &self.page.navigation_error {
            Some(message) => Err(SessionError::Navigation(message.clone())),
            None => Ok(()),
        }
    }

    async fn title(&self) -> Result<String, SessionError> {
        match &self.page.title_error {
            Some(message) => Err(SessionError::Script(message.clone())),
            None => Ok(self.page.title.clone()),
        }
    }

    async fn find_elements(
        &self,
        xpath: &str,
    ) -> Result<Vec<Box<dyn ElementHandle>>, SessionError> {
        if let Some(delay) = self.page.lookup_delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = self.page.failures.get(xpath) {
            return Err(SessionError::Script(message.clone()));
        }

        let seen = {
            let mut polls = self.polls.lock();
            let count = polls.entry(xpath.to_string()).or_insert(0);
            *count += 1;
            *count
        };
        if let Some(&after) = self.page.appear_after.get(xpath) {
            if seen <= after {
                return Ok(Vec::new());
            }
        }

        Ok(self
            .page
            .elements
            .get(xpath)
            .map(|elements| {
                elements
                    .iter()
                    .cloned()
                    .map(|el| Box::new(el) as Box<dyn ElementHandle>)
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn close(self: Box<Self>) -> Result<(), SessionError> {
        self.stats.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
