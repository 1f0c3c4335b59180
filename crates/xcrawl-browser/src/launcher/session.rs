//! One running Chrome with its single page.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tempfile::TempDir;
use tokio::process::Child;
use tracing::{debug, warn};
use xcrawl_core::{BrowserSession, ElementHandle, SessionError};

use crate::cdp::{CdpClient, PageSession};
use crate::element::CdpElement;
use super::BrowserError;

/// Grace period for Chrome to exit after `Browser.close` before it is killed.
const EXIT_GRACE: Duration = Duration::from_secs(5);

/// A Chrome process, its DevTools connection, one page and its profile directory.
///
/// Dropping the session kills the process and removes the profile; [`ChromeSession::shutdown`]
/// asks Chrome to exit cleanly first.
pub struct ChromeSession {
    child: Child,
    client: CdpClient,
    page: Arc<PageSession>,
    profile: TempDir,
    group_counter: AtomicU64,
    /// Object group holding the elements from the latest lookup.
    current_group: Mutex<Option<String>>,
}

impl ChromeSession {
    pub(crate) fn new(
        child: Child,
        client: CdpClient,
        page: PageSession,
        profile: TempDir,
    ) -> Self {
        Self {
            child,
            client,
            page: Arc::new(page),
            profile,
            group_counter: AtomicU64::new(1),
            current_group: Mutex::new(None),
        }
    }

    /// The attached page.
    pub fn page(&self) -> &PageSession {
        &self.page
    }

    /// OS process id, if Chrome is still running.
    pub fn pid(&self) -> Option<u32> {
        self.child.id()
    }

    /// Profile directory in use.
    pub fn profile_dir(&self) -> &std::path::Path {
        self.profile.path()
    }

    /// Close the browser, make sure the process is gone and delete the profile.
    pub async fn shutdown(self) -> Result<(), BrowserError> {
        let Self {
            mut child,
            client,
            page,
            profile,
            ..
        } = self;

        if !client.is_connected() {
            debug!("DevTools connection already closed, skipping Browser.close");
        } else if let Err(e) = client.close_browser().await {
            warn!("Browser.close failed: {}", e);
        }

        match tokio::time::timeout(EXIT_GRACE, child.wait()).await {
            Ok(Ok(status)) => debug!("Chrome exited with {}", status),
            _ => {
                warn!("Chrome did not exit in time, killing it");
                child.kill().await?;
            }
        }

        drop(page);
        drop(client);
        profile.close()?;
        Ok(())
    }

    /// Start a new object group for a lookup and release the previous one.
    async fn next_object_group(&self) -> String {
        let group = format!(
            "xcrawl-{}",
            self.group_counter.fetch_add(1, Ordering::SeqCst)
        );
        let previous = self.current_group.lock().replace(group.clone());
        if let Some(previous) = previous {
            if let Err(e) = self.page.release_object_group(&previous).await {
                debug!("Failed to release object group {}: {}", previous, e);
            }
        }
        group
    }
}

#[async_trait]
impl BrowserSession for ChromeSession {
    async fn navigate(&self, url: &str) -> Result<(), SessionError> {
        self.page.navigate(url).await?;
        Ok(())
    }

    async fn title(&self) -> Result<String, SessionError> {
        Ok(self.page.get_title().await?)
    }

    async fn find_elements(
        &self,
        xpath: &str,
    ) -> Result<Vec<Box<dyn ElementHandle>>, SessionError> {
        let group = self.next_object_group().await;
        let nodes = self.page.evaluate_xpath(xpath, &group).await?;

        Ok(nodes
            .into_iter()
            .filter_map(|node| node.object_id)
            .map(|id| Box::new(CdpElement::new(self.page.clone(), id)) as Box<dyn ElementHandle>)
            .collect())
    }

    async fn close(self: Box<Self>) -> Result<(), SessionError> {
        (*self)
            .shutdown()
            .await
            .map_err(|e| SessionError::Driver(e.to_string()))
    }
}
