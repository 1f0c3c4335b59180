//! Navigation operations for CDP page session.

use std::time::Duration;

use serde_json::json;
use tracing::debug;

use crate::cdp::error::CdpError;

use super::core::PageSession;

const LOAD_POLL_INTERVAL: Duration = Duration::from_millis(100);

impl PageSession {
    /// Navigate to URL and wait until the document has fully loaded.
    ///
    /// Callers bound the total wait with their own timeout.
    pub async fn navigate(&self, url: &str) -> Result<String, CdpError> {
        let result = self
            .call("Page.navigate", Some(json!({"url": url})))
            .await?;

        if let Some(error) = result.get("errorText") {
            return Err(CdpError::NavigationFailed(
                error.as_str().unwrap_or("Unknown error").to_string(),
            ));
        }

        let frame_id = result["frameId"]
            .as_str()
            .unwrap_or("main")
            .to_string();

        self.wait_until_loaded(url.starts_with("about:")).await?;

        debug!("Navigated to {}", url);
        Ok(frame_id)
    }

    /// Poll until `document.readyState` is `complete`.
    ///
    /// A fresh target reports `complete` for its initial `about:blank` document, so unless
    /// `allow_blank` is set that document does not count as loaded.
    async fn wait_until_loaded(&self, allow_blank: bool) -> Result<(), CdpError> {
        loop {
            let state = self
                .evaluate("[document.readyState, location.href]")
                .await?;

            let ready = state[0].as_str() == Some("complete");
            let blank = state[1].as_str() == Some("about:blank");
            if ready && (allow_blank || !blank) {
                return Ok(());
            }

            tokio::time::sleep(LOAD_POLL_INTERVAL).await;
        }
    }

    /// Get page title.
    pub async fn get_title(&self) -> Result<String, CdpError> {
        let result = self.evaluate("document.title").await?;
        Ok(result.as_str().unwrap_or("").to_string())
    }
}
