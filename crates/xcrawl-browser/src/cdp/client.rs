//! CDP WebSocket client.

use std::sync::Arc;

use futures::StreamExt;
use serde_json::{json, Value};
use tracing::debug;
use url::Url;

use super::error::CdpError;
use super::protocol::BrowserVersion;
use super::session::PageSession;
use super::transport::Transport;

/// CDP client for one browser.
///
/// Connects to Chrome via WebSocket and hands out page sessions that share the connection.
pub struct CdpClient {
    /// Browser product string reported by `/json/version`.
    browser: String,
    transport: Arc<Transport>,
    /// Background task handle.
    recv_task: tokio::task::JoinHandle<()>,
}

impl CdpClient {
    /// Connect to Chrome at the given endpoint.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Chrome debugging endpoint (e.g., "http://127.0.0.1:9222")
    pub async fn connect(endpoint: &str) -> Result<Self, CdpError> {
        let http_endpoint = endpoint.trim_end_matches('/');

        let version_url = format!("{}/json/version", http_endpoint);
        debug!("Fetching browser version from {}", version_url);

        let version: BrowserVersion = reqwest::get(&version_url)
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| CdpError::ChromeNotAvailable(format!("{}: {}", endpoint, e)))?
            .json()
            .await
            .map_err(|e| CdpError::ChromeNotAvailable(format!("{}: {}", endpoint, e)))?;

        let ws_url = Url::parse(&version.web_socket_debugger_url)?;

        let (ws_stream, _) = tokio_tungstenite::connect_async(ws_url.as_str())
            .await
            .map_err(|e| CdpError::ConnectionFailed(format!("WebSocket: {}", e)))?;

        let (ws_sink, ws_source) = ws_stream.split();
        let transport = Arc::new(Transport::new(ws_sink));

        let recv_task = {
            let transport = transport.clone();
            tokio::spawn(async move {
                transport.receive_loop(ws_source).await;
            })
        };

        debug!("CDP client connected to {} ({})", ws_url, version.browser);

        Ok(Self {
            browser: version.browser,
            transport,
            recv_task,
        })
    }

    /// Send a browser-level CDP command.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.transport.call(method, params, None).await
    }

    /// Browser product string, e.g. `HeadlessChrome/120.0.6099.109`.
    pub fn browser(&self) -> &str {
        &self.browser
    }

    /// Whether the WebSocket is still open.
    pub fn is_connected(&self) -> bool {
        !self.transport.pending().is_closed()
    }

    /// Open a blank page and attach a session to it.
    pub async fn new_page(&self) -> Result<PageSession, CdpError> {
        let created = self
            .call("Target.createTarget", Some(json!({"url": "about:blank"})))
            .await?;
        let target_id = created["targetId"]
            .as_str()
            .ok_or_else(|| CdpError::InvalidResponse("Missing targetId".to_string()))?
            .to_string();

        let attached = self
            .call(
                "Target.attachToTarget",
                Some(json!({
                    "targetId": target_id,
                    "flatten": true
                })),
            )
            .await?;
        let session_id = attached["sessionId"]
            .as_str()
            .ok_or_else(|| CdpError::InvalidResponse("Missing sessionId".to_string()))?
            .to_string();

        debug!("Attached to page {} (session {})", target_id, session_id);

        let session = PageSession::new(target_id, session_id, self.transport.clone());
        session.enable_domains().await?;
        Ok(session)
    }

    /// Ask the browser to exit.
    ///
    /// Chrome may drop the socket before answering; that counts as success.
    pub async fn close_browser(&self) -> Result<(), CdpError> {
        match self.call("Browser.close", None).await {
            Ok(_) | Err(CdpError::SessionClosed) => Ok(()),
            Err(e) => Err(e),
        }
    }
}

impl Drop for CdpClient {
    fn drop(&mut self) {
        self.recv_task.abort();
        self.transport.pending().close();
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
