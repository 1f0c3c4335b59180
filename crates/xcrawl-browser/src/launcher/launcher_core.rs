//! ChromeLauncher: executable discovery, process start, DevTools handshake.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::{Child, Command};
use tracing::{debug, info};
use xcrawl_core::{BrowserSession, SessionError, SessionLauncher};

use crate::cdp::CdpClient;
use super::{BrowserError, ChromeSession, LaunchConfig};

const PORT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Starts isolated headless Chrome sessions.
#[derive(Debug, Clone, Default)]
pub struct ChromeLauncher {
    config: LaunchConfig,
}

impl ChromeLauncher {
    pub fn new(config: LaunchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LaunchConfig {
        &self.config
    }

    /// Find Chrome executable path.
    pub fn find_chrome() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        let paths: &[&str] = &[
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
        ];

        #[cfg(target_os = "linux")]
        let paths: &[&str] = &[
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
        ];

        #[cfg(target_os = "windows")]
        let paths: &[&str] = &[
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        ];

        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        let paths: &[&str] = &[];

        paths.iter().map(PathBuf::from).find(|p| p.exists())
    }

    /// The configured executable, or an auto-detected one.
    pub fn chrome_executable(&self) -> Result<PathBuf, BrowserError> {
        match &self.config.chrome_path {
            Some(path) if path.exists() => Ok(path.clone()),
            Some(path) => Err(BrowserError::LaunchFailed(format!(
                "Chrome executable not found at {}",
                path.display()
            ))),
            None => Self::find_chrome().ok_or(BrowserError::ChromeNotFound),
        }
    }

    /// Start a fresh Chrome and attach to its blank page.
    pub async fn start(&self) -> Result<ChromeSession, BrowserError> {
        let chrome_path = self.chrome_executable()?;
        let profile = tempfile::Builder::new()
            .prefix("xcrawl-chrome-")
            .tempdir()?;

        let mut child = Command::new(&chrome_path)
            .args(self.config.chrome_args(profile.path()))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| BrowserError::LaunchFailed(format!("{}: {}", chrome_path.display(), e)))?;

        debug!(
            "Chrome started with PID {:?}, profile at {}",
            child.id(),
            profile.path().display()
        );

        let port =
            wait_for_devtools_port(profile.path(), &mut child, self.config.launch_timeout).await?;

        let client = CdpClient::connect(&format!("http://127.0.0.1:{}", port)).await?;
        let page = client.new_page().await?;
        page.set_viewport(self.config.window_width, self.config.window_height)
            .await?;
        page.set_user_agent(&self.config.user_agent).await?;

        info!("Connected to {} on port {}", client.browser(), port);
        Ok(ChromeSession::new(child, client, page, profile))
    }
}

#[async_trait]
impl SessionLauncher for ChromeLauncher {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>, SessionError> {
        let session = self
            .start()
            .await
            .map_err(|e| SessionError::Launch(e.to_string()))?;
        Ok(Box::new(session))
    }
}

/// Parse Chrome's `DevToolsActivePort` file: the port on the first line, the browser
/// target path on the second.
pub(crate) fn parse_devtools_active_port(contents: &str) -> Option<u16> {
    contents
        .lines()
        .next()
        .and_then(|line| line.trim().parse::<u16>().ok())
        .filter(|port| *port != 0)
}

/// Wait for Chrome to announce its DevTools port in the profile directory.
pub(crate) async fn wait_for_devtools_port(
    profile_dir: &Path,
    child: &mut Child,
    timeout: Duration,
) -> Result<u16, BrowserError> {
    let port_file = profile_dir.join("DevToolsActivePort");
    let deadline = tokio::time::Instant::now() + timeout;

    loop {
        if let Some(status) = child.try_wait()? {
            return Err(BrowserError::LaunchFailed(format!(
                "Chrome exited during startup ({})",
                status
            )));
        }

        if let Ok(contents) = tokio::fs::read_to_string(&port_file).await {
            if let Some(port) = parse_devtools_active_port(&contents) {
                return Ok(port);
            }
        }

        if tokio::time::Instant::now() >= deadline {
            return Err(BrowserError::LaunchFailed(format!(
                "Chrome did not expose a DevTools port within {}ms",
                timeout.as_millis()
            )));
        }

        tokio::time::sleep(PORT_POLL_INTERVAL).await;
    }
}
