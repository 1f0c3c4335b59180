//! Launcher type definitions and configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::cdp::CdpError;

/// Desktop Chrome user agent presented by default.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Browser launch errors.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Chrome not found. Please install Google Chrome or set browser.chrome_path.")]
    ChromeNotFound,

    #[error("Failed to launch Chrome: {0}")]
    LaunchFailed(String),

    #[error(transparent)]
    Cdp(#[from] CdpError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// How each Chrome instance is started.
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    /// Explicit executable; auto-detected when `None`.
    pub chrome_path: Option<PathBuf>,
    /// Run without a window.
    pub headless: bool,
    /// Pass `--no-sandbox` (needed when running as root in containers).
    pub no_sandbox: bool,
    /// Window and viewport width.
    pub window_width: u32,
    /// Window and viewport height.
    pub window_height: u32,
    /// User agent for every request the page makes.
    pub user_agent: String,
    /// How long Chrome gets to expose its DevTools port.
    pub launch_timeout: Duration,
    /// Additional command-line switches.
    pub extra_args: Vec<String>,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            chrome_path: None,
            headless: true,
            no_sandbox: true,
            window_width: 1920,
            window_height: 1080,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            launch_timeout: Duration::from_secs(10),
            extra_args: Vec::new(),
        }
    }
}

impl LaunchConfig {
    /// Command line for a Chrome instance using `profile_dir`.
    pub fn chrome_args(&self, profile_dir: &Path) -> Vec<String> {
        let mut args = vec![
            "--remote-debugging-port=0".to_string(),
            format!("--user-data-dir={}", profile_dir.display()),
            "--no-first-run".to_string(),
            "--no-default-browser-check".to_string(),
            "--disable-background-networking".to_string(),
            "--disable-sync".to_string(),
            "--disable-translate".to_string(),
            "--metrics-recording-only".to_string(),
            "--disable-dev-shm-usage".to_string(),
            "--disable-gpu".to_string(),
            format!("--window-size={},{}", self.window_width, self.window_height),
            format!("--user-agent={}", self.user_agent),
        ];

        if self.headless {
            args.push("--headless=new".to_string());
        }
        if self.no_sandbox {
            args.push("--no-sandbox".to_string());
        }

        args.extend(self.extra_args.iter().cloned());
        args.push("about:blank".to_string());
        args
    }
}
