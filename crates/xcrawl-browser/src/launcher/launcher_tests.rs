use std::path::{Path, PathBuf};
use std::time::Duration;

use xcrawl_core::{SessionError, SessionLauncher};

use super::launcher_core::parse_devtools_active_port;
use super::*;

#[test]
fn test_config_default() {
    let config = LaunchConfig::default();
    assert!(config.headless);
    assert!(config.no_sandbox);
    assert_eq!(config.window_width, 1920);
    assert_eq!(config.window_height, 1080);
    assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    assert_eq!(config.launch_timeout, Duration::from_secs(10));
    assert!(config.chrome_path.is_none());
}

#[test]
fn test_chrome_args_default() {
    let args = LaunchConfig::default().chrome_args(Path::new("/tmp/profile"));

    assert_eq!(args[0], "--remote-debugging-port=0");
    assert!(args.contains(&"--user-data-dir=/tmp/profile".to_string()));
    assert!(args.contains(&"--headless=new".to_string()));
    assert!(args.contains(&"--no-sandbox".to_string()));
    assert!(args.contains(&"--disable-dev-shm-usage".to_string()));
    assert!(args.contains(&"--disable-gpu".to_string()));
    assert!(args.contains(&"--window-size=1920,1080".to_string()));
    assert!(args.contains(&format!("--user-agent={}", DEFAULT_USER_AGENT)));
    assert_eq!(args.last().map(String::as_str), Some("about:blank"));
}

#[test]
fn test_chrome_args_toggles_and_extras() {
    let config = LaunchConfig {
        headless: false,
        no_sandbox: false,
        window_width: 800,
        window_height: 600,
        extra_args: vec!["--lang=en-US".to_string()],
        ..LaunchConfig::default()
    };
    let args = config.chrome_args(Path::new("/tmp/p"));

    assert!(!args.iter().any(|a| a.starts_with("--headless")));
    assert!(!args.contains(&"--no-sandbox".to_string()));
    assert!(args.contains(&"--window-size=800,600".to_string()));
    let extra = args.iter().position(|a| a == "--lang=en-US").unwrap();
    assert_eq!(extra, args.len() - 2);
}

#[test]
fn test_parse_devtools_active_port() {
    assert_eq!(
        parse_devtools_active_port("38211\n/devtools/browser/4f1c\n"),
        Some(38211)
    );
    assert_eq!(parse_devtools_active_port("9222"), Some(9222));
    assert_eq!(parse_devtools_active_port(""), None);
    assert_eq!(parse_devtools_active_port("0\n/devtools/browser/x"), None);
    assert_eq!(parse_devtools_active_port("port\n"), None);
}

#[test]
fn test_browser_error_display() {
    let err = BrowserError::LaunchFailed("permission denied".to_string());
    assert_eq!(err.to_string(), "Failed to launch Chrome: permission denied");

    let err: BrowserError = crate::cdp::CdpError::SessionClosed.into();
    assert_eq!(err.to_string(), "Session closed");
}

#[test]
fn test_find_chrome() {
    if let Some(path) = ChromeLauncher::find_chrome() {
        assert!(path.exists());
    }
}

#[test]
fn test_configured_chrome_path_must_exist() {
    let launcher = ChromeLauncher::new(LaunchConfig {
        chrome_path: Some(PathBuf::from("/nonexistent/chrome")),
        ..LaunchConfig::default()
    });
    let err = launcher.chrome_executable().unwrap_err();
    assert!(err.to_string().contains("/nonexistent/chrome"));
}

#[tokio::test]
async fn test_launch_failure_maps_to_session_error() {
    let launcher = ChromeLauncher::new(LaunchConfig {
        chrome_path: Some(PathBuf::from("/nonexistent/chrome")),
        ..LaunchConfig::default()
    });
    match launcher.launch().await {
        Err(SessionError::Launch(message)) => assert!(message.contains("not found")),
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("launch should fail"),
    }
}

#[cfg(unix)]
mod process {
    use super::super::launcher_core::wait_for_devtools_port;
    use super::*;
    use tokio::process::Command;

    #[tokio::test]
    async fn test_wait_for_devtools_port_reads_file() {
        let profile = tempfile::tempdir().unwrap();
        std::fs::write(
            profile.path().join("DevToolsActivePort"),
            "41234\n/devtools/browser/abc\n",
        )
        .unwrap();
        let mut child = Command::new("sleep").arg("5").kill_on_drop(true).spawn().unwrap();

        let port = wait_for_devtools_port(profile.path(), &mut child, Duration::from_secs(2))
            .await
            .unwrap();
        assert_eq!(port, 41234);
    }

    #[tokio::test]
    async fn test_wait_for_devtools_port_times_out() {
        let profile = tempfile::tempdir().unwrap();
        let mut child = Command::new("sleep").arg("5").kill_on_drop(true).spawn().unwrap();

        let err = wait_for_devtools_port(profile.path(), &mut child, Duration::from_millis(200))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("within 200ms"));
    }

    #[tokio::test]
    async fn test_wait_for_devtools_port_detects_early_exit() {
        let profile = tempfile::tempdir().unwrap();
        let mut child = Command::new("false").spawn().unwrap();
        child.wait().await.unwrap();

        let err = wait_for_devtools_port(profile.path(), &mut child, Duration::from_secs(2))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("exited during startup"));
    }
}
