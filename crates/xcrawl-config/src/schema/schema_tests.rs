use super::*;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 5000);
    assert_eq!(config.server.port_search_attempts, 20);
    assert!(config.server.request_timeout().is_none());
    assert_eq!(config.logging.level, "info");
    assert!(config.logging.dir.is_none());
}

#[test]
fn test_browser_config_default() {
    let browser = BrowserConfig::default();
    assert!(browser.headless);
    assert!(browser.no_sandbox);
    assert_eq!(browser.window_width, 1920);
    assert_eq!(browser.window_height, 1080);
    assert!(browser.user_agent.contains("Chrome/91.0.4472.124"));
    assert_eq!(browser.launch_timeout(), Duration::from_secs(10));
    assert!(browser.extra_args.is_empty());
}

#[test]
fn test_crawl_config_durations() {
    let crawl = CrawlConfig::default();
    assert_eq!(crawl.page_load_timeout(), Duration::from_secs(30));
    assert_eq!(crawl.settle_delay(), Duration::from_secs(3));
    assert_eq!(crawl.selector_timeout(), Duration::from_secs(15));
    assert_eq!(crawl.poll_interval(), Duration::from_millis(500));
}

#[test]
fn test_empty_sections_take_defaults() {
    let config: Config = toml::from_str("[server]\n[browser]\n[crawl]\n[logging]\n").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_partial_section() {
    let config: Config = toml::from_str(
        r#"
        [browser]
        headless = false
        extra_args = ["--lang=de-DE"]

        [server]
        request_timeout_ms = 90000
        "#,
    )
    .unwrap();
    assert!(!config.browser.headless);
    assert!(config.browser.no_sandbox);
    assert_eq!(config.browser.extra_args, vec!["--lang=de-DE"]);
    assert_eq!(
        config.server.request_timeout(),
        Some(Duration::from_secs(90))
    );
    assert_eq!(config.server.port, 5000);
}

#[test]
fn test_serialize_roundtrip_keeps_values() {
    let mut config = Config::default();
    config.browser.chrome_path = Some(PathBuf::from("/opt/chrome/chrome"));
    config.logging.dir = Some(PathBuf::from("/var/log/xcrawl"));

    let text = toml::to_string_pretty(&config).unwrap();
    assert!(text.contains("chrome_path = \"/opt/chrome/chrome\""));
    assert!(!text.contains("request_timeout_ms"));

    let parsed: Config = toml::from_str(&text).unwrap();
    assert_eq!(parsed, config);
}
