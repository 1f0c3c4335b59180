//! xcrawl - XPath web element crawler
//!
//! Main entry point for the xcrawl CLI and server.

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use xcrawl_api::{ApiConfig, ApiServer, AppState};
use xcrawl_browser::{ChromeLauncher, LaunchConfig};
use xcrawl_config::{find_available_port, Config, ConfigLoader, ConfigValidator, LoggingConfig};
use xcrawl_core::{CrawlSettings, Crawler, ResolveOptions};

mod cli;

use cli::{Cli, Commands, DEFAULT_CONFIG_PATH};

/// Initialize tracing with console and optional file output.
///
/// `RUST_LOG` wins over `logging.level`. With `logging.dir` set, logs are also written to
/// daily rolling files there.
fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = match &logging.dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(&logging.file_prefix)
                .max_log_files(30)
                .build(dir)?;

            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            // The worker flushes until its guard drops
            static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
                std::sync::OnceLock::new();
            let _ = GUARD.set(guard);

            Some(fmt::layer().with_writer(non_blocking).with_ansi(false).boxed())
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .with(file_layer)
        .try_init()?;

    Ok(())
}

/// Explicit paths must exist; the default path is optional.
fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => ConfigLoader::load(path)?,
        None => ConfigLoader::load_or_default(Path::new(DEFAULT_CONFIG_PATH))?,
    };
    Ok(config)
}

fn launch_config(config: &Config) -> LaunchConfig {
    let browser = &config.browser;
    LaunchConfig {
        chrome_path: browser.chrome_path.clone(),
        headless: browser.headless,
        no_sandbox: browser.no_sandbox,
        window_width: browser.window_width,
        window_height: browser.window_height,
        user_agent: browser.user_agent.clone(),
        launch_timeout: browser.launch_timeout(),
        extra_args: browser.extra_args.clone(),
    }
}

fn crawl_settings(config: &Config) -> CrawlSettings {
    let crawl = &config.crawl;
    CrawlSettings {
        page_load_timeout: crawl.page_load_timeout(),
        settle_delay: crawl.settle_delay(),
        selector: ResolveOptions {
            timeout: crawl.selector_timeout(),
            poll_interval: crawl.poll_interval(),
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    let warnings = ConfigValidator::validate(&config).into_result()?;

    match cli.command {
        Some(Commands::CheckConfig) => {
            for warning in &warnings {
                println!("warning: {}: {}", warning.path, warning.message);
            }
            print!("{}", ConfigLoader::to_toml(&config)?);
            Ok(())
        }
        command => {
            if let Some(Commands::Run { host, port }) = command {
                if let Some(host) = host {
                    config.server.host = host;
                }
                if let Some(port) = port {
                    config.server.port = port;
                }
            }

            init_tracing(&config.logging)?;
            for warning in &warnings {
                warn!("Config {}: {}", warning.path, warning.message);
            }
            run_server(config).await
        }
    }
}

/// Run the crawl server in foreground.
async fn run_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting xcrawl v{}", env!("CARGO_PKG_VERSION"));

    let launcher = ChromeLauncher::new(launch_config(&config));
    match launcher.chrome_executable() {
        Ok(path) => info!("Using Chrome at {}", path.display()),
        Err(e) => warn!("{} Crawls will fail until Chrome is available.", e),
    }

    let crawler = Crawler::new(Arc::new(launcher), crawl_settings(&config));
    let state = AppState::new(crawler).with_request_timeout(config.server.request_timeout());

    let server = &config.server;
    let port = find_available_port(&server.host, server.port, server.port_search_attempts)?;
    if port != server.port {
        warn!("Port {} is busy, using {}", server.port, port);
    }

    let api = ApiServer::new(ApiConfig::new(&server.host, port), Arc::new(state));
    api.run().await
}
