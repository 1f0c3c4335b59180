//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Collapse the errors into one [`ConfigError::Invalid`], if there are any.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        if self.is_valid() {
            return Ok(self.warnings);
        }
        let message = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.path, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        Err(ConfigError::Invalid(message))
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_server(config, &mut result);
        Self::validate_browser(config, &mut result);
        Self::validate_crawl(config, &mut result);
        Self::validate_logging(config, &mut result);

        result
    }

    fn validate_server(config: &Config, result: &mut ValidationResult) {
        let server = &config.server;

        if server.port == 0 {
            result.add_error(ValidationError::new("server.port", "Port cannot be 0"));
        }

        if server.host.is_empty() {
            result.add_error(ValidationError::new("server.host", "Host cannot be empty"));
        }

        if server.port_search_attempts == 0 {
            result.add_error(ValidationError::new(
                "server.port_search_attempts",
                "port_search_attempts must be greater than 0",
            ));
        }

        if let Some(timeout) = server.request_timeout_ms {
            if timeout == 0 {
                result.add_error(ValidationError::new(
                    "server.request_timeout_ms",
                    "request_timeout_ms must be greater than 0",
                ));
            } else if timeout < config.crawl.page_load_timeout_ms + config.crawl.settle_delay_ms {
                result.add_warning(ValidationWarning::new(
                    "server.request_timeout_ms",
                    "request_timeout_ms is shorter than page load plus settle delay, \
                     most crawls will time out",
                ));
            }
        }
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        let browser = &config.browser;

        if browser.window_width == 0 || browser.window_height == 0 {
            result.add_error(ValidationError::new(
                "browser.window_width",
                "Window size must be non-zero",
            ));
        }

        if browser.launch_timeout_ms == 0 {
            result.add_error(ValidationError::new(
                "browser.launch_timeout_ms",
                "launch_timeout_ms must be greater than 0",
            ));
        }

        if let Some(ref path) = browser.chrome_path {
            if !path.exists() {
                result.add_warning(ValidationWarning::new(
                    "browser.chrome_path",
                    format!("Chrome executable does not exist: {:?}", path),
                ));
            }
        }

        if !browser.headless {
            result.add_warning(ValidationWarning::new(
                "browser.headless",
                "headless is disabled, every crawl will open a visible window",
            ));
        }
    }

    fn validate_crawl(config: &Config, result: &mut ValidationResult) {
        let crawl = &config.crawl;

        for (field, value) in [
            ("crawl.page_load_timeout_ms", crawl.page_load_timeout_ms),
            ("crawl.selector_timeout_ms", crawl.selector_timeout_ms),
            ("crawl.poll_interval_ms", crawl.poll_interval_ms),
        ] {
            if value == 0 {
                result.add_error(ValidationError::new(field, "must be greater than 0"));
            }
        }

        if crawl.poll_interval_ms > crawl.selector_timeout_ms {
            result.add_warning(ValidationWarning::new(
                "crawl.poll_interval_ms",
                "poll_interval_ms exceeds selector_timeout_ms, selectors are checked only once",
            ));
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        if config.logging.level.trim().is_empty() {
            result.add_error(ValidationError::new("logging.level", "Log level cannot be empty"));
        }

        if config.logging.dir.is_some() && config.logging.file_prefix.is_empty() {
            result.add_error(ValidationError::new(
                "logging.file_prefix",
                "file_prefix cannot be empty when logging.dir is set",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
