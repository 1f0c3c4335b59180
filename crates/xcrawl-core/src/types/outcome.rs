//! Per-selector outcomes and the aggregate crawl result.

use serde::{Deserialize, Serialize};

use super::record::ElementRecord;

/// Status shared by selector outcomes and whole crawls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrawlStatus {
    Success,
    Error,
}

/// Payload of a selector outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutcomeDetail {
    Matched {
        count: usize,
        items: Vec<ElementRecord>,
    },
    Failed {
        message: String,
    },
}

/// Result of resolving one XPath expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorOutcome {
    pub xpath: String,
    pub status: CrawlStatus,
    #[serde(flatten)]
    pub detail: OutcomeDetail,
}

impl SelectorOutcome {
    pub fn success(xpath: impl Into<String>, items: Vec<ElementRecord>) -> Self {
        Self {
            xpath: xpath.into(),
            status: CrawlStatus::Success,
            detail: OutcomeDetail::Matched {
                count: items.len(),
                items,
            },
        }
    }

    pub fn error(xpath: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            xpath: xpath.into(),
            status: CrawlStatus::Error,
            detail: OutcomeDetail::Failed {
                message: message.into(),
            },
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == CrawlStatus::Error
    }

    /// Matched items; empty for error outcomes.
    pub fn items(&self) -> &[ElementRecord] {
        match &self.detail {
            OutcomeDetail::Matched { items, .. } => items,
            OutcomeDetail::Failed { .. } => &[],
        }
    }

    pub fn message(&self) -> Option<&str> {
        match &self.detail {
            OutcomeDetail::Failed { message } => Some(message),
            OutcomeDetail::Matched { .. } => None,
        }
    }
}

/// Aggregate result of one crawl.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlResult {
    pub status: CrawlStatus,
    pub url: String,
    pub results: Vec<SelectorOutcome>,
    pub error_count: usize,
    /// Capture time in seconds since the Unix epoch.
    pub timestamp: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CrawlResult {
    /// Fresh result for `url`, stamped with the current time.
    pub fn new(url: impl Into<String>) -> Self {
        let now = chrono::Utc::now();
        Self {
            status: CrawlStatus::Success,
            url: url.into(),
            results: Vec::new(),
            error_count: 0,
            timestamp: now.timestamp_micros() as f64 / 1_000_000.0,
            page_title: None,
            message: None,
        }
    }

    /// Append an outcome, counting it when it failed.
    pub fn push(&mut self, outcome: SelectorOutcome) {
        if outcome.is_error() {
            self.error_count += 1;
        }
        self.results.push(outcome);
    }

    /// Mark the whole crawl as failed.
    pub fn fail(&mut self, cause: impl std::fmt::Display) {
        self.status = CrawlStatus::Error;
        self.message = Some(format!("Global error: {}", cause));
    }

    pub fn is_success(&self) -> bool {
        self.status == CrawlStatus::Success
    }
}
