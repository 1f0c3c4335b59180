//! Crawl requests.

use crate::error::CrawlError;

/// A validated crawl request. Always carries at least one selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlRequest {
    url: String,
    selectors: Vec<String>,
    simplify: bool,
}

impl CrawlRequest {
    pub fn new(url: impl Into<String>, selectors: Vec<String>) -> Result<Self, CrawlError> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(CrawlError::EmptyUrl);
        }
        if selectors.is_empty() {
            return Err(CrawlError::NoSelectors);
        }
        Ok(Self {
            url,
            selectors,
            simplify: true,
        })
    }

    /// Choose the response shape. Defaults to simplified.
    pub fn with_simplify(mut self, simplify: bool) -> Self {
        self.simplify = simplify;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn selectors(&self) -> &[String] {
        &self.selectors
    }

    pub fn simplify(&self) -> bool {
        self.simplify
    }
}
