//! Caller-facing compact view of a crawl.

use serde::{Deserialize, Serialize};

use super::outcome::CrawlStatus;

/// One image in the simplified view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageItem {
    pub index: usize,
    pub src: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSummary {
    pub count: usize,
    pub items: Vec<ImageItem>,
}

/// Title plus flattened image list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifiedResult {
    pub status: CrawlStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub img: ImageSummary,
}
