//! Data model shared by the pipeline and the HTTP layer.

mod outcome;
mod record;
mod request;
mod simplified;

pub use outcome::{CrawlResult, CrawlStatus, OutcomeDetail, SelectorOutcome};
pub use record::{ElementRecord, ImageRecord, TextRecord};
pub use request::CrawlRequest;
pub use simplified::{ImageItem, ImageSummary, SimplifiedResult};

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
