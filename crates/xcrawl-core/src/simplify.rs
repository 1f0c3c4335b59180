//! Compact title-plus-images view of a crawl.

use crate::types::{CrawlResult, ElementRecord, ImageItem, ImageSummary, SimplifiedResult};

/// Derive the simplified view from a finished crawl.
///
/// The title is the text of the first `h1` found scanning selectors, then items, in order.
/// Images are every image-like item in encounter order; an element matched by two selectors
/// is listed twice.
pub fn simplify(result: &CrawlResult) -> SimplifiedResult {
    let title = records(result)
        .filter_map(|record| record.as_text())
        .find(|text| text.heading_level == Some(1))
        .map(|text| text.text.clone());

    let items: Vec<ImageItem> = records(result)
        .filter_map(|record| record.as_image())
        .map(|image| ImageItem {
            index: image.index,
            src: image.src.clone(),
            width: image.width,
            height: image.height,
        })
        .collect();

    SimplifiedResult {
        status: result.status,
        title,
        img: ImageSummary {
            count: items.len(),
            items,
        },
    }
}

/// Every matched record, selector by selector.
fn records(result: &CrawlResult) -> impl Iterator<Item = &ElementRecord> + '_ {
    result.results.iter().flat_map(|outcome| outcome.items())
}
