//! Element classification.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::SessionError;
use crate::session::ElementHandle;
use crate::types::{ElementRecord, ImageRecord, TextRecord};

static HEADING_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^h([1-6])$").unwrap());

/// Heading level for `h1`..`h6`, `None` for any other tag.
pub fn heading_level(tag: &str) -> Option<u8> {
    HEADING_TAG
        .captures(tag)
        .and_then(|caps| caps[1].parse().ok())
}

/// Turn one element into a normalized record at 1-based position `index`.
///
/// An element is image-like when it is an `<img>` or carries a non-empty `src`; everything
/// else is text-bearing. Missing attributes become empty strings. Only driver failures
/// (a detached node, a closed session) are returned as errors.
pub async fn classify(
    element: &dyn ElementHandle,
    index: usize,
) -> Result<ElementRecord, SessionError> {
    let tag = element.tag_name().await?.to_lowercase();
    let src = element.attribute("src").await?.unwrap_or_default();

    if tag == "img" || !src.is_empty() {
        let alt = element.attribute("alt").await?.unwrap_or_default();
        let (width, height) = element.rendered_size().await?;
        return Ok(ElementRecord::Image(ImageRecord {
            tag,
            src,
            alt,
            width,
            height,
            index,
        }));
    }

    let text = element.text().await?.trim().to_string();
    let class = element.attribute("class").await?.unwrap_or_default();
    let id = element.attribute("id").await?.unwrap_or_default();
    let heading_level = heading_level(&tag);

    Ok(ElementRecord::Text(TextRecord {
        tag,
        text,
        class,
        id,
        heading_level,
        index,
    }))
}
