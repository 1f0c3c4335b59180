//! Normalized per-element records.

use serde::{Deserialize, Serialize};

/// Record extracted from an image-like element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Lower-cased tag name.
    #[serde(rename = "type")]
    pub tag: String,
    pub src: String,
    pub alt: String,
    pub width: u32,
    pub height: u32,
    /// 1-based position within the selector's match list.
    pub index: usize,
}

/// Record extracted from a text-bearing element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRecord {
    /// Lower-cased tag name.
    #[serde(rename = "type")]
    pub tag: String,
    pub text: String,
    pub class: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_level: Option<u8>,
    /// 1-based position within the selector's match list.
    pub index: usize,
}

/// One matched element, keyed by kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ElementRecord {
    Image(ImageRecord),
    Text(TextRecord),
}

impl ElementRecord {
    /// 1-based position within the selector's match list.
    pub fn index(&self) -> usize {
        match self {
            ElementRecord::Image(image) => image.index,
            ElementRecord::Text(text) => text.index,
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            ElementRecord::Image(image) => &image.tag,
            ElementRecord::Text(text) => &text.tag,
        }
    }

    pub fn as_image(&self) -> Option<&ImageRecord> {
        match self {
            ElementRecord::Image(image) => Some(image),
            ElementRecord::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextRecord> {
        match self {
            ElementRecord::Text(text) => Some(text),
            ElementRecord::Image(_) => None,
        }
    }
}
