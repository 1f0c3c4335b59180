//! Element handles backed by `Runtime` remote objects.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use xcrawl_core::{ElementHandle, SessionError};

use crate::cdp::{CdpError, PageSession};

const TAG_NAME_FN: &str = "function() { return this.tagName.toLowerCase(); }";

/// `src` and `href` resolve to absolute URLs through the DOM property, like WebDriver's
/// attribute lookup; everything else is the raw attribute.
const ATTRIBUTE_FN: &str = r#"function(name) {
  if (name === "src" || name === "href") {
    const prop = this[name];
    if (typeof prop === "string" && prop !== "") return prop;
  }
  return this.getAttribute(name);
}"#;

/// Visible text only: an element without a layout box (`<title>`, `<script>`, anything under
/// `display: none`) reads as empty, like WebDriver's element text.
const TEXT_FN: &str = r#"function() {
  const root = this === document.body || this === document.documentElement;
  if (!root && this.getClientRects().length === 0) return "";
  return this.innerText ?? this.textContent ?? "";
}"#;

const SIZE_FN: &str = r#"function() {
  const rect = this.getBoundingClientRect();
  return [Math.round(rect.width), Math.round(rect.height)];
}"#;

/// One element matched by an XPath lookup.
pub struct CdpElement {
    page: Arc<PageSession>,
    object_id: String,
}

impl CdpElement {
    pub(crate) fn new(page: Arc<PageSession>, object_id: String) -> Self {
        Self { page, object_id }
    }

    async fn call(&self, function: &str, args: Option<Vec<Value>>) -> Result<Value, CdpError> {
        self.page
            .call_function_on(&self.object_id, function, args)
            .await
    }
}

fn optional_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn parse_size(value: &Value) -> Result<(u32, u32), CdpError> {
    let dimension = |i: usize| {
        value[i]
            .as_f64()
            .map(|v| v.max(0.0) as u32)
            .ok_or_else(|| CdpError::InvalidResponse(format!("Bad element size: {}", value)))
    };
    Ok((dimension(0)?, dimension(1)?))
}

#[async_trait]
impl ElementHandle for CdpElement {
    async fn tag_name(&self) -> Result<String, SessionError> {
        let value = self.call(TAG_NAME_FN, None).await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>, SessionError> {
        let value = self.call(ATTRIBUTE_FN, Some(vec![json!(name)])).await?;
        Ok(optional_string(value))
    }

    async fn text(&self) -> Result<String, SessionError> {
        let value = self.call(TEXT_FN, None).await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    async fn rendered_size(&self) -> Result<(u32, u32), SessionError> {
        let value = self.call(SIZE_FN, None).await?;
        Ok(parse_size(&value)?)
    }
}
