//! Crawl and help page handlers.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::{info, warn};
use xcrawl_core::{simplify, CrawlRequest};

use crate::error::ApiError;
use crate::state::AppState;

const HOME_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>xcrawl</title></head>
<body>
<h1>XPath web element crawler</h1>
<p><code>POST /crawl</code> with a JSON body:</p>
<pre>
{
    "url": "https://example.com",
    "xpaths": [
        "//img",
        "//h1",
        "//div[@class='content']"
    ],
    "simplified_format": true
}
</pre>
<p>With <code>simplified_format</code> (the default) the response holds the first
<code>h1</code> as <code>title</code> and every matched image under <code>img</code>.
Set it to <code>false</code> for the full per-XPath result.</p>
</body>
</html>
"#;

/// Whether the request declares a JSON body (`application/json` or `application/*+json`).
fn is_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// Validate a `POST /crawl` body into a [`CrawlRequest`].
pub fn parse_crawl_request(headers: &HeaderMap, body: &[u8]) -> Result<CrawlRequest, ApiError> {
    if !is_json(headers) {
        return Err(ApiError::InvalidBody);
    }
    let value: Value = serde_json::from_slice(body).map_err(|_| ApiError::InvalidBody)?;
    let Value::Object(fields) = value else {
        return Err(ApiError::InvalidBody);
    };

    let missing: Vec<&'static str> = ["url", "xpaths"]
        .into_iter()
        .filter(|name| !fields.contains_key(*name))
        .collect();
    if !missing.is_empty() {
        return Err(ApiError::MissingParameters(missing));
    }

    let url = fields["url"].as_str().ok_or(ApiError::InvalidUrl)?;

    let selectors = fields["xpaths"]
        .as_array()
        .ok_or(ApiError::InvalidSelectors)?
        .iter()
        .map(|xpath| xpath.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()
        .ok_or(ApiError::InvalidSelectors)?;

    let simplify = fields
        .get("simplified_format")
        .and_then(Value::as_bool)
        .unwrap_or(true);

    Ok(CrawlRequest::new(url, selectors)?.with_simplify(simplify))
}

/// Crawl a page and answer with the full or simplified result.
///
/// POST /crawl
pub async fn crawl(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let request = parse_crawl_request(&headers, &body).inspect_err(|e| {
        info!("Rejected crawl request: {}", e);
    })?;

    info!(
        "Crawl request: url={} xpaths={}",
        request.url(),
        request.selectors().len()
    );

    let crawl = state.crawler.crawl(&request);
    let result = match state.request_timeout {
        Some(limit) => tokio::time::timeout(limit, crawl).await.map_err(|_| {
            warn!("Crawl of {} exceeded {}ms", request.url(), limit.as_millis());
            ApiError::Timeout(limit)
        })?,
        None => crawl.await,
    };

    if request.simplify() {
        Ok(Json(simplify(&result)).into_response())
    } else {
        Ok(Json(result).into_response())
    }
}

/// Usage page.
///
/// GET /
pub async fn home() -> Html<&'static str> {
    Html(HOME_PAGE)
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;
