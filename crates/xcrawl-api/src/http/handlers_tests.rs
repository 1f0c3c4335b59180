use axum::http::HeaderValue;

use super::*;

fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

#[test]
fn test_is_json() {
    assert!(is_json(&json_headers()));

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("Application/JSON; charset=utf-8"),
    );
    assert!(is_json(&headers));

    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/merge-patch+json"),
    );
    assert!(is_json(&headers));

    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    assert!(!is_json(&headers));

    assert!(!is_json(&HeaderMap::new()));
}

#[test]
fn test_parse_valid_request() {
    let body = br#"{"url": "https://example.com", "xpaths": ["//h1", "//img"]}"#;
    let request = parse_crawl_request(&json_headers(), body).unwrap();

    assert_eq!(request.url(), "https://example.com");
    assert_eq!(request.selectors(), ["//h1", "//img"]);
    assert!(request.simplify());
}

#[test]
fn test_parse_full_format() {
    let body = br#"{"url": "https://example.com", "xpaths": ["//h1"], "simplified_format": false}"#;
    let request = parse_crawl_request(&json_headers(), body).unwrap();
    assert!(!request.simplify());
}

#[test]
fn test_parse_rejects_non_json() {
    let body = br#"{"url": "https://example.com", "xpaths": ["//h1"]}"#;
    assert_eq!(
        parse_crawl_request(&HeaderMap::new(), body).unwrap_err(),
        ApiError::InvalidBody
    );
    assert_eq!(
        parse_crawl_request(&json_headers(), b"{not json").unwrap_err(),
        ApiError::InvalidBody
    );
    assert_eq!(
        parse_crawl_request(&json_headers(), b"[\"//h1\"]").unwrap_err(),
        ApiError::InvalidBody
    );
}

#[test]
fn test_parse_lists_missing_fields() {
    assert_eq!(
        parse_crawl_request(&json_headers(), b"{}").unwrap_err(),
        ApiError::MissingParameters(vec!["url", "xpaths"])
    );
    assert_eq!(
        parse_crawl_request(&json_headers(), br#"{"url": "https://example.com"}"#).unwrap_err(),
        ApiError::MissingParameters(vec!["xpaths"])
    );
    assert_eq!(
        parse_crawl_request(&json_headers(), br#"{"xpaths": ["//h1"]}"#).unwrap_err(),
        ApiError::MissingParameters(vec!["url"])
    );
}

#[test]
fn test_parse_rejects_bad_selectors() {
    for body in [
        br#"{"url": "https://example.com", "xpaths": []}"#.as_slice(),
        br#"{"url": "https://example.com", "xpaths": "//h1"}"#.as_slice(),
        br#"{"url": "https://example.com", "xpaths": ["//h1", 3]}"#.as_slice(),
    ] {
        assert_eq!(
            parse_crawl_request(&json_headers(), body).unwrap_err(),
            ApiError::InvalidSelectors
        );
    }
}

#[test]
fn test_parse_rejects_bad_url() {
    assert_eq!(
        parse_crawl_request(&json_headers(), br#"{"url": 42, "xpaths": ["//h1"]}"#).unwrap_err(),
        ApiError::InvalidUrl
    );
    assert_eq!(
        parse_crawl_request(&json_headers(), br#"{"url": "  ", "xpaths": ["//h1"]}"#).unwrap_err(),
        ApiError::InvalidUrl
    );
}

#[tokio::test]
async fn test_home_page() {
    let Html(page) = home().await;
    assert!(page.contains("POST /crawl"));
    assert!(page.contains("\"xpaths\""));
}
