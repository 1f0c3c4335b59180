//! API error types.

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use xcrawl_core::CrawlError;

/// Errors answered directly by the HTTP layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Wrong content type, unparseable JSON, or a JSON value that is not an object.
    #[error("Request body must be JSON")]
    InvalidBody,

    /// Required fields absent from the body.
    #[error("Missing required parameters: {}", .0.join(", "))]
    MissingParameters(Vec<&'static str>),

    #[error("url must be a non-empty string")]
    InvalidUrl,

    #[error("xpaths must be an array containing at least one XPath")]
    InvalidSelectors,

    /// The crawl outlived the configured request deadline.
    #[error("Crawl timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<CrawlError> for ApiError {
    fn from(e: CrawlError) -> Self {
        match e {
            CrawlError::EmptyUrl => ApiError::InvalidUrl,
            CrawlError::NoSelectors => ApiError::InvalidSelectors,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(json!({
                "status": "error",
                "message": self.to_string(),
            })),
        )
            .into_response()
    }
}
