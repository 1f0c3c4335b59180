//! HTTP interface module.
//!
//! Provides the crawl endpoint, the usage page and the liveness probe.

pub mod handlers;
pub mod routes;

pub(crate) mod monitoring;
