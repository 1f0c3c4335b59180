//! # xcrawl core
//!
//! The extraction pipeline behind the xcrawl service. Given a rendered page and a list of
//! XPath expressions it resolves every expression against the live DOM, turns each matched
//! element into a typed record and aggregates the per-expression outcomes.
//!
//! ## Pipeline
//!
//! ```text
//! Crawler::crawl ──► resolve (per selector) ──► classify (per element)
//!        │                                              │
//!        └──────────── CrawlResult ◄────────────────────┘
//!                           │
//!                           ▼
//!                   simplify (optional)
//! ```
//!
//! The browser itself is reached only through the [`SessionLauncher`], [`BrowserSession`] and
//! [`ElementHandle`] traits. `xcrawl-browser` implements them over the Chrome DevTools
//! Protocol; [`mock`] implements them in memory for tests.

pub mod classifier;
pub mod error;
pub mod mock;
pub mod orchestrator;
pub mod resolver;
pub mod session;
pub mod simplify;
pub mod types;

pub use classifier::{classify, heading_level};
pub use error::{CrawlError, SessionError};
pub use orchestrator::{CrawlSettings, Crawler};
pub use resolver::{resolve, ResolveOptions};
pub use session::{BrowserSession, ElementHandle, SessionLauncher};
pub use simplify::simplify;
pub use types::*;
