//! Browser capability traits.
//!
//! The pipeline never talks to a browser directly. A [`SessionLauncher`] hands out one
//! exclusively owned [`BrowserSession`] per crawl, and the session yields [`ElementHandle`]s
//! for whatever an XPath expression matches.

use async_trait::async_trait;

use crate::error::SessionError;

/// A live reference to one matched DOM element.
#[async_trait]
pub trait ElementHandle: Send + Sync {
    /// Lower-cased tag name.
    async fn tag_name(&self) -> Result<String, SessionError>;

    /// Attribute value, `None` when the element does not carry it.
    async fn attribute(&self, name: &str) -> Result<Option<String>, SessionError>;

    /// Visible text as rendered by the browser.
    async fn text(&self) -> Result<String, SessionError>;

    /// Rendered `(width, height)` in CSS pixels, taken from layout rather than attributes.
    async fn rendered_size(&self) -> Result<(u32, u32), SessionError>;
}

/// One browser instance with a single page, owned by a single crawl.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// Navigate the page and wait until the document has loaded.
    async fn navigate(&self, url: &str) -> Result<(), SessionError>;

    /// Current document title.
    async fn title(&self) -> Result<String, SessionError>;

    /// All elements currently matching `xpath`, in document order.
    ///
    /// Returns an empty list when nothing matches. Malformed expressions and expressions
    /// that select non-element nodes are errors.
    async fn find_elements(&self, xpath: &str) -> Result<Vec<Box<dyn ElementHandle>>, SessionError>;

    /// Tear the session down. Consumes the session so it can only happen once.
    async fn close(self: Box<Self>) -> Result<(), SessionError>;
}

/// Starts isolated browser sessions.
#[async_trait]
pub trait SessionLauncher: Send + Sync {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>, SessionError>;
}
