//! CDP page session for interacting with a single page.

mod core;
mod js;
mod navigation;
mod xpath;

pub use self::core::PageSession;
