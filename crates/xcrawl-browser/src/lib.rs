//! Headless Chrome driver for xcrawl.
//!
//! Implements the `xcrawl-core` session traits on top of a pure Rust Chrome DevTools
//! Protocol (CDP) client.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐    WebSocket     ┌──────────────────┐
//! │  ChromeSession  │ ◄──────────────► │  headless Chrome │
//! │  (this crate)   │       CDP        │  (one per crawl) │
//! └─────────────────┘                  └──────────────────┘
//! ```
//!
//! Every crawl gets its own Chrome process with a throwaway profile directory and a
//! DevTools port chosen by Chrome itself (`--remote-debugging-port=0`), so concurrent crawls
//! never share browser state.
//!
//! ## Element access
//!
//! XPath expressions are evaluated in the page with `document.evaluate`. Each match is kept
//! as a `Runtime` remote object and read through small functions called on it, so extraction
//! never mutates the document.

pub mod cdp;
mod element;
pub mod launcher;

pub use cdp::{CdpClient, CdpError, PageSession};
pub use element::CdpElement;
pub use launcher::{BrowserError, ChromeLauncher, ChromeSession, LaunchConfig};
