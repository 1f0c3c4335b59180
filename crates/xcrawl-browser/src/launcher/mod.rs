//! Chrome process management.
//!
//! [`ChromeLauncher`] starts one isolated headless Chrome per crawl: a fresh profile
//! directory, a DevTools port picked by Chrome, and a single attached page. The resulting
//! [`ChromeSession`] owns all three and tears them down on close.

mod launcher_core;
mod launcher_types;
mod session;

pub use launcher_core::ChromeLauncher;
pub use launcher_types::{BrowserError, LaunchConfig, DEFAULT_USER_AGENT};
pub use session::ChromeSession;

#[cfg(test)]
#[path = "launcher_tests.rs"]
mod tests;
