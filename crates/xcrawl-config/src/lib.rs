//! # xcrawl Config
//!
//! Configuration management for the xcrawl service: the TOML schema, loading with
//! environment variable expansion, validation, and startup port selection.

mod error;
mod loader;
mod port;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use port::find_available_port;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
