//! Parsing and validation of `chronos.toml` configuration files.
//!
//! The configuration controls how a validated constraint set is emitted:
//! the output dialect, numeric precision, and an optional header comment.
//! Constraint declarations themselves are never read from configuration.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
