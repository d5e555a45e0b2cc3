//! Configuration module for ribbonrack
//!
//! Provides types and parsing for `rack.toml` configuration.

pub mod loader;
pub mod schema;

pub use loader::{load_config, ConfigError, LoadedConfig};
pub use schema::*;
