//! Application configuration for Daedalus.
//!
//! This crate provides the key/value configuration handed to an application
//! when it is constructed:
//! - Nested tables addressed with dotted keys
//! - TOML and JSON string layers
//! - Environment variable overrides
//! - Layered configuration (map → string → env), later layers winning
//!
//! # Example
//!
//! ```
//! use daedalus_config::{ConfigLoader, APPLICATION_CLASS_KEY, ENVIRONMENT_KEY};
//!
//! # fn main() -> Result<(), daedalus_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_map([
//!         (ENVIRONMENT_KEY, "test"),
//!         (APPLICATION_CLASS_KEY, "shop::App"),
//!     ])
//!     .load()?;
//!
//! assert!(config.is_test());
//! # Ok(())
//! # }
//! ```
//!
//! # Environment Variable Overrides
//!
//! Values can be overridden via environment variables using the format
//! `PREFIX__SECTION__KEY`, for example
//! `SHOP__DAEDALUS__DEPLOYMENT__ENVIRONMENT=staging`.

#![warn(missing_docs)]

mod config;
mod error;
mod loader;

pub use config::{
    ApplicationConfig, APPLICATION_CLASS_KEY, DEFAULT_ENVIRONMENT, ENVIRONMENT_KEY,
    TEST_ENVIRONMENT,
};
pub use error::ConfigError;
pub use loader::ConfigLoader;
