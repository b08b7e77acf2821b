//! Error types for Daedalus.
//!
//! This module provides the [`CoreError`] type returned by application
//! handlers, request/response implementations and the application loader.

use daedalus_config::ConfigError;
use std::fmt;
use thiserror::Error;

/// Result type alias using [`CoreError`].
pub type CoreResult<T> = Result<T, CoreError>;

/// Standard error type for Daedalus.
///
/// # Example
///
/// ```
/// use daedalus_core::{CoreError, CoreResult};
///
/// fn respond_twice(already_responded: bool) -> CoreResult<()> {
///     if already_responded {
///         return Err(CoreError::invalid_state("response already created"));
///     }
///     Ok(())
/// }
///
/// assert!(respond_twice(true).is_err());
/// ```
#[derive(Error, Debug)]
pub enum CoreError {
    /// An object was used in a way its lifecycle does not allow.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// The operation is not supported by this implementation.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// A content writer callback failed.
    #[error("Response content writer failed")]
    Stream(#[from] fmt::Error),

    /// No factory is registered for the configured application type.
    #[error("Unknown application class: {class}")]
    UnknownApplication {
        /// The configured application type name.
        class: String,
    },

    /// The application refused to build from its configuration.
    #[error("Failed to construct application {class}: {reason}")]
    Construction {
        /// The application type name.
        class: String,
        /// Why construction failed.
        reason: String,
    },

    /// The configuration could not be read.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl CoreError {
    /// Creates an invalid state error.
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    /// Creates an unsupported operation error.
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedOperation(message.into())
    }

    /// Creates an unknown application error.
    pub fn unknown_application(class: impl Into<String>) -> Self {
        Self::UnknownApplication {
            class: class.into(),
        }
    }

    /// Creates a construction error for application type `A`.
    pub fn construction<A: ?Sized>(reason: impl Into<String>) -> Self {
        Self::Construction {
            class: std::any::type_name::<A>().to_string(),
            reason: reason.into(),
        }
    }

    /// Returns true if this is an invalid state error.
    #[must_use]
    pub const fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState(_))
    }

    /// Returns true if this is an unsupported operation error.
    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedOperation(_))
    }
}
