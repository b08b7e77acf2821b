//! Test error types.

use daedalus_config::ConfigError;
use daedalus_core::CoreError;
use thiserror::Error;

/// Errors that can occur while running an application under test.
#[derive(Error, Debug)]
pub enum TestError {
    /// The application failed to load or to handle a request.
    #[error("Application error: {0}")]
    Application(#[from] CoreError),

    /// The test configuration could not be built.
    #[error("Test configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl TestError {
    /// Returns the underlying application error, if any.
    pub fn as_core(&self) -> Option<&CoreError> {
        match self {
            Self::Application(err) => Some(err),
            Self::Config(_) => None,
        }
    }

    /// Returns true if a request tried to produce a second response.
    pub fn is_invalid_state(&self) -> bool {
        self.as_core().is_some_and(CoreError::is_invalid_state)
    }
}
