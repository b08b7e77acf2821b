//! Request handling status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome reported by an application after handling a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// No handler accepted the request.
    #[default]
    Unhandled,
    /// A response was produced and sent.
    Handled,
    /// Handling continues outside the dispatching call.
    Asynchronous,
}

impl RequestStatus {
    /// Returns true if the request was handled.
    #[must_use]
    pub const fn is_handled(&self) -> bool {
        matches!(self, Self::Handled)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unhandled => "unhandled",
            Self::Handled => "handled",
            Self::Asynchronous => "asynchronous",
        };
        f.write_str(name)
    }
}
