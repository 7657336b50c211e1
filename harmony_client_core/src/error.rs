//! Error types for the Harmony client core library
//!
//! Errors are split by where they originate so the CLI can map each one to a
//! user-facing message and an exit code.

use std::fmt;
use thiserror::Error;

pub mod upstream;
pub mod validation;

pub use self::upstream::UpstreamError;
pub use self::validation::ValidationError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// The kind of remote resource a lookup was looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Container,
    Machine,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Container => f.write_str("Container"),
            Self::Machine => f.write_str("Machine"),
        }
    }
}

/// Main error type for the Harmony client core library
///
/// - Validation errors: detected locally, never reach the network
/// - Upstream errors: the Harmony API failed or could not be reached
/// - Not found: a lookup completed but matched nothing
#[derive(Error, Debug)]
pub enum Error {
    /// Local input validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Remote service errors
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// A lookup returned no entity
    #[error("[404] {kind} not found [{token}]")]
    NotFound { kind: ResourceKind, token: String },
}

impl Error {
    /// Create a not-found error for the given resource kind and lookup token
    pub fn not_found(kind: ResourceKind, token: &str) -> Self {
        Self::NotFound {
            kind,
            token: token.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Upstream(UpstreamError::from(err))
    }
}
