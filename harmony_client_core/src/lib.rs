//! Harmony Client Core Library
//!
//! Value objects, errors and the REST client for the Harmony orchestration
//! service (the "maestro"). The `baton` CLI is built on top of this crate.

pub mod api;
pub mod client;
pub mod error;
pub mod models;

// Re-export main types
pub use api::HarmonyApi;
pub use client::{ClientConfig, HarmonyClient};
pub use error::{Error, ResourceKind, Result, UpstreamError, ValidationError};
pub use models::{Container, Machine, NewContainer};

/// Default maestro address when nothing is configured
pub const DEFAULT_API_HOST: &str = "127.0.0.1:4774";

/// API version spoken by this client
pub const DEFAULT_API_VERSION: &str = "v1";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(DEFAULT_API_HOST, "127.0.0.1:4774");
        assert_eq!(DEFAULT_API_VERSION, "v1");
    }
}
