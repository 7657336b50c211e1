//! The remote-service seam
//!
//! `HarmonyApi` is everything Baton needs from the maestro. The HTTP client
//! implements it for real use; tests substitute an in-memory implementation.

use crate::Result;
use crate::models::{Container, Machine, NewContainer};
use async_trait::async_trait;

/// Operations exposed by the Harmony orchestration API
///
/// Lookups return `Ok(None)` when the service has no matching entity; `Err`
/// is reserved for failures of the call itself.
#[async_trait]
pub trait HarmonyApi: Send + Sync {
    /// Ask the service to create a container; returns it with its assigned id
    async fn containers_add(&self, container: &NewContainer) -> Result<Container>;

    /// All containers known to the service
    async fn containers(&self) -> Result<Vec<Container>>;

    /// Look a container up by its identifier
    async fn container(&self, id: &str) -> Result<Option<Container>>;

    /// Look a container up by its display name
    async fn container_by_name(&self, name: &str) -> Result<Option<Container>>;

    /// Toggle the enabled flag of a container
    async fn containers_enabled_update(&self, id: &str, enabled: bool) -> Result<()>;

    /// All machines known to the service
    async fn machines(&self) -> Result<Vec<Machine>>;

    /// Look a machine up by its identifier
    async fn machine(&self, id: &str) -> Result<Option<Machine>>;

    /// Look a machine up by its display name
    async fn machine_by_name(&self, name: &str) -> Result<Option<Machine>>;
}
