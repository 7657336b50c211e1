//! In-memory implementation of `HarmonyApi` for testing

use async_trait::async_trait;
use harmony_client_core::{
    Container, Error, HarmonyApi, Machine, NewContainer, Result, UpstreamError,
};
use std::sync::{Arc, Mutex};

/// A remote call as observed by [`MockHarmony`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ContainersAdd(NewContainer),
    Containers,
    Container(String),
    ContainerByName(String),
    ContainersEnabledUpdate { id: String, enabled: bool },
    Machines,
    Machine(String),
    MachineByName(String),
}

/// In-memory Harmony service
///
/// Holds containers and machines, assigns ids on create, and records every
/// call so tests can assert on exactly which remote operations ran.
///
/// # Examples
///
/// ```rust,no_run
/// use harmony_client_core::HarmonyApi;
/// use harmony_test_utils::{Call, ContainerBuilder, MockHarmony};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mock = MockHarmony::new()
///     .with_container(ContainerBuilder::new().id("42").name("web-1").build());
///
/// let found = mock.container_by_name("web-1").await?;
/// assert_eq!(found.map(|c| c.id), Some("42".to_string()));
/// assert_eq!(mock.calls(), vec![Call::ContainerByName("web-1".to_string())]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default)]
pub struct MockHarmony {
    state: Arc<Mutex<MockState>>,
}

#[derive(Debug, Default)]
struct MockState {
    containers: Vec<Container>,
    machines: Vec<Machine>,
    calls: Vec<Call>,
    failure: Option<MockError>,
}

#[derive(Debug, Clone)]
enum MockError {
    Transport(String),
    Server { status: u16, message: String },
}

impl From<MockError> for Error {
    fn from(mock_error: MockError) -> Self {
        match mock_error {
            MockError::Transport(message) => UpstreamError::transport(message).into(),
            MockError::Server { status, message } => {
                UpstreamError::server_error(status, &message).into()
            }
        }
    }
}

impl MockHarmony {
    /// Create an empty service
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a container
    pub fn with_container(self, container: Container) -> Self {
        self.state.lock().unwrap().containers.push(container);
        self
    }

    /// Seed a machine
    pub fn with_machine(self, machine: Machine) -> Self {
        self.state.lock().unwrap().machines.push(machine);
        self
    }

    /// Make every subsequent call fail as if the maestro were unreachable
    pub fn expect_transport_failure(&self, message: &str) {
        self.state.lock().unwrap().failure = Some(MockError::Transport(message.to_string()));
    }

    /// Make every subsequent call fail with an HTTP status
    pub fn expect_server_error(&self, status: u16, message: &str) {
        self.state.lock().unwrap().failure = Some(MockError::Server {
            status,
            message: message.to_string(),
        });
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }

    /// The enabled-flag updates made so far as `(id, enabled)` pairs
    pub fn enabled_updates(&self) -> Vec<(String, bool)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::ContainersEnabledUpdate { id, enabled } => Some((id, enabled)),
                _ => None,
            })
            .collect()
    }

    /// Current state of a stored container
    pub fn stored_container(&self, id: &str) -> Option<Container> {
        self.state
            .lock()
            .unwrap()
            .containers
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    /// Record the call, then fail if a failure was configured
    fn record(&self, call: Call) -> Result<std::sync::MutexGuard<'_, MockState>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        match state.failure.clone() {
            Some(failure) => Err(failure.into()),
            None => Ok(state),
        }
    }
}

fn next_id(containers: &[Container]) -> String {
    let highest = containers
        .iter()
        .filter_map(|c| c.id.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    (highest + 1).to_string()
}

#[async_trait]
impl HarmonyApi for MockHarmony {
    async fn containers_add(&self, container: &NewContainer) -> Result<Container> {
        let mut state = self.record(Call::ContainersAdd(container.clone()))?;
        let created = Container {
            id: next_id(&state.containers),
            machine_id: container.machine_id.clone(),
            name: container.name.clone(),
            hostname: container.hostname.clone(),
            image: container.image.clone(),
            entry_point: container.entry_point.clone(),
            enabled: container.enabled,
            cid: String::new(),
        };
        state.containers.push(created.clone());
        Ok(created)
    }

    async fn containers(&self) -> Result<Vec<Container>> {
        let state = self.record(Call::Containers)?;
        Ok(state.containers.clone())
    }

    async fn container(&self, id: &str) -> Result<Option<Container>> {
        let state = self.record(Call::Container(id.to_string()))?;
        Ok(state.containers.iter().find(|c| c.id == id).cloned())
    }

    async fn container_by_name(&self, name: &str) -> Result<Option<Container>> {
        let state = self.record(Call::ContainerByName(name.to_string()))?;
        Ok(state.containers.iter().find(|c| c.name == name).cloned())
    }

    async fn containers_enabled_update(&self, id: &str, enabled: bool) -> Result<()> {
        let mut state = self.record(Call::ContainersEnabledUpdate {
            id: id.to_string(),
            enabled,
        })?;
        match state.containers.iter_mut().find(|c| c.id == id) {
            Some(container) => {
                container.enabled = enabled;
                Ok(())
            }
            None => Err(UpstreamError::server_error(404, "container not found").into()),
        }
    }

    async fn machines(&self) -> Result<Vec<Machine>> {
        let state = self.record(Call::Machines)?;
        Ok(state.machines.clone())
    }

    async fn machine(&self, id: &str) -> Result<Option<Machine>> {
        let state = self.record(Call::Machine(id.to_string()))?;
        Ok(state.machines.iter().find(|m| m.id == id).cloned())
    }

    async fn machine_by_name(&self, name: &str) -> Result<Option<Machine>> {
        let state = self.record(Call::MachineByName(name.to_string()))?;
        Ok(state.machines.iter().find(|m| m.name == name).cloned())
    }
}
