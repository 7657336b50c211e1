//! Map a CLI verb to exactly one remote operation
//!
//! The dispatcher borrows a client built for this invocation, checks local
//! input first and only then talks to the maestro. It never prints; results
//! come back as an [`Outcome`] for the output layer.

use crate::resolver;
use harmony_client_core::{
    Container, HarmonyApi, Machine, NewContainer, Result, ValidationError,
};
use log::{debug, info};

/// Field name reported when start/stop is given no target
pub const TARGET_FIELD: &str = "ContainerID or Name";

/// Flags of `containers add`, as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerArgs {
    pub machine_id: Option<String>,
    pub name: Option<String>,
    pub hostname: Option<String>,
    pub image: Option<String>,
    pub entry_point: Option<String>,
    pub start: bool,
}

impl ContainerArgs {
    /// Check required fields in order: machine-id, name, hostname, image.
    ///
    /// An empty value counts as missing. `enabled` on the request comes from
    /// the `--start` flag.
    pub fn validate(&self) -> std::result::Result<NewContainer, ValidationError> {
        let machine_id = required(&self.machine_id, "machine-id")?;
        let name = required(&self.name, "name")?;
        let hostname = required(&self.hostname, "hostname")?;
        let image = required(&self.image, "image")?;

        Ok(NewContainer {
            machine_id,
            name,
            hostname,
            image,
            entry_point: self.entry_point.clone().unwrap_or_default(),
            enabled: self.start,
        })
    }
}

fn required(value: &Option<String>, field: &str) -> std::result::Result<String, ValidationError> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ValidationError::missing_field(field)),
    }
}

fn target(token: Option<&str>) -> std::result::Result<&str, ValidationError> {
    token.ok_or_else(|| ValidationError::missing_field(TARGET_FIELD))
}

/// One invocation's worth of work
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ContainersAdd(ContainerArgs),
    ContainersList,
    ContainersShow(Option<String>),
    ContainersStart(Option<String>),
    ContainersStop(Option<String>),
    MachinesList,
    MachinesShow(Option<String>),
}

impl Command {
    /// Text prepended to upstream failures of this command
    pub fn failure_context(&self) -> Option<&'static str> {
        match self {
            Self::ContainersAdd(_) => {
                Some("Error encountered while attempting to create new container")
            }
            _ => None,
        }
    }
}

/// What a command produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A container was created; carries its new id
    Created(String),
    /// The operation succeeded and has nothing to show
    Ok,
    Containers(Vec<Container>),
    Container(Container),
    Machines(Vec<Machine>),
    Machine(Machine),
}

/// Runs [`Command`]s against a borrowed Harmony client
pub struct Dispatcher<'a, A: HarmonyApi + ?Sized> {
    api: &'a A,
}

impl<'a, A: HarmonyApi + ?Sized> Dispatcher<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    pub async fn run(&self, command: Command) -> Result<Outcome> {
        debug!("Dispatching {command:?}");

        match command {
            Command::ContainersAdd(args) => self.containers_add(&args).await,
            Command::ContainersList => self.containers_list().await,
            Command::ContainersShow(None) => self.containers_list().await,
            Command::ContainersShow(Some(token)) => {
                let container = resolver::resolve_container(self.api, &token).await?;
                Ok(Outcome::Container(container))
            }
            Command::ContainersStart(token) => {
                self.containers_set_enabled(token.as_deref(), true).await
            }
            Command::ContainersStop(token) => {
                self.containers_set_enabled(token.as_deref(), false).await
            }
            Command::MachinesList | Command::MachinesShow(None) => {
                Ok(Outcome::Machines(self.api.machines().await?))
            }
            Command::MachinesShow(Some(token)) => {
                let machine = resolver::resolve_machine(self.api, &token).await?;
                Ok(Outcome::Machine(machine))
            }
        }
    }

    async fn containers_add(&self, args: &ContainerArgs) -> Result<Outcome> {
        let request = args.validate()?;
        let created = self.api.containers_add(&request).await?;
        info!("Created container {} ({})", created.id, created.name);
        Ok(Outcome::Created(created.id))
    }

    async fn containers_list(&self) -> Result<Outcome> {
        Ok(Outcome::Containers(self.api.containers().await?))
    }

    async fn containers_set_enabled(&self, token: Option<&str>, enabled: bool) -> Result<Outcome> {
        let token = target(token)?;
        let container = resolver::resolve_container(self.api, token).await?;
        self.api
            .containers_enabled_update(&container.id, enabled)
            .await?;
        info!(
            "Container {} ({}) enabled={enabled}",
            container.id, container.name
        );
        Ok(Outcome::Ok)
    }
}
