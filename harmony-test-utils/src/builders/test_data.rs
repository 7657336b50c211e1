//! Builders for containers and machines with sensible test defaults

use harmony_client_core::{Container, Machine, NewContainer};

/// Builder for [`Container`] values
#[derive(Debug, Clone)]
pub struct ContainerBuilder {
    container: Container,
}

impl Default for ContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerBuilder {
    /// Start from a disabled container named `test-container` on machine 1
    pub fn new() -> Self {
        Self {
            container: Container {
                id: "1".to_string(),
                machine_id: "1".to_string(),
                name: "test-container".to_string(),
                hostname: "test-container.local".to_string(),
                image: "alpine:latest".to_string(),
                entry_point: String::new(),
                enabled: false,
                cid: String::new(),
            },
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.container.id = id.to_string();
        self
    }

    pub fn machine_id(mut self, machine_id: &str) -> Self {
        self.container.machine_id = machine_id.to_string();
        self
    }

    /// Set the name; the hostname follows unless set explicitly afterwards
    pub fn name(mut self, name: &str) -> Self {
        self.container.name = name.to_string();
        self.container.hostname = format!("{name}.local");
        self
    }

    pub fn hostname(mut self, hostname: &str) -> Self {
        self.container.hostname = hostname.to_string();
        self
    }

    pub fn image(mut self, image: &str) -> Self {
        self.container.image = image.to_string();
        self
    }

    pub fn entry_point(mut self, entry_point: &str) -> Self {
        self.container.entry_point = entry_point.to_string();
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.container.enabled = enabled;
        self
    }

    pub fn cid(mut self, cid: &str) -> Self {
        self.container.cid = cid.to_string();
        self
    }

    pub fn build(self) -> Container {
        self.container
    }
}

/// Builder for [`Machine`] values
#[derive(Debug, Clone)]
pub struct MachineBuilder {
    machine: Machine,
}

impl Default for MachineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MachineBuilder {
    pub fn new() -> Self {
        Self {
            machine: Machine {
                id: "1".to_string(),
                name: "test-machine".to_string(),
                hostname: "test-machine.local".to_string(),
                container_ids: Vec::new(),
            },
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.machine.id = id.to_string();
        self
    }

    /// Set the name; the hostname follows unless set explicitly afterwards
    pub fn name(mut self, name: &str) -> Self {
        self.machine.name = name.to_string();
        self.machine.hostname = format!("{name}.local");
        self
    }

    pub fn hostname(mut self, hostname: &str) -> Self {
        self.machine.hostname = hostname.to_string();
        self
    }

    pub fn container_ids(mut self, ids: &[&str]) -> Self {
        self.machine.container_ids = ids.iter().map(|id| id.to_string()).collect();
        self
    }

    pub fn build(self) -> Machine {
        self.machine
    }
}

/// A complete creation request for `name` on `machine_id`
pub fn new_container(machine_id: &str, name: &str, image: &str) -> NewContainer {
    NewContainer {
        machine_id: machine_id.to_string(),
        name: name.to_string(),
        hostname: format!("{name}.local"),
        image: image.to_string(),
        entry_point: String::new(),
        enabled: false,
    }
}
