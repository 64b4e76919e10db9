//! Host entity

use mamabear_models::{HostBody, HostPayload};
use serde::Serialize;

use crate::models::container::{up_count, Container, HostRef};
use crate::models::status::RunStatus;

/// A machine that can run containers, identified by hostname
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Host {
    pub hostname: String,
    pub alias: Option<String>,
    pub port: Option<u16>,
    pub asg_name: Option<String>,
    pub status: Option<RunStatus>,
    pub containers: Vec<Container>,
}

impl Host {
    /// An empty host known only by name
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            ..Default::default()
        }
    }

    /// Build a host from a payload
    pub fn compose(payload: &HostPayload) -> Self {
        let mut host = Host::default();
        host.apply(payload);
        host
    }

    /// Overwrite the fields present in the payload; an explicit null clears
    ///
    /// Containers, when present, replace the current list wholesale.
    pub fn apply(&mut self, payload: &HostPayload) {
        if let Some(hostname) = &payload.hostname {
            self.hostname = hostname.clone();
        }
        if let Some(alias) = &payload.alias {
            self.alias = alias.clone();
        }
        if let Some(port) = payload.port {
            self.port = port;
        }
        if let Some(asg_name) = &payload.asg_name {
            self.asg_name = asg_name.clone();
        }
        if let Some(status) = &payload.status {
            self.status = status.as_deref().map(RunStatus::from);
        }
        if let Some(containers) = &payload.containers {
            let owner = self.reference();
            self.containers.clear();
            self.containers.extend(
                containers
                    .iter()
                    .map(|container| Container::compose(container, Some(&owner))),
            );
        }
    }

    pub fn reference(&self) -> HostRef {
        HostRef(self.hostname.clone())
    }

    pub fn up_containers(&self) -> usize {
        up_count(&self.containers)
    }

    /// Creation body from the current fields
    pub fn to_body(&self) -> HostBody {
        HostBody {
            hostname: self.hostname.clone(),
            alias: self.alias.clone(),
            port: self.port,
            asg_name: self.asg_name.clone(),
        }
    }
}
