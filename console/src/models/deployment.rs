//! Deployment entity

use std::collections::BTreeMap;
use std::fmt;

use mamabear_models::{DeploymentBody, DeploymentKeyPayload, DeploymentPayload};
use serde::Serialize;

use crate::errors::ConsoleError;
use crate::models::compound::{dedup_ordered, format_reference, serialize_references};
use crate::models::container::{up_count, Container};
use crate::models::host::Host;

/// Environments offered when creating a deployment
pub const ENVIRONMENT_OPTIONS: [&str; 2] = ["test", "prod"];

/// Deployment identity: (app name, image tag, environment)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct DeploymentKey {
    pub app_name: String,
    pub image_tag: String,
    pub environment: String,
}

impl DeploymentKey {
    pub fn new(
        app_name: impl Into<String>,
        image_tag: impl Into<String>,
        environment: impl Into<String>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            image_tag: image_tag.into(),
            environment: environment.into(),
        }
    }

    /// Parse `app/tag/env`
    pub fn parse(path: &str) -> Option<Self> {
        let mut parts = path.trim_matches('/').splitn(3, '/');
        let app_name = parts.next().filter(|s| !s.is_empty())?;
        let image_tag = parts.next().filter(|s| !s.is_empty())?;
        let environment = parts.next().filter(|s| !s.is_empty() && !s.contains('/'))?;
        Some(Self::new(app_name, image_tag, environment))
    }

    /// All three parts are set, so the key addresses a server resource
    pub fn is_complete(&self) -> bool {
        !self.app_name.is_empty() && !self.image_tag.is_empty() && !self.environment.is_empty()
    }

    /// Fail with a validation error unless the key is complete
    pub fn require_complete(&self) -> Result<(), ConsoleError> {
        if self.is_complete() {
            Ok(())
        } else {
            Err(ConsoleError::ValidationError(format!(
                "incomplete deployment key {}",
                self
            )))
        }
    }

    pub fn to_payload(&self) -> DeploymentKeyPayload {
        DeploymentKeyPayload {
            app_name: self.app_name.clone(),
            image_tag: self.image_tag.clone(),
            environment: self.environment.clone(),
        }
    }

    pub fn from_payload(payload: &DeploymentKeyPayload) -> Self {
        Self::new(
            payload.app_name.clone(),
            payload.image_tag.clone(),
            payload.environment.clone(),
        )
    }
}

impl fmt::Display for DeploymentKey {
    /// `app:tag/env`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}/{}", self.app_name, self.image_tag, self.environment)
    }
}

/// Fields that can be sent alone in a partial update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentField {
    MappedPorts,
    MappedVolumes,
    EnvironmentVariables,
    Hosts,
    Links,
    Volumes,
}

impl DeploymentField {
    pub fn name(&self) -> &'static str {
        match self {
            DeploymentField::MappedPorts => "mapped_ports",
            DeploymentField::MappedVolumes => "mapped_volumes",
            DeploymentField::EnvironmentVariables => "environment_variables",
            DeploymentField::Hosts => "hosts",
            DeploymentField::Links => "links",
            DeploymentField::Volumes => "volumes",
        }
    }
}

impl fmt::Display for DeploymentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A running instance of an app's image in an environment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Deployment {
    pub key: DeploymentKey,
    pub status_endpoint: Option<String>,
    pub status_port: Option<u16>,
    /// `host:container` pairs, in entry order
    pub mapped_ports: Vec<String>,
    /// `host_path:container_path` pairs, in entry order
    pub mapped_volumes: Vec<String>,
    pub environment_variables: BTreeMap<String, String>,
    pub hosts: Vec<Host>,
    pub containers: Vec<Container>,
    /// `app:tag` references to linked deployments, as entered
    pub links: Vec<String>,
    /// `app:tag` references to deployments sharing volumes, as entered
    pub volumes: Vec<String>,
    pub parent: Option<DeploymentKey>,
}

impl Deployment {
    pub fn new(key: DeploymentKey) -> Self {
        Self {
            key,
            ..Default::default()
        }
    }

    /// Build a deployment from a payload
    pub fn compose(payload: &DeploymentPayload) -> Self {
        let mut deployment = Deployment::default();
        deployment.apply(payload);
        deployment
    }

    /// Overwrite the fields present in the payload; an explicit null clears
    /// scalars and empties collections
    ///
    /// Collections present in the payload replace the local ones; containers
    /// in particular are always rebuilt from scratch.
    pub fn apply(&mut self, payload: &DeploymentPayload) {
        if let Some(app_name) = &payload.app_name {
            self.key.app_name = app_name.clone();
        }
        if let Some(image_tag) = &payload.image_tag {
            self.key.image_tag = image_tag.clone();
        }
        if let Some(environment) = &payload.environment {
            self.key.environment = environment.clone();
        }
        if let Some(endpoint) = &payload.status_endpoint {
            self.status_endpoint = endpoint.clone();
        }
        if let Some(port) = payload.status_port {
            self.status_port = port;
        }
        if let Some(ports) = &payload.mapped_ports {
            self.mapped_ports = ports.clone();
        }
        if let Some(volumes) = &payload.mapped_volumes {
            self.mapped_volumes = volumes.clone();
        }
        if let Some(vars) = &payload.environment_variables {
            self.environment_variables = vars.clone();
        }
        if let Some(hosts) = &payload.hosts {
            self.hosts = hosts.iter().map(Host::new).collect();
        }
        if let Some(containers) = &payload.containers {
            self.containers.clear();
            self.containers
                .extend(containers.iter().map(|c| Container::compose(c, None)));
        }
        if let Some(links) = &payload.links {
            self.links = links.iter().map(format_reference).collect();
        }
        if let Some(volumes) = &payload.volumes {
            self.volumes = volumes.iter().map(format_reference).collect();
        }
        if let Some(parent) = &payload.parent {
            self.parent = parent.as_ref().map(DeploymentKey::from_payload);
        }
    }

    /// `app:tag/env`
    pub fn label(&self) -> String {
        self.key.to_string()
    }

    pub fn hostnames(&self) -> Vec<String> {
        self.hosts.iter().map(|h| h.hostname.clone()).collect()
    }

    pub fn up_containers(&self) -> usize {
        up_count(&self.containers)
    }

    /// Creation body: every field, with empty collections left out
    pub fn to_create_body(&self) -> DeploymentBody {
        let mut body = DeploymentBody {
            app_name: Some(self.key.app_name.clone()),
            image_tag: Some(self.key.image_tag.clone()),
            environment: Some(self.key.environment.clone()),
            status_endpoint: self.status_endpoint.clone(),
            status_port: self.status_port,
            hosts: Some(self.hostnames()),
            parent: self.parent.as_ref().map(DeploymentKey::to_payload),
            ..Default::default()
        };

        for field in [
            DeploymentField::MappedPorts,
            DeploymentField::MappedVolumes,
            DeploymentField::EnvironmentVariables,
            DeploymentField::Links,
            DeploymentField::Volumes,
        ] {
            if !self.field_is_empty(field) {
                self.fill_field(&mut body, field);
            }
        }
        body
    }

    /// Update body carrying only `field`
    pub fn to_partial_body(&self, field: DeploymentField) -> DeploymentBody {
        let mut body = DeploymentBody::default();
        self.fill_field(&mut body, field);
        body
    }

    fn field_is_empty(&self, field: DeploymentField) -> bool {
        match field {
            DeploymentField::MappedPorts => self.mapped_ports.is_empty(),
            DeploymentField::MappedVolumes => self.mapped_volumes.is_empty(),
            DeploymentField::EnvironmentVariables => self.environment_variables.is_empty(),
            DeploymentField::Hosts => self.hosts.is_empty(),
            DeploymentField::Links => self.links.is_empty(),
            DeploymentField::Volumes => self.volumes.is_empty(),
        }
    }

    fn fill_field(&self, body: &mut DeploymentBody, field: DeploymentField) {
        match field {
            DeploymentField::MappedPorts => {
                body.mapped_ports = Some(dedup_ordered(&self.mapped_ports));
            }
            DeploymentField::MappedVolumes => {
                body.mapped_volumes = Some(dedup_ordered(&self.mapped_volumes));
            }
            DeploymentField::EnvironmentVariables => {
                body.environment_variables = Some(self.environment_variables.clone());
            }
            DeploymentField::Hosts => {
                body.hosts = Some(dedup_ordered(&self.hostnames()));
            }
            DeploymentField::Links => {
                body.links = Some(serialize_references(&self.links));
            }
            DeploymentField::Volumes => {
                body.volumes = Some(serialize_references(&self.volumes));
            }
        }
    }
}
