//! Container entity

use chrono::{DateTime, Utc};
use mamabear_models::ContainerPayload;
use serde::Serialize;
use tracing::debug;

use crate::models::image::Image;
use crate::models::status::RunStatus;

/// Weak reference to a host, resolved by hostname
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct HostRef(pub String);

impl HostRef {
    pub fn hostname(&self) -> &str {
        &self.0
    }
}

/// A running or stopped instance of an image on a host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Container {
    pub id: Option<String>,
    pub image: Image,
    pub host: Option<HostRef>,
    pub status: Option<RunStatus>,
    pub command: Option<String>,
    pub state: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    /// Label of the owning deployment (`app:tag/env`)
    pub deployment: Option<String>,
}

impl Container {
    /// Build a container from a payload
    ///
    /// `owner` is the host the container was listed under and takes
    /// precedence over the payload's own `host` field.
    pub fn compose(payload: &ContainerPayload, owner: Option<&HostRef>) -> Self {
        let mut container = Container::default();
        container.apply(payload);
        if let Some(owner) = owner {
            container.host = Some(owner.clone());
        }
        container
    }

    /// Overwrite the fields present in the payload; an explicit null clears
    pub fn apply(&mut self, payload: &ContainerPayload) {
        if let Some(id) = &payload.id {
            self.id = Some(id.clone());
        }
        if let Some(image) = &payload.image {
            self.image = Image::compose(image.as_ref());
        }
        if let Some(host) = &payload.host {
            self.host = host.clone().map(HostRef);
        }
        if let Some(status) = &payload.status {
            self.status = status.as_deref().map(RunStatus::from);
        }
        if let Some(command) = &payload.command {
            self.command = command.clone();
        }
        if let Some(state) = &payload.state {
            self.state = state.clone();
        }
        if let Some(started_at) = &payload.started_at {
            self.started_at = started_at.as_deref().and_then(parse_started_at);
        }
        if let Some(deployment) = &payload.deployment {
            self.deployment = deployment.clone();
        }
    }

    pub fn is_up(&self) -> bool {
        self.status.as_ref().is_some_and(RunStatus::is_up)
    }
}

fn parse_started_at(value: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(time) => Some(time.with_timezone(&Utc)),
        Err(e) => {
            debug!("Ignoring unparseable started_at {:?}: {}", value, e);
            None
        }
    }
}

/// Count of containers whose status is `up`
pub fn up_count<'a>(containers: impl IntoIterator<Item = &'a Container>) -> usize {
    containers.into_iter().filter(|c| c.is_up()).count()
}
