//! API request bodies
//!
//! Create and update bodies are wrapped under the entity type name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{DeploymentKeyPayload, LinkPayload};

/// `{"app": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppEnvelope {
    pub app: AppBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppBody {
    pub name: String,
}

/// `{"host": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostEnvelope {
    pub host: HostBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostBody {
    pub hostname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asg_name: Option<String>,
}

/// `{"deployment": {...}}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentEnvelope {
    pub deployment: DeploymentBody,
}

/// Deployment write body
///
/// Used whole for creation and with a single field set for partial updates;
/// unset fields are left out of the JSON entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapped_ports: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapped_volumes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_variables: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hosts: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<LinkPayload>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volumes: Option<Vec<LinkPayload>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<DeploymentKeyPayload>,
}

impl DeploymentEnvelope {
    pub fn new(deployment: DeploymentBody) -> Self {
        Self { deployment }
    }
}
