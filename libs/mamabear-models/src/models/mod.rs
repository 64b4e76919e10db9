//! API response models

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Deserializer, Serialize};

/// A field the server may clear by sending `null`
///
/// `None` means the field was absent, `Some(None)` an explicit null.
pub type Nullable<T> = Option<Option<T>>;

/// Deserialize a [`Nullable`] field; pair with `#[serde(default)]` so that
/// absence stays `None`
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Nullable<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Deserialize a collection field, reading an explicit `null` as empty
pub fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(|value| Some(value.unwrap_or_default()))
}

/// List response envelope shared by every collection endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub hits: Vec<T>,
    #[serde(default)]
    pub total: u64,
}

impl<T> Default for ListEnvelope<T> {
    fn default() -> Self {
        Self {
            hits: Vec::new(),
            total: 0,
        }
    }
}

/// Image info
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePayload {
    /// Content hash (the registry layer id)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
}

/// Container info
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub image: Nullable<ImagePayload>,
    /// Hostname of the host running the container
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub host: Nullable<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub status: Nullable<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub command: Nullable<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub state: Nullable<String>,
    /// Start time as reported by docker (RFC 3339)
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub started_at: Nullable<String>,
    /// Owning deployment label (`app:tag/env`)
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub deployment: Nullable<String>,
}

/// Host info
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub alias: Nullable<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub port: Nullable<u16>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub asg_name: Nullable<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub status: Nullable<String>,
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Option::is_none")]
    pub containers: Option<Vec<ContainerPayload>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_count: Option<u64>,
}

/// Reference from one deployment to an `app:tag` pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkPayload {
    pub app_name: String,
    pub image_tag: String,
}

/// Deployment identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentKeyPayload {
    pub app_name: String,
    pub image_tag: String,
    pub environment: String,
}

/// Deployment info
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub status_endpoint: Nullable<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub status_port: Nullable<u16>,
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Option::is_none")]
    pub mapped_ports: Option<Vec<String>>,
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Option::is_none")]
    pub mapped_volumes: Option<Vec<String>>,
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Option::is_none")]
    pub environment_variables: Option<BTreeMap<String, String>>,
    /// Hostnames the deployment runs on
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Option::is_none")]
    pub hosts: Option<Vec<String>>,
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Option::is_none")]
    pub containers: Option<Vec<ContainerPayload>>,
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<LinkPayload>>,
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Option::is_none")]
    pub volumes: Option<Vec<LinkPayload>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub parent: Nullable<DeploymentKeyPayload>,
}

/// App record as returned by list and refresh endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<ImagePayload>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployments: Option<Vec<DeploymentPayload>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_count: Option<u64>,
}

/// A hit from `GET /app`: older servers list bare names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AppHit {
    Name(String),
    Record(AppPayload),
}

impl AppHit {
    /// App name, if the hit carries one
    pub fn name(&self) -> Option<&str> {
        match self {
            AppHit::Name(name) => Some(name),
            AppHit::Record(record) => record.name.as_deref(),
        }
    }
}

/// Body of `GET /app/{name}/images`, keyed by app name
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppImagesPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<ImagePayload>>,
}

pub type AppImagesResponse = HashMap<String, AppImagesPayload>;

/// Body of `GET /app/{name}/deployments`, keyed by app name
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppDeploymentsPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployments: Option<Vec<DeploymentPayload>>,
}

pub type AppDeploymentsResponse = HashMap<String, AppDeploymentsPayload>;

/// Container logs, either raw text, a line list, or wrapped under `logs`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContainerLogsPayload {
    Text(String),
    Lines(Vec<String>),
    Wrapped { logs: String },
}

impl ContainerLogsPayload {
    pub fn into_text(self) -> String {
        match self {
            ContainerLogsPayload::Text(text) => text,
            ContainerLogsPayload::Lines(lines) => lines.join("\n"),
            ContainerLogsPayload::Wrapped { logs } => logs,
        }
    }
}

/// Acknowledgement returned by create, update and delete endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WriteAck {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<serde_json::Value>,
    /// Set when the write landed but a follow-up step on the server failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
