//! Table sources for each collection endpoint

use async_trait::async_trait;
use mamabear_models::{AppHit, DeploymentPayload, HostPayload, ImagePayload, ListEnvelope};
use serde::Serialize;
use tracing::warn;

use crate::errors::ConsoleError;
use crate::http::api::ApiClient;
use crate::listing::ListSource;
use crate::models::container::up_count;
use crate::models::deployment::Deployment;
use crate::models::host::Host;

/// Row of the apps table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppRow {
    pub name: String,
    pub image_count: Option<u64>,
    pub container_count: Option<u64>,
}

/// Row of the hosts table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostRow {
    pub hostname: String,
    pub alias: Option<String>,
    pub port: Option<u16>,
    pub status: Option<String>,
    pub container_count: Option<u64>,
    pub up_containers: Option<u64>,
}

/// Row of the deployments table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentRow {
    /// `app:tag/env`
    pub deployment: String,
    pub app_name: String,
    pub image_tag: String,
    pub environment: String,
    pub status_endpoint: Option<String>,
    pub host_count: u64,
    pub container_count: u64,
    pub up_containers: u64,
}

/// Row of the images table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRow {
    pub hash: Option<String>,
    pub tag: Option<String>,
    pub app_name: Option<String>,
}

fn count(n: usize) -> u64 {
    u64::try_from(n).unwrap_or(u64::MAX)
}

/// `GET /app`, searched by `name`
pub struct AppSource;

#[async_trait]
impl ListSource for AppSource {
    type Hit = AppHit;
    type Row = AppRow;

    const NAME: &'static str = "apps";
    const SEARCH_FIELD: &'static str = "name";

    async fn fetch(
        api: &ApiClient,
        params: Vec<(String, String)>,
    ) -> Result<ListEnvelope<AppHit>, ConsoleError> {
        api.list_apps(params).await
    }

    fn project(hit: AppHit) -> AppRow {
        match hit {
            AppHit::Name(name) => AppRow {
                name,
                image_count: None,
                container_count: None,
            },
            AppHit::Record(record) => {
                let image_count = record
                    .images
                    .as_ref()
                    .map(|images| count(images.len()))
                    .or(record.image_count);
                let container_count = record
                    .deployments
                    .as_ref()
                    .map(|deployments| {
                        deployments
                            .iter()
                            .map(|d| d.containers.as_ref().map_or(0, Vec::len))
                            .sum::<usize>()
                    })
                    .map(count)
                    .or(record.container_count);

                AppRow {
                    name: record.name.unwrap_or_default(),
                    image_count,
                    container_count,
                }
            }
        }
    }
}

/// `GET /host`, searched by `hostname`
pub struct HostSource;

#[async_trait]
impl ListSource for HostSource {
    type Hit = HostPayload;
    type Row = HostRow;

    const NAME: &'static str = "hosts";
    const SEARCH_FIELD: &'static str = "hostname";

    async fn fetch(
        api: &ApiClient,
        params: Vec<(String, String)>,
    ) -> Result<ListEnvelope<HostPayload>, ConsoleError> {
        api.list_hosts(params).await
    }

    fn project(hit: HostPayload) -> HostRow {
        let counted = hit.containers.is_some();
        let host = Host::compose(&hit);

        HostRow {
            container_count: if counted {
                Some(count(host.containers.len()))
            } else {
                hit.container_count
            },
            up_containers: counted.then(|| count(host.up_containers())),
            status: host.status.map(String::from),
            hostname: host.hostname,
            alias: host.alias,
            port: host.port,
        }
    }
}

/// `GET /deployment`, searched by `app_name`
pub struct DeploymentSource;

#[async_trait]
impl ListSource for DeploymentSource {
    type Hit = DeploymentPayload;
    type Row = DeploymentRow;

    const NAME: &'static str = "deployments";
    const SEARCH_FIELD: &'static str = "app_name";

    async fn fetch(
        api: &ApiClient,
        params: Vec<(String, String)>,
    ) -> Result<ListEnvelope<DeploymentPayload>, ConsoleError> {
        api.list_deployments(params).await
    }

    fn project(hit: DeploymentPayload) -> DeploymentRow {
        let deployment = Deployment::compose(&hit);

        DeploymentRow {
            deployment: deployment.label(),
            host_count: count(deployment.hosts.len()),
            container_count: count(deployment.containers.len()),
            up_containers: count(up_count(&deployment.containers)),
            status_endpoint: deployment.status_endpoint,
            app_name: deployment.key.app_name,
            image_tag: deployment.key.image_tag,
            environment: deployment.key.environment,
        }
    }
}

/// `GET /image`, searched by `app_name`
pub struct ImageSource;

#[async_trait]
impl ListSource for ImageSource {
    type Hit = ImagePayload;
    type Row = ImageRow;

    const NAME: &'static str = "images";
    const SEARCH_FIELD: &'static str = "app_name";

    async fn fetch(
        api: &ApiClient,
        params: Vec<(String, String)>,
    ) -> Result<ListEnvelope<ImagePayload>, ConsoleError> {
        api.list_images(params).await
    }

    fn project(hit: ImagePayload) -> ImageRow {
        ImageRow {
            hash: hit.id,
            tag: hit.tag,
            app_name: hit.app_name,
        }
    }
}

/// Every app name, for pickers
pub async fn app_names(api: &ApiClient) -> Result<Vec<String>, ConsoleError> {
    let envelope = api
        .list_apps(Vec::new())
        .await
        .inspect_err(|e| warn!("Error listing apps: {}", e))?;
    Ok(envelope
        .hits
        .iter()
        .filter_map(|hit| hit.name().map(str::to_string))
        .collect())
}

/// Every hostname, for pickers
pub async fn host_names(api: &ApiClient) -> Result<Vec<String>, ConsoleError> {
    let envelope = api
        .list_hosts(Vec::new())
        .await
        .inspect_err(|e| warn!("Error listing hosts: {}", e))?;
    Ok(envelope.hits.into_iter().filter_map(|hit| hit.hostname).collect())
}
