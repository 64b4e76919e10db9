//! Deployment synchronization
//!
//! Every add/remove on a collection field is sent to the server at once as
//! a PUT carrying only that field. The local change is applied first and
//! reverted if the PUT fails.

use mamabear_models::DeploymentEnvelope;
use tracing::{debug, info, warn};

use crate::errors::ConsoleError;
use crate::http::api::ApiClient;
use crate::models::compound::{merge_env_vars, split_list};
use crate::models::deployment::{
    Deployment, DeploymentField, DeploymentKey, ENVIRONMENT_OPTIONS,
};
use crate::models::host::Host;
use crate::models::status::EntityStatus;
use crate::routes::Route;

/// Owns one [`Deployment`] and keeps it in step with the server
pub struct DeploymentHandle {
    api: ApiClient,
    deployment: Deployment,
    status: EntityStatus,
    alert_visible: bool,
    image_choices: Vec<String>,
}

impl DeploymentHandle {
    pub fn new(api: ApiClient, key: DeploymentKey) -> Self {
        Self::from_deployment(api, Deployment::new(key))
    }

    /// Handle for a deployment filled in locally, typically before
    /// [`DeploymentHandle::create`]
    pub fn from_deployment(api: ApiClient, deployment: Deployment) -> Self {
        Self {
            api,
            deployment,
            status: EntityStatus::New,
            alert_visible: false,
            image_choices: Vec::new(),
        }
    }

    pub fn deployment(&self) -> &Deployment {
        &self.deployment
    }

    /// Direct access for form fields that are not synced on their own
    /// (key, status endpoint, parent); use the add/remove methods for
    /// collections.
    pub fn deployment_mut(&mut self) -> &mut Deployment {
        &mut self.deployment
    }

    pub fn status(&self) -> EntityStatus {
        self.status
    }

    pub fn alert_visible(&self) -> bool {
        self.alert_visible
    }

    /// Image tags offered for the current app
    pub fn image_choices(&self) -> &[String] {
        &self.image_choices
    }

    /// Load the deployment; containers are rebuilt from scratch
    pub async fn fetch(&mut self) -> Result<(), ConsoleError> {
        self.deployment.key.require_complete()?;
        self.status = EntityStatus::Loading;

        match self.api.get_deployment(&self.deployment.key).await {
            Ok(payload) => {
                self.deployment.apply(&payload);
                self.status = EntityStatus::Ok;
                Ok(())
            }
            Err(e) => {
                warn!("Failed fetching deployment {}: {}", self.deployment.label(), e);
                self.status = EntityStatus::Error;
                Err(e)
            }
        }
    }

    /// Create the deployment under its app, then load it
    ///
    /// Only the environments in [`ENVIRONMENT_OPTIONS`] can be created.
    pub async fn create(&mut self) -> Result<Route, ConsoleError> {
        if self.status.is_loading() {
            return Err(ConsoleError::Busy(format!(
                "deployment {}",
                self.deployment.label()
            )));
        }
        self.deployment.key.require_complete()?;
        let environment = self.deployment.key.environment.as_str();
        if !ENVIRONMENT_OPTIONS.contains(&environment) {
            return Err(ConsoleError::ValidationError(format!(
                "environment {} is not one of {}",
                environment,
                ENVIRONMENT_OPTIONS.join(", ")
            )));
        }

        self.status = EntityStatus::Loading;
        self.alert_visible = false;
        info!("Creating deployment {}", self.deployment.label());

        let envelope = DeploymentEnvelope::new(self.deployment.to_create_body());
        match self
            .api
            .create_deployment(&self.deployment.key.app_name, &envelope)
            .await
        {
            Ok(ack) => {
                if let Some(warning) = ack.warn {
                    warn!(
                        "Deployment {} created with warning: {}",
                        self.deployment.label(),
                        warning
                    );
                }
            }
            Err(e) => {
                warn!("Failed creating deployment {}: {}", self.deployment.label(), e);
                self.status = EntityStatus::Error;
                self.alert_visible = true;
                return Err(e);
            }
        }

        self.fetch().await?;
        Ok(Route::Deployments)
    }

    pub async fn delete(&mut self) -> Result<Route, ConsoleError> {
        self.deployment.key.require_complete()?;
        self.api
            .delete_deployment(&self.deployment.key)
            .await
            .inspect_err(|e| {
                warn!("Failed deleting deployment {}: {}", self.deployment.label(), e)
            })?;
        info!("Deleted deployment {}", self.deployment.label());
        Ok(Route::Deployments)
    }

    /// Ask the server to run the deployment and apply what it echoes back
    pub async fn run(&mut self) -> Result<(), ConsoleError> {
        self.deployment.key.require_complete()?;
        let payload = self
            .api
            .run_deployment(&self.deployment.key)
            .await
            .inspect_err(|e| {
                warn!("Failed running deployment {}: {}", self.deployment.label(), e)
            })?;
        self.deployment.apply(&payload);
        info!("Triggered run of deployment {}", self.deployment.label());
        Ok(())
    }

    /// Change the app and reload the image tags offered for it
    pub async fn set_app_name(&mut self, app_name: impl Into<String>) -> Result<(), ConsoleError> {
        self.deployment.key.app_name = app_name.into();
        let app_name = self.deployment.key.app_name.clone();
        if app_name.is_empty() {
            self.image_choices.clear();
            return Ok(());
        }

        let images = self
            .api
            .get_app_images(&app_name)
            .await
            .inspect_err(|e| warn!("Failed listing images of app {}: {}", app_name, e))?;
        self.image_choices = images.into_iter().filter_map(|image| image.tag).collect();
        Ok(())
    }

    /// Add one `host:container` port mapping
    pub async fn add_mapped_port(&mut self, mapping: &str) -> Result<bool, ConsoleError> {
        let mapping = mapping.trim().to_string();
        self.mutate(DeploymentField::MappedPorts, |d| {
            push_non_empty(&mut d.mapped_ports, mapping)
        })
        .await
    }

    /// Add comma separated port mappings
    pub async fn add_mapped_ports(&mut self, input: &str) -> Result<bool, ConsoleError> {
        let mappings = split_list(input);
        self.mutate(DeploymentField::MappedPorts, |d| {
            extend_non_empty(&mut d.mapped_ports, mappings)
        })
        .await
    }

    pub async fn remove_mapped_port(&mut self, mapping: &str) -> Result<bool, ConsoleError> {
        self.mutate(DeploymentField::MappedPorts, |d| {
            remove_all(&mut d.mapped_ports, mapping)
        })
        .await
    }

    /// Add one `host_path:container_path` volume mapping
    pub async fn add_mapped_volume(&mut self, mapping: &str) -> Result<bool, ConsoleError> {
        let mapping = mapping.trim().to_string();
        self.mutate(DeploymentField::MappedVolumes, |d| {
            push_non_empty(&mut d.mapped_volumes, mapping)
        })
        .await
    }

    /// Add comma separated volume mappings
    pub async fn add_mapped_volumes(&mut self, input: &str) -> Result<bool, ConsoleError> {
        let mappings = split_list(input);
        self.mutate(DeploymentField::MappedVolumes, |d| {
            extend_non_empty(&mut d.mapped_volumes, mappings)
        })
        .await
    }

    pub async fn remove_mapped_volume(&mut self, mapping: &str) -> Result<bool, ConsoleError> {
        self.mutate(DeploymentField::MappedVolumes, |d| {
            remove_all(&mut d.mapped_volumes, mapping)
        })
        .await
    }

    /// Set one environment variable
    pub async fn set_env_var(&mut self, key: &str, value: &str) -> Result<bool, ConsoleError> {
        let key = key.trim().to_string();
        let value = value.trim().to_string();
        if key.is_empty() {
            return Ok(false);
        }
        self.mutate(DeploymentField::EnvironmentVariables, |d| {
            d.environment_variables.insert(key, value);
            true
        })
        .await
    }

    /// Merge `key=value,key=value` into the environment
    pub async fn add_env_vars(&mut self, input: &str) -> Result<bool, ConsoleError> {
        self.mutate(DeploymentField::EnvironmentVariables, |d| {
            let before = d.environment_variables.clone();
            merge_env_vars(&mut d.environment_variables, input);
            d.environment_variables != before
        })
        .await
    }

    pub async fn remove_env_var(&mut self, key: &str) -> Result<bool, ConsoleError> {
        self.mutate(DeploymentField::EnvironmentVariables, |d| {
            d.environment_variables.remove(key).is_some()
        })
        .await
    }

    /// Link another `app:tag`
    pub async fn add_link(&mut self, reference: &str) -> Result<bool, ConsoleError> {
        let reference = reference.trim().to_string();
        self.mutate(DeploymentField::Links, |d| push_non_empty(&mut d.links, reference))
            .await
    }

    pub async fn remove_link(&mut self, reference: &str) -> Result<bool, ConsoleError> {
        self.mutate(DeploymentField::Links, |d| remove_all(&mut d.links, reference))
            .await
    }

    /// Share volumes with another `app:tag`
    pub async fn add_volume_ref(&mut self, reference: &str) -> Result<bool, ConsoleError> {
        let reference = reference.trim().to_string();
        self.mutate(DeploymentField::Volumes, |d| push_non_empty(&mut d.volumes, reference))
            .await
    }

    pub async fn remove_volume_ref(&mut self, reference: &str) -> Result<bool, ConsoleError> {
        self.mutate(DeploymentField::Volumes, |d| remove_all(&mut d.volumes, reference))
            .await
    }

    /// Run the deployment on one more host
    pub async fn add_host(&mut self, hostname: &str) -> Result<bool, ConsoleError> {
        let hostname = hostname.trim().to_string();
        self.mutate(DeploymentField::Hosts, |d| {
            if hostname.is_empty() || d.hosts.iter().any(|h| h.hostname == hostname) {
                return false;
            }
            d.hosts.push(Host::new(hostname));
            true
        })
        .await
    }

    pub async fn remove_host(&mut self, hostname: &str) -> Result<bool, ConsoleError> {
        self.mutate(DeploymentField::Hosts, |d| {
            let before = d.hosts.len();
            d.hosts.retain(|h| h.hostname != hostname);
            d.hosts.len() != before
        })
        .await
    }

    /// Replace the host set in one update
    pub async fn replace_hosts(&mut self, hostnames: &[String]) -> Result<bool, ConsoleError> {
        self.mutate(DeploymentField::Hosts, |d| {
            let hosts: Vec<Host> = hostnames.iter().map(Host::new).collect();
            if d.hosts == hosts {
                return false;
            }
            d.hosts = hosts;
            true
        })
        .await
    }

    /// Apply `change` locally, then send `field` alone to the server
    ///
    /// `change` reports whether it altered anything; nothing is sent when it
    /// did not, or when the field serializes the same as before (malformed
    /// references are kept locally but never sent). On a failed PUT the
    /// deployment is restored to its state before the change.
    async fn mutate<F>(&mut self, field: DeploymentField, change: F) -> Result<bool, ConsoleError>
    where
        F: FnOnce(&mut Deployment) -> bool,
    {
        self.deployment.key.require_complete()?;

        let snapshot = self.deployment.clone();
        if !change(&mut self.deployment) {
            debug!("No change to {} of {}", field, self.deployment.label());
            return Ok(false);
        }

        let body = self.deployment.to_partial_body(field);
        if body == snapshot.to_partial_body(field) {
            debug!("{} of {} serializes unchanged", field, self.deployment.label());
            return Ok(false);
        }

        let envelope = DeploymentEnvelope::new(body);
        match self
            .api
            .update_deployment(&self.deployment.key, &envelope)
            .await
        {
            Ok(_) => {
                debug!("Updated {} of {}", field, self.deployment.label());
                Ok(true)
            }
            Err(e) => {
                warn!(
                    "Failed updating {} of {}, reverting: {}",
                    field,
                    self.deployment.label(),
                    e
                );
                self.deployment = snapshot;
                Err(e)
            }
        }
    }
}

fn push_non_empty(items: &mut Vec<String>, item: String) -> bool {
    if item.is_empty() {
        return false;
    }
    items.push(item);
    true
}

fn extend_non_empty(items: &mut Vec<String>, new_items: Vec<String>) -> bool {
    let before = items.len();
    items.extend(new_items.into_iter().filter(|item| !item.is_empty()));
    items.len() != before
}

fn remove_all(items: &mut Vec<String>, item: &str) -> bool {
    let before = items.len();
    items.retain(|existing| existing != item);
    items.len() != before
}
