//! Deployment API client

use mamabear_models::{DeploymentEnvelope, DeploymentPayload, ListEnvelope, WriteAck};

use crate::errors::ConsoleError;
use crate::http::api::{segment, ApiClient};
use crate::models::deployment::DeploymentKey;

/// Canonical path of one deployment
pub fn deployment_path(key: &DeploymentKey) -> String {
    format!(
        "/deployment/{}/{}/{}",
        segment(&key.app_name),
        segment(&key.image_tag),
        segment(&key.environment)
    )
}

impl ApiClient {
    /// List deployments
    pub async fn list_deployments(
        &self,
        query: Vec<(String, String)>,
    ) -> Result<ListEnvelope<DeploymentPayload>, ConsoleError> {
        self.get("/deployment", query).await
    }

    /// Get one deployment
    pub async fn get_deployment(
        &self,
        key: &DeploymentKey,
    ) -> Result<DeploymentPayload, ConsoleError> {
        self.get(&deployment_path(key), Vec::new()).await
    }

    /// Create a deployment under its app
    pub async fn create_deployment(
        &self,
        app_name: &str,
        envelope: &DeploymentEnvelope,
    ) -> Result<WriteAck, ConsoleError> {
        let path = format!("/app/{}/deployments", segment(app_name));
        self.post(&path, envelope).await
    }

    /// Update the fields present in the envelope
    pub async fn update_deployment(
        &self,
        key: &DeploymentKey,
        envelope: &DeploymentEnvelope,
    ) -> Result<WriteAck, ConsoleError> {
        self.put(&deployment_path(key), envelope).await
    }

    /// Delete a deployment
    pub async fn delete_deployment(&self, key: &DeploymentKey) -> Result<WriteAck, ConsoleError> {
        self.delete(&deployment_path(key)).await
    }

    /// Ask the server to (re)run a deployment; the server echoes it back
    pub async fn run_deployment(
        &self,
        key: &DeploymentKey,
    ) -> Result<DeploymentPayload, ConsoleError> {
        let path = format!("{}/run", deployment_path(key));
        self.get(&path, Vec::new()).await
    }
}
