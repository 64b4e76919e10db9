//! App API client

use mamabear_models::{
    AppBody, AppDeploymentsResponse, AppEnvelope, AppHit, AppImagesResponse,
    DeploymentPayload, ImagePayload, ListEnvelope, WriteAck,
};

use crate::errors::ConsoleError;
use crate::http::api::{segment, ApiClient};

impl ApiClient {
    /// List apps
    pub async fn list_apps(
        &self,
        query: Vec<(String, String)>,
    ) -> Result<ListEnvelope<AppHit>, ConsoleError> {
        self.get("/app", query).await
    }

    /// Get the images of an app
    ///
    /// The server keys the body by app name; a body without that key is
    /// treated as an empty payload.
    pub async fn get_app_images(&self, name: &str) -> Result<Vec<ImagePayload>, ConsoleError> {
        let path = format!("/app/{}/images", segment(name));
        let mut response: AppImagesResponse = self.get(&path, Vec::new()).await?;
        response
            .remove(name)
            .and_then(|entry| entry.images)
            .ok_or(ConsoleError::EmptyPayload(path))
    }

    /// Get the deployments of an app
    pub async fn get_app_deployments(
        &self,
        name: &str,
    ) -> Result<Vec<DeploymentPayload>, ConsoleError> {
        let path = format!("/app/{}/deployments", segment(name));
        let mut response: AppDeploymentsResponse = self.get(&path, Vec::new()).await?;
        response
            .remove(name)
            .and_then(|entry| entry.deployments)
            .ok_or(ConsoleError::EmptyPayload(path))
    }

    /// Ask the server to re-read the app's images from the registry
    ///
    /// The body is whatever the server echoes; callers re-fetch afterwards.
    pub async fn refresh_app_images(&self, name: &str) -> Result<(), ConsoleError> {
        let path = format!("/app/{}/images/refresh", segment(name));
        let _: serde_json::Value = self.get(&path, Vec::new()).await?;
        Ok(())
    }

    /// Create an app
    pub async fn create_app(&self, name: &str) -> Result<WriteAck, ConsoleError> {
        let body = AppEnvelope {
            app: AppBody {
                name: name.to_string(),
            },
        };
        self.post("/app", &body).await
    }

    /// Delete an app
    pub async fn delete_app(&self, name: &str) -> Result<WriteAck, ConsoleError> {
        let path = format!("/app/{}", segment(name));
        self.delete(&path).await
    }
}
