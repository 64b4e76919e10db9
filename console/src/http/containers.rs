//! Container API client

use mamabear_models::{ContainerLogsPayload, ContainerPayload};

use crate::errors::ConsoleError;
use crate::http::api::{segment, ApiClient};

impl ApiClient {
    /// Get one container
    pub async fn get_container(&self, id: &str) -> Result<ContainerPayload, ConsoleError> {
        let path = format!("/container/{}", segment(id));
        self.get(&path, Vec::new()).await
    }

    /// Get the last `tail` log lines of a container
    pub async fn get_container_logs(&self, id: &str, tail: u32) -> Result<String, ConsoleError> {
        let path = format!("/container/{}/logs", segment(id));
        let query = vec![("tail".to_string(), tail.to_string())];
        let logs: ContainerLogsPayload = self.get(&path, query).await?;
        Ok(logs.into_text())
    }
}
