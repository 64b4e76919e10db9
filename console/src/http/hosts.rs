//! Host API client

use mamabear_models::{HostBody, HostEnvelope, HostPayload, ListEnvelope, WriteAck};

use crate::errors::ConsoleError;
use crate::http::api::{segment, ApiClient};

impl ApiClient {
    /// List hosts
    pub async fn list_hosts(
        &self,
        query: Vec<(String, String)>,
    ) -> Result<ListEnvelope<HostPayload>, ConsoleError> {
        self.get("/host", query).await
    }

    /// Look up hosts by hostname; the server answers with a list envelope
    pub async fn find_hosts(&self, hostname: &str) -> Result<Vec<HostPayload>, ConsoleError> {
        let query = vec![("hostname".to_string(), hostname.to_string())];
        let envelope = self.list_hosts(query).await?;
        Ok(envelope.hits)
    }

    /// Register a host
    pub async fn create_host(&self, host: HostBody) -> Result<WriteAck, ConsoleError> {
        self.post("/host", &HostEnvelope { host }).await
    }

    /// Delete a host by alias
    pub async fn delete_host(&self, alias: &str) -> Result<WriteAck, ConsoleError> {
        let path = format!("/host/{}", segment(alias));
        self.delete(&path).await
    }
}
