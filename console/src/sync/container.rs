//! Container synchronization

use tracing::warn;

use crate::errors::ConsoleError;
use crate::http::api::ApiClient;
use crate::models::container::Container;
use crate::models::status::EntityStatus;

/// Number of log lines fetched when none is given
pub const DEFAULT_LOG_TAIL: u32 = 10;

/// Owns one [`Container`]
pub struct ContainerHandle {
    api: ApiClient,
    id: String,
    container: Container,
    status: EntityStatus,
}

impl ContainerHandle {
    pub fn new(api: ApiClient, id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            api,
            container: Container {
                id: Some(id.clone()),
                ..Default::default()
            },
            id,
            status: EntityStatus::New,
        }
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn status(&self) -> EntityStatus {
        self.status
    }

    pub async fn fetch(&mut self) -> Result<(), ConsoleError> {
        self.status = EntityStatus::Loading;
        match self.api.get_container(&self.id).await {
            Ok(payload) => {
                self.container.apply(&payload);
                self.status = EntityStatus::Ok;
                Ok(())
            }
            Err(e) => {
                warn!("Failed fetching container {}: {}", self.id, e);
                self.status = EntityStatus::Error;
                Err(e)
            }
        }
    }

    /// Last `tail` lines of the container's output
    pub async fn logs(&self, tail: u32) -> Result<String, ConsoleError> {
        self.api
            .get_container_logs(&self.id, tail)
            .await
            .inspect_err(|e| warn!("Failed fetching logs of container {}: {}", self.id, e))
    }
}
