//! Host synchronization

use tracing::{info, warn};

use crate::errors::ConsoleError;
use crate::http::api::ApiClient;
use crate::models::host::Host;
use crate::models::status::EntityStatus;
use crate::routes::Route;

/// Owns one [`Host`] and keeps it in step with the server
pub struct HostHandle {
    api: ApiClient,
    host: Host,
    status: EntityStatus,
    alert_visible: bool,
}

impl HostHandle {
    pub fn new(api: ApiClient, hostname: impl Into<String>) -> Self {
        Self::from_host(api, Host::new(hostname))
    }

    /// Handle for a host filled in locally, typically before [`HostHandle::create`]
    pub fn from_host(api: ApiClient, host: Host) -> Self {
        Self {
            api,
            host,
            status: EntityStatus::New,
            alert_visible: false,
        }
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut Host {
        &mut self.host
    }

    pub fn status(&self) -> EntityStatus {
        self.status
    }

    pub fn alert_visible(&self) -> bool {
        self.alert_visible
    }

    /// Look the host up by exact hostname
    ///
    /// The lookup goes through the list endpoint. Hits whose hostname differs
    /// are ignored; the first exact match is applied. No match leaves every
    /// field untouched and returns `NotFound`.
    pub async fn fetch(&mut self) -> Result<(), ConsoleError> {
        self.status = EntityStatus::Loading;
        let hostname = self.host.hostname.clone();

        let hits = match self.api.find_hosts(&hostname).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!("Failed fetching host {}: {}", hostname, e);
                self.status = EntityStatus::Error;
                return Err(e);
            }
        };

        let Some(found) = hits
            .iter()
            .find(|hit| hit.hostname.as_deref() == Some(hostname.as_str()))
        else {
            warn!("Failed fetching host {}: no matching hit", hostname);
            self.status = EntityStatus::Error;
            return Err(ConsoleError::NotFound(format!("host {}", hostname)));
        };

        self.host.apply(found);
        self.status = EntityStatus::Ok;
        Ok(())
    }

    /// Register the host on the server, then load it
    pub async fn create(&mut self) -> Result<Route, ConsoleError> {
        if self.status.is_loading() {
            return Err(ConsoleError::Busy(format!("host {}", self.host.hostname)));
        }
        if self.host.hostname.trim().is_empty() {
            return Err(ConsoleError::ValidationError("hostname is empty".to_string()));
        }

        self.status = EntityStatus::Loading;
        self.alert_visible = false;
        info!("Creating host {}", self.host.hostname);

        match self.api.create_host(self.host.to_body()).await {
            Ok(ack) => {
                if let Some(warning) = ack.warn {
                    warn!("Host {} created with warning: {}", self.host.hostname, warning);
                }
            }
            Err(e) => {
                warn!("Failed creating host {}: {}", self.host.hostname, e);
                self.status = EntityStatus::Error;
                self.alert_visible = true;
                return Err(e);
            }
        }

        self.fetch().await?;
        Ok(Route::Hosts)
    }

    /// Delete the host; the server addresses hosts by alias, falling back
    /// to the hostname when no alias is known
    pub async fn delete(&mut self) -> Result<Route, ConsoleError> {
        let alias = self
            .host
            .alias
            .clone()
            .unwrap_or_else(|| self.host.hostname.clone());

        self.api
            .delete_host(&alias)
            .await
            .inspect_err(|e| warn!("Failed deleting host {}: {}", alias, e))?;
        info!("Deleted host {}", alias);
        Ok(Route::Deployments)
    }
}
