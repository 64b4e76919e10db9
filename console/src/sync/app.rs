//! App synchronization

use tracing::{info, warn};

use crate::errors::ConsoleError;
use crate::http::api::ApiClient;
use crate::models::app::App;
use crate::models::status::EntityStatus;
use crate::routes::Route;

/// Owns one [`App`] and keeps it in step with the server
pub struct AppHandle {
    api: ApiClient,
    app: App,
    status: EntityStatus,
    alert_visible: bool,
}

impl AppHandle {
    /// Handle for an app known by name; nothing is fetched yet
    pub fn new(api: ApiClient, name: impl Into<String>) -> Self {
        Self {
            api,
            app: App::new(name),
            status: EntityStatus::New,
            alert_visible: false,
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn status(&self) -> EntityStatus {
        self.status
    }

    /// Whether the creation-failed banner should be shown
    pub fn alert_visible(&self) -> bool {
        self.alert_visible
    }

    /// Fetch images and deployments
    ///
    /// Both requests run concurrently and are joined; the status only turns
    /// `ok` once both have succeeded. A side that fails leaves its collection
    /// as it was.
    pub async fn fetch(&mut self) -> Result<(), ConsoleError> {
        self.status = EntityStatus::Loading;
        let name = self.app.name.clone();

        let (images, deployments) = tokio::join!(
            self.api.get_app_images(&name),
            self.api.get_app_deployments(&name),
        );

        let mut first_error = None;

        match images {
            Ok(images) => self.app.replace_images(&images),
            Err(e) => {
                warn!("Failed fetching images for app {}: {}", name, e);
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }

        match deployments {
            Ok(deployments) => self.app.replace_deployments(&deployments),
            Err(e) => {
                warn!("Failed fetching deployments for app {}: {}", name, e);
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }

        match first_error {
            Some(e) => {
                self.status = EntityStatus::Error;
                Err(e)
            }
            None => {
                self.status = EntityStatus::Ok;
                Ok(())
            }
        }
    }

    /// Create the app on the server, then load it
    ///
    /// Returns the page to navigate to. A second call while one is in flight
    /// is refused.
    pub async fn create(&mut self) -> Result<Route, ConsoleError> {
        if self.status.is_loading() {
            return Err(ConsoleError::Busy(format!("app {}", self.app.name)));
        }
        if self.app.name.trim().is_empty() {
            return Err(ConsoleError::ValidationError("app name is empty".to_string()));
        }

        self.status = EntityStatus::Loading;
        self.alert_visible = false;
        info!("Creating app {}", self.app.name);

        match self.api.create_app(&self.app.name).await {
            Ok(ack) => {
                if let Some(warning) = ack.warn {
                    warn!("App {} created with warning: {}", self.app.name, warning);
                }
            }
            Err(e) => {
                warn!("Failed creating app {}: {}", self.app.name, e);
                self.status = EntityStatus::Error;
                self.alert_visible = true;
                return Err(e);
            }
        }

        self.fetch().await?;
        Ok(Route::Apps)
    }

    /// Delete the app on the server
    pub async fn delete(&mut self) -> Result<Route, ConsoleError> {
        self.api
            .delete_app(&self.app.name)
            .await
            .inspect_err(|e| warn!("Failed deleting app {}: {}", self.app.name, e))?;
        info!("Deleted app {}", self.app.name);
        Ok(Route::Deployments)
    }

    /// Have the server re-read the registry, then reload
    pub async fn refresh_images(&mut self) -> Result<(), ConsoleError> {
        self.api
            .refresh_app_images(&self.app.name)
            .await
            .inspect_err(|e| warn!("Failed to refresh images of {}: {}", self.app.name, e))?;
        self.fetch().await
    }
}
