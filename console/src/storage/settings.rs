//! Settings file management

use std::io::ErrorKind;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, info};
use url::Url;

use crate::errors::ConsoleError;
use crate::logs::LogLevel;
use crate::storage::layout::StorageLayout;

/// Console settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// API configuration
    #[serde(default)]
    pub api: ApiSettings,

    /// List view configuration
    #[serde(default)]
    pub listing: ListingSettings,

    /// Log output configuration
    #[serde(default)]
    pub log: LogSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Warn,
            api: ApiSettings::default(),
            listing: ListingSettings::default(),
            log: LogSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from the layout's settings file, falling back to defaults
    pub async fn load(layout: &StorageLayout) -> Result<Self, ConsoleError> {
        let path = layout.settings_file();
        let contents = match fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No settings file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let settings: Settings = serde_json::from_str(&contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Write these settings to the layout's settings file
    pub async fn save(&self, layout: &StorageLayout) -> Result<(), ConsoleError> {
        fs::create_dir_all(&layout.base_dir).await?;
        let path = layout.settings_file();
        fs::write(&path, serde_json::to_string_pretty(self)?).await?;
        info!("Wrote settings to {}", path.display());
        Ok(())
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<(), ConsoleError> {
        self.api.url()?;
        if self.listing.page_size == 0 {
            return Err(ConsoleError::ConfigError(
                "listing.page_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL for the API, including the `/mamabear/v1` prefix
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:9055/mamabear/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiSettings {
    /// Parsed base URL
    pub fn url(&self) -> Result<Url, ConsoleError> {
        let url = Url::parse(&self.base_url)?;
        if url.cannot_be_a_base() {
            return Err(ConsoleError::ConfigError(format!(
                "API base URL cannot be a base: {}",
                self.base_url
            )));
        }
        Ok(url)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// List view settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingSettings {
    /// Rows per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_size() -> u32 {
    10
}

impl Default for ListingSettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogSettings {
    /// Emit JSON lines on stderr
    #[serde(default)]
    pub json: bool,

    /// Also write a daily-rolling log file to the layout's logs directory
    #[serde(default)]
    pub to_file: bool,
}
