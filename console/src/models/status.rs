//! Status values

use std::fmt;

use serde::{Deserialize, Serialize};

/// Run status reported by the server for hosts and containers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RunStatus {
    Up,
    Down,
    /// Anything else docker reports, kept verbatim
    Other(String),
}

impl RunStatus {
    pub fn as_str(&self) -> &str {
        match self {
            RunStatus::Up => "up",
            RunStatus::Down => "down",
            RunStatus::Other(status) => status,
        }
    }

    pub fn is_up(&self) -> bool {
        matches!(self, RunStatus::Up)
    }
}

impl From<String> for RunStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "up" => RunStatus::Up,
            "down" => RunStatus::Down,
            _ => RunStatus::Other(status),
        }
    }
}

impl From<&str> for RunStatus {
    fn from(status: &str) -> Self {
        RunStatus::from(status.to_string())
    }
}

impl From<RunStatus> for String {
    fn from(status: RunStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Load status of a locally held entity
///
/// Feedback for the UI only; it never gates the data itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityStatus {
    #[default]
    New,
    Loading,
    Ok,
    Error,
}

impl EntityStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, EntityStatus::Loading)
    }
}
