//! Navigation targets of the dashboard

use std::fmt;

use crate::models::deployment::DeploymentKey;

/// A dashboard page, addressed by its `#fragment`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Route {
    Apps,
    Hosts,
    #[default]
    Deployments,
    App(String),
    Host(String),
    Deployment(DeploymentKey),
}

impl Route {
    /// Render as a `#section/...` fragment
    pub fn fragment(&self) -> String {
        match self {
            Route::Apps => "#apps/all".to_string(),
            Route::Hosts => "#hosts/all".to_string(),
            Route::Deployments => "#deployments/all".to_string(),
            Route::App(name) => format!("#apps/{}", name),
            Route::Host(hostname) => format!("#hosts/{}", hostname),
            Route::Deployment(key) => format!(
                "#deployments/{}/{}/{}",
                key.app_name, key.image_tag, key.environment
            ),
        }
    }

    /// Parse a fragment, with or without the leading `#`
    pub fn parse(fragment: &str) -> Option<Self> {
        let fragment = fragment.trim_start_matches('#').trim_matches('/');
        let (section, rest) = fragment.split_once('/').unwrap_or((fragment, ""));

        match (section, rest) {
            ("apps", "all") => Some(Route::Apps),
            ("hosts", "all") => Some(Route::Hosts),
            ("deployments", "all") => Some(Route::Deployments),
            (_, "") => None,
            ("apps", name) if !name.contains('/') => Some(Route::App(name.to_string())),
            ("hosts", hostname) if !hostname.contains('/') => {
                Some(Route::Host(hostname.to_string()))
            }
            ("deployments", key) => DeploymentKey::parse(key).map(Route::Deployment),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fragment())
    }
}
