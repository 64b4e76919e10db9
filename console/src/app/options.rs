//! Command line options

use std::collections::HashMap;

use crate::errors::ConsoleError;
use crate::listing::{ListQuery, SortOrder};
use crate::logs::LogLevel;
use crate::models::deployment::DeploymentKey;
use crate::routes::Route;
use crate::sync::container::DEFAULT_LOG_TAIL;

/// Collections that can be listed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Apps,
    Hosts,
    Deployments,
    Images,
}

impl std::str::FromStr for ListKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "apps" | "app" => Ok(ListKind::Apps),
            "hosts" | "host" => Ok(ListKind::Hosts),
            "deployments" | "deployment" => Ok(ListKind::Deployments),
            "images" | "image" => Ok(ListKind::Images),
            _ => Err(format!("Unknown collection: {}", s)),
        }
    }
}

/// What the console was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Version,
    InitSettings,
    List { kind: ListKind, query: ListQuery },
    /// Bare names for pickers; apps or hosts only
    Names(ListKind),
    ShowApp(String),
    ShowHost(String),
    ShowDeployment(DeploymentKey),
    ShowContainer { id: String, logs: Option<u32> },
    CreateApp(String),
    DeleteApp(String),
    RefreshApp(String),
    RunDeployment(DeploymentKey),
}

/// Overrides for values normally read from the settings file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub log_level: Option<LogLevel>,
}

/// Collect `--key=value` and `--flag` arguments
pub fn parse_args<I>(args: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = String>,
{
    let mut cli_args = HashMap::new();
    for arg in args {
        if let Some((key, value)) = arg.split_once('=') {
            // Handle --key=value format
            let clean_key = key.trim_start_matches('-');
            cli_args.insert(clean_key.to_string(), value.to_string());
        } else if arg.starts_with("--") {
            // Handle standalone flags like --version
            let clean_key = arg.trim_start_matches('-');
            cli_args.insert(clean_key.to_string(), "true".to_string());
        }
    }
    cli_args
}

/// Read the overrides out of the argument map
pub fn overrides(args: &HashMap<String, String>) -> Result<Overrides, ConsoleError> {
    let log_level = args
        .get("log-level")
        .map(|level| level.parse::<LogLevel>())
        .transpose()
        .map_err(ConsoleError::ConfigError)?;

    Ok(Overrides {
        api_url: args.get("api").cloned(),
        log_level,
    })
}

/// Work out the command from the argument map
pub fn command(
    args: &HashMap<String, String>,
    default_page_size: u32,
) -> Result<Command, ConsoleError> {
    if args.contains_key("version") {
        return Ok(Command::Version);
    }
    if args.contains_key("init-settings") {
        return Ok(Command::InitSettings);
    }

    if let Some(kind) = args.get("list") {
        let kind = kind
            .parse::<ListKind>()
            .map_err(ConsoleError::ValidationError)?;
        return Ok(Command::List {
            kind,
            query: list_query(args, default_page_size)?,
        });
    }

    if let Some(kind) = args.get("names") {
        let kind = kind
            .parse::<ListKind>()
            .map_err(ConsoleError::ValidationError)?;
        if !matches!(kind, ListKind::Apps | ListKind::Hosts) {
            return Err(ConsoleError::ValidationError(
                "--names takes apps or hosts".to_string(),
            ));
        }
        return Ok(Command::Names(kind));
    }

    if let Some(name) = args.get("app") {
        return Ok(Command::ShowApp(name.clone()));
    }
    if let Some(hostname) = args.get("host") {
        return Ok(Command::ShowHost(hostname.clone()));
    }
    if let Some(key) = args.get("deployment") {
        return Ok(Command::ShowDeployment(deployment_key(key)?));
    }
    if let Some(id) = args.get("container") {
        let logs = match args.get("logs").map(String::as_str) {
            None => None,
            Some("true") => Some(DEFAULT_LOG_TAIL),
            Some(tail) => Some(parse_number("logs", tail)?),
        };
        return Ok(Command::ShowContainer {
            id: id.clone(),
            logs,
        });
    }
    if let Some(fragment) = args.get("route") {
        let route = Route::parse(fragment).ok_or_else(|| {
            ConsoleError::ValidationError(format!("Unknown route: {}", fragment))
        })?;
        return Ok(route_command(route, default_page_size));
    }

    if let Some(name) = args.get("create-app") {
        return Ok(Command::CreateApp(name.clone()));
    }
    if let Some(name) = args.get("delete-app") {
        return Ok(Command::DeleteApp(name.clone()));
    }
    if let Some(name) = args.get("refresh-app") {
        return Ok(Command::RefreshApp(name.clone()));
    }
    if let Some(key) = args.get("run") {
        return Ok(Command::RunDeployment(deployment_key(key)?));
    }

    // Same landing page as the dashboard
    Ok(route_command(Route::default(), default_page_size))
}

/// The command that shows what a dashboard route shows
pub fn route_command(route: Route, page_size: u32) -> Command {
    let first_page = ListQuery::new(0, page_size);
    match route {
        Route::Apps => Command::List {
            kind: ListKind::Apps,
            query: first_page,
        },
        Route::Hosts => Command::List {
            kind: ListKind::Hosts,
            query: first_page,
        },
        Route::Deployments => Command::List {
            kind: ListKind::Deployments,
            query: first_page,
        },
        Route::App(name) => Command::ShowApp(name),
        Route::Host(hostname) => Command::ShowHost(hostname),
        Route::Deployment(key) => Command::ShowDeployment(key),
    }
}

fn list_query(
    args: &HashMap<String, String>,
    default_page_size: u32,
) -> Result<ListQuery, ConsoleError> {
    let mut query = ListQuery::new(0, default_page_size);

    if let Some(page) = args.get("page") {
        query.page = parse_number("page", page)?;
    }
    if let Some(page_size) = args.get("page-size") {
        query.page_size = parse_number("page-size", page_size)?;
    }
    if let Some(search) = args.get("search") {
        query = query.with_search(search.clone());
    }
    if let Some(order) = args.get("order") {
        let order = order
            .parse::<SortOrder>()
            .map_err(ConsoleError::ValidationError)?;
        query = query.with_order(order);
    }
    if let Some(sort_field) = args.get("sort") {
        query = query.with_sort_field(sort_field.clone());
    }
    Ok(query)
}

fn deployment_key(value: &str) -> Result<DeploymentKey, ConsoleError> {
    DeploymentKey::parse(value).ok_or_else(|| {
        ConsoleError::ValidationError(format!(
            "Expected <app>/<tag>/<environment>, got {}",
            value
        ))
    })
}

fn parse_number(name: &str, value: &str) -> Result<u32, ConsoleError> {
    value
        .parse()
        .map_err(|_| ConsoleError::ValidationError(format!("--{} must be a number", name)))
}
