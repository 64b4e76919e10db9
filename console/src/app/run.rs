//! Command execution

use anyhow::Context;
use colored::Colorize;
use serde::Serialize;
use tracing::info;

use crate::app::options::{Command, ListKind};
use crate::http::api::ApiClient;
use crate::listing::sources::{
    app_names, host_names, AppRow, AppSource, DeploymentRow, DeploymentSource, HostRow,
    HostSource, ImageRow, ImageSource,
};
use crate::listing::{query, ListQuery, Page};
use crate::storage::layout::StorageLayout;
use crate::storage::settings::Settings;
use crate::sync::app::AppHandle;
use crate::sync::container::ContainerHandle;
use crate::sync::deployment::DeploymentHandle;
use crate::sync::host::HostHandle;
use crate::utils::version_info;

/// Run one console command
pub async fn run(
    command: Command,
    settings: &Settings,
    layout: &StorageLayout,
) -> anyhow::Result<()> {
    match command {
        Command::Version => print_json(&version_info()),
        Command::InitSettings => {
            settings.save(layout).await.context("writing settings")?;
            println!("Wrote {}", layout.settings_file().display());
            Ok(())
        }
        command => {
            let api = ApiClient::connect(&settings.api).context("building API client")?;
            info!("Using API at {}", settings.api.base_url);
            run_remote(command, api).await
        }
    }
}

async fn run_remote(command: Command, api: ApiClient) -> anyhow::Result<()> {
    match command {
        Command::List { kind, query } => list(&api, kind, &query).await,
        Command::Names(kind) => {
            let names = match kind {
                ListKind::Hosts => host_names(&api).await?,
                _ => app_names(&api).await?,
            };
            for name in names {
                println!("{}", name);
            }
            Ok(())
        }
        Command::ShowApp(name) => {
            let mut handle = AppHandle::new(api, name);
            handle.fetch().await.context("fetching app")?;
            print_json(handle.app())
        }
        Command::ShowHost(hostname) => {
            let mut handle = HostHandle::new(api, hostname);
            handle.fetch().await.context("fetching host")?;
            print_json(handle.host())
        }
        Command::ShowDeployment(key) => {
            let mut handle = DeploymentHandle::new(api, key);
            handle.fetch().await.context("fetching deployment")?;
            print_json(handle.deployment())
        }
        Command::ShowContainer { id, logs } => {
            let mut handle = ContainerHandle::new(api, id);
            handle.fetch().await.context("fetching container")?;
            print_json(handle.container())?;
            if let Some(tail) = logs {
                let text = handle.logs(tail).await.context("fetching container logs")?;
                println!("{}", text);
            }
            Ok(())
        }
        Command::CreateApp(name) => {
            let mut handle = AppHandle::new(api, name);
            let route = handle.create().await.context("creating app")?;
            print_json(handle.app())?;
            println!("{}", route);
            Ok(())
        }
        Command::DeleteApp(name) => {
            let mut handle = AppHandle::new(api, name);
            let route = handle.delete().await.context("deleting app")?;
            println!("{}", route);
            Ok(())
        }
        Command::RefreshApp(name) => {
            let mut handle = AppHandle::new(api, name);
            handle.refresh_images().await.context("refreshing images")?;
            print_json(&handle.app().image_tags())
        }
        Command::RunDeployment(key) => {
            let mut handle = DeploymentHandle::new(api, key);
            handle.run().await.context("running deployment")?;
            print_json(handle.deployment())
        }
        Command::Version | Command::InitSettings => Ok(()),
    }
}

async fn list(api: &ApiClient, kind: ListKind, list_query: &ListQuery) -> anyhow::Result<()> {
    match kind {
        ListKind::Apps => {
            let page = query::<AppSource>(api, list_query).await?;
            print_page(&page, app_line)
        }
        ListKind::Hosts => {
            let page = query::<HostSource>(api, list_query).await?;
            print_page(&page, host_line)
        }
        ListKind::Deployments => {
            let page = query::<DeploymentSource>(api, list_query).await?;
            print_page(&page, deployment_line)
        }
        ListKind::Images => {
            let page = query::<ImageSource>(api, list_query).await?;
            print_page(&page, image_line)
        }
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_page<T>(page: &Page<T>, line: fn(&T) -> String) {
    if page.is_empty() {
        println!("{}", "no results".dimmed());
    }
    for item in &page.items {
        println!("{}", line(item));
    }
    println!(
        "{}",
        format!(
            "page {}/{} ({} total)",
            page.page + 1,
            page.pages,
            page.total
        )
        .dimmed()
    );
}

fn or_dash<T: ToString>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map_or_else(|| "-".to_string(), ToString::to_string)
}

fn up_ratio(up: u64, total: u64) -> String {
    let ratio = format!("{}/{} up", up, total);
    if total > 0 && up == total {
        ratio.green().to_string()
    } else if up == 0 && total > 0 {
        ratio.red().to_string()
    } else {
        ratio.yellow().to_string()
    }
}

fn app_line(row: &AppRow) -> String {
    format!(
        "{:<30} images: {:<5} containers: {}",
        row.name.bold(),
        or_dash(&row.image_count),
        or_dash(&row.container_count)
    )
}

fn host_line(row: &HostRow) -> String {
    let status = match row.status.as_deref() {
        Some("up") => "up".green().to_string(),
        Some("down") => "down".red().to_string(),
        Some(other) => other.to_string(),
        None => "-".to_string(),
    };
    let containers = match (row.up_containers, row.container_count) {
        (Some(up), Some(total)) => up_ratio(up, total),
        (_, total) => or_dash(&total),
    };
    format!(
        "{:<30} port: {:<6} {:<6} containers: {}",
        row.hostname.bold(),
        or_dash(&row.port),
        status,
        containers
    )
}

fn deployment_line(row: &DeploymentRow) -> String {
    format!(
        "{:<40} hosts: {:<3} {} {}",
        row.deployment.bold(),
        row.host_count,
        up_ratio(row.up_containers, row.container_count),
        or_dash(&row.status_endpoint)
    )
}

fn image_line(row: &ImageRow) -> String {
    format!(
        "{:<20} {:<20} {}",
        or_dash(&row.app_name),
        or_dash(&row.tag),
        or_dash(&row.hash).dimmed()
    )
}
