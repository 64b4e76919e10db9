//! Mamabear Console - Entry Point
//!
//! Lists and inspects apps, hosts, deployments, containers and images held
//! by a mamabear server.

use std::env;
use std::process::ExitCode;

use mamabear_console::app::options::{command, overrides, parse_args};
use mamabear_console::app::run::run;
use mamabear_console::logs::{init_logging, LogOptions};
use mamabear_console::storage::layout::StorageLayout;
use mamabear_console::storage::settings::Settings;

use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let cli_args = parse_args(env::args().skip(1));

    let layout = match cli_args.get("config-dir") {
        Some(dir) => StorageLayout::new(dir),
        None => StorageLayout::default(),
    };

    let mut settings = match Settings::load(&layout).await {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Unable to read settings file: {e}");
            return ExitCode::FAILURE;
        }
    };

    match overrides(&cli_args) {
        Ok(overrides) => {
            if let Some(api_url) = overrides.api_url {
                settings.api.base_url = api_url;
            }
            if let Some(log_level) = overrides.log_level {
                settings.log_level = log_level;
            }
        }
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    }

    // Initialize logging
    let log_options = LogOptions {
        log_level: settings.log_level.clone(),
        json_format: settings.log.json,
        log_dir: settings.log.to_file.then(|| layout.logs_dir()),
        ..Default::default()
    };
    if let Err(e) = init_logging(log_options) {
        eprintln!("Failed to initialize logging: {e}");
    }

    if let Err(e) = settings.validate() {
        error!("Invalid settings: {}", e);
        return ExitCode::FAILURE;
    }

    let command = match command(&cli_args, settings.listing.page_size) {
        Ok(command) => command,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(command, &settings, &layout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
