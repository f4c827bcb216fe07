use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Arg, Command};
use roster_core::{init_logging, AppConfig, LogFormat, ROLLUP_SERVER_URL_ENV};
use tracing::{error, info, warn};

use student_roster::app::Application;
use student_roster::shutdown::{wait_for_shutdown_signal, ShutdownManager};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Command::new("student-roster")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Student roster state machine for a rollup execution environment")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file (TOML)"),
        )
        .arg(
            Arg::new("server-url")
                .long("server-url")
                .value_name("URL")
                .help(format!(
                    "Rollup HTTP server address, overrides {ROLLUP_SERVER_URL_ENV}"
                )),
        )
        .arg(
            Arg::new("log-level")
                .short('l')
                .long("log-level")
                .value_name("LEVEL")
                .help("Log level")
                .value_parser(["trace", "debug", "info", "warn", "error"]),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .value_name("FORMAT")
                .help("Log format")
                .value_parser(["json", "pretty"]),
        )
        .get_matches();

    let config_path = matches.get_one::<String>("config");
    let config_path_str = config_path.map(String::as_str);
    let mut config = match matches.get_one::<String>("server-url") {
        Some(url) => AppConfig::load_from(config_path_str, Some(url.clone())),
        None => AppConfig::load(config_path_str),
    }
    .context("Failed to load configuration")?;
    if let Some(level) = matches.get_one::<String>("log-level") {
        config.logging.level = level.clone();
    }
    if let Some(format) = matches.get_one::<String>("log-format") {
        config.logging.format = format.parse::<LogFormat>()?;
    }

    init_logging(&config.logging)?;

    info!("Starting student roster backend");
    if let Some(path) = config_path {
        info!("Config file: {path}");
    }

    let app = Application::new(config);
    let shutdown_manager = ShutdownManager::new();
    let shutdown_rx = shutdown_manager.subscribe().await;

    let mut app_handle = tokio::spawn(async move { app.run(shutdown_rx).await });

    tokio::select! {
        result = &mut app_handle => {
            // The loop only returns on its own when the rollup server is gone
            let result = result.context("Application task panicked")?;
            if let Err(e) = &result {
                error!("Application failed: {e:#}");
            }
            return result;
        }
        _ = wait_for_shutdown_signal() => {
            info!("Shutdown signal received, stopping...");
        }
    }

    shutdown_manager.shutdown().await;

    match tokio::time::timeout(Duration::from_secs(30), app_handle).await {
        Ok(Ok(Ok(()))) => info!("Application stopped gracefully"),
        Ok(Ok(Err(e))) => error!("Application failed during shutdown: {e:#}"),
        Ok(Err(e)) => error!("Application task panicked: {e}"),
        Err(_) => warn!("Shutdown timed out, exiting"),
    }

    Ok(())
}
