use anyhow::Result;
use clap::Parser;
use log::{error, info, warn};
use std::path::PathBuf;

use sentinel_cam::{config, DatabaseService, HealthChecker, RestApi};

/// Camera registry and threat-alert service
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// TOML or JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutting down...");
}

async fn run_app(args: Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref())?;

    // RUST_LOG wins over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.api.log_level.as_str()),
    )
    .init();
    info!("Starting camera alert service");
    info!("Configuration loaded");

    let database = DatabaseService::new(&config.database).await?;
    if !database.health_check().await? {
        warn!("Database did not answer the startup health check");
    }
    let health_checker = HealthChecker::new(&config.health)?;

    let http_server = RestApi::new(&config.api, database.pool.clone(), health_checker)?;
    http_server.run(shutdown_signal()).await?;

    database.pool.close().await;
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = run_app(args).await {
        eprintln!("Application error: {:#}", e);
        std::process::exit(1);
    }
}
