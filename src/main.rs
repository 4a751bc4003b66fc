#![forbid(unsafe_code)]

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;

mod cli;
mod config;
mod db;
mod utils;
mod web;

use config::Config;
use web::WebServer;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    let config = Arc::new(Config::load(cli.config.as_deref())?);
    utils::logging::init_tracing(&config.logging);
    info!("supplier ledger starting up");

    let db_manager = db::DatabaseManager::new(&config.database).await?;
    db_manager.migrate().await?;

    WebServer::new(config.clone(), db_manager).start().await?;

    info!("supplier ledger shutting down");
    Ok(())
}
