// ABOUTME: Server binary for the ConvoInsight analytics API
// ABOUTME: Loads configuration, connects the document store and serves HTTP until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ConvoInsight

//! # ConvoInsight API Server Binary
//!
//! Starts the conversation analytics API with the store named by
//! `DATABASE_URL` (or `--database-url`).

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use convoinsight_server::{
    config::environment::{DatabaseUrl, ServerConfig},
    database_plugins::factory::create_store,
    logging,
    resources::ServerResources,
    server,
};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "convoinsight-server")]
#[command(about = "ConvoInsight - customer-service conversation analytics API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override the store connection string
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url {
        config.database.url = DatabaseUrl::parse_url(&database_url);
    }

    logging::init_from_env()?;

    info!("Starting ConvoInsight API");
    info!("{}", config.summary());

    let store = create_store(&config.database.url.to_connection_string()).await?;
    info!("Document store ready: {}", store.backend_info());

    let resources = Arc::new(ServerResources::new(store, Arc::new(config)));

    if let Err(e) = server::serve(resources).await {
        error!("Server error: {e:#}");
        return Err(e);
    }

    Ok(())
}
