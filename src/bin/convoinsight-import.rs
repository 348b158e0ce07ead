// ABOUTME: Command-line importer loading conversation exports into the document store
// ABOUTME: Reads one object or an array from a JSON file, optionally replacing the collection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ConvoInsight

//! Usage:
//! ```bash
//! # Add conversations, skipping ids already stored
//! cargo run --bin convoinsight-import -- data/conversations.json
//!
//! # Empty the collection first
//! cargo run --bin convoinsight-import -- data/conversations.json --replace
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use convoinsight_server::{
    config::environment::{DatabaseUrl, ServerConfig},
    database_plugins::factory::create_store,
    logging,
    services::import::{import_documents, read_export},
};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "convoinsight-import",
    about = "Load conversation documents from a JSON file into the ConvoInsight store"
)]
struct ImportArgs {
    /// JSON file holding one conversation object or an array of them
    file: PathBuf,

    /// Remove every stored conversation before importing
    #[arg(long)]
    replace: bool,

    /// Override the store connection string
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = ImportArgs::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(database_url) = &args.database_url {
        config.database.url = DatabaseUrl::parse_url(database_url);
    }

    logging::init_from_env()?;

    let documents = read_export(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    info!(
        "Read {} conversation(s) from {}",
        documents.len(),
        args.file.display()
    );

    let store = create_store(&config.database.url.to_connection_string()).await?;
    let source = args.file.display().to_string();
    let report = import_documents(store.as_ref(), &source, &documents, args.replace)
        .await
        .context("Import failed")?;

    println!("Import of {source} complete");
    if args.replace {
        println!("  removed:    {}", report.cleared);
    }
    println!("  inserted:   {}", report.inserted.len());
    println!("  duplicates: {}", report.duplicates.len());
    for id in &report.duplicates {
        println!("    - {id}");
    }
    println!("  invalid:    {}", report.invalid.len());
    for entry in &report.invalid {
        println!("    - entry {}: {}", entry.index, entry.reason);
    }

    Ok(())
}
