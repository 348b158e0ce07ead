// ABOUTME: Main library entry point for the ConvoInsight conversation analytics backend
// ABOUTME: Provides the REST API, the document store and the analytics over conversation records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ConvoInsight

#![deny(unsafe_code)]

//! # ConvoInsight Server
//!
//! HTTP backend for customer-service conversation records: create, browse,
//! update and delete conversations, and analyze them by agent, tag and
//! resolution outcome.
//!
//! ## Architecture
//!
//! - **Routes**: thin axum handlers rendering the `{success, data, message}` envelope
//! - **Services**: store-backed operations behind the routes and the import tool
//! - **Analytics**: pure reductions over fetched conversations
//! - **Query**: translation of request filters into store filter expressions
//! - **Database plugins**: the `ConversationStore` trait and its `SQLite` backend
//! - **Config**: environment-driven configuration
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use convoinsight_server::config::environment::ServerConfig;
//! use convoinsight_server::database_plugins::factory::create_store;
//! use convoinsight_server::resources::ServerResources;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let store = create_store(&config.database.url.to_connection_string()).await?;
//!     let resources = Arc::new(ServerResources::new(store, Arc::new(config)));
//!     convoinsight_server::server::serve(resources).await
//! }
//! ```

/// Pure analytics over fetched conversations
pub mod analytics;

/// Environment-driven configuration
pub mod config;

/// Document store abstraction and backends
pub mod database_plugins;

/// Structured logging setup
pub mod logging;

/// HTTP middleware: CORS, request IDs, request tracing
pub mod middleware;

/// Request filter translation
pub mod query;

/// Shared state handed to route handlers
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Router assembly and the serve loop
pub mod server;

/// Store-backed domain operations
pub mod services;

pub use convoinsight_core::{constants, envelope, errors, models, pagination};
