// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, in-memory stores, seeded resources and the full router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ConvoInsight
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `convoinsight_server`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use std::sync::{Arc, Once};

use anyhow::Result;
use axum::Router;
use convoinsight_server::{
    config::environment::{Environment, ServerConfig},
    database_plugins::{factory::create_store, ConversationStore, InsertOutcome},
    resources::ServerResources,
    server::build_app,
};
use serde_json::Value;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Configuration used by every test server
pub fn test_config() -> ServerConfig {
    ServerConfig {
        environment: Environment::Testing,
        ..ServerConfig::default()
    }
}

/// Fresh in-memory store
pub async fn create_test_store() -> Result<Arc<dyn ConversationStore>> {
    init_test_logging();
    create_store("sqlite::memory:").await
}

/// Insert documents directly, bypassing request validation
pub async fn seed(store: &dyn ConversationStore, documents: &[Value]) -> Result<()> {
    for document in documents {
        let id = document["id"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("fixture without id: {document}"))?;
        let outcome = store.insert_if_absent(id, document).await?;
        anyhow::ensure!(outcome == InsertOutcome::Inserted, "duplicate fixture {id}");
    }
    Ok(())
}

/// Server resources over `store` with the test configuration
pub fn create_test_resources(
    store: Arc<dyn ConversationStore>,
    config: ServerConfig,
) -> Arc<ServerResources> {
    Arc::new(ServerResources::new(store, Arc::new(config)))
}

/// Complete application over an empty in-memory store
pub async fn empty_app() -> Result<(Router, Arc<dyn ConversationStore>)> {
    seeded_app(&[]).await
}

/// Complete application over an in-memory store holding `documents`
pub async fn seeded_app(documents: &[Value]) -> Result<(Router, Arc<dyn ConversationStore>)> {
    let store = create_test_store().await?;
    seed(store.as_ref(), documents).await?;
    let resources = create_test_resources(Arc::clone(&store), test_config());
    Ok((build_app(&resources), store))
}
