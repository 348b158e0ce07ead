// ABOUTME: Store factory selecting the document store backend from the connection string
// ABOUTME: Detects the backend type and returns a shared ConversationStore handle
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ConvoInsight

//! Store factory
//!
//! Detects the backend from the connection string and hands back a
//! `ConversationStore` ready for use (migrations applied).

use std::sync::Arc;

use anyhow::{anyhow, Result};
use tracing::{debug, info};

use super::sqlite::SqliteConversationStore;
use super::ConversationStore;

/// Supported store backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    /// `SQLite` file or in-memory database
    SQLite,
}

/// Automatically detect the backend from a connection string
///
/// # Errors
///
/// Returns an error if the URL does not name a supported backend
pub fn detect_database_type(database_url: &str) -> Result<DatabaseType> {
    if database_url.starts_with("sqlite:") {
        Ok(DatabaseType::SQLite)
    } else {
        Err(anyhow!(
            "Unsupported database URL format: {database_url}. \
             Supported formats: sqlite:path/to/db.sqlite, sqlite::memory:"
        ))
    }
}

/// Connect to the store named by `database_url`
///
/// # Errors
///
/// Returns an error if the URL is unsupported, the connection fails or migrations fail
pub async fn create_store(database_url: &str) -> Result<Arc<dyn ConversationStore>> {
    debug!("Detecting database type from URL: {database_url}");
    let db_type = detect_database_type(database_url)?;
    info!("Detected database type: {db_type:?}");

    match db_type {
        DatabaseType::SQLite => {
            let store = SqliteConversationStore::new(database_url).await?;
            Ok(Arc::new(store))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_database_type() {
        assert_eq!(
            detect_database_type("sqlite:./data/convoinsight.db").unwrap(),
            DatabaseType::SQLite
        );
        assert_eq!(
            detect_database_type("sqlite::memory:").unwrap(),
            DatabaseType::SQLite
        );
        assert!(detect_database_type("mongodb://localhost:27017").is_err());
    }

    #[tokio::test]
    async fn test_create_memory_store() {
        let store = create_store("sqlite::memory:").await.unwrap();
        assert_eq!(store.backend_info(), "SQLite");
        store.ping().await.unwrap();
    }
}
