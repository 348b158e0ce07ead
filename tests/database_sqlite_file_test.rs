// ABOUTME: Integration tests for the file-backed SQLite document store
// ABOUTME: Verifies persistence across reconnects, directory creation and the write primitives
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ConvoInsight

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use convoinsight_server::database_plugins::{
    factory::create_store, Field, Filter, InsertOutcome, UpdateOutcome,
};
use helpers::fixtures::{minimal, standard_collection};
use serde_json::json;
use tempfile::TempDir;

fn database_url(dir: &TempDir) -> String {
    format!("sqlite:{}", dir.path().join("nested").join("store.db").display())
}

#[tokio::test]
async fn test_documents_survive_reconnect() {
    common::init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let url = database_url(&dir);

    {
        let store = create_store(&url).await.unwrap();
        common::seed(store.as_ref(), &standard_collection()).await.unwrap();
    }

    let store = create_store(&url).await.unwrap();
    assert!(dir.path().join("nested").join("store.db").exists());
    assert_eq!(store.count(&Filter::All).await.unwrap(), 4);
    assert_eq!(
        store.find_by_id("c2").await.unwrap().unwrap(),
        standard_collection()[1]
    );
}

#[tokio::test]
async fn test_write_primitives_on_file_store() {
    common::init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let store = create_store(&database_url(&dir)).await.unwrap();

    let document = minimal("w1");
    assert_eq!(
        store.insert_if_absent("w1", &document).await.unwrap(),
        InsertOutcome::Inserted
    );
    assert_eq!(
        store.insert_if_absent("w1", &document).await.unwrap(),
        InsertOutcome::AlreadyExists
    );

    let patch = json!({"agent": "Dana"});
    let patch = patch.as_object().unwrap();
    assert_eq!(
        store.update_fields("w1", patch).await.unwrap(),
        UpdateOutcome::Updated
    );
    assert_eq!(
        store.update_fields("w1", patch).await.unwrap(),
        UpdateOutcome::Unchanged
    );
    assert_eq!(
        store.update_fields("ghost", patch).await.unwrap(),
        UpdateOutcome::NotFound
    );
    assert_eq!(store.distinct(Field::Agent).await.unwrap(), vec!["Dana"]);

    assert!(store.delete("w1").await.unwrap());
    assert!(!store.delete("w1").await.unwrap());
    store.ping().await.unwrap();
}
