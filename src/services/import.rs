// ABOUTME: Bulk loading of conversation documents from a JSON export into the store
// ABOUTME: Accepts one object or an array, skips duplicates and invalid entries, optionally clears first
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ConvoInsight

use std::path::Path;
use std::time::Instant;

use convoinsight_core::errors::{AppError, AppResult};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::conversations::validate_new_conversation;
use crate::database_plugins::{ConversationStore, InsertOutcome};
use crate::logging::AppLogger;

/// An entry that was not imported
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedEntry {
    /// Position of the entry in the input, starting at 0
    pub index: usize,
    /// Why the entry was rejected
    pub reason: String,
}

/// Outcome of an import run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Documents removed before importing, when replacing
    pub cleared: u64,
    /// Ids of the documents stored
    pub inserted: Vec<String>,
    /// Ids already present in the store or earlier in the input
    pub duplicates: Vec<String>,
    /// Entries failing validation
    pub invalid: Vec<RejectedEntry>,
}

impl ImportReport {
    /// Number of entries not stored
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.duplicates.len() + self.invalid.len()
    }
}

/// Split an export into its conversation documents
///
/// # Errors
///
/// Returns an invalid-format error unless the value is an object or an array
pub fn documents_from_value(value: Value) -> AppResult<Vec<Value>> {
    match value {
        Value::Array(documents) => Ok(documents),
        document @ Value::Object(_) => Ok(vec![document]),
        _ => Err(AppError::invalid_format(
            "Import file must hold a conversation object or an array of them",
        )),
    }
}

/// Read and parse an export file
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON object or array
pub fn read_export(path: &Path) -> AppResult<Vec<Value>> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        AppError::invalid_input(format!("Cannot read {}: {e}", path.display())).with_source(e)
    })?;
    let value: Value = serde_json::from_str(&raw).map_err(|e| {
        AppError::invalid_format(format!("{} is not valid JSON: {e}", path.display()))
    })?;
    documents_from_value(value)
}

/// Store every valid, new document; with `replace` the collection is emptied first
///
/// # Errors
///
/// Returns a store error if clearing or inserting fails; entries handled before
/// the failure stay stored
pub async fn import_documents(
    store: &dyn ConversationStore,
    source: &str,
    documents: &[Value],
    replace: bool,
) -> AppResult<ImportReport> {
    let start = Instant::now();
    let mut report = ImportReport::default();

    if replace {
        report.cleared = store
            .clear()
            .await
            .map_err(|e| e.context("Failed to clear conversations"))?;
        info!(removed = report.cleared, "Cleared conversation collection");
    }

    for (index, document) in documents.iter().enumerate() {
        let id = match validate_new_conversation(document) {
            Ok(id) => id,
            Err(e) => {
                warn!(index, "Skipping invalid entry: {}", e.message);
                report.invalid.push(RejectedEntry {
                    index,
                    reason: e.message,
                });
                continue;
            }
        };

        match store
            .insert_if_absent(id, document)
            .await
            .map_err(|e| e.context("Failed to import conversation"))?
        {
            InsertOutcome::Inserted => {
                debug!(conversation_id = %id, "Imported conversation");
                report.inserted.push(id.to_owned());
            }
            InsertOutcome::AlreadyExists => {
                warn!(conversation_id = %id, "Skipping duplicate conversation");
                report.duplicates.push(id.to_owned());
            }
        }
    }

    AppLogger::log_import_summary(source, report.inserted.len(), report.skipped(), replace);
    debug!(
        duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        "Import finished"
    );
    Ok(report)
}
