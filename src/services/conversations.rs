// ABOUTME: Conversation resource operations: list, detail, create, partial update and delete
// ABOUTME: Validates request bodies and maps store outcomes to results the routes can render
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ConvoInsight

use convoinsight_core::constants::fields;
use convoinsight_core::errors::{AppError, AppResult};
use convoinsight_core::models::{Conversation, ConversationListItem};
use convoinsight_core::pagination::{Page, PageRequest};
use serde_json::{Map, Value};
use tracing::info;

use crate::database_plugins::{ConversationStore, InsertOutcome, UpdateOutcome};
use crate::query::ConversationQuery;

/// Page of conversation summaries matching `query`, newest first
///
/// # Errors
///
/// Returns an error if the store query fails
pub async fn list_conversations(
    store: &dyn ConversationStore,
    query: &ConversationQuery,
    page: PageRequest,
) -> AppResult<Page<ConversationListItem>> {
    let filter = query.to_filter();
    let total = store
        .count(&filter)
        .await
        .map_err(|e| e.context("Failed to count conversations"))?;
    let documents = store
        .find(&filter, Some(page))
        .await
        .map_err(|e| e.context("Failed to list conversations"))?;

    let items = documents
        .iter()
        .map(|document| ConversationListItem::from(&Conversation::from_document(document)))
        .collect();

    Ok(Page {
        items,
        pagination: page.pagination(total),
    })
}

/// The stored document with this id, verbatim
///
/// # Errors
///
/// Returns not-found if no conversation has this id, or a store error
pub async fn get_conversation(store: &dyn ConversationStore, id: &str) -> AppResult<Value> {
    store
        .find_by_id(id)
        .await
        .map_err(|e| e.context("Failed to load conversation"))?
        .ok_or_else(|| AppError::not_found(format!("Conversation {id}")))
}

/// Check a create body and return the conversation id it carries
///
/// # Errors
///
/// Returns a validation error if the body is not a non-empty object, lacks a
/// required field, or carries an `id` that is not a non-empty string
pub fn validate_new_conversation(body: &Value) -> AppResult<&str> {
    let object = non_empty_object(body)?;

    if let Some(missing) = fields::REQUIRED_ON_CREATE
        .iter()
        .find(|field| !object.contains_key(**field))
    {
        return Err(AppError::missing_field(missing));
    }

    object
        .get(fields::ID)
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::invalid_input("Field id must be a non-empty string"))
}

/// Store a new conversation, rejecting duplicate ids
///
/// # Errors
///
/// Returns a validation error for a bad body, already-exists for a taken id,
/// or a store error
pub async fn create_conversation(store: &dyn ConversationStore, body: &Value) -> AppResult<String> {
    let id = validate_new_conversation(body)?;

    match store
        .insert_if_absent(id, body)
        .await
        .map_err(|e| e.context("Failed to create conversation"))?
    {
        InsertOutcome::Inserted => {
            info!(conversation_id = %id, "Conversation created");
            Ok(id.to_owned())
        }
        InsertOutcome::AlreadyExists => Err(AppError::already_exists(format!("Conversation {id}"))),
    }
}

/// Check an update body against the path id and return its fields
///
/// # Errors
///
/// Returns a validation error if the body is not a non-empty object or tries
/// to change the id
pub fn validate_patch<'a>(id: &str, body: &'a Value) -> AppResult<&'a Map<String, Value>> {
    let object = non_empty_object(body)?;
    match object.get(fields::ID) {
        Some(Value::String(body_id)) if body_id == id => Ok(object),
        Some(_) => Err(AppError::immutable_field(fields::ID)),
        None => Ok(object),
    }
}

/// Replace the supplied top-level fields of a conversation
///
/// Returns whether any stored value changed.
///
/// # Errors
///
/// Returns a validation error for a bad body, not-found for an unknown id,
/// or a store error
pub async fn update_conversation(
    store: &dyn ConversationStore,
    id: &str,
    body: &Value,
) -> AppResult<bool> {
    let patch = validate_patch(id, body)?;

    match store
        .update_fields(id, patch)
        .await
        .map_err(|e| e.context("Failed to update conversation"))?
    {
        UpdateOutcome::NotFound => Err(AppError::not_found(format!("Conversation {id}"))),
        UpdateOutcome::Updated => {
            info!(conversation_id = %id, "Conversation updated");
            Ok(true)
        }
        UpdateOutcome::Unchanged => Ok(false),
    }
}

/// Remove a conversation
///
/// # Errors
///
/// Returns not-found if no conversation has this id, or a store error
pub async fn delete_conversation(store: &dyn ConversationStore, id: &str) -> AppResult<()> {
    let deleted = store
        .delete(id)
        .await
        .map_err(|e| e.context("Failed to delete conversation"))?;
    if deleted {
        info!(conversation_id = %id, "Conversation deleted");
        Ok(())
    } else {
        Err(AppError::not_found(format!("Conversation {id}")))
    }
}

fn non_empty_object(body: &Value) -> AppResult<&Map<String, Value>> {
    match body {
        Value::Object(object) if !object.is_empty() => Ok(object),
        Value::Object(_) | Value::Null => Err(AppError::invalid_input("Request body is empty")),
        _ => Err(AppError::invalid_input("Request body must be a JSON object")),
    }
}
