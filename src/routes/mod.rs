// ABOUTME: Route module organization for ConvoInsight HTTP endpoints
// ABOUTME: Provides route definitions by domain plus shared request parsing helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ConvoInsight

//! Route module for the ConvoInsight API
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the service layer. Every response, successful
//! or not, is the `{success, data, message}` envelope.

/// Per-agent analysis and agent ranking routes
pub mod agents;
/// Statistics, dashboard and tag breakdown routes
pub mod analytics;
/// Conversation CRUD routes
pub mod conversations;
/// Store reachability probe
pub mod health;
/// Filter options and tag ranking routes
pub mod metadata;
/// Per-tag analysis routes
pub mod tags;

pub use agents::AgentRoutes;
pub use analytics::AnalyticsRoutes;
pub use conversations::ConversationRoutes;
pub use health::HealthRoutes;
pub use metadata::MetadataRoutes;
pub use tags::TagRoutes;

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use convoinsight_core::envelope::ApiResponse;
use convoinsight_core::errors::{AppError, AppResult};
use serde_json::Value;

/// Parse a JSON request body
///
/// An empty body reads as `null` so the services can report it as a
/// validation failure; anything else that is not JSON is a format error.
///
/// # Errors
///
/// Returns an invalid-format error when the body is not valid JSON
pub fn parse_json_body(body: &Bytes) -> AppResult<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::invalid_format(format!("Malformed JSON body: {e}")))
}

/// Unwrap query parameters, turning a rejection into a validation error
///
/// # Errors
///
/// Returns an invalid-input error when the query string cannot be decoded
pub fn query_params<T>(params: Result<Query<T>, QueryRejection>) -> AppResult<T> {
    params
        .map(|Query(params)| params)
        .map_err(|rejection| AppError::invalid_input(format!("Invalid query string: {rejection}")))
}

/// Envelope 404 for unknown routes
pub async fn handle_not_found(uri: Uri) -> Response {
    tracing::debug!(path = %uri.path(), "No route matched");
    (
        StatusCode::NOT_FOUND,
        ApiResponse::failure(format!("Route {} not found", uri.path()), None),
    )
        .into_response()
}
