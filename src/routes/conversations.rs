// ABOUTME: Route handlers for the conversation resource
// ABOUTME: List with filters and pagination, detail, create, partial update and delete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ConvoInsight

//! Conversation routes
//!
//! `GET /conversations` lists summaries newest first; the other handlers
//! address a single conversation by id.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use convoinsight_core::envelope::ApiResponse;
use convoinsight_core::errors::AppError;
use serde_json::json;

use super::{parse_json_body, query_params};
use crate::query::ListParams;
use crate::resources::ServerResources;
use crate::services::conversations;

/// Conversation routes
pub struct ConversationRoutes;

impl ConversationRoutes {
    /// Create all conversation routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/conversations",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/conversations/:id",
                get(Self::handle_detail)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        params: Result<Query<ListParams>, QueryRejection>,
    ) -> Result<Response, AppError> {
        let params = query_params(params)?;
        let page = params.page_request()?;
        let result =
            conversations::list_conversations(resources.store(), &params.filters, page).await?;
        Ok(ApiResponse::ok(result).into_response())
    }

    async fn handle_detail(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let document = conversations::get_conversation(resources.store(), &id).await?;
        Ok(ApiResponse::ok(document).into_response())
    }

    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        body: Bytes,
    ) -> Result<Response, AppError> {
        let body = parse_json_body(&body)?;
        let id = conversations::create_conversation(resources.store(), &body).await?;
        Ok(ApiResponse::ok_with_message(json!({ "id": id }), "Conversation created").into_response())
    }

    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
        body: Bytes,
    ) -> Result<Response, AppError> {
        let body = parse_json_body(&body)?;
        let changed = conversations::update_conversation(resources.store(), &id, &body).await?;
        let message = if changed {
            "Conversation updated"
        } else {
            "Conversation unchanged"
        };
        Ok(ApiResponse::ok_with_message(json!({ "id": id }), message).into_response())
    }

    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        conversations::delete_conversation(resources.store(), &id).await?;
        Ok(ApiResponse::ok_with_message(json!({ "id": id }), "Conversation deleted").into_response())
    }
}
