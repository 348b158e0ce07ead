// ABOUTME: Route handlers for filter options and the tag frequency ranking
// ABOUTME: Feeds the frontend's agent, status and tag selectors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ConvoInsight

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use convoinsight_core::envelope::ApiResponse;
use convoinsight_core::errors::AppError;

use super::query_params;
use crate::query::LimitParams;
use crate::resources::ServerResources;
use crate::services::metadata;

/// Metadata routes
pub struct MetadataRoutes;

impl MetadataRoutes {
    /// Create all metadata routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/options", get(Self::handle_options))
            .route("/tags", get(Self::handle_tags))
            .with_state(resources)
    }

    async fn handle_options(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let options = metadata::filter_options(resources.store()).await?;
        Ok(ApiResponse::ok(options).into_response())
    }

    async fn handle_tags(
        State(resources): State<Arc<ServerResources>>,
        params: Result<Query<LimitParams>, QueryRejection>,
    ) -> Result<Response, AppError> {
        let limit = query_params(params)?.limit()?;
        let tags = metadata::tag_ranking(resources.store(), limit).await?;
        Ok(ApiResponse::ok(tags).into_response())
    }
}
