// ABOUTME: Route handler for per-tag analysis
// ABOUTME: Resolution breakdown of one tag plus a filtered, paginated conversation listing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ConvoInsight

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use convoinsight_core::envelope::ApiResponse;
use convoinsight_core::errors::AppError;

use super::query_params;
use crate::query::ListParams;
use crate::resources::ServerResources;
use crate::services::tags;

/// Tag analytics routes
pub struct TagRoutes;

impl TagRoutes {
    /// Create all tag routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/tag/:name", get(Self::handle_tag))
            .with_state(resources)
    }

    async fn handle_tag(
        State(resources): State<Arc<ServerResources>>,
        Path(name): Path<String>,
        params: Result<Query<ListParams>, QueryRejection>,
    ) -> Result<Response, AppError> {
        let params = query_params(params)?;
        let page = params.page_request()?;
        let detail = tags::tag_detail(resources.store(), &name, &params.filters, page).await?;
        Ok(ApiResponse::ok(detail).into_response())
    }
}
