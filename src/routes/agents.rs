// ABOUTME: Route handlers for agent analytics
// ABOUTME: One agent's performance with a filtered listing, and the ranking of all agents
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
use crate::services::agents;

/// Agent analytics routes
pub struct AgentRoutes;

impl AgentRoutes {
    /// Create all agent routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/agent/:name", get(Self::handle_agent))
            .route("/agents", get(Self::handle_agents))
            .with_state(resources)
    }

    async fn handle_agent(
        State(resources): State<Arc<ServerResources>>,
        Path(name): Path<String>,
        params: Result<Query<ListParams>, QueryRejection>,
    ) -> Result<Response, AppError> {
        let params = query_params(params)?;
        let page = params.page_request()?;
        let detail = agents::agent_detail(
            resources.store(),
            &resources.scorer(),
            &name,
            &params.filters,
            page,
        )
        .await?;
        Ok(ApiResponse::ok(detail).into_response())
    }

    async fn handle_agents(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let ranking = agents::all_agents(resources.store(), &resources.scorer()).await?;
        Ok(ApiResponse::ok(ranking).into_response())
    }
}
