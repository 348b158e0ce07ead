// ABOUTME: Route handlers for collection-wide analytics
// ABOUTME: Global statistics, dashboard overview, tag resolution rates and tag co-occurrence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ConvoInsight

//! Analytics routes
//!
//! Read-only endpoints aggregating over the whole collection.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use convoinsight_core::constants::limits::DEFAULT_TOP_N;
use convoinsight_core::envelope::ApiResponse;
use convoinsight_core::errors::AppError;

use super::query_params;
use crate::query::LimitParams;
use crate::resources::ServerResources;
use crate::services::analytics;

/// Analytics routes
pub struct AnalyticsRoutes;

impl AnalyticsRoutes {
    /// Create all analytics routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/statistics", get(Self::handle_statistics))
            .route("/dashboard", get(Self::handle_dashboard))
            .route(
                "/tags/resolution-rates",
                get(Self::handle_tag_resolution_rates),
            )
            .route("/tags/co-occurrence", get(Self::handle_tag_co_occurrence))
            .with_state(resources)
    }

    async fn handle_statistics(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let statistics = analytics::statistics(resources.store()).await?;
        Ok(ApiResponse::ok(statistics).into_response())
    }

    async fn handle_dashboard(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let top_n = resources.config.analytics.dashboard_top_n;
        let dashboard = analytics::dashboard(resources.store(), top_n).await?;
        Ok(ApiResponse::ok(dashboard).into_response())
    }

    async fn handle_tag_resolution_rates(
        State(resources): State<Arc<ServerResources>>,
        params: Result<Query<LimitParams>, QueryRejection>,
    ) -> Result<Response, AppError> {
        let limit = query_params(params)?.limit()?;
        let rates = analytics::tag_resolution_rates(resources.store(), limit).await?;
        Ok(ApiResponse::ok(rates).into_response())
    }

    async fn handle_tag_co_occurrence(
        State(resources): State<Arc<ServerResources>>,
        params: Result<Query<LimitParams>, QueryRejection>,
    ) -> Result<Response, AppError> {
        let limit = query_params(params)?.limit()?.unwrap_or(DEFAULT_TOP_N);
        let pairs = analytics::tag_co_occurrence(resources.store(), limit).await?;
        Ok(ApiResponse::ok(pairs).into_response())
    }
}
