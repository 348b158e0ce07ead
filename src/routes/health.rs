// ABOUTME: Health check route handler for service monitoring
// ABOUTME: Probes the document store and reports version, environment and store status
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ConvoInsight

//! Health check route
//!
//! `GET /health` answers 200 with `status: ok` while the store responds, and
//! 500 with `status: error` once it does not.

use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use convoinsight_core::constants::endpoints;
use convoinsight_core::envelope::ApiResponse;
use convoinsight_core::errors::AppError;
use serde::Serialize;
use serde_json::json;

use crate::resources::ServerResources;

/// Store section of the health payload
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseHealth {
    /// Backend name
    pub backend: &'static str,
    /// `connected`
    pub status: &'static str,
}

/// The `GET /health` payload
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// `ok`
    pub status: &'static str,
    /// Crate version
    pub version: &'static str,
    /// RFC 3339 time of the check
    pub timestamp: String,
    /// Deployment environment
    pub environment: String,
    /// Store status
    pub database: DatabaseHealth,
}

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the health check route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(endpoints::HEALTH_CHECK, get(Self::handle_health))
            .with_state(resources)
    }

    async fn handle_health(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let backend = resources.store.backend_info();
        resources.store.ping().await.map_err(|e| {
            AppError::service_unavailable(format!("Health check failed: {}", e.message)).with_data(
                json!({
                    "status": "error",
                    "database": {"backend": backend, "status": "unreachable"}
                }),
            )
        })?;

        Ok(ApiResponse::ok(HealthStatus {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
            timestamp: chrono::Utc::now().to_rfc3339(),
            environment: resources.config.environment.to_string(),
            database: DatabaseHealth {
                backend,
                status: "connected",
            },
        })
        .into_response())
    }
}
