// ABOUTME: HTTP server assembly: router composition, middleware layers and graceful shutdown
// ABOUTME: Nests the API under /api, serves the frontend elsewhere and stops on Ctrl-C or SIGTERM
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ConvoInsight

//! # HTTP Server
//!
//! [`build_app`] produces the complete router, which is what the integration
//! tests drive with `oneshot`; [`serve`] binds it and runs until a shutdown
//! signal arrives.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::Body;
use axum::Router;
use convoinsight_core::constants::endpoints::API_BASE;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::services::{ServeDir, ServeFile};
use tracing::{error, info, warn};

use crate::middleware::{
    propagate_request_id_layer, set_request_id_layer, setup_cors, trace_layer,
};
use crate::resources::ServerResources;
use crate::routes::{
    handle_not_found, AgentRoutes, AnalyticsRoutes, ConversationRoutes, HealthRoutes,
    MetadataRoutes, TagRoutes,
};

/// Every API route, relative to `/api`, for the startup log
const ENDPOINTS: [&str; 15] = [
    "GET    /conversations",
    "GET    /conversations/{id}",
    "POST   /conversations",
    "PUT    /conversations/{id}",
    "DELETE /conversations/{id}",
    "GET    /options",
    "GET    /tags",
    "GET    /tags/resolution-rates",
    "GET    /tags/co-occurrence",
    "GET    /statistics",
    "GET    /dashboard",
    "GET    /agent/{name}",
    "GET    /agents",
    "GET    /tag/{name}",
    "GET    /health",
];

/// The API routes, without the `/api` prefix
pub fn api_routes(resources: &Arc<ServerResources>) -> Router {
    Router::new()
        .merge(ConversationRoutes::routes(Arc::clone(resources)))
        .merge(MetadataRoutes::routes(Arc::clone(resources)))
        .merge(AnalyticsRoutes::routes(Arc::clone(resources)))
        .merge(AgentRoutes::routes(Arc::clone(resources)))
        .merge(TagRoutes::routes(Arc::clone(resources)))
        .merge(HealthRoutes::routes(Arc::clone(resources)))
        .fallback(handle_not_found)
}

/// Build the complete application router with all middleware
pub fn build_app(resources: &Arc<ServerResources>) -> Router {
    let app = Router::new().nest(API_BASE, api_routes(resources));

    let app = match &resources.config.static_dir {
        Some(dir) => {
            info!("Serving frontend assets from {}", dir.display());
            let index = ServeFile::new(dir.join("index.html"));
            app.fallback_service(ServeDir::new(dir).fallback(index))
        }
        None => app.fallback(handle_not_found),
    };

    app.layer(trace_layer::<Body>())
        .layer(propagate_request_id_layer())
        .layer(set_request_id_layer())
        .layer(setup_cors(&resources.config))
}

/// Bind the configured address and serve until a shutdown signal
///
/// # Errors
///
/// Returns an error if the address is invalid, binding fails or the server
/// stops with an I/O error
pub async fn serve(resources: Arc<ServerResources>) -> Result<()> {
    let config = &resources.config;
    let addr: SocketAddr = format!("{}:{}", config.host, config.http_port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", config.host, config.http_port))?;

    let app = build_app(&resources);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("ConvoInsight API listening on http://{addr}{API_BASE}");
    for endpoint in ENDPOINTS {
        info!("  {endpoint}");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

/// Resolve on Ctrl-C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
