// ABOUTME: HTTP integration tests for agent analytics routes
// ABOUTME: Covers per-agent performance, its filtered listing and the all-agents ranking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ConvoInsight

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use std::sync::Arc;

use convoinsight_server::config::environment::{PerformanceWeights, SafetyMetric};
use convoinsight_server::server::build_app;
use helpers::axum_test::AxumTestRequest;
use helpers::fixtures::standard_collection;
use serde_json::{json, Value};

fn assert_close(actual: &Value, expected: f64) {
    let actual = actual.as_f64().unwrap_or_else(|| panic!("not a number: {actual}"));
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[tokio::test]
async fn test_agent_performance() {
    let (app, _) = common::seeded_app(&standard_collection()).await.unwrap();

    let data = AxumTestRequest::get("/api/agent/Alice").send(app).await.data();

    assert_eq!(data["agent"], "Alice");
    assert_eq!(data["count"], 2);

    let performance = &data["performance"];
    assert_close(&performance["resolved"], 50.0);
    assert_close(&performance["partially_resolved"], 50.0);
    assert_close(&performance["unresolved"], 0.0);
    assert_close(&performance["avg_satisfaction"], 70.0);
    assert_close(&performance["avg_resolution"], 70.0);
    assert_close(&performance["avg_attitude"], 75.0);
    assert_close(&performance["avg_security"], 95.0);
    assert_close(&performance["avg_risk"], 25.0);
    assert_close(&performance["overall_performance"], 77.5);
    assert_close(&performance["avg_response_time"], 45.0);
    assert_close(&performance["avg_resolution_time"], 900.0);

    assert_eq!(data["pagination"], json!({"current": 1, "pageSize": 10, "total": 2}));
    assert_eq!(
        data["conversations"][1],
        json!({
            "id": "c1",
            "title": "Billing overcharge (c1)",
            "time": "2024-01-01 09:00:00",
            "customerId": "u100",
            "mainIssue": "Billing overcharge",
            "status": "已解决",
            "satisfaction": 80.0,
            "resolution": 90.0,
            "attitude": 70.0,
            "security": 100.0,
            "risk": 20.0,
            "tags": ["billing", "urgent"]
        })
    );
}

#[tokio::test]
async fn test_agent_absent_metrics_count_as_zero() {
    let (app, _) = common::seeded_app(&standard_collection()).await.unwrap();

    let data = AxumTestRequest::get("/api/agent/Bob").send(app).await.data();
    let performance = &data["performance"];

    assert_close(&performance["avg_satisfaction"], 20.0);
    assert_close(&performance["avg_security"], 40.0);
    assert_close(&performance["overall_performance"], 25.0);
    assert_close(&performance["avg_response_time"], 45.0);
    assert_close(&performance["resolved"], 50.0);
    assert_close(&performance["unresolved"], 50.0);
}

#[tokio::test]
async fn test_agent_listing_filters_keep_full_performance() {
    let (app, _) = common::seeded_app(&standard_collection()).await.unwrap();

    let data = AxumTestRequest::get("/api/agent/Alice?tag=urgent")
        .send(app.clone())
        .await
        .data();
    assert_eq!(data["count"], 2);
    assert_close(&data["performance"]["avg_satisfaction"], 70.0);
    assert_eq!(data["pagination"]["total"], 1);
    assert_eq!(data["conversations"][0]["id"], "c1");

    let data = AxumTestRequest::get("/api/agent/Alice?searchText=nothing-matches")
        .send(app)
        .await
        .data();
    assert_eq!(data["conversations"], json!([]));
    assert_eq!(data["pagination"]["total"], 0);
}

#[tokio::test]
async fn test_unknown_agent_is_not_found() {
    let (app, _) = common::seeded_app(&standard_collection()).await.unwrap();

    let response = AxumTestRequest::get("/api/agent/Nobody").send(app).await;

    assert_eq!(response.status(), 200);
    assert!(response.failure_message().contains("Nobody"));
}

#[tokio::test]
async fn test_all_agents_ranked_by_overall_performance() {
    let (app, _) = common::seeded_app(&standard_collection()).await.unwrap();

    let data = AxumTestRequest::get("/api/agents").send(app).await.data();
    let agents = data.as_array().unwrap();

    assert_eq!(agents.len(), 2);
    assert_eq!(agents[0]["agent"], "Alice");
    assert_eq!(agents[0]["count"], 2);
    assert_close(&agents[0]["overall_performance"], 77.5);
    assert_eq!(agents[1]["agent"], "Bob");
    assert_close(&agents[1]["overall_performance"], 25.0);
}

#[tokio::test]
async fn test_risk_safety_metric_changes_the_score() {
    let store = common::create_test_store().await.unwrap();
    common::seed(store.as_ref(), &standard_collection()).await.unwrap();
    let mut config = common::test_config();
    config.analytics.safety_metric = SafetyMetric::Risk;
    config.analytics.weights = PerformanceWeights::parse("0.25,0.25,0.15,0.25").unwrap();
    let app = build_app(&common::create_test_resources(Arc::clone(&store), config));

    let data = AxumTestRequest::get("/api/agent/Alice").send(app).await.data();

    // 70 * 0.25 + 70 * 0.25 + 25 * 0.15 + 75 * 0.25
    assert_close(&data["performance"]["overall_performance"], 57.5);
}
