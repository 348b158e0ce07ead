// ABOUTME: Conversation documents shared by the integration tests
// ABOUTME: A small, hand-computable collection covering two agents, three tags and every status
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ConvoInsight

use serde_json::{json, Value};

/// A conversation carrying every field the analytics read
#[allow(clippy::too_many_arguments)]
pub fn conversation(
    id: &str,
    time: &str,
    agent: &str,
    user_id: &str,
    main_issue: &str,
    status: &str,
    tags: &[&str],
    metrics: [f64; 5],
) -> Value {
    let [satisfaction, resolution, attitude, security, risk] = metrics;
    json!({
        "id": id,
        "title": format!("{main_issue} ({id})"),
        "time": time,
        "agent": agent,
        "customerInfo": {"userId": user_id, "device": "iPhone", "history": "2 previous contacts"},
        "conversationSummary": {
            "mainIssue": main_issue,
            "mainSolution": "Escalated to tier two",
            "resolutionStatus": {"status": status, "description": ""}
        },
        "metrics": {
            "satisfaction": {"value": satisfaction, "trend": "up", "status": "good"},
            "resolution": {"value": resolution, "trend": "flat", "status": "good"},
            "attitude": {"value": attitude, "trend": "flat", "status": "good"},
            "security": {"value": security, "trend": "flat", "status": "good"},
            "risk": {"value": risk, "trend": "down", "status": "good"}
        },
        "tags": tags,
        "messages": [
            {"type": "user", "content": main_issue, "time": time},
            {"type": "agent", "content": "Let me check that for you", "time": time, "sender": agent}
        ]
    })
}

/// Minimal document accepted by the create endpoint
pub fn minimal(id: &str) -> Value {
    json!({
        "id": id,
        "time": "2024-02-01 08:00:00",
        "agent": "Carol",
        "customerInfo": {"userId": "u900"},
        "conversationSummary": {"mainIssue": "Password reset"}
    })
}

/// The standard collection
///
/// | id | time                | agent | status   | tags            | sat | res | att | sec | risk |
/// |----|---------------------|-------|----------|-----------------|-----|-----|-----|-----|------|
/// | c1 | 2024-01-01 09:00:00 | Alice | 已解决   | billing, urgent | 80  | 90  | 70  | 100 | 20   |
/// | c2 | 2024-01-02 10:00:00 | Alice | 部分解决 | billing         | 60  | 50  | 80  | 90  | 30   |
/// | c3 | 2024-01-03 11:00:00 | Bob   | 未解决   | login, urgent   | 40  | 20  | 60  | 80  | 50   |
/// | c4 | 2024-01-03 11:00:00 | Bob   | 已解决   |                 | no metrics or interaction data |
pub fn standard_collection() -> Vec<Value> {
    let mut c1 = conversation(
        "c1",
        "2024-01-01 09:00:00",
        "Alice",
        "u100",
        "Billing overcharge",
        "已解决",
        &["billing", "urgent"],
        [80.0, 90.0, 70.0, 100.0, 20.0],
    );
    c1["hotWords"] = json!(["refund", "invoice"]);
    c1["interactionAnalysis"] = json!({
        "totalMessages": 10, "agentMessages": 5, "userMessages": 5, "imageMessages": 0,
        "avgResponseTime": 30, "resolutionTime": 600
    });

    let mut c2 = conversation(
        "c2",
        "2024-01-02 10:00:00",
        "Alice",
        "u200",
        "Refund request",
        "部分解决",
        &["billing"],
        [60.0, 50.0, 80.0, 90.0, 30.0],
    );
    c2["hotWords"] = json!(["refund"]);
    c2["interactionAnalysis"] = json!({
        "totalMessages": 6, "agentMessages": 3, "userMessages": 3, "imageMessages": 1,
        "avgResponseTime": 60, "resolutionTime": 1200
    });

    let mut c3 = conversation(
        "c3",
        "2024-01-03 11:00:00",
        "Bob",
        "u300",
        "Cannot log in",
        "未解决",
        &["login", "urgent"],
        [40.0, 20.0, 60.0, 80.0, 50.0],
    );
    c3["hotWords"] = json!(["password"]);
    c3["interactionAnalysis"] = json!({
        "totalMessages": 8, "agentMessages": 4, "userMessages": 4, "imageMessages": 0,
        "avgResponseTime": 90, "resolutionTime": 1800
    });

    let c4 = json!({
        "id": "c4",
        "time": "2024-01-03 11:00:00",
        "agent": "Bob",
        "customerInfo": {"userId": "u400"},
        "conversationSummary": {
            "mainIssue": "Shipping delay",
            "resolutionStatus": {"status": "已解决"}
        }
    });

    vec![c1, c2, c3, c4]
}
