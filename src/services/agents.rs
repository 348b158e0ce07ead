// ABOUTME: Agent analytics: one agent's performance with a filtered conversation listing
// ABOUTME: Also ranks every agent by the weighted overall performance score
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ConvoInsight

use convoinsight_core::errors::{AppError, AppResult};
use convoinsight_core::models::{Conversation, MetricKind};
use convoinsight_core::pagination::{PageRequest, Pagination};
use serde::Serialize;
use tracing::debug;

use super::analytics::load_all;
use crate::analytics::{AgentPerformance, PerformanceScorer};
use crate::database_plugins::{ConversationStore, Field};
use crate::query::{ConversationQuery, Scope};

/// Row of an agent's conversation listing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentConversationRow {
    /// Conversation id
    pub id: String,
    /// Title
    pub title: String,
    /// Timestamp
    pub time: String,
    /// `customerInfo.userId`
    pub customer_id: String,
    /// `conversationSummary.mainIssue`
    pub main_issue: String,
    /// Resolution status text
    pub status: String,
    /// Satisfaction, 0 when absent
    pub satisfaction: f64,
    /// Resolution, 0 when absent
    pub resolution: f64,
    /// Attitude, 0 when absent
    pub attitude: f64,
    /// Security, 0 when absent
    pub security: f64,
    /// Risk, 0 when absent
    pub risk: f64,
    /// Tags
    pub tags: Vec<String>,
}

impl From<Conversation> for AgentConversationRow {
    fn from(conversation: Conversation) -> Self {
        let metric = |kind| conversation.metrics.value(kind).unwrap_or_default();
        Self {
            satisfaction: metric(MetricKind::Satisfaction),
            resolution: metric(MetricKind::Resolution),
            attitude: metric(MetricKind::Attitude),
            security: metric(MetricKind::Security),
            risk: metric(MetricKind::Risk),
            status: conversation.status().to_owned(),
            id: conversation.id,
            title: conversation.title,
            time: conversation.time,
            customer_id: conversation.customer_info.user_id,
            main_issue: conversation.conversation_summary.main_issue,
            tags: conversation.tags,
        }
    }
}

/// The `GET /agent/{name}` payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentDetail {
    /// Agent name
    pub agent: String,
    /// All conversations handled by the agent
    pub count: u64,
    /// Performance over all of those conversations
    pub performance: AgentPerformance,
    /// Filtered page of the agent's conversations
    pub conversations: Vec<AgentConversationRow>,
    /// Window of the filtered listing
    pub pagination: Pagination,
}

/// One entry of the `GET /agents` ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentSummary {
    /// Agent name
    pub agent: String,
    /// Conversations handled
    pub count: u64,
    /// Performance summary
    #[serde(flatten)]
    pub performance: AgentPerformance,
}

/// Performance of one agent plus a filtered page of their conversations
///
/// The performance block always covers every conversation of the agent;
/// `query` only narrows the listing.
///
/// # Errors
///
/// Returns not-found if no conversation carries this agent, or a store error
pub async fn agent_detail(
    store: &dyn ConversationStore,
    scorer: &PerformanceScorer,
    agent: &str,
    query: &ConversationQuery,
    page: PageRequest,
) -> AppResult<AgentDetail> {
    let scope = Scope::Agent(agent.to_owned());
    let handled: Vec<Conversation> = store
        .find(&scope.filter(), None)
        .await
        .map_err(|e| e.context("Failed to load agent conversations"))?
        .iter()
        .map(Conversation::from_document)
        .collect();
    if handled.is_empty() {
        return Err(AppError::not_found(format!("Agent {agent}")));
    }

    let filter = query.to_scoped_filter(Some(&scope));
    let total = store
        .count(&filter)
        .await
        .map_err(|e| e.context("Failed to count agent conversations"))?;
    let rows = store
        .find(&filter, Some(page))
        .await
        .map_err(|e| e.context("Failed to list agent conversations"))?
        .iter()
        .map(|document| AgentConversationRow::from(Conversation::from_document(document)))
        .collect();

    debug!(agent, handled = handled.len(), listed = total, "Agent analysis computed");

    Ok(AgentDetail {
        agent: agent.to_owned(),
        count: handled.len() as u64,
        performance: scorer.summarize(&handled),
        conversations: rows,
        pagination: page.pagination(total),
    })
}

/// Every agent's summary, best overall performance first
///
/// # Errors
///
/// Returns an error if a store query fails
pub async fn all_agents(
    store: &dyn ConversationStore,
    scorer: &PerformanceScorer,
) -> AppResult<Vec<AgentSummary>> {
    let agents = store
        .distinct(Field::Agent)
        .await
        .map_err(|e| e.context("Failed to list agents"))?;
    let conversations = load_all(store).await?;

    let mut summaries: Vec<AgentSummary> = agents
        .into_iter()
        .map(|agent| {
            let handled: Vec<Conversation> = conversations
                .iter()
                .filter(|conversation| conversation.agent == agent)
                .cloned()
                .collect();
            AgentSummary {
                count: handled.len() as u64,
                performance: scorer.summarize(&handled),
                agent,
            }
        })
        .collect();

    // stable: equal scores keep agent name order
    summaries.sort_by(|a, b| {
        b.performance
            .overall_performance
            .total_cmp(&a.performance.overall_performance)
    });
    Ok(summaries)
}
