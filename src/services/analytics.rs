// ABOUTME: Collection-wide analytics: global statistics, dashboard and tag breakdowns
// ABOUTME: Fetches documents and counts from the store and hands them to the analytics reducers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ConvoInsight

use convoinsight_core::errors::AppResult;
use convoinsight_core::models::Conversation;
use serde::Serialize;
use tracing::debug;

use crate::analytics::{
    co_occurrence, resolution_rates_by_tag, ConversationMetrics, Dashboard, Overview,
    RankedHotWord, RankedTag, TagPair, TagResolutionRate,
};
use crate::database_plugins::{ConversationStore, Field, Filter};

/// Conversations per resolution status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    /// Status text
    pub status: String,
    /// Conversations with it
    pub count: u64,
}

/// Conversations per agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentCount {
    /// Agent
    pub agent: String,
    /// Conversations handled
    pub count: u64,
}

/// The `GET /statistics` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Collection size
    pub total_conversations: u64,
    /// Count per status
    pub status_statistics: Vec<StatusCount>,
    /// Count per agent
    pub agent_statistics: Vec<AgentCount>,
}

/// All conversations read through the defaulting view
pub(crate) async fn load_all(store: &dyn ConversationStore) -> AppResult<Vec<Conversation>> {
    let documents = store
        .find(&Filter::All, None)
        .await
        .map_err(|e| e.context("Failed to load conversations"))?;
    Ok(documents.iter().map(Conversation::from_document).collect())
}

/// Collection size with per-status and per-agent counts
///
/// # Errors
///
/// Returns an error if a store query fails
pub async fn statistics(store: &dyn ConversationStore) -> AppResult<Statistics> {
    let total_conversations = store
        .count(&Filter::All)
        .await
        .map_err(|e| e.context("Failed to count conversations"))?;
    let statuses = store
        .group_count(Field::ResolutionStatus, None)
        .await
        .map_err(|e| e.context("Failed to count statuses"))?;
    let agents = store
        .group_count(Field::Agent, None)
        .await
        .map_err(|e| e.context("Failed to count agents"))?;

    Ok(Statistics {
        total_conversations,
        status_statistics: statuses
            .into_iter()
            .map(|entry| StatusCount {
                status: entry.value,
                count: entry.count,
            })
            .collect(),
        agent_statistics: agents
            .into_iter()
            .map(|entry| AgentCount {
                agent: entry.value,
                count: entry.count,
            })
            .collect(),
    })
}

/// Dashboard overview with the `top_n` most frequent tags and hot words
///
/// # Errors
///
/// Returns an error if a store query fails
pub async fn dashboard(store: &dyn ConversationStore, top_n: usize) -> AppResult<Dashboard> {
    let conversations = load_all(store).await?;
    let total = conversations.len() as u64;

    let tags = store
        .group_count(Field::Tags, Some(top_n))
        .await
        .map_err(|e| e.context("Failed to rank tags"))?;
    let hot_words = store
        .group_count(Field::HotWords, Some(top_n))
        .await
        .map_err(|e| e.context("Failed to rank hot words"))?;

    debug!(total, tags = tags.len(), hot_words = hot_words.len(), "Dashboard computed");

    Ok(Dashboard {
        overview: Overview::from_conversations(&conversations),
        conversation_metrics: ConversationMetrics::from_conversations(&conversations),
        top_tags: RankedTag::rank(tags.into_iter().map(|e| (e.value, e.count)), total),
        top_hot_words: RankedHotWord::rank(
            hot_words.into_iter().map(|e| (e.value, e.count)),
            total,
        ),
    })
}

/// Resolution breakdown per tag, most frequent tags first
///
/// With a `limit`, only the `limit` most frequent tags are reported.
///
/// # Errors
///
/// Returns an error if a store query fails
pub async fn tag_resolution_rates(
    store: &dyn ConversationStore,
    limit: Option<usize>,
) -> AppResult<Vec<TagResolutionRate>> {
    let tags: Vec<String> = store
        .group_count(Field::Tags, limit)
        .await
        .map_err(|e| e.context("Failed to rank tags"))?
        .into_iter()
        .map(|entry| entry.value)
        .collect();
    if tags.is_empty() {
        return Ok(Vec::new());
    }

    let conversations = load_all(store).await?;
    Ok(resolution_rates_by_tag(&conversations, &tags))
}

/// The `limit` most frequent tag pairs
///
/// # Errors
///
/// Returns an error if the store query fails
pub async fn tag_co_occurrence(
    store: &dyn ConversationStore,
    limit: usize,
) -> AppResult<Vec<TagPair>> {
    let conversations = load_all(store).await?;
    Ok(co_occurrence(&conversations, limit))
}
