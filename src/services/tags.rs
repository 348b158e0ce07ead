// ABOUTME: Tag analytics: resolution breakdown of one tag with a filtered conversation listing
// ABOUTME: Not-found only when no conversation carries the tag at all
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ConvoInsight

use convoinsight_core::errors::{AppError, AppResult};
use convoinsight_core::models::{Conversation, MetricKind};
use convoinsight_core::pagination::{PageRequest, Pagination};
use serde::Serialize;

use crate::analytics::{ResolutionRates, ResolutionTally};
use crate::database_plugins::ConversationStore;
use crate::query::{ConversationQuery, Scope};

/// Row of a tag's conversation listing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagConversationRow {
    /// Conversation id
    pub id: String,
    /// Title
    pub title: String,
    /// Timestamp
    pub time: String,
    /// Handling agent
    pub agent: String,
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
}

impl From<Conversation> for TagConversationRow {
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
            agent: conversation.agent,
            customer_id: conversation.customer_info.user_id,
            main_issue: conversation.conversation_summary.main_issue,
        }
    }
}

/// The `GET /tag/{name}` payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagDetail {
    /// Tag
    pub tag: String,
    /// All conversations carrying the tag
    pub count: u64,
    /// Resolution breakdown over those conversations
    #[serde(flatten)]
    pub rates: ResolutionRates,
    /// Filtered page of the tag's conversations
    pub conversations: Vec<TagConversationRow>,
    /// Window of the filtered listing
    pub pagination: Pagination,
}

/// Resolution breakdown of one tag plus a filtered page of its conversations
///
/// # Errors
///
/// Returns not-found if no conversation carries this tag, or a store error
pub async fn tag_detail(
    store: &dyn ConversationStore,
    tag: &str,
    query: &ConversationQuery,
    page: PageRequest,
) -> AppResult<TagDetail> {
    let scope = Scope::Tag(tag.to_owned());
    let tally: ResolutionTally = store
        .find(&scope.filter(), None)
        .await
        .map_err(|e| e.context("Failed to load tag conversations"))?
        .iter()
        .map(|document| Conversation::from_document(document).resolution_bucket())
        .collect();
    if tally.total() == 0 {
        return Err(AppError::not_found(format!("Tag {tag}")));
    }

    let filter = query.to_scoped_filter(Some(&scope));
    let total = store
        .count(&filter)
        .await
        .map_err(|e| e.context("Failed to count tag conversations"))?;
    let rows = store
        .find(&filter, Some(page))
        .await
        .map_err(|e| e.context("Failed to list tag conversations"))?
        .iter()
        .map(|document| TagConversationRow::from(Conversation::from_document(document)))
        .collect();

    Ok(TagDetail {
        tag: tag.to_owned(),
        count: tally.total(),
        rates: tally.rates(),
        conversations: rows,
        pagination: page.pagination(total),
    })
}
