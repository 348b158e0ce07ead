// ABOUTME: Typed read view over stored conversation documents
// ABOUTME: Applies one defaulting rule to every field so readers never fail on schema drift
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ConvoInsight

//! # Conversation Models
//!
//! The store keeps each conversation as the JSON document it was submitted as.
//! Everything that reads documents goes through [`Conversation`], which maps
//! absent and wrongly-typed fields to their defaults: empty string, empty list,
//! or an absent metric value.

mod lenient;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use lenient::{lenient, lenient_number, lenient_strings};

use crate::constants::resolution::{PARTIALLY_RESOLVED, RESOLVED};

/// A stored conversation as seen by readers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Conversation {
    /// Unique identifier
    #[serde(deserialize_with = "lenient")]
    pub id: String,
    /// Sortable timestamp string
    #[serde(deserialize_with = "lenient")]
    pub time: String,
    /// Handling agent
    #[serde(deserialize_with = "lenient")]
    pub agent: String,
    /// Short title
    #[serde(deserialize_with = "lenient")]
    pub title: String,
    /// Free-form summary
    #[serde(deserialize_with = "lenient")]
    pub summary: String,
    /// Customer details
    #[serde(deserialize_with = "lenient")]
    pub customer_info: CustomerInfo,
    /// Issue, solution and resolution status
    #[serde(deserialize_with = "lenient")]
    pub conversation_summary: ConversationSummary,
    /// Quality metrics
    #[serde(deserialize_with = "lenient")]
    pub metrics: Metrics,
    /// Message counts and timings
    #[serde(deserialize_with = "lenient")]
    pub interaction_analysis: InteractionAnalysis,
    /// Topic tags
    #[serde(deserialize_with = "lenient_strings")]
    pub tags: Vec<String>,
    /// Frequent words
    #[serde(deserialize_with = "lenient_strings")]
    pub hot_words: Vec<String>,
    /// Suggested improvements for the agent
    #[serde(deserialize_with = "lenient_strings")]
    pub improvement_suggestions: Vec<String>,
    /// Emotion analysis, kept as free-form JSON
    pub emotion_summary: Option<Value>,
    /// Transcript
    #[serde(deserialize_with = "lenient")]
    pub messages: Vec<Message>,
}

impl Conversation {
    /// Read a stored document through the defaulting rule
    ///
    /// A document that is not a JSON object reads as an empty conversation.
    #[must_use]
    pub fn from_document(document: &Value) -> Self {
        Self::deserialize(document).unwrap_or_default()
    }

    /// Resolution status text, empty when absent
    #[must_use]
    pub fn status(&self) -> &str {
        &self.conversation_summary.resolution_status.status
    }

    /// Resolution bucket of this conversation
    #[must_use]
    pub fn resolution_bucket(&self) -> ResolutionBucket {
        ResolutionBucket::classify(self.status())
    }

    /// Tags with duplicates removed, order of first appearance kept
    #[must_use]
    pub fn distinct_tags(&self) -> Vec<&str> {
        let mut seen = Vec::with_capacity(self.tags.len());
        for tag in &self.tags {
            if !seen.contains(&tag.as_str()) {
                seen.push(tag.as_str());
            }
        }
        seen
    }
}

/// Customer details
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerInfo {
    /// Customer identifier
    #[serde(deserialize_with = "lenient")]
    pub user_id: String,
    /// Device the customer used
    #[serde(deserialize_with = "lenient")]
    pub device: String,
    /// Prior contact history
    pub history: Option<Value>,
}

/// Conversation summary block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversationSummary {
    /// Main issue raised by the customer
    #[serde(deserialize_with = "lenient")]
    pub main_issue: String,
    /// Main solution offered
    #[serde(deserialize_with = "lenient")]
    pub main_solution: String,
    /// Resolution outcome
    #[serde(deserialize_with = "lenient")]
    pub resolution_status: ResolutionStatus,
}

/// Resolution outcome of a conversation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolutionStatus {
    /// Status text, e.g. `已解决`
    #[serde(deserialize_with = "lenient")]
    pub status: String,
    /// Free-form explanation
    #[serde(deserialize_with = "lenient")]
    pub description: String,
}

/// Resolution class used by the analytics breakdowns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionBucket {
    /// Status `已解决`
    Resolved,
    /// Status `部分解决`
    PartiallyResolved,
    /// Any other status, including an absent one
    Unresolved,
}

impl ResolutionBucket {
    /// Classify a status string by case-insensitive exact match
    #[must_use]
    pub fn classify(status: &str) -> Self {
        let status = status.to_lowercase();
        if status == RESOLVED.to_lowercase() {
            Self::Resolved
        } else if status == PARTIALLY_RESOLVED.to_lowercase() {
            Self::PartiallyResolved
        } else {
            Self::Unresolved
        }
    }
}

/// One quality metric
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metric {
    /// Score, absent when the document does not carry one
    #[serde(deserialize_with = "lenient_number")]
    pub value: Option<f64>,
    /// Change against the previous period
    #[serde(deserialize_with = "lenient_number")]
    pub trend: Option<f64>,
    /// Display status
    #[serde(deserialize_with = "lenient")]
    pub status: String,
}

/// The quality metric block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metrics {
    /// Customer satisfaction
    #[serde(deserialize_with = "lenient")]
    pub satisfaction: Metric,
    /// Resolution quality
    #[serde(deserialize_with = "lenient")]
    pub resolution: Metric,
    /// Agent attitude
    #[serde(deserialize_with = "lenient")]
    pub attitude: Metric,
    /// Compliance and safety
    #[serde(deserialize_with = "lenient")]
    pub security: Metric,
    /// Risk
    #[serde(deserialize_with = "lenient")]
    pub risk: Metric,
}

/// Names a single quality metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    /// `metrics.satisfaction`
    Satisfaction,
    /// `metrics.resolution`
    Resolution,
    /// `metrics.attitude`
    Attitude,
    /// `metrics.security`
    Security,
    /// `metrics.risk`
    Risk,
}

impl MetricKind {
    /// Every metric, in reporting order
    pub const ALL: [Self; 5] = [
        Self::Satisfaction,
        Self::Resolution,
        Self::Attitude,
        Self::Security,
        Self::Risk,
    ];

    /// Field name inside the `metrics` block
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Satisfaction => "satisfaction",
            Self::Resolution => "resolution",
            Self::Attitude => "attitude",
            Self::Security => "security",
            Self::Risk => "risk",
        }
    }
}

impl Metrics {
    /// The metric named by `kind`
    #[must_use]
    pub const fn get(&self, kind: MetricKind) -> &Metric {
        match kind {
            MetricKind::Satisfaction => &self.satisfaction,
            MetricKind::Resolution => &self.resolution,
            MetricKind::Attitude => &self.attitude,
            MetricKind::Security => &self.security,
            MetricKind::Risk => &self.risk,
        }
    }

    /// Value of the metric named by `kind`, if present
    #[must_use]
    pub const fn value(&self, kind: MetricKind) -> Option<f64> {
        self.get(kind).value
    }
}

/// Message counts and timings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InteractionAnalysis {
    /// All messages
    #[serde(deserialize_with = "lenient_number")]
    pub total_messages: Option<f64>,
    /// Messages sent by the agent
    #[serde(deserialize_with = "lenient_number")]
    pub agent_messages: Option<f64>,
    /// Messages sent by the customer
    #[serde(deserialize_with = "lenient_number")]
    pub user_messages: Option<f64>,
    /// Image messages
    #[serde(deserialize_with = "lenient_number")]
    pub image_messages: Option<f64>,
    /// Mean agent response time
    #[serde(deserialize_with = "lenient_number")]
    pub avg_response_time: Option<f64>,
    /// Time to resolution
    #[serde(deserialize_with = "lenient_number")]
    pub resolution_time: Option<f64>,
}

/// One transcript entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Message {
    /// Message kind, e.g. `text` or `image`
    #[serde(rename = "type", deserialize_with = "lenient")]
    pub kind: String,
    /// Message body
    #[serde(deserialize_with = "lenient")]
    pub content: String,
    /// Timestamp string
    #[serde(deserialize_with = "lenient")]
    pub time: String,
    /// Sender, when recorded
    #[serde(deserialize_with = "lenient")]
    pub sender: Option<String>,
    /// Sentiment label, when recorded
    #[serde(deserialize_with = "lenient")]
    pub sentiment: Option<String>,
}

/// Row of the conversation list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationListItem {
    /// Conversation id
    pub id: String,
    /// Timestamp
    pub time: String,
    /// Handling agent
    pub agent: String,
    /// `customerInfo.userId`
    pub customer_id: String,
    /// `conversationSummary.mainIssue`
    pub main_issue: String,
    /// `conversationSummary.resolutionStatus.status`
    pub resolution_status: String,
    /// Tags
    pub tags: Vec<String>,
    /// `metrics.satisfaction.value`, 0 when absent
    pub satisfaction: f64,
}

impl From<&Conversation> for ConversationListItem {
    fn from(conversation: &Conversation) -> Self {
        Self {
            id: conversation.id.clone(),
            time: conversation.time.clone(),
            agent: conversation.agent.clone(),
            customer_id: conversation.customer_info.user_id.clone(),
            main_issue: conversation.conversation_summary.main_issue.clone(),
            resolution_status: conversation.status().to_owned(),
            tags: conversation.tags.clone(),
            satisfaction: conversation
                .metrics
                .value(MetricKind::Satisfaction)
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_document_reads_every_field() {
        let document = json!({
            "id": "c1",
            "time": "2024-01-01 10:00:00",
            "agent": "Alice",
            "customerInfo": {"userId": "u1", "device": "iOS"},
            "conversationSummary": {
                "mainIssue": "refund",
                "resolutionStatus": {"status": "已解决", "description": "done"}
            },
            "metrics": {"satisfaction": {"value": 80, "trend": 2, "status": "good"}},
            "interactionAnalysis": {"totalMessages": 12, "avgResponseTime": 30.5},
            "tags": ["billing", "urgent"],
            "hotWords": ["refund"],
            "messages": [{"type": "text", "content": "hi", "time": "10:00", "sender": "user"}]
        });

        let conversation = Conversation::from_document(&document);
        assert_eq!(conversation.id, "c1");
        assert_eq!(conversation.customer_info.user_id, "u1");
        assert_eq!(conversation.status(), "已解决");
        assert_eq!(conversation.metrics.value(MetricKind::Satisfaction), Some(80.0));
        assert_eq!(conversation.metrics.value(MetricKind::Risk), None);
        assert_eq!(conversation.interaction_analysis.total_messages, Some(12.0));
        assert_eq!(conversation.tags, vec!["billing", "urgent"]);
        assert_eq!(conversation.messages[0].kind, "text");
        assert_eq!(conversation.messages[0].sender.as_deref(), Some("user"));
    }

    #[test]
    fn test_wrong_types_read_as_defaults() {
        let document = json!({
            "id": 42,
            "agent": null,
            "customerInfo": "not an object",
            "metrics": {"satisfaction": {"value": "high"}, "attitude": {"value": 70}},
            "tags": ["billing", 3, null, "vip"],
            "hotWords": "refund",
            "messages": "none"
        });

        let conversation = Conversation::from_document(&document);
        assert_eq!(conversation.id, "");
        assert_eq!(conversation.agent, "");
        assert_eq!(conversation.customer_info, CustomerInfo::default());
        assert_eq!(conversation.metrics.value(MetricKind::Satisfaction), None);
        assert_eq!(conversation.metrics.value(MetricKind::Attitude), Some(70.0));
        assert_eq!(conversation.tags, vec!["billing", "vip"]);
        assert!(conversation.hot_words.is_empty());
        assert!(conversation.messages.is_empty());
    }

    #[test]
    fn test_non_object_document_is_empty() {
        assert_eq!(
            Conversation::from_document(&json!([1, 2, 3])),
            Conversation::default()
        );
    }

    #[test]
    fn test_resolution_classification() {
        assert_eq!(ResolutionBucket::classify("已解决"), ResolutionBucket::Resolved);
        assert_eq!(
            ResolutionBucket::classify("部分解决"),
            ResolutionBucket::PartiallyResolved
        );
        assert_eq!(ResolutionBucket::classify("未解决"), ResolutionBucket::Unresolved);
        assert_eq!(ResolutionBucket::classify(""), ResolutionBucket::Unresolved);
        assert_eq!(
            ResolutionBucket::classify("已解决并回访"),
            ResolutionBucket::Unresolved
        );
    }

    #[test]
    fn test_distinct_tags_keep_first_occurrence() {
        let conversation = Conversation::from_document(&json!({"tags": ["a", "b", "a", "c", "b"]}));
        assert_eq!(conversation.distinct_tags(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_list_item_projection_defaults() {
        let conversation = Conversation::from_document(&json!({"id": "c2", "time": "2024-02-01"}));
        let item = ConversationListItem::from(&conversation);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            json!({
                "id": "c2",
                "time": "2024-02-01",
                "agent": "",
                "customerId": "",
                "mainIssue": "",
                "resolutionStatus": "",
                "tags": [],
                "satisfaction": 0.0
            })
        );
    }
}
