// ABOUTME: Dashboard overview computation: message means, metric means and ranked value lists
// ABOUTME: Means are taken over the conversations where the field is present
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ConvoInsight

use convoinsight_core::models::{Conversation, MetricKind};
use serde::Serialize;

use super::{percentage, Mean};

/// Collection size and mean message counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Overview {
    /// Number of conversations
    #[serde(rename = "totalConversations")]
    pub total_conversations: u64,
    /// Mean `interactionAnalysis.totalMessages`
    #[serde(rename = "avg_totalMessages")]
    pub avg_total_messages: f64,
    /// Mean `interactionAnalysis.agentMessages`
    #[serde(rename = "avg_agentMessages")]
    pub avg_agent_messages: f64,
    /// Mean `interactionAnalysis.userMessages`
    #[serde(rename = "avg_userMessages")]
    pub avg_user_messages: f64,
}

impl Overview {
    /// Compute the overview of `conversations`
    #[must_use]
    pub fn from_conversations(conversations: &[Conversation]) -> Self {
        let mut total = Mean::default();
        let mut agent = Mean::default();
        let mut user = Mean::default();
        for conversation in conversations {
            let analysis = &conversation.interaction_analysis;
            total.add_present(analysis.total_messages);
            agent.add_present(analysis.agent_messages);
            user.add_present(analysis.user_messages);
        }

        Self {
            total_conversations: conversations.len() as u64,
            avg_total_messages: total.value(),
            avg_agent_messages: agent.value(),
            avg_user_messages: user.value(),
        }
    }
}

/// Mean of each quality metric
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ConversationMetrics {
    /// Mean satisfaction
    pub avg_satisfaction: f64,
    /// Mean resolution
    pub avg_resolution: f64,
    /// Mean attitude
    pub avg_attitude: f64,
    /// Mean security
    pub avg_security: f64,
    /// Mean risk
    pub avg_risk: f64,
}

impl ConversationMetrics {
    /// Compute metric means over the conversations carrying each metric
    #[must_use]
    pub fn from_conversations(conversations: &[Conversation]) -> Self {
        let mut means = [Mean::default(); MetricKind::ALL.len()];
        for conversation in conversations {
            for (mean, kind) in means.iter_mut().zip(MetricKind::ALL) {
                mean.add_present(conversation.metrics.value(kind));
            }
        }

        let [satisfaction, resolution, attitude, security, risk] = means.map(|mean| mean.value());
        Self {
            avg_satisfaction: satisfaction,
            avg_resolution: resolution,
            avg_attitude: attitude,
            avg_security: security,
            avg_risk: risk,
        }
    }
}

/// A tag and its share of all conversations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedTag {
    /// Tag
    pub tag: String,
    /// Occurrences
    pub count: u64,
    /// Share of all conversations
    pub percentage: f64,
}

/// A hot word and its share of all conversations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedHotWord {
    /// Word
    pub word: String,
    /// Occurrences
    pub count: u64,
    /// Share of all conversations
    pub percentage: f64,
}

impl RankedTag {
    /// Attach percentages of `total` to ranked `(tag, count)` pairs
    pub fn rank(counts: impl IntoIterator<Item = (String, u64)>, total: u64) -> Vec<Self> {
        counts
            .into_iter()
            .map(|(tag, count)| Self {
                tag,
                count,
                percentage: percentage(count, total),
            })
            .collect()
    }
}

impl RankedHotWord {
    /// Attach percentages of `total` to ranked `(word, count)` pairs
    pub fn rank(counts: impl IntoIterator<Item = (String, u64)>, total: u64) -> Vec<Self> {
        counts
            .into_iter()
            .map(|(word, count)| Self {
                word,
                count,
                percentage: percentage(count, total),
            })
            .collect()
    }
}

/// The `GET /dashboard` payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    /// Counts and message means
    pub overview: Overview,
    /// Metric means
    #[serde(rename = "conversationMetrics")]
    pub conversation_metrics: ConversationMetrics,
    /// Most frequent tags
    #[serde(rename = "Top_tags")]
    pub top_tags: Vec<RankedTag>,
    /// Most frequent hot words
    #[serde(rename = "Top_hotwords")]
    pub top_hot_words: Vec<RankedHotWord>,
}
