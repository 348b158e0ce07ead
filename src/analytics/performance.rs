// ABOUTME: Per-agent performance summaries and the weighted overall performance score
// ABOUTME: Averages metrics over an agent's conversations with absent values counted as zero
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ConvoInsight

use convoinsight_core::models::{Conversation, MetricKind};
use serde::Serialize;

use super::resolution::{ResolutionRates, ResolutionTally};
use super::Mean;
use crate::config::environment::{PerformanceWeights, SafetyMetric};

/// Aggregated performance of one agent
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AgentPerformance {
    /// Resolution breakdown
    #[serde(flatten)]
    pub rates: ResolutionRates,
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
    /// Weighted score
    pub overall_performance: f64,
    /// Mean `interactionAnalysis.avgResponseTime`
    pub avg_response_time: f64,
    /// Mean `interactionAnalysis.resolutionTime`
    pub avg_resolution_time: f64,
}

/// Computes agent summaries with configured weights
#[derive(Debug, Clone, Copy, Default)]
pub struct PerformanceScorer {
    weights: PerformanceWeights,
    safety_metric: SafetyMetric,
}

impl PerformanceScorer {
    /// Create a scorer
    #[must_use]
    pub const fn new(weights: PerformanceWeights, safety_metric: SafetyMetric) -> Self {
        Self {
            weights,
            safety_metric,
        }
    }

    /// Summarize the conversations of one agent
    ///
    /// Means divide by the number of conversations, absent values counting as 0.
    #[must_use]
    pub fn summarize(&self, conversations: &[Conversation]) -> AgentPerformance {
        let mut tally = ResolutionTally::default();
        let mut means = [Mean::default(); MetricKind::ALL.len()];
        let mut response_time = Mean::default();
        let mut resolution_time = Mean::default();

        for conversation in conversations {
            tally.add(conversation.resolution_bucket());
            for (mean, kind) in means.iter_mut().zip(MetricKind::ALL) {
                mean.add_or_zero(conversation.metrics.value(kind));
            }
            let timing = &conversation.interaction_analysis;
            response_time.add_or_zero(timing.avg_response_time);
            resolution_time.add_or_zero(timing.resolution_time);
        }

        let [satisfaction, resolution, attitude, security, risk] = means.map(|mean| mean.value());
        let safety = match self.safety_metric {
            SafetyMetric::Security => security,
            SafetyMetric::Risk => risk,
        };

        AgentPerformance {
            rates: tally.rates(),
            avg_satisfaction: satisfaction,
            avg_resolution: resolution,
            avg_attitude: attitude,
            avg_security: security,
            avg_risk: risk,
            overall_performance: self.overall(satisfaction, resolution, safety, attitude),
            avg_response_time: response_time.value(),
            avg_resolution_time: resolution_time.value(),
        }
    }

    /// Weighted sum of the four metric means
    #[must_use]
    pub fn overall(&self, satisfaction: f64, resolution: f64, safety: f64, attitude: f64) -> f64 {
        let w = &self.weights;
        satisfaction * w.satisfaction
            + resolution * w.resolution
            + safety * w.safety
            + attitude * w.attitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn conversations() -> Vec<Conversation> {
        [
            json!({
                "conversationSummary": {"resolutionStatus": {"status": "已解决"}},
                "metrics": {
                    "satisfaction": {"value": 80}, "resolution": {"value": 90},
                    "attitude": {"value": 70}, "security": {"value": 100}, "risk": {"value": 20}
                },
                "interactionAnalysis": {"avgResponseTime": 30, "resolutionTime": 600}
            }),
            json!({
                "conversationSummary": {"resolutionStatus": {"status": "未解决"}},
                "metrics": {"satisfaction": {"value": 40}}
            }),
        ]
        .iter()
        .map(Conversation::from_document)
        .collect()
    }

    #[test]
    fn test_absent_values_count_as_zero() {
        let performance = PerformanceScorer::default().summarize(&conversations());
        assert!((performance.avg_satisfaction - 60.0).abs() < 1e-9);
        assert!((performance.avg_resolution - 45.0).abs() < 1e-9);
        assert!((performance.avg_security - 50.0).abs() < 1e-9);
        assert!((performance.avg_response_time - 15.0).abs() < 1e-9);
        assert!((performance.avg_resolution_time - 300.0).abs() < 1e-9);
        assert!((performance.rates.resolved - 50.0).abs() < 1e-9);
        assert!((performance.rates.unresolved - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_overall_uses_configured_safety_metric() {
        let conversations = conversations();
        // satisfaction 60, resolution 45, attitude 35, security 50, risk 10
        let default = PerformanceScorer::default().summarize(&conversations);
        assert!((default.overall_performance - (60.0 + 45.0 + 50.0 + 35.0) * 0.25).abs() < 1e-9);

        let weights = PerformanceWeights::parse("0.25,0.25,0.15,0.25").unwrap();
        let risk = PerformanceScorer::new(weights, SafetyMetric::Risk).summarize(&conversations);
        let expected = 60.0 * 0.25 + 45.0 * 0.25 + 10.0 * 0.15 + 35.0 * 0.25;
        assert!((risk.overall_performance - expected).abs() < 1e-9);
    }

    #[test]
    fn test_empty_agent_is_all_zero() {
        let performance = PerformanceScorer::default().summarize(&[]);
        assert_eq!(performance, AgentPerformance::default());
    }

    #[test]
    fn test_serializes_flat_keys() {
        let json = serde_json::to_value(PerformanceScorer::default().summarize(&[])).unwrap();
        for key in [
            "resolved",
            "partially_resolved",
            "unresolved",
            "avg_satisfaction",
            "avg_security",
            "avg_risk",
            "overall_performance",
            "avg_response_time",
            "avg_resolution_time",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }
}
