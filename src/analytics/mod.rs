// ABOUTME: Pure analytics over already-fetched conversations
// ABOUTME: Resolution breakdowns, metric means, weighted performance, tag co-occurrence and dashboards
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ConvoInsight

//! # Analytics
//!
//! Nothing in this module touches the store. Services fetch documents, read
//! them through [`Conversation`](convoinsight_core::models::Conversation) and
//! hand them here. Every percentage is `count / denominator * 100` and is 0
//! when the denominator is 0.

/// Dashboard overview and ranked value lists
pub mod dashboard;
/// Per-agent performance summaries and the weighted score
pub mod performance;
/// Resolution-status tallies
pub mod resolution;
/// Tag co-occurrence and per-tag resolution rates
pub mod tags;

pub use dashboard::{ConversationMetrics, Dashboard, Overview, RankedHotWord, RankedTag};
pub use performance::{AgentPerformance, PerformanceScorer};
pub use resolution::{ResolutionRates, ResolutionTally};
pub use tags::{co_occurrence, resolution_rates_by_tag, TagPair, TagResolutionRate};

/// `count / total * 100`, or 0 when `total` is 0
#[must_use]
pub fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// Running arithmetic mean
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Mean {
    sum: f64,
    samples: u64,
}

impl Mean {
    /// Add a value when present; absent values are skipped
    pub fn add_present(&mut self, value: Option<f64>) {
        if let Some(value) = value {
            self.sum += value;
            self.samples += 1;
        }
    }

    /// Add a value, counting an absent one as 0
    pub fn add_or_zero(&mut self, value: Option<f64>) {
        self.sum += value.unwrap_or_default();
        self.samples += 1;
    }

    /// The mean, or 0 with no samples
    #[must_use]
    pub fn value(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            self.sum / self.samples as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_of_zero_is_zero() {
        assert!(percentage(5, 0).abs() < f64::EPSILON);
        assert!((percentage(1, 4) - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mean_variants() {
        let mut present = Mean::default();
        let mut zeroed = Mean::default();
        for value in [Some(80.0), None, Some(60.0)] {
            present.add_present(value);
            zeroed.add_or_zero(value);
        }
        assert!((present.value() - 70.0).abs() < f64::EPSILON);
        assert!((zeroed.value() - 140.0 / 3.0).abs() < 1e-9);
        assert!(Mean::default().value().abs() < f64::EPSILON);
    }
}
