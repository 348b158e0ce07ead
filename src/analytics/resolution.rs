// ABOUTME: Resolution-status tallies and their percentage breakdown
// ABOUTME: Buckets statuses into resolved, partially resolved and unresolved
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ConvoInsight

use convoinsight_core::models::ResolutionBucket;
use serde::Serialize;

use super::percentage;

/// Counts per resolution bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionTally {
    /// `已解决`
    pub resolved: u64,
    /// `部分解决`
    pub partially_resolved: u64,
    /// Everything else
    pub unresolved: u64,
}

impl ResolutionTally {
    /// Count one conversation
    pub fn add(&mut self, bucket: ResolutionBucket) {
        match bucket {
            ResolutionBucket::Resolved => self.resolved += 1,
            ResolutionBucket::PartiallyResolved => self.partially_resolved += 1,
            ResolutionBucket::Unresolved => self.unresolved += 1,
        }
    }

    /// Number of conversations counted
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.resolved + self.partially_resolved + self.unresolved
    }

    /// Percentage of each bucket; all zero when nothing was counted
    #[must_use]
    pub fn rates(&self) -> ResolutionRates {
        let total = self.total();
        ResolutionRates {
            resolved: percentage(self.resolved, total),
            partially_resolved: percentage(self.partially_resolved, total),
            unresolved: percentage(self.unresolved, total),
        }
    }
}

impl FromIterator<ResolutionBucket> for ResolutionTally {
    fn from_iter<I: IntoIterator<Item = ResolutionBucket>>(iter: I) -> Self {
        let mut tally = Self::default();
        for bucket in iter {
            tally.add(bucket);
        }
        tally
    }
}

/// Percentage of conversations per resolution bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ResolutionRates {
    /// Share resolved
    pub resolved: f64,
    /// Share partially resolved
    pub partially_resolved: f64,
    /// Share unresolved
    pub unresolved: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates_sum_to_hundred() {
        let tally: ResolutionTally = [
            ResolutionBucket::Resolved,
            ResolutionBucket::Unresolved,
            ResolutionBucket::PartiallyResolved,
        ]
        .into_iter()
        .collect();

        let rates = tally.rates();
        assert_eq!(tally.total(), 3);
        assert!((rates.resolved + rates.partially_resolved + rates.unresolved - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_tally_is_all_zero() {
        let rates = ResolutionTally::default().rates();
        assert_eq!(rates, ResolutionRates::default());
    }
}
