// ABOUTME: Tag co-occurrence counting and per-tag resolution-rate breakdowns
// ABOUTME: Reduces fetched conversations into ranked tag pairs and tag resolution percentages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ConvoInsight

use std::collections::{BTreeMap, HashMap};

use convoinsight_core::models::Conversation;
use serde::Serialize;

use super::percentage;
use super::resolution::{ResolutionRates, ResolutionTally};

/// An unordered tag pair and how many conversations carry both tags
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagPair {
    /// The two tags, lexicographically ordered
    pub tags: [String; 2],
    /// Conversations carrying both
    pub count: u64,
    /// `count` as a share of all conversations
    pub percentage: f64,
}

/// Count tag pairs across `conversations`
///
/// Tags are deduplicated per conversation, so a conversation contributes at
/// most once to each pair. Pairs are ranked by count descending then by the
/// pair itself, and the first `limit` are returned.
#[must_use]
pub fn co_occurrence(conversations: &[Conversation], limit: usize) -> Vec<TagPair> {
    let total = conversations.len() as u64;
    let mut counts: BTreeMap<(&str, &str), u64> = BTreeMap::new();

    for conversation in conversations {
        let mut tags = conversation.distinct_tags();
        if tags.len() < 2 {
            continue;
        }
        tags.sort_unstable();
        for (i, first) in tags.iter().enumerate() {
            for second in &tags[i + 1..] {
                *counts.entry((*first, *second)).or_default() += 1;
            }
        }
    }

    let mut pairs: Vec<_> = counts.into_iter().collect();
    // BTreeMap iteration already orders pairs ascending; a stable sort keeps that for ties
    pairs.sort_by(|(_, a), (_, b)| b.cmp(a));

    pairs
        .into_iter()
        .take(limit)
        .map(|((first, second), count)| TagPair {
            tags: [first.to_owned(), second.to_owned()],
            count,
            percentage: percentage(count, total),
        })
        .collect()
}

/// Resolution breakdown of the conversations carrying one tag
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagResolutionRate {
    /// The tag
    pub tag: String,
    /// Conversations carrying it
    pub count: u64,
    /// Share per resolution bucket
    #[serde(flatten)]
    pub rates: ResolutionRates,
}

impl TagResolutionRate {
    /// Build the breakdown from a tally
    #[must_use]
    pub fn new(tag: impl Into<String>, tally: &ResolutionTally) -> Self {
        Self {
            tag: tag.into(),
            count: tally.total(),
            rates: tally.rates(),
        }
    }
}

/// Resolution breakdown for each of `tags`, in the order given
///
/// One pass over `conversations`; a tag no conversation carries reports zeros.
#[must_use]
pub fn resolution_rates_by_tag(
    conversations: &[Conversation],
    tags: &[String],
) -> Vec<TagResolutionRate> {
    let mut tallies: HashMap<&str, ResolutionTally> = HashMap::new();
    for conversation in conversations {
        let bucket = conversation.resolution_bucket();
        for tag in conversation.distinct_tags() {
            tallies.entry(tag).or_default().add(bucket);
        }
    }

    tags.iter()
        .map(|tag| {
            let tally = tallies.get(tag.as_str()).copied().unwrap_or_default();
            TagResolutionRate::new(tag.as_str(), &tally)
        })
        .collect()
}
