// ABOUTME: Metadata operations feeding the frontend filter controls
// ABOUTME: Distinct agents, statuses and tags plus the tag frequency ranking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ConvoInsight

use convoinsight_core::errors::{AppError, AppResult};
use serde::Serialize;

use crate::database_plugins::{ConversationStore, Field};

/// Values offered by the list filters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    /// Distinct agents, ascending
    pub agents: Vec<String>,
    /// Distinct resolution statuses, ascending
    pub statuses: Vec<String>,
    /// Distinct tags, ascending
    pub tags: Vec<String>,
}

/// A tag and the number of times it is used
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    /// Tag
    pub tag: String,
    /// Occurrences
    pub count: u64,
}

/// Distinct agents, statuses and tags
///
/// # Errors
///
/// Returns an error if a store query fails
pub async fn filter_options(store: &dyn ConversationStore) -> AppResult<FilterOptions> {
    let failed = |e: AppError| e.context("Failed to load filter options");
    Ok(FilterOptions {
        agents: store.distinct(Field::Agent).await.map_err(failed)?,
        statuses: store.distinct(Field::ResolutionStatus).await.map_err(failed)?,
        tags: store.distinct(Field::Tags).await.map_err(failed)?,
    })
}

/// Tags ranked by frequency, ties by tag ascending
///
/// # Errors
///
/// Returns an error if the store query fails
pub async fn tag_ranking(
    store: &dyn ConversationStore,
    limit: Option<usize>,
) -> AppResult<Vec<TagCount>> {
    let counts = store
        .group_count(Field::Tags, limit)
        .await
        .map_err(|e| e.context("Failed to rank tags"))?;
    Ok(counts
        .into_iter()
        .map(|entry| TagCount {
            tag: entry.value,
            count: entry.count,
        })
        .collect())
}
