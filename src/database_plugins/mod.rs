// ABOUTME: Document store abstraction for conversation records
// ABOUTME: Defines the ConversationStore trait, the filter expression language and write outcomes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ConvoInsight

use async_trait::async_trait;
use convoinsight_core::errors::AppResult;
use convoinsight_core::pagination::PageRequest;
use serde::Serialize;
use serde_json::{Map, Value};

pub mod factory;
pub mod sqlite;

/// A queryable location inside a conversation document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// `id`
    Id,
    /// `time`
    Time,
    /// `agent`
    Agent,
    /// `customerInfo.userId`
    CustomerId,
    /// `conversationSummary.mainIssue`
    MainIssue,
    /// `conversationSummary.resolutionStatus.status`
    ResolutionStatus,
    /// `tags` (array)
    Tags,
    /// `hotWords` (array)
    HotWords,
}

impl Field {
    /// `SQLite` JSON path of the field
    #[must_use]
    pub const fn json_path(self) -> &'static str {
        match self {
            Self::Id => "$.id",
            Self::Time => "$.time",
            Self::Agent => "$.agent",
            Self::CustomerId => "$.customerInfo.userId",
            Self::MainIssue => "$.conversationSummary.mainIssue",
            Self::ResolutionStatus => "$.conversationSummary.resolutionStatus.status",
            Self::Tags => "$.tags",
            Self::HotWords => "$.hotWords",
        }
    }

    /// Whether the field holds a list of values
    #[must_use]
    pub const fn is_array(self) -> bool {
        matches!(self, Self::Tags | Self::HotWords)
    }
}

/// Store-native filter expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Matches every document
    All,
    /// Field equals the value exactly
    Equals(Field, String),
    /// Field contains the text as a literal substring, ignoring ASCII case
    ContainsText(Field, String),
    /// Array field has the value as an element
    HasElement(Field, String),
    /// Field lies within the inclusive bounds, compared as strings
    Range {
        /// Field being bounded
        field: Field,
        /// Inclusive lower bound
        start: Option<String>,
        /// Inclusive upper bound
        end: Option<String>,
    },
    /// Every clause matches; an empty list matches everything
    And(Vec<Filter>),
    /// At least one clause matches; an empty list matches nothing
    Or(Vec<Filter>),
}

impl Filter {
    /// Combine clauses with AND, collapsing trivial cases
    #[must_use]
    pub fn and(clauses: Vec<Self>) -> Self {
        let mut clauses: Vec<Self> = clauses
            .into_iter()
            .filter(|clause| *clause != Self::All)
            .collect();
        match clauses.len() {
            0 => Self::All,
            1 => clauses.remove(0),
            _ => Self::And(clauses),
        }
    }
}

/// Result of an insert-if-absent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The document was stored
    Inserted,
    /// A document with this id already exists; nothing was written
    AlreadyExists,
}

/// Result of a conditional partial update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// At least one field changed
    Updated,
    /// The document exists and already held the supplied values
    Unchanged,
    /// No document has this id
    NotFound,
}

/// A value and the number of documents carrying it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    /// Grouped value
    pub value: String,
    /// Number of occurrences
    pub count: u64,
}

/// Core document store abstraction
///
/// Documents are returned as stored. Reads that return several documents are
/// sorted by `time` descending, ties broken by `id` ascending.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Run migrations to set up the schema
    async fn migrate(&self) -> AppResult<()>;

    /// Verify the store is reachable
    async fn ping(&self) -> AppResult<()>;

    /// Human-readable backend name
    fn backend_info(&self) -> &'static str;

    /// Number of documents matching `filter`
    async fn count(&self, filter: &Filter) -> AppResult<u64>;

    /// Documents matching `filter`, optionally restricted to one page
    async fn find(&self, filter: &Filter, page: Option<PageRequest>) -> AppResult<Vec<Value>>;

    /// The document with this id
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Value>>;

    /// Store `document` under `id` unless that id is taken, in one statement
    async fn insert_if_absent(&self, id: &str, document: &Value) -> AppResult<InsertOutcome>;

    /// Replace the given top-level fields of the document, in one conditional statement
    async fn update_fields(&self, id: &str, fields: &Map<String, Value>)
        -> AppResult<UpdateOutcome>;

    /// Delete the document; `false` when no document has this id
    async fn delete(&self, id: &str) -> AppResult<bool>;

    /// Distinct string values of `field`, ascending
    async fn distinct(&self, field: Field) -> AppResult<Vec<String>>;

    /// String values of `field` with their frequency, count descending then value ascending
    async fn group_count(&self, field: Field, limit: Option<usize>) -> AppResult<Vec<ValueCount>>;

    /// Remove every document, returning how many were removed
    async fn clear(&self) -> AppResult<u64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_and_collapses_trivial_clauses() {
        assert_eq!(Filter::and(vec![]), Filter::All);
        assert_eq!(Filter::and(vec![Filter::All, Filter::All]), Filter::All);

        let agent = Filter::Equals(Field::Agent, "Alice".into());
        assert_eq!(Filter::and(vec![Filter::All, agent.clone()]), agent);

        let tag = Filter::HasElement(Field::Tags, "billing".into());
        assert_eq!(
            Filter::and(vec![agent.clone(), tag.clone()]),
            Filter::And(vec![agent, tag])
        );
    }

    #[test]
    fn test_array_fields() {
        assert!(Field::Tags.is_array());
        assert!(Field::HotWords.is_array());
        assert!(!Field::ResolutionStatus.is_array());
        assert_eq!(
            Field::ResolutionStatus.json_path(),
            "$.conversationSummary.resolutionStatus.status"
        );
    }
}
