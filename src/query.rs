// ABOUTME: Query builder translating request filter parameters into store filter expressions
// ABOUTME: Handles free-text search, exact-match clauses, tag membership, time ranges and scoping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ConvoInsight

use std::str::FromStr;

use convoinsight_core::errors::{AppError, AppResult};
use convoinsight_core::pagination::PageRequest;
use serde::Deserialize;

use crate::database_plugins::{Field, Filter};

/// Fields searched by the free-text filter
const SEARCH_FIELDS: [Field; 3] = [Field::Id, Field::CustomerId, Field::MainIssue];

/// Filter parameters accepted by the list endpoints
///
/// Every parameter is optional; empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversationQuery {
    /// Case-insensitive substring matched against id, customer id and main issue
    pub search_text: Option<String>,
    /// Exact agent name
    pub agent: Option<String>,
    /// Exact resolution status
    pub resolution_status: Option<String>,
    /// Tag the conversation must carry
    pub tag: Option<String>,
    /// Inclusive lower bound on `time`
    pub time_start: Option<String>,
    /// Inclusive upper bound on `time`
    pub time_end: Option<String>,
}

/// Clause the caller forces regardless of request parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Conversations handled by this agent
    Agent(String),
    /// Conversations carrying this tag
    Tag(String),
}

impl Scope {
    /// The filter clause for this scope
    #[must_use]
    pub fn filter(&self) -> Filter {
        match self {
            Self::Agent(agent) => Filter::Equals(Field::Agent, agent.clone()),
            Self::Tag(tag) => Filter::HasElement(Field::Tags, tag.clone()),
        }
    }
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

impl ConversationQuery {
    /// Build the store filter for these parameters
    #[must_use]
    pub fn to_filter(&self) -> Filter {
        self.to_scoped_filter(None)
    }

    /// Build the store filter, AND-ing in a forced scope clause
    #[must_use]
    pub fn to_scoped_filter(&self, scope: Option<&Scope>) -> Filter {
        let mut clauses = Vec::new();

        if let Some(scope) = scope {
            clauses.push(scope.filter());
        }

        if let Some(text) = present(self.search_text.as_ref()) {
            clauses.push(Filter::Or(
                SEARCH_FIELDS
                    .iter()
                    .map(|field| Filter::ContainsText(*field, text.to_owned()))
                    .collect(),
            ));
        }

        if let Some(agent) = present(self.agent.as_ref()) {
            clauses.push(Filter::Equals(Field::Agent, agent.to_owned()));
        }

        if let Some(status) = present(self.resolution_status.as_ref()) {
            clauses.push(Filter::Equals(Field::ResolutionStatus, status.to_owned()));
        }

        if let Some(tag) = present(self.tag.as_ref()) {
            clauses.push(Filter::HasElement(Field::Tags, tag.to_owned()));
        }

        let start = present(self.time_start.as_ref());
        let end = present(self.time_end.as_ref());
        if start.is_some() || end.is_some() {
            clauses.push(Filter::Range {
                field: Field::Time,
                start: start.map(str::to_owned),
                end: end.map(str::to_owned),
            });
        }

        Filter::and(clauses)
    }
}

/// Query string of the paginated list endpoints: page window plus filters
///
/// Numbers arrive as strings so a malformed value becomes a validation
/// message instead of a transport-level rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// 1-based page number
    pub page: Option<String>,
    /// Items per page
    pub page_size: Option<String>,
    /// Filter parameters
    #[serde(flatten)]
    pub filters: ConversationQuery,
}

impl ListParams {
    /// Normalized page request
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error when `page` or `pageSize` is not a non-negative integer
    pub fn page_request(&self) -> AppResult<PageRequest> {
        Ok(PageRequest::new(
            parse_number("page", self.page.as_deref())?,
            parse_number("pageSize", self.page_size.as_deref())?,
        ))
    }
}

/// Query string carrying an optional `limit`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LimitParams {
    /// Maximum number of entries
    pub limit: Option<String>,
}

impl LimitParams {
    /// Parsed limit
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error when `limit` is not a non-negative integer
    pub fn limit(&self) -> AppResult<Option<usize>> {
        parse_number("limit", self.limit.as_deref())
    }
}

fn parse_number<T: FromStr>(name: &str, raw: Option<&str>) -> AppResult<Option<T>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => value.parse().map(Some).map_err(|_| {
            AppError::invalid_input(format!(
                "Invalid {name} parameter '{value}': expected a non-negative integer"
            ))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_matches_everything() {
        assert_eq!(ConversationQuery::default().to_filter(), Filter::All);

        let blank = ConversationQuery {
            search_text: Some(String::new()),
            agent: Some(String::new()),
            ..ConversationQuery::default()
        };
        assert_eq!(blank.to_filter(), Filter::All);
    }

    #[test]
    fn test_search_text_is_or_across_fields() {
        let query = ConversationQuery {
            search_text: Some("refund".into()),
            ..ConversationQuery::default()
        };
        assert_eq!(
            query.to_filter(),
            Filter::Or(vec![
                Filter::ContainsText(Field::Id, "refund".into()),
                Filter::ContainsText(Field::CustomerId, "refund".into()),
                Filter::ContainsText(Field::MainIssue, "refund".into()),
            ])
        );
    }

    #[test]
    fn test_clauses_are_anded() {
        let query = ConversationQuery {
            agent: Some("Alice".into()),
            resolution_status: Some("已解决".into()),
            tag: Some("billing".into()),
            time_start: Some("2024-01-01".into()),
            ..ConversationQuery::default()
        };
        assert_eq!(
            query.to_filter(),
            Filter::And(vec![
                Filter::Equals(Field::Agent, "Alice".into()),
                Filter::Equals(Field::ResolutionStatus, "已解决".into()),
                Filter::HasElement(Field::Tags, "billing".into()),
                Filter::Range {
                    field: Field::Time,
                    start: Some("2024-01-01".into()),
                    end: None,
                },
            ])
        );
    }

    #[test]
    fn test_scope_is_forced() {
        let scope = Scope::Tag("refund".into());
        assert_eq!(
            ConversationQuery::default().to_scoped_filter(Some(&scope)),
            Filter::HasElement(Field::Tags, "refund".into())
        );

        let query = ConversationQuery {
            agent: Some("Bob".into()),
            ..ConversationQuery::default()
        };
        assert_eq!(
            query.to_scoped_filter(Some(&Scope::Agent("Alice".into()))),
            Filter::And(vec![
                Filter::Equals(Field::Agent, "Alice".into()),
                Filter::Equals(Field::Agent, "Bob".into()),
            ])
        );
    }

    #[test]
    fn test_deserializes_camel_case_params() {
        let query: ConversationQuery = serde_json::from_value(serde_json::json!({
            "searchText": "abc",
            "timeEnd": "2024-12-31"
        }))
        .unwrap();
        assert_eq!(query.search_text.as_deref(), Some("abc"));
        assert_eq!(query.time_end.as_deref(), Some("2024-12-31"));
    }

    #[test]
    fn test_list_params_parse_page_window() {
        let params: ListParams = serde_json::from_value(serde_json::json!({
            "page": "3",
            "pageSize": "500",
            "agent": "Alice"
        }))
        .unwrap();
        let page = params.page_request().unwrap();
        assert_eq!(page.page, 3);
        assert_eq!(page.page_size, 100);
        assert_eq!(params.filters.agent.as_deref(), Some("Alice"));

        let bad = ListParams {
            page: Some("two".into()),
            ..ListParams::default()
        };
        assert!(bad.page_request().is_err());
    }

    #[test]
    fn test_limit_params() {
        assert_eq!(LimitParams::default().limit().unwrap(), None);
        let params = LimitParams {
            limit: Some("5".into()),
        };
        assert_eq!(params.limit().unwrap(), Some(5));
        let params = LimitParams {
            limit: Some("-1".into()),
        };
        assert!(params.limit().is_err());
    }
}
