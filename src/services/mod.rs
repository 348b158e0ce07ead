// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Store-backed operations the HTTP routes and the import tool delegate to
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ConvoInsight

//! Domain service layer
//!
//! Services take the store as `&dyn ConversationStore`, return `AppResult` and
//! know nothing about HTTP. Route handlers parse requests, call one service
//! function and wrap the result in the response envelope.

/// Per-agent performance and the agent ranking
pub mod agents;
/// Statistics, dashboard and tag breakdowns
pub mod analytics;
/// Conversation list, detail, create, update and delete
pub mod conversations;
/// Bulk loading from JSON exports
pub mod import;
/// Filter options and tag ranking
pub mod metadata;
/// Per-tag resolution breakdown and listing
pub mod tags;
