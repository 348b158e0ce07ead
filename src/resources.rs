// ABOUTME: Shared server resources handed to every route handler through axum state
// ABOUTME: Holds the document store handle and the validated configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ConvoInsight

use std::sync::Arc;

use crate::analytics::PerformanceScorer;
use crate::config::environment::ServerConfig;
use crate::database_plugins::ConversationStore;

/// Resources shared by all request handlers
///
/// Created once at startup and wrapped in an `Arc`; handlers never mutate it.
#[derive(Clone)]
pub struct ServerResources {
    /// Conversation document store
    pub store: Arc<dyn ConversationStore>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Bundle a store and a configuration
    #[must_use]
    pub fn new(store: Arc<dyn ConversationStore>, config: Arc<ServerConfig>) -> Self {
        Self { store, config }
    }

    /// The store as a trait object reference
    #[must_use]
    pub fn store(&self) -> &dyn ConversationStore {
        self.store.as_ref()
    }

    /// Performance scorer built from the analytics configuration
    #[must_use]
    pub fn scorer(&self) -> PerformanceScorer {
        PerformanceScorer::new(
            self.config.analytics.weights,
            self.config.analytics.safety_metric,
        )
    }
}
