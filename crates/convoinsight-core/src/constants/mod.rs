// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for the ConvoInsight backend grouped by concern
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ConvoInsight

//! Constants module
//!
//! Constants are grouped into small domain modules rather than one flat list.

/// API endpoints
pub mod endpoints {
    /// API base path every route is nested under
    pub const API_BASE: &str = "/api";
    /// Health check endpoint (relative to the API base)
    pub const HEALTH_CHECK: &str = "/health";
}

/// Service identification for logs and health payloads
pub mod service_names {
    /// Server binary / tracing target name
    pub const CONVOINSIGHT_SERVER: &str = "convoinsight-server";
}

/// Defaults applied when configuration is absent
pub mod defaults {
    /// Database name used to derive the default store URL
    pub const DB_NAME: &str = "convoinsight";
    /// Directory holding the default SQLite file
    pub const DATA_DIR: &str = "./data";
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 5000;
    /// Default bind address
    pub const HOST: &str = "0.0.0.0";
    /// Default CORS origin list
    pub const CORS_ALLOWED_ORIGINS: &str = "*";
    /// Default overall-performance weights: satisfaction, resolution, safety, attitude
    pub const PERFORMANCE_WEIGHTS: [f64; 4] = [0.25, 0.25, 0.25, 0.25];
}

/// Environment variable names
pub mod env_config {
    /// Store connection string
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Database name
    pub const DB_NAME: &str = "DB_NAME";
    /// HTTP port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// HTTP port fallback name
    pub const PORT: &str = "PORT";
    /// Bind address
    pub const HOST: &str = "HOST";
    /// Debug flag
    pub const DEBUG: &str = "DEBUG";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
    /// Allowed CORS origins
    pub const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";
    /// Directory of static frontend assets
    pub const STATIC_DIR: &str = "STATIC_DIR";
    /// Overall-performance weights
    pub const PERFORMANCE_WEIGHTS: &str = "PERFORMANCE_WEIGHTS";
    /// Metric used in the safety slot of the performance score
    pub const SAFETY_METRIC: &str = "SAFETY_METRIC";
    /// Number of entries in dashboard top lists
    pub const DASHBOARD_TOP_N: &str = "DASHBOARD_TOP_N";
}

/// Size limits
pub mod limits {
    /// Default page number
    pub const DEFAULT_PAGE: u32 = 1;
    /// Default page size
    pub const DEFAULT_PAGE_SIZE: u32 = 10;
    /// Largest accepted page size
    pub const MAX_PAGE_SIZE: u32 = 100;
    /// Default length of top-N lists (tags, hot words, co-occurring pairs)
    pub const DEFAULT_TOP_N: usize = 20;
}

/// Resolution status vocabulary
pub mod resolution {
    /// Status text of a resolved conversation
    pub const RESOLVED: &str = "已解决";
    /// Status text of a partially resolved conversation
    pub const PARTIALLY_RESOLVED: &str = "部分解决";
}

/// Conversation document field names
pub mod fields {
    /// Unique conversation identifier
    pub const ID: &str = "id";
    /// Top-level fields a create request must carry
    pub const REQUIRED_ON_CREATE: [&str; 5] =
        ["id", "time", "agent", "customerInfo", "conversationSummary"];
}
