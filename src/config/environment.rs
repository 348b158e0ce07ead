// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, .env loading, validation and the startup summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ConvoInsight

//! Environment-based configuration management
//!
//! All settings come from process environment variables (optionally seeded
//! from a `.env` file). There is no configuration file.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use convoinsight_core::constants::{defaults, env_config, limits};
use convoinsight_core::models::MetricKind;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Environment type for logging and health reporting
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe document store location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database file
    SQLite {
        /// Path of the database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string; anything without a `sqlite:` prefix is treated as a file path
    #[must_use]
    pub fn parse_url(s: &str) -> Self {
        let path_str = s.strip_prefix("sqlite://").or_else(|| s.strip_prefix("sqlite:"));
        match path_str.unwrap_or(s) {
            ":memory:" => Self::Memory,
            path => Self::SQLite {
                path: PathBuf::from(path),
            },
        }
    }

    /// Default file location derived from the database name
    #[must_use]
    pub fn for_db_name(db_name: &str) -> Self {
        Self::SQLite {
            path: PathBuf::from(defaults::DATA_DIR).join(format!("{db_name}.db")),
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::for_db_name(defaults::DB_NAME)
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Metric placed in the safety slot of the overall performance score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SafetyMetric {
    /// `metrics.security`
    #[default]
    Security,
    /// `metrics.risk`
    Risk,
}

impl SafetyMetric {
    /// The metric this slot reads
    #[must_use]
    pub const fn metric_kind(self) -> MetricKind {
        match self {
            Self::Security => MetricKind::Security,
            Self::Risk => MetricKind::Risk,
        }
    }
}

impl FromStr for SafetyMetric {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "security" => Ok(Self::Security),
            "risk" => Ok(Self::Risk),
            other => Err(anyhow!(
                "Invalid {} value '{other}': expected 'security' or 'risk'",
                env_config::SAFETY_METRIC
            )),
        }
    }
}

impl fmt::Display for SafetyMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.metric_kind().as_str())
    }
}

/// Weights of the overall performance score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PerformanceWeights {
    /// Weight of mean satisfaction
    pub satisfaction: f64,
    /// Weight of mean resolution
    pub resolution: f64,
    /// Weight of the safety metric mean
    pub safety: f64,
    /// Weight of mean attitude
    pub attitude: f64,
}

impl PerformanceWeights {
    /// Parse `satisfaction,resolution,safety,attitude`
    ///
    /// # Errors
    ///
    /// Returns an error unless the input holds exactly four finite, non-negative numbers
    pub fn parse(s: &str) -> Result<Self> {
        let values = s
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<f64>()
                    .with_context(|| format!("Invalid performance weight '{}'", part.trim()))
            })
            .collect::<Result<Vec<_>>>()?;

        let [satisfaction, resolution, safety, attitude] = values.as_slice() else {
            bail!(
                "{} needs exactly 4 comma-separated weights, got {}",
                env_config::PERFORMANCE_WEIGHTS,
                values.len()
            );
        };

        let weights = Self {
            satisfaction: *satisfaction,
            resolution: *resolution,
            safety: *safety,
            attitude: *attitude,
        };
        weights.validate()?;
        Ok(weights)
    }

    /// Check every weight is finite and non-negative
    ///
    /// # Errors
    ///
    /// Returns an error naming the first offending weight
    pub fn validate(&self) -> Result<()> {
        for (name, weight) in [
            ("satisfaction", self.satisfaction),
            ("resolution", self.resolution),
            ("safety", self.safety),
            ("attitude", self.attitude),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                bail!("Performance weight for {name} must be a finite non-negative number, got {weight}");
            }
        }
        Ok(())
    }
}

impl Default for PerformanceWeights {
    fn default() -> Self {
        let [satisfaction, resolution, safety, attitude] = defaults::PERFORMANCE_WEIGHTS;
        Self {
            satisfaction,
            resolution,
            safety,
            attitude,
        }
    }
}

impl fmt::Display for PerformanceWeights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.satisfaction, self.resolution, self.safety, self.attitude
        )
    }
}

/// Document store configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DatabaseConfig {
    /// Store location
    pub url: DatabaseUrl,
    /// Logical database name
    pub name: String,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated origin list, or `*`
    pub allowed_origins: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: defaults::CORS_ALLOWED_ORIGINS.to_owned(),
        }
    }
}

/// Analytics tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Overall performance weights
    pub weights: PerformanceWeights,
    /// Metric used in the safety slot
    pub safety_metric: SafetyMetric,
    /// Length of the dashboard top lists
    pub dashboard_top_n: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            weights: PerformanceWeights::default(),
            safety_metric: SafetyMetric::default(),
            dashboard_top_n: limits::DEFAULT_TOP_N,
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// HTTP listen address
    pub host: String,
    /// Verbose logging
    pub debug: bool,
    /// Deployment environment
    pub environment: Environment,
    /// Document store configuration
    pub database: DatabaseConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Frontend assets served outside `/api`
    pub static_dir: Option<PathBuf>,
    /// Analytics tuning
    pub analytics: AnalyticsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: defaults::HTTP_PORT,
            host: defaults::HOST.to_owned(),
            debug: false,
            environment: Environment::default(),
            database: DatabaseConfig {
                url: DatabaseUrl::default(),
                name: defaults::DB_NAME.to_owned(),
            },
            cors: CorsConfig::default(),
            static_dir: None,
            analytics: AnalyticsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but cannot be parsed or fails validation
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {e}");
        }

        let db_name = env_var_or(env_config::DB_NAME, defaults::DB_NAME);
        let url = env::var(env_config::DATABASE_URL).map_or_else(
            |_| DatabaseUrl::for_db_name(&db_name),
            |raw| DatabaseUrl::parse_url(&raw),
        );

        let config = Self {
            http_port: http_port_from_env()?,
            host: env_var_or(env_config::HOST, defaults::HOST),
            debug: parse_bool(&env_var_or(env_config::DEBUG, "false")),
            environment: Environment::from_str_or_default(&env_var_or(
                env_config::ENVIRONMENT,
                "development",
            )),
            database: DatabaseConfig { url, name: db_name },
            cors: CorsConfig {
                allowed_origins: env_var_or(
                    env_config::CORS_ALLOWED_ORIGINS,
                    defaults::CORS_ALLOWED_ORIGINS,
                ),
            },
            static_dir: env::var(env_config::STATIC_DIR)
                .ok()
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
            analytics: AnalyticsConfig {
                weights: env::var(env_config::PERFORMANCE_WEIGHTS)
                    .map_or_else(|_| Ok(PerformanceWeights::default()), |raw| {
                        PerformanceWeights::parse(&raw)
                    })?,
                safety_metric: env::var(env_config::SAFETY_METRIC)
                    .map_or_else(|_| Ok(SafetyMetric::default()), |raw| raw.parse::<SafetyMetric>())?,
                dashboard_top_n: env_var_or(
                    env_config::DASHBOARD_TOP_N,
                    &limits::DEFAULT_TOP_N.to_string(),
                )
                .parse()
                .with_context(|| format!("Invalid {} value", env_config::DASHBOARD_TOP_N))?,
            },
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting
    pub fn validate(&self) -> Result<()> {
        self.analytics.weights.validate()?;

        if self.analytics.dashboard_top_n == 0 {
            bail!("{} must be at least 1", env_config::DASHBOARD_TOP_N);
        }

        if let Some(dir) = &self.static_dir {
            if !dir.is_dir() {
                warn!(
                    "Static directory {} does not exist; frontend assets will 404",
                    dir.display()
                );
            }
        }

        Ok(())
    }

    /// Get a summary of the configuration for logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "ConvoInsight Server Configuration:\n\
             - Listen: {}:{}\n\
             - Environment: {}\n\
             - Debug: {}\n\
             - Database: {} ({})\n\
             - CORS Origins: {}\n\
             - Static Assets: {}\n\
             - Performance Weights: {} (safety metric: {})\n\
             - Dashboard Top N: {}",
            self.host,
            self.http_port,
            self.environment,
            self.debug,
            self.database.name,
            if self.database.url.is_memory() {
                "in-memory"
            } else {
                "SQLite file"
            },
            self.cors.allowed_origins,
            self.static_dir
                .as_ref()
                .map_or_else(|| "Disabled".to_owned(), |dir| dir.display().to_string()),
            self.analytics.weights,
            self.analytics.safety_metric,
            self.analytics.dashboard_top_n,
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// `HTTP_PORT`, then `PORT`, then the default
fn http_port_from_env() -> Result<u16> {
    let raw = env::var(env_config::HTTP_PORT).or_else(|_| env::var(env_config::PORT));
    raw.map_or(Ok(defaults::HTTP_PORT), |port| {
        port.trim()
            .parse()
            .with_context(|| format!("Invalid HTTP port '{port}'"))
    })
}

fn parse_bool(s: &str) -> bool {
    matches!(s.trim().to_lowercase().as_str(), "true" | "1" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parsing() {
        assert_eq!(
            Environment::from_str_or_default("prod"),
            Environment::Production
        );
        assert_eq!(
            Environment::from_str_or_default("TEST"),
            Environment::Testing
        );
        assert_eq!(
            Environment::from_str_or_default("staging"),
            Environment::Development
        );
    }

    #[test]
    fn test_database_url_parsing() {
        let file = DatabaseUrl::parse_url("sqlite:./test.db");
        assert_eq!(file.to_connection_string(), "sqlite:./test.db");
        assert!(!file.is_memory());

        assert!(DatabaseUrl::parse_url("sqlite::memory:").is_memory());

        let bare = DatabaseUrl::parse_url("./some/path.db");
        assert_eq!(bare.to_connection_string(), "sqlite:./some/path.db");

        assert_eq!(
            DatabaseUrl::default().to_connection_string(),
            "sqlite:./data/convoinsight.db"
        );
    }

    #[test]
    fn test_performance_weights_parsing() {
        let weights = PerformanceWeights::parse("0.25, 0.25, 0.15, 0.25").unwrap();
        assert!((weights.safety - 0.15).abs() < f64::EPSILON);

        assert!(PerformanceWeights::parse("0.25,0.25,0.25").is_err());
        assert!(PerformanceWeights::parse("0.25,0.25,abc,0.25").is_err());
        assert!(PerformanceWeights::parse("0.25,0.25,-1,0.25").is_err());
        assert!(PerformanceWeights::parse("0.25,0.25,NaN,0.25").is_err());
    }

    #[test]
    fn test_safety_metric_parsing() {
        assert_eq!("Risk".parse::<SafetyMetric>().unwrap(), SafetyMetric::Risk);
        assert_eq!(
            "security".parse::<SafetyMetric>().unwrap(),
            SafetyMetric::Security
        );
        assert!("compliance".parse::<SafetyMetric>().is_err());
        assert_eq!(SafetyMetric::Risk.metric_kind(), MetricKind::Risk);
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("TRUE"));
        assert!(parse_bool("1"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool(""));
    }

    #[test]
    fn test_summary_mentions_key_settings() {
        let summary = ServerConfig::default().summary();
        assert!(summary.contains("0.0.0.0:5000"));
        assert!(summary.contains("convoinsight"));
        assert!(summary.contains("safety metric: security"));
    }
}
