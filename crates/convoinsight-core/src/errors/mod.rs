// ABOUTME: Unified error handling with error codes, HTTP status mapping and envelope rendering
// ABOUTME: Every failure in the backend is an AppError carrying an ErrorCode and a message
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ConvoInsight

//! # Unified Error Handling System
//!
//! Failures are reported to clients inside the same `{success, data, message}`
//! envelope as successful results. The HTTP status is reserved for
//! transport-level problems: validation, not-found and store failures all
//! travel as `200` with `success = false`, a malformed request body is a
//! `400`, and only an unreachable store (the health probe) is a `500`.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes used throughout the application
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation
    /// The provided input is invalid
    InvalidInput,
    /// A required field is missing from the request
    MissingRequiredField,
    /// The request could not be parsed at all
    InvalidFormat,
    /// The request tried to change a field that is fixed after creation
    ImmutableField,

    // Resource management
    /// The requested resource was not found
    ResourceNotFound,
    /// A resource with this identifier already exists
    ResourceAlreadyExists,

    // Internal
    /// Document store operation failed
    DatabaseError,
    /// Data serialization/deserialization failed
    SerializationError,
    /// A dependency (the document store) is unreachable
    ServiceUnavailable,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            // Transport-level: the request itself is unreadable
            Self::InvalidFormat => 400,

            // Health probe failure
            Self::ServiceUnavailable => 500,

            // Everything else is reported inside the envelope
            Self::InvalidInput
            | Self::MissingRequiredField
            | Self::ImmutableField
            | Self::ResourceNotFound
            | Self::ResourceAlreadyExists
            | Self::DatabaseError
            | Self::SerializationError => 200,
        }
    }

    /// Whether the failure originates on the server side and should be logged as an error
    #[must_use]
    pub const fn is_server_error(self) -> bool {
        matches!(
            self,
            Self::DatabaseError | Self::SerializationError | Self::ServiceUnavailable
        )
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::MissingRequiredField => "A required field is missing from the request",
            Self::InvalidFormat => "The request could not be parsed",
            Self::ImmutableField => "The field cannot be changed after creation",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ResourceAlreadyExists => "A resource with this identifier already exists",
            Self::DatabaseError => "Document store operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
            Self::ServiceUnavailable => "The document store is unreachable",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message, surfaced to clients in the envelope
    pub message: String,
    /// Optional payload placed in the envelope's `data` field
    pub data: Option<serde_json::Value>,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
            source: None,
        }
    }

    /// Attach a payload for the envelope's `data` field
    #[must_use]
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Resource not found
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Missing required field
    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ErrorCode::MissingRequiredField,
            format!("Missing required field: {field}"),
        )
    }

    /// Request body or query string could not be parsed
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidFormat, message)
    }

    /// Attempt to change an immutable field
    pub fn immutable_field(field: &str) -> Self {
        Self::new(
            ErrorCode::ImmutableField,
            format!("Changing the {field} of a conversation is not allowed"),
        )
    }

    /// Resource already exists
    pub fn already_exists(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceAlreadyExists,
            format!("{} already exists", resource.into()),
        )
    }

    /// Document store error
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Document store unreachable
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Prefix the message with the operation that failed
    #[must_use]
    pub fn context(mut self, operation: &str) -> Self {
        self.message = format!("{operation}: {}", self.message);
        self
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

#[cfg(feature = "database-errors")]
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        Self::database(error.to_string()).with_source(error)
    }
}

#[cfg(feature = "http-response")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use crate::envelope::ApiResponse;

        if self.code.is_server_error() {
            tracing::error!(code = ?self.code, message = %self.message, "Request failed");
        } else {
            tracing::debug!(code = ?self.code, message = %self.message, "Request rejected");
        }

        let status = http::StatusCode::from_u16(self.http_status())
            .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR);
        let body = ApiResponse::failure(self.message, self.data);

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_errors_travel_as_ok() {
        assert_eq!(ErrorCode::ResourceNotFound.http_status(), 200);
        assert_eq!(ErrorCode::ResourceAlreadyExists.http_status(), 200);
        assert_eq!(ErrorCode::DatabaseError.http_status(), 200);
        assert_eq!(ErrorCode::InvalidFormat.http_status(), 400);
        assert_eq!(ErrorCode::ServiceUnavailable.http_status(), 500);
    }

    #[test]
    fn test_constructors_format_messages() {
        let error = AppError::not_found("Conversation c1");
        assert_eq!(error.code, ErrorCode::ResourceNotFound);
        assert_eq!(error.message, "Conversation c1 not found");

        let error = AppError::missing_field("agent");
        assert_eq!(error.message, "Missing required field: agent");

        let error = AppError::database("disk I/O error").context("Failed to list conversations");
        assert_eq!(
            error.message,
            "Failed to list conversations: disk I/O error"
        );
        assert!(error.code.is_server_error());
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::ResourceAlreadyExists).unwrap();
        assert_eq!(json, "\"RESOURCE_ALREADY_EXISTS\"");
    }

    #[cfg(feature = "database-errors")]
    #[test]
    fn test_store_outages_stay_inside_the_envelope() {
        for error in [sqlx::Error::PoolClosed, sqlx::Error::PoolTimedOut] {
            let error = AppError::from(error);
            assert_eq!(error.code, ErrorCode::DatabaseError);
            assert_eq!(error.http_status(), 200);
        }
    }

    #[test]
    fn test_serde_error_conversion() {
        let parse_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error = AppError::from(parse_error);
        assert_eq!(error.code, ErrorCode::SerializationError);
        assert!(error.source.is_some());
    }
}
