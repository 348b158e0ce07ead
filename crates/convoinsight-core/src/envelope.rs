// ABOUTME: Uniform response envelope wrapping every API result as {success, data, message}
// ABOUTME: Used by successful handlers directly and by AppError when rendering failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ConvoInsight

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Standard response wrapper for every JSON endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T = Value> {
    /// Whether the operation succeeded
    pub success: bool,
    /// Payload, or an empty object when there is nothing to return
    pub data: T,
    /// Optional human-readable message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying `data`
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    /// Successful response carrying `data` and a message
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: Some(message.into()),
        }
    }
}

impl ApiResponse<Value> {
    /// Failed response; `data` defaults to an empty object
    pub fn failure(message: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            success: false,
            data: data.unwrap_or_else(empty_data),
            message: Some(message.into()),
        }
    }
}

/// The `{}` payload used when a response has no data
#[must_use]
pub fn empty_data() -> Value {
    Value::Object(Map::new())
}

#[cfg(feature = "http-response")]
impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        axum::Json(self).into_response()
    }
}
