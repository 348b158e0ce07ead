// ABOUTME: Lenient serde helpers implementing the single defaulting rule for stored documents
// ABOUTME: Absent or wrongly-typed fields read as their Default value instead of failing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ConvoInsight

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize `T`, falling back to `T::default()` when the value has the wrong shape
///
/// Combined with `#[serde(default)]` on the container this covers both absent
/// and malformed fields.
///
/// # Errors
///
/// Only fails when the underlying deserializer cannot produce a JSON value at all.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Deserialize a list of strings, dropping non-string entries
///
/// Anything other than an array reads as an empty list.
///
/// # Errors
///
/// Only fails when the underlying deserializer cannot produce a JSON value at all.
pub fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let strings = match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };
    Ok(strings)
}

/// Deserialize an optional number, treating anything non-numeric as absent
///
/// # Errors
///
/// Only fails when the underlying deserializer cannot produce a JSON value at all.
pub fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_f64())
}
