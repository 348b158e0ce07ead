// ABOUTME: SQLite implementation of the conversation document store
// ABOUTME: Stores each conversation as JSON text and evaluates filters with SQLite JSON functions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ConvoInsight

//! `SQLite` document store
//!
//! One row per conversation: the caller-supplied `id` as primary key and the
//! document as JSON text. Filters compile to `json_extract` / `json_each`
//! expressions; `time` ordering is backed by an expression index.

use std::path::Path;
use std::str::FromStr;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use convoinsight_core::errors::{AppError, AppResult};
use convoinsight_core::pagination::PageRequest;
use serde_json::{Map, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use tracing::{debug, info, instrument};

use super::{ConversationStore, Field, Filter, InsertOutcome, UpdateOutcome, ValueCount};
use crate::logging::AppLogger;

const MAX_FILE_CONNECTIONS: u32 = 8;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// `SQLite`-backed conversation store
#[derive(Clone)]
pub struct SqliteConversationStore {
    pool: SqlitePool,
}

impl SqliteConversationStore {
    /// Connect to `database_url` and run migrations
    ///
    /// The database file and its parent directory are created when missing.
    /// In-memory databases use a single long-lived connection so every query
    /// sees the same data.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the connection fails or migrations fail
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let is_memory = database_url.contains(":memory:");
        let mut options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool_options = if is_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            ensure_parent_dir(options.get_filename()).await?;
            options = options.journal_mode(SqliteJournalMode::Wal);
            SqlitePoolOptions::new().max_connections(MAX_FILE_CONNECTIONS)
        };

        let pool = pool_options
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_with(options)
            .await
            .map_err(|e| AppError::from(e).context("Failed to connect to the document store"))?;

        let store = Self { pool };
        store.migrate().await?;
        info!("SQLite conversation store ready at {database_url}");
        Ok(store)
    }

    /// Get a reference to the connection pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn exists(&self, id: &str) -> AppResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM conversations WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(found.is_some())
    }
}

async fn ensure_parent_dir(path: &Path) -> AppResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::database(format!(
                    "Failed to create database directory {}: {e}",
                    parent.display()
                ))
                .with_source(e)
            })
        }
        _ => Ok(()),
    }
}

/// `json_extract` expression for a field; paths are static so they are inlined
/// and match the expression index on `time`
fn extract(field: Field) -> String {
    format!("json_extract(document, '{}')", field.json_path())
}

fn push_filter(builder: &mut QueryBuilder<'_, Sqlite>, filter: &Filter) {
    match filter {
        Filter::All => {
            builder.push("1 = 1");
        }
        Filter::Equals(field, value) => {
            builder
                .push(extract(*field))
                .push(" = ")
                .push_bind(value.clone());
        }
        // SQLite's lower() folds ASCII only: non-ASCII letters match case-sensitively
        Filter::ContainsText(field, text) => {
            builder
                .push("instr(lower(coalesce(")
                .push(extract(*field))
                .push(", '')), lower(")
                .push_bind(text.clone())
                .push(")) > 0");
        }
        Filter::HasElement(field, value) => {
            builder
                .push(format!(
                    "(json_type(document, '{path}') = 'array' AND \
                     EXISTS (SELECT 1 FROM json_each(document, '{path}') AS element \
                     WHERE element.type = 'text' AND element.value = ",
                    path = field.json_path()
                ))
                .push_bind(value.clone())
                .push("))");
        }
        Filter::Range { field, start, end } => {
            let bounds: Vec<(&str, &String)> = [(" >= ", start.as_ref()), (" <= ", end.as_ref())]
                .into_iter()
                .filter_map(|(op, bound)| bound.map(|b| (op, b)))
                .collect();
            if bounds.is_empty() {
                builder.push("1 = 1");
                return;
            }
            builder.push("(");
            for (i, (op, bound)) in bounds.into_iter().enumerate() {
                if i > 0 {
                    builder.push(" AND ");
                }
                builder.push(extract(*field)).push(op).push_bind(bound.clone());
            }
            builder.push(")");
        }
        Filter::And(clauses) => push_group(builder, clauses, " AND ", "1 = 1"),
        Filter::Or(clauses) => push_group(builder, clauses, " OR ", "1 = 0"),
    }
}

fn push_group(
    builder: &mut QueryBuilder<'_, Sqlite>,
    clauses: &[Filter],
    separator: &str,
    empty: &str,
) {
    if clauses.is_empty() {
        builder.push(empty);
        return;
    }
    builder.push("(");
    for (i, clause) in clauses.iter().enumerate() {
        if i > 0 {
            builder.push(separator);
        }
        push_filter(builder, clause);
    }
    builder.push(")");
}

/// `json_set(document, '$."key"', json(value), ...)` for a top-level patch
fn push_patch(
    builder: &mut QueryBuilder<'_, Sqlite>,
    fields: &Map<String, Value>,
) -> AppResult<()> {
    builder.push("json_set(document");
    for (key, value) in fields {
        builder
            .push(", ")
            .push_bind(format!("$.\"{key}\""))
            .push(", json(")
            .push_bind(serde_json::to_string(value)?)
            .push(")");
    }
    builder.push(")");
    Ok(())
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[async_trait]
impl ConversationStore for SqliteConversationStore {
    async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS conversations (
                id TEXT PRIMARY KEY NOT NULL,
                document TEXT NOT NULL CHECK (json_valid(document))
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_conversations_time \
             ON conversations (json_extract(document, '$.time'))",
        )
        .execute(&self.pool)
        .await?;

        debug!("Conversation store migrations applied");
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }

    fn backend_info(&self) -> &'static str {
        "SQLite"
    }

    #[instrument(level = "debug", skip(self))]
    async fn count(&self, filter: &Filter) -> AppResult<u64> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM conversations WHERE ");
        push_filter(&mut builder, filter);
        let total: i64 = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;
        Ok(u64::try_from(total).unwrap_or_default())
    }

    #[instrument(level = "debug", skip(self))]
    async fn find(&self, filter: &Filter, page: Option<PageRequest>) -> AppResult<Vec<Value>> {
        let mut builder = QueryBuilder::new("SELECT document FROM conversations WHERE ");
        push_filter(&mut builder, filter);
        builder.push(" ORDER BY json_extract(document, '$.time') DESC, id ASC");
        if let Some(page) = page {
            builder
                .push(" LIMIT ")
                .push_bind(to_i64(page.limit()))
                .push(" OFFSET ")
                .push_bind(to_i64(page.offset()));
        }

        let rows = builder.build().fetch_all(&self.pool).await?;
        rows.iter()
            .map(|row| -> AppResult<Value> {
                let document: String = row.try_get("document")?;
                Ok(serde_json::from_str(&document)?)
            })
            .collect()
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Value>> {
        let document: Option<String> =
            sqlx::query_scalar("SELECT document FROM conversations WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        document
            .map(|text| serde_json::from_str(&text).map_err(AppError::from))
            .transpose()
    }

    async fn insert_if_absent(&self, id: &str, document: &Value) -> AppResult<InsertOutcome> {
        let started = Instant::now();
        let result = sqlx::query(
            "INSERT INTO conversations (id, document) VALUES (?, json(?)) \
             ON CONFLICT(id) DO NOTHING",
        )
        .bind(id)
        .bind(serde_json::to_string(document)?)
        .execute(&self.pool)
        .await?;

        let outcome = if result.rows_affected() == 0 {
            InsertOutcome::AlreadyExists
        } else {
            InsertOutcome::Inserted
        };
        AppLogger::log_database_operation(
            "insert",
            id,
            &format!("{outcome:?}"),
            elapsed_ms(started),
        );
        Ok(outcome)
    }

    async fn update_fields(
        &self,
        id: &str,
        fields: &Map<String, Value>,
    ) -> AppResult<UpdateOutcome> {
        if let Some(key) = fields.keys().find(|key| key.contains('"')) {
            return Err(AppError::invalid_input(format!(
                "Field name {key:?} contains a double quote"
            )));
        }

        let started = Instant::now();
        let rows_affected = if fields.is_empty() {
            0
        } else {
            let mut builder = QueryBuilder::new("UPDATE conversations SET document = ");
            push_patch(&mut builder, fields)?;
            builder.push(" WHERE id = ").push_bind(id.to_owned());
            builder.push(" AND document IS NOT ");
            push_patch(&mut builder, fields)?;
            builder.build().execute(&self.pool).await?.rows_affected()
        };

        let outcome = if rows_affected > 0 {
            UpdateOutcome::Updated
        } else if self.exists(id).await? {
            UpdateOutcome::Unchanged
        } else {
            UpdateOutcome::NotFound
        };
        AppLogger::log_database_operation(
            "update",
            id,
            &format!("{outcome:?}"),
            elapsed_ms(started),
        );
        Ok(outcome)
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let started = Instant::now();
        let deleted = sqlx::query("DELETE FROM conversations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected()
            > 0;
        AppLogger::log_database_operation(
            "delete",
            id,
            if deleted { "Deleted" } else { "NotFound" },
            elapsed_ms(started),
        );
        Ok(deleted)
    }

    async fn distinct(&self, field: Field) -> AppResult<Vec<String>> {
        let path = field.json_path();
        let sql = if field.is_array() {
            format!(
                "SELECT DISTINCT element.value FROM conversations, \
                 json_each(conversations.document, '{path}') AS element \
                 WHERE json_type(conversations.document, '{path}') = 'array' \
                 AND element.type = 'text' ORDER BY element.value ASC"
            )
        } else {
            format!(
                "SELECT DISTINCT json_extract(document, '{path}') AS value FROM conversations \
                 WHERE json_type(document, '{path}') = 'text' ORDER BY value ASC"
            )
        };

        Ok(sqlx::query_scalar::<_, String>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn group_count(&self, field: Field, limit: Option<usize>) -> AppResult<Vec<ValueCount>> {
        let path = field.json_path();
        let sql = if field.is_array() {
            format!(
                "SELECT element.value AS value, COUNT(DISTINCT conversations.id) AS total \
                 FROM conversations, json_each(conversations.document, '{path}') AS element \
                 WHERE json_type(conversations.document, '{path}') = 'array' \
                 AND element.type = 'text' GROUP BY element.value \
                 ORDER BY total DESC, value ASC LIMIT ?"
            )
        } else {
            format!(
                "SELECT json_extract(document, '{path}') AS value, COUNT(*) AS total \
                 FROM conversations WHERE json_type(document, '{path}') = 'text' \
                 GROUP BY value ORDER BY total DESC, value ASC LIMIT ?"
            )
        };

        // SQLite treats a negative LIMIT as unbounded
        let limit = limit.map_or(-1, |n| i64::try_from(n).unwrap_or(i64::MAX));
        let rows: Vec<(String, i64)> = sqlx::query_as(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(value, count)| ValueCount {
                value,
                count: u64::try_from(count).unwrap_or_default(),
            })
            .collect())
    }

    async fn clear(&self) -> AppResult<u64> {
        let removed = sqlx::query("DELETE FROM conversations")
            .execute(&self.pool)
            .await?
            .rows_affected();
        info!("Cleared {removed} conversations");
        Ok(removed)
    }
}
