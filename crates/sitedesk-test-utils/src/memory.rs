// SPDX-FileCopyrightText: 2026 Sitedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory store backend for deterministic testing.
//!
//! `MemoryStore` implements [`TableStore`] over plain `HashMap` tables,
//! enabling fast, CI-runnable service tests without a hosted store. It
//! mimics the store behaviors the services rely on: assigned ids and
//! timestamps, column defaults for omitted keys, sparse patch merging,
//! and ordered selects.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use sitedesk_core::{
    HealthStatus, Record, SelectQuery, SitedeskError, StoreBackend, TableStore,
};

/// An in-memory table store with configurable column defaults.
pub struct MemoryStore {
    tables: Arc<Mutex<HashMap<String, Vec<Record>>>>,
    defaults: HashMap<String, Vec<(String, Value)>>,
}

impl MemoryStore {
    /// Create an empty store with no column defaults.
    pub fn new() -> Self {
        Self {
            tables: Arc::new(Mutex::new(HashMap::new())),
            defaults: HashMap::new(),
        }
    }

    /// Create a store preconfigured with the column defaults of the
    /// production schema, so omitted insert keys behave as they would
    /// against the hosted store.
    pub fn with_schema_defaults() -> Self {
        Self::new()
            .with_column_default("union_messages", "status", Value::String("new".into()))
            .with_column_default("union_messages", "votes", Value::Array(vec![]))
            .with_column_default("sites", "status", Value::String("planning".into()))
            .with_column_default("tools", "status", Value::String("available".into()))
            .with_column_default("todos", "done", Value::Bool(false))
    }

    /// Register a default `value` applied to `column` when an insert into
    /// `table` omits it.
    pub fn with_column_default(
        mut self,
        table: &str,
        column: &str,
        value: Value,
    ) -> Self {
        self.defaults
            .entry(table.to_string())
            .or_default()
            .push((column.to_string(), value));
        self
    }

    /// Seed `table` with pre-built rows, bypassing insert defaults.
    pub async fn seed(&self, table: &str, rows: Vec<Record>) {
        self.tables
            .lock()
            .await
            .entry(table.to_string())
            .or_default()
            .extend(rows);
    }

    /// Snapshot of the raw rows currently held for `table`.
    pub async fn rows(&self, table: &str) -> Vec<Record> {
        self.tables
            .lock()
            .await
            .get(table)
            .cloned()
            .unwrap_or_default()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StoreBackend for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, SitedeskError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl TableStore for MemoryStore {
    async fn select(
        &self,
        table: &str,
        query: SelectQuery,
    ) -> Result<Vec<Record>, SitedeskError> {
        let tables = self.tables.lock().await;
        let mut rows: Vec<Record> = tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| {
                        query
                            .filters
                            .iter()
                            .all(|(column, value)| matches_eq(row.get(column), value))
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(order) = &query.order {
            rows.sort_by(|a, b| {
                let left = sort_key(a.get(&order.column));
                let right = sort_key(b.get(&order.column));
                if order.descending {
                    right.cmp(&left)
                } else {
                    left.cmp(&right)
                }
            });
        }

        Ok(rows)
    }

    async fn insert(&self, table: &str, record: Record) -> Result<Record, SitedeskError> {
        let mut row = record;
        if !row.contains_key("id") {
            row.insert("id".into(), Value::String(uuid::Uuid::new_v4().to_string()));
        }
        if !row.contains_key("created_at") {
            row.insert(
                "created_at".into(),
                Value::String(chrono::Utc::now().to_rfc3339()),
            );
        }
        if let Some(defaults) = self.defaults.get(table) {
            for (column, value) in defaults {
                if !row.contains_key(column) {
                    row.insert(column.clone(), value.clone());
                }
            }
        }

        self.tables
            .lock()
            .await
            .entry(table.to_string())
            .or_default()
            .push(row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        table: &str,
        id: &str,
        patch: Record,
    ) -> Result<Record, SitedeskError> {
        let mut tables = self.tables.lock().await;
        let rows = tables
            .get_mut(table)
            .ok_or_else(|| SitedeskError::EmptyResult {
                table: table.into(),
                operation: "update".into(),
            })?;

        let row = rows
            .iter_mut()
            .find(|row| matches_eq(row.get("id"), id))
            .ok_or_else(|| SitedeskError::EmptyResult {
                table: table.into(),
                operation: "update".into(),
            })?;

        // Sparse merge: only keys present in the patch are touched.
        for (key, value) in patch {
            row.insert(key, value);
        }
        Ok(row.clone())
    }

    async fn delete(&self, table: &str, id: &str) -> Result<(), SitedeskError> {
        let mut tables = self.tables.lock().await;
        if let Some(rows) = tables.get_mut(table) {
            rows.retain(|row| !matches_eq(row.get("id"), id));
        }
        Ok(())
    }
}

fn matches_eq(value: Option<&Value>, expected: &str) -> bool {
    match value {
        Some(Value::String(s)) => s == expected,
        Some(other) => other.to_string() == expected,
        None => false,
    }
}

fn sort_key(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}
