// SPDX-FileCopyrightText: 2026 Sitedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A store backend where every operation fails.
//!
//! Used to exercise the services' failure paths: fail-soft list policies,
//! fail-loud propagation, and the one-round-trip-per-operation guarantee
//! (the call counter would show a second attempt).

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use sitedesk_core::{
    HealthStatus, Record, SelectQuery, SitedeskError, StoreBackend, TableStore,
};

/// A [`TableStore`] whose operations always return a store error.
pub struct FailingStore {
    message: String,
    calls: AtomicUsize,
}

impl FailingStore {
    /// Create a failing store with a generic diagnostic.
    pub fn new() -> Self {
        Self::with_message("synthetic store failure")
    }

    /// Create a failing store whose errors carry `message` as diagnostic.
    pub fn with_message(message: &str) -> Self {
        Self {
            message: message.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of table operations attempted against this store.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail(&self, table: &str, operation: &str) -> SitedeskError {
        self.calls.fetch_add(1, Ordering::SeqCst);
        SitedeskError::Store {
            table: table.into(),
            operation: operation.into(),
            message: self.message.clone(),
            source: None,
        }
    }
}

impl Default for FailingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StoreBackend for FailingStore {
    fn name(&self) -> &str {
        "failing"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, SitedeskError> {
        Ok(HealthStatus::Unhealthy(self.message.clone()))
    }
}

#[async_trait]
impl TableStore for FailingStore {
    async fn select(
        &self,
        table: &str,
        _query: SelectQuery,
    ) -> Result<Vec<Record>, SitedeskError> {
        Err(self.fail(table, "select"))
    }

    async fn insert(&self, table: &str, _record: Record) -> Result<Record, SitedeskError> {
        Err(self.fail(table, "insert"))
    }

    async fn update(
        &self,
        table: &str,
        _id: &str,
        _patch: Record,
    ) -> Result<Record, SitedeskError> {
        Err(self.fail(table, "update"))
    }

    async fn delete(&self, table: &str, _id: &str) -> Result<(), SitedeskError> {
        Err(self.fail(table, "delete"))
    }
}
