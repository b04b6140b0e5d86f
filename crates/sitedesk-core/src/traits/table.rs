// SPDX-FileCopyrightText: 2026 Sitedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Single-table row operations against the remote store.

use async_trait::async_trait;

use crate::error::SitedeskError;
use crate::traits::backend::StoreBackend;
use crate::types::{Record, SelectQuery};

/// The remote store contract the entity services are written against.
///
/// All four operations are unary (single table) and point-in-time: each
/// call either returns a populated result or a [`SitedeskError`], never
/// both. Timeout and transient-error retry, where a backend wants them,
/// belong inside the implementation; callers issue exactly one logical
/// operation per call.
#[async_trait]
pub trait TableStore: StoreBackend {
    /// Reads rows from `table` according to `query`.
    async fn select(
        &self,
        table: &str,
        query: SelectQuery,
    ) -> Result<Vec<Record>, SitedeskError>;

    /// Inserts `record` into `table` and returns the stored row,
    /// including store-assigned columns (id, created_at, defaults).
    async fn insert(&self, table: &str, record: Record) -> Result<Record, SitedeskError>;

    /// Applies the sparse `patch` to the row of `table` identified by
    /// `id` and returns the updated row. Keys absent from `patch` are
    /// left unchanged server-side.
    async fn update(
        &self,
        table: &str,
        id: &str,
        patch: Record,
    ) -> Result<Record, SitedeskError>;

    /// Deletes the row of `table` identified by `id`.
    async fn delete(&self, table: &str, id: &str) -> Result<(), SitedeskError>;
}
