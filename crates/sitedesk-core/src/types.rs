// SPDX-FileCopyrightText: 2026 Sitedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the store traits, the entity services, and config.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

/// One raw row as the remote store returns it: a flat, nullable-field
/// key-value record. Column naming is owned by the per-entity adapters.
pub type Record = serde_json::Map<String, Value>;

/// Health status reported by store backend health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Backend is fully operational.
    Healthy,
    /// Backend is operational but experiencing issues.
    Degraded(String),
    /// Backend is not operational.
    Unhealthy(String),
}

/// Failure policy for a service's `list` operation.
///
/// `FailSoft` absorbs a logged store failure into an empty result;
/// `FailLoud` propagates it. The split is inherited from the source
/// system and kept configurable per entity kind.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ListPolicy {
    FailSoft,
    FailLoud,
}

/// Sort direction and column for a select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub column: String,
    pub descending: bool,
}

/// Parameters for a single-table read.
///
/// `columns` is an optional projection string and may name an embedded
/// resource (e.g. `*, author:profiles(id,full_name)`); filters are
/// equality-only, matching what the services actually issue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectQuery {
    pub columns: Option<String>,
    pub filters: Vec<(String, String)>,
    pub order: Option<OrderBy>,
}

impl SelectQuery {
    /// A select with no projection, no filters, and no ordering.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the column projection.
    pub fn columns(mut self, columns: impl Into<String>) -> Self {
        self.columns = Some(columns.into());
        self
    }

    /// Adds an equality filter on `column`.
    pub fn eq(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((column.into(), value.into()));
        self
    }

    /// Orders results by `column` ascending.
    pub fn order_asc(mut self, column: impl Into<String>) -> Self {
        self.order = Some(OrderBy {
            column: column.into(),
            descending: false,
        });
        self
    }

    /// Orders results by `column` descending.
    pub fn order_desc(mut self, column: impl Into<String>) -> Self {
        self.order = Some(OrderBy {
            column: column.into(),
            descending: true,
        });
        self
    }
}

/// Tri-state field for sparse update patches.
///
/// `Absent` leaves the column unchanged, `Clear` writes SQL NULL, and
/// `Set` writes the value. Keeping "omit" and "explicit clear" as
/// separate states is what makes a patch sparse on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    Absent,
    Clear,
    Set(T),
}

impl<T> Patch<T> {
    /// Whether this field should be left out of the outgoing record.
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }

    /// The JSON value to transmit, or `None` to omit the key entirely.
    pub fn to_value(&self, f: impl FnOnce(&T) -> Value) -> Option<Value> {
        match self {
            Patch::Absent => None,
            Patch::Clear => Some(Value::Null),
            Patch::Set(v) => Some(f(v)),
        }
    }
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<T> From<T> for Patch<T> {
    fn from(value: T) -> Self {
        Patch::Set(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn select_query_builder_accumulates() {
        let query = SelectQuery::new()
            .columns("*")
            .eq("status", "active")
            .order_desc("created_at");
        assert_eq!(query.columns.as_deref(), Some("*"));
        assert_eq!(query.filters, vec![("status".into(), "active".into())]);
        let order = query.order.unwrap();
        assert_eq!(order.column, "created_at");
        assert!(order.descending);
    }

    #[test]
    fn patch_absent_omits_key() {
        let patch: Patch<String> = Patch::Absent;
        assert!(patch.to_value(|v| Value::String(v.clone())).is_none());
        assert!(patch.is_absent());
    }

    #[test]
    fn patch_clear_produces_json_null() {
        let patch: Patch<String> = Patch::Clear;
        assert_eq!(
            patch.to_value(|v| Value::String(v.clone())),
            Some(Value::Null)
        );
    }

    #[test]
    fn patch_set_produces_value() {
        let patch = Patch::Set("roofing".to_string());
        assert_eq!(
            patch.to_value(|v| Value::String(v.clone())),
            Some(Value::String("roofing".into()))
        );
    }

    #[test]
    fn patch_defaults_to_absent() {
        let patch: Patch<i32> = Patch::default();
        assert!(patch.is_absent());
    }

    #[test]
    fn list_policy_round_trips_kebab_case() {
        assert_eq!(ListPolicy::FailSoft.to_string(), "fail-soft");
        assert_eq!(
            ListPolicy::from_str("fail-loud").unwrap(),
            ListPolicy::FailLoud
        );
        let json = serde_json::to_string(&ListPolicy::FailSoft).unwrap();
        assert_eq!(json, "\"fail-soft\"");
    }
}
