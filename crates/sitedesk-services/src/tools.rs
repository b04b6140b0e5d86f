// SPDX-FileCopyrightText: 2026 Sitedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool catalog CRUD operations.

use std::sync::Arc;

use serde_json::Value;
use tracing::error;

use sitedesk_core::entities::{NewTool, Tool, ToolPatch, ToolStatus};
use sitedesk_core::{ListPolicy, Record, SelectQuery, SitedeskError, TableStore};

use crate::record::{opt_str_field, put_opt, str_field};

const TABLE: &str = "tools";

/// Adapts a store row to a [`Tool`]. Total over any row shape.
pub fn tool_from_record(record: &Record) -> Tool {
    let status = record
        .get("status")
        .and_then(Value::as_str)
        .map(|s| s.parse().unwrap_or_else(|_| ToolStatus::Other(s.to_string())))
        .unwrap_or(ToolStatus::Available);

    Tool {
        id: str_field(record, "id"),
        name: str_field(record, "name"),
        serial: opt_str_field(record, "serial"),
        status,
        site_id: opt_str_field(record, "site_id"),
        created_at: str_field(record, "created_at"),
    }
}

/// Builds the insert record for a new tool. A `None` status is omitted
/// so the store column default (`available`) applies.
pub fn tool_insert_record(new: &NewTool) -> Record {
    let mut record = Record::new();
    record.insert("name".into(), Value::String(new.name.clone()));
    put_opt(
        &mut record,
        "serial",
        new.serial.as_ref().map(|v| Value::String(v.clone())),
    );
    put_opt(
        &mut record,
        "status",
        new.status.as_ref().map(|s| Value::String(s.to_string())),
    );
    put_opt(
        &mut record,
        "site_id",
        new.site_id.as_ref().map(|v| Value::String(v.clone())),
    );
    record
}

/// Builds the sparse patch record for a tool update.
pub fn tool_patch_record(patch: &ToolPatch) -> Record {
    let mut record = Record::new();
    put_opt(
        &mut record,
        "name",
        patch.name.as_ref().map(|v| Value::String(v.clone())),
    );
    put_opt(
        &mut record,
        "serial",
        patch.serial.to_value(|v| Value::String(v.clone())),
    );
    put_opt(
        &mut record,
        "status",
        patch.status.as_ref().map(|s| Value::String(s.to_string())),
    );
    put_opt(
        &mut record,
        "site_id",
        patch.site_id.to_value(|v| Value::String(v.clone())),
    );
    record
}

/// Data access for the tool catalog.
///
/// The only component permitted to touch the `tools` table.
pub struct ToolService {
    store: Arc<dyn TableStore>,
    list_policy: ListPolicy,
}

impl ToolService {
    /// Creates a tool service with the default fail-loud list policy.
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self {
            store,
            list_policy: ListPolicy::FailLoud,
        }
    }

    /// Overrides the list failure policy (see `ServicesConfig`).
    pub fn with_list_policy(mut self, policy: ListPolicy) -> Self {
        self.list_policy = policy;
        self
    }

    /// All tools in catalog order (name ascending).
    pub async fn list(&self) -> Result<Vec<Tool>, SitedeskError> {
        let query = SelectQuery::new().order_asc("name");
        match self.store.select(TABLE, query).await {
            Ok(rows) => Ok(rows.iter().map(tool_from_record).collect()),
            Err(e) => {
                error!(table = TABLE, operation = "list", error = %e, "failed to list tools");
                match self.list_policy {
                    ListPolicy::FailSoft => Ok(Vec::new()),
                    ListPolicy::FailLoud => Err(e),
                }
            }
        }
    }

    /// Catalogs a tool and returns the stored row as an entity.
    pub async fn create(&self, new: NewTool) -> Result<Tool, SitedeskError> {
        match self.store.insert(TABLE, tool_insert_record(&new)).await {
            Ok(row) => Ok(tool_from_record(&row)),
            Err(e) => {
                error!(table = TABLE, operation = "create", error = %e, "failed to create tool");
                Err(e)
            }
        }
    }

    /// Applies a sparse patch to one tool and returns the updated entity.
    pub async fn update(&self, id: &str, patch: ToolPatch) -> Result<Tool, SitedeskError> {
        match self.store.update(TABLE, id, tool_patch_record(&patch)).await {
            Ok(row) => Ok(tool_from_record(&row)),
            Err(e) => {
                error!(table = TABLE, operation = "update", id, error = %e, "failed to update tool");
                Err(e)
            }
        }
    }

    /// Removes a tool from the catalog.
    pub async fn delete(&self, id: &str) -> Result<(), SitedeskError> {
        if let Err(e) = self.store.delete(TABLE, id).await {
            error!(table = TABLE, operation = "delete", id, error = %e, "failed to delete tool");
            return Err(e);
        }
        Ok(())
    }
}
