// SPDX-FileCopyrightText: 2026 Sitedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! To-do CRUD operations.

use std::sync::Arc;

use serde_json::Value;
use tracing::error;

use sitedesk_core::entities::{NewTodoItem, TodoItem, TodoPatch};
use sitedesk_core::{ListPolicy, Record, SelectQuery, SitedeskError, TableStore};

use crate::record::{bool_field, opt_str_field, put_opt, str_field};

const TABLE: &str = "todos";

/// Adapts a store row to a [`TodoItem`]. A missing or null `done` column
/// reads as false.
pub fn todo_from_record(record: &Record) -> TodoItem {
    TodoItem {
        id: str_field(record, "id"),
        title: str_field(record, "title"),
        done: bool_field(record, "done"),
        assignee_id: opt_str_field(record, "assignee_id"),
        due_on: opt_str_field(record, "due_on"),
        created_at: str_field(record, "created_at"),
    }
}

/// Builds the insert record for a new to-do. `done` is never sent; the
/// store column default (false) applies.
pub fn todo_insert_record(new: &NewTodoItem) -> Record {
    let mut record = Record::new();
    record.insert("title".into(), Value::String(new.title.clone()));
    put_opt(
        &mut record,
        "assignee_id",
        new.assignee_id.as_ref().map(|v| Value::String(v.clone())),
    );
    put_opt(
        &mut record,
        "due_on",
        new.due_on.as_ref().map(|v| Value::String(v.clone())),
    );
    record
}

/// Builds the sparse patch record for a to-do update.
pub fn todo_patch_record(patch: &TodoPatch) -> Record {
    let mut record = Record::new();
    put_opt(
        &mut record,
        "title",
        patch.title.as_ref().map(|v| Value::String(v.clone())),
    );
    put_opt(&mut record, "done", patch.done.map(Value::Bool));
    put_opt(
        &mut record,
        "assignee_id",
        patch.assignee_id.to_value(|v| Value::String(v.clone())),
    );
    put_opt(
        &mut record,
        "due_on",
        patch.due_on.to_value(|v| Value::String(v.clone())),
    );
    record
}

/// Data access for office to-dos.
///
/// The only component permitted to touch the `todos` table.
pub struct TodoService {
    store: Arc<dyn TableStore>,
    list_policy: ListPolicy,
}

impl TodoService {
    /// Creates a to-do service with the default fail-loud list policy.
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

    /// All to-dos, newest first.
    pub async fn list(&self) -> Result<Vec<TodoItem>, SitedeskError> {
        let query = SelectQuery::new().order_desc("created_at");
        match self.store.select(TABLE, query).await {
            Ok(rows) => Ok(rows.iter().map(todo_from_record).collect()),
            Err(e) => {
                error!(table = TABLE, operation = "list", error = %e, "failed to list todos");
                match self.list_policy {
                    ListPolicy::FailSoft => Ok(Vec::new()),
                    ListPolicy::FailLoud => Err(e),
                }
            }
        }
    }

    /// Creates a to-do and returns the stored row as an entity.
    pub async fn create(&self, new: NewTodoItem) -> Result<TodoItem, SitedeskError> {
        match self.store.insert(TABLE, todo_insert_record(&new)).await {
            Ok(row) => Ok(todo_from_record(&row)),
            Err(e) => {
                error!(table = TABLE, operation = "create", error = %e, "failed to create todo");
                Err(e)
            }
        }
    }

    /// Applies a sparse patch to one to-do and returns the updated entity.
    pub async fn update(&self, id: &str, patch: TodoPatch) -> Result<TodoItem, SitedeskError> {
        match self.store.update(TABLE, id, todo_patch_record(&patch)).await {
            Ok(row) => Ok(todo_from_record(&row)),
            Err(e) => {
                error!(table = TABLE, operation = "update", id, error = %e, "failed to update todo");
                Err(e)
            }
        }
    }

    /// Removes a to-do.
    pub async fn delete(&self, id: &str) -> Result<(), SitedeskError> {
        if let Err(e) = self.store.delete(TABLE, id).await {
            error!(table = TABLE, operation = "delete", id, error = %e, "failed to delete todo");
            return Err(e);
        }
        Ok(())
    }
}
