// SPDX-FileCopyrightText: 2026 Sitedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Office to-do items.

use crate::types::Patch;

/// A to-do item.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoItem {
    pub id: String,
    pub title: String,
    pub done: bool,
    pub assignee_id: Option<String>,
    /// ISO-8601 due date.
    pub due_on: Option<String>,
    pub created_at: String,
}

/// Fields for creating a to-do. `done` is not settable at creation; the
/// store column default (false) applies.
#[derive(Debug, Clone)]
pub struct NewTodoItem {
    pub title: String,
    pub assignee_id: Option<String>,
    pub due_on: Option<String>,
}

/// Sparse update for a to-do.
#[derive(Debug, Clone, Default)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub done: Option<bool>,
    pub assignee_id: Patch<String>,
    pub due_on: Patch<String>,
}
