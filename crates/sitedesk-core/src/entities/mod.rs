// SPDX-FileCopyrightText: 2026 Sitedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The typed entity model: one module per table in the remote store.
//!
//! Each module defines three shapes. The entity itself is what reads
//! produce; `New*` is what `create` consumes (no id, no timestamps —
//! the store assigns those); `*Patch` is what `update` consumes, with
//! every field optional so untouched columns are never transmitted.

pub mod crew;
pub mod document;
pub mod message;
pub mod site;
pub mod todo;
pub mod tool;

pub use crew::{Crew, CrewPatch, NewCrew};
pub use document::{Author, Document, DocumentKind, DocumentPatch, NewDocument};
pub use message::{MessageStatus, NewUnionMessage, UnionMessage, UnionMessagePatch, Vote};
pub use site::{NewSite, Site, SitePatch, SiteStatus};
pub use todo::{NewTodoItem, TodoItem, TodoPatch};
pub use tool::{NewTool, Tool, ToolPatch, ToolStatus};
