// SPDX-FileCopyrightText: 2026 Sitedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Sitedesk back office.
//!
//! This crate provides the store trait definitions, error types, common
//! types, and the entity model used throughout the Sitedesk workspace.
//! Store backends implement the traits defined here; the entity services
//! are written against them.

pub mod entities;
pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::SitedeskError;
pub use types::{HealthStatus, ListPolicy, OrderBy, Patch, Record, SelectQuery};

// Re-export the store traits at crate root.
pub use traits::{StoreBackend, TableStore};
