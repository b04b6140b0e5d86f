// SPDX-FileCopyrightText: 2026 Sitedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The tool catalog: equipment tracked across sites.

use strum::{Display, EnumString};

use crate::types::Patch;

/// Availability status of a tool. Unknown store values pass through in
/// [`ToolStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ToolStatus {
    Available,
    CheckedOut,
    Maintenance,
    #[strum(default, to_string = "{0}")]
    Other(String),
}

/// A tool in the company catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Tool {
    pub id: String,
    pub name: String,
    pub serial: Option<String>,
    pub status: ToolStatus,
    /// The site where the tool currently is, if checked out.
    pub site_id: Option<String>,
    pub created_at: String,
}

/// Fields for cataloguing a tool. Leaving `status` unset lets the store
/// column default (`available`) apply.
#[derive(Debug, Clone)]
pub struct NewTool {
    pub name: String,
    pub serial: Option<String>,
    pub status: Option<ToolStatus>,
    pub site_id: Option<String>,
}

/// Sparse update for a tool.
#[derive(Debug, Clone, Default)]
pub struct ToolPatch {
    pub name: Option<String>,
    pub serial: Patch<String>,
    pub status: Option<ToolStatus>,
    pub site_id: Patch<String>,
}
