// SPDX-FileCopyrightText: 2026 Sitedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Construction sites and their crew assignment.

use strum::{Display, EnumString};

use crate::types::Patch;

/// Lifecycle status of a site. Unknown store values pass through in
/// [`SiteStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum SiteStatus {
    Planning,
    Active,
    Completed,
    #[strum(default, to_string = "{0}")]
    Other(String),
}

/// A construction site.
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    pub id: String,
    pub name: String,
    pub address: String,
    pub status: SiteStatus,
    /// The crew currently assigned, if any.
    pub crew_id: Option<String>,
    /// ISO-8601 dates. An end before the start is not rejected here.
    pub starts_on: Option<String>,
    pub ends_on: Option<String>,
    pub description: Option<String>,
    pub created_at: String,
}

/// Fields for registering a site. Leaving `status` unset lets the store
/// column default (`planning`) apply.
#[derive(Debug, Clone)]
pub struct NewSite {
    pub name: String,
    pub address: String,
    pub status: Option<SiteStatus>,
    pub crew_id: Option<String>,
    pub starts_on: Option<String>,
    pub ends_on: Option<String>,
    pub description: Option<String>,
}

/// Sparse update for a site. `None`/`Absent` fields are not transmitted;
/// `Patch::Clear` unassigns a crew or removes a date.
#[derive(Debug, Clone, Default)]
pub struct SitePatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub status: Option<SiteStatus>,
    pub crew_id: Patch<String>,
    pub starts_on: Patch<String>,
    pub ends_on: Patch<String>,
    pub description: Patch<String>,
}
