// SPDX-FileCopyrightText: 2026 Sitedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Work crews.

use crate::types::Patch;

/// A work crew.
#[derive(Debug, Clone, PartialEq)]
pub struct Crew {
    pub id: String,
    pub name: String,
    pub foreman: Option<String>,
    pub specialty: Option<String>,
    pub created_at: String,
}

/// Fields for registering a crew.
#[derive(Debug, Clone)]
pub struct NewCrew {
    pub name: String,
    pub foreman: Option<String>,
    pub specialty: Option<String>,
}

/// Sparse update for a crew.
#[derive(Debug, Clone, Default)]
pub struct CrewPatch {
    pub name: Option<String>,
    pub foreman: Patch<String>,
    pub specialty: Patch<String>,
}
