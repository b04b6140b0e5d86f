// SPDX-FileCopyrightText: 2026 Sitedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Library documents: handbooks, standards, and work instructions.

use strum::{Display, EnumString};

use crate::types::Patch;

/// Category tag for a library document.
///
/// Values arrive from the store verbatim; anything outside the known set
/// is carried through unchanged in [`DocumentKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum DocumentKind {
    Book,
    Standard,
    Instruction,
    #[strum(default, to_string = "{0}")]
    Other(String),
}

/// A profile row resolved through the joined author lookup on reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: String,
    pub full_name: String,
}

/// A document in the company library.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub name: String,
    pub kind: DocumentKind,
    /// Free-text author name as entered on the form.
    pub author_name: String,
    /// Optional reference to a profile row.
    pub author_id: Option<String>,
    /// Resolved profile from the joined lookup. Read-only convenience;
    /// never written back to the store.
    pub author: Option<Author>,
    pub year: Option<i32>,
    pub description: Option<String>,
    /// Uploaded file location. A document is actionable when this or
    /// `external_url` is set, but that is a UI concern, not enforced here.
    pub file_url: Option<String>,
    pub external_url: Option<String>,
    pub created_at: String,
}

/// Fields for creating a document. The store assigns id and created_at.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub name: String,
    pub kind: DocumentKind,
    pub author_name: String,
    pub author_id: Option<String>,
    pub year: Option<i32>,
    pub description: Option<String>,
    pub file_url: Option<String>,
    pub external_url: Option<String>,
}

/// Sparse update for a document. `None`/`Absent` fields are not transmitted.
#[derive(Debug, Clone, Default)]
pub struct DocumentPatch {
    pub name: Option<String>,
    pub kind: Option<DocumentKind>,
    pub author_name: Option<String>,
    pub author_id: Patch<String>,
    pub year: Patch<i32>,
    pub description: Patch<String>,
    pub file_url: Patch<String>,
    pub external_url: Patch<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn kind_round_trips_known_values() {
        for (raw, kind) in [
            ("book", DocumentKind::Book),
            ("standard", DocumentKind::Standard),
            ("instruction", DocumentKind::Instruction),
        ] {
            assert_eq!(DocumentKind::from_str(raw).unwrap(), kind);
            assert_eq!(kind.to_string(), raw);
        }
    }

    #[test]
    fn kind_passes_unknown_values_through() {
        let kind = DocumentKind::from_str("blueprint").unwrap();
        assert_eq!(kind, DocumentKind::Other("blueprint".into()));
        assert_eq!(kind.to_string(), "blueprint");
    }

    #[test]
    fn patch_defaults_to_all_absent() {
        let patch = DocumentPatch::default();
        assert!(patch.name.is_none());
        assert!(patch.author_id.is_absent());
        assert!(patch.file_url.is_absent());
    }
}
