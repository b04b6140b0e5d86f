// SPDX-FileCopyrightText: 2026 Sitedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Library document CRUD operations.

use std::sync::Arc;

use serde_json::Value;
use tracing::error;

use sitedesk_core::entities::{Author, Document, DocumentKind, DocumentPatch, NewDocument};
use sitedesk_core::{ListPolicy, Record, SelectQuery, SitedeskError, TableStore};

use crate::record::{opt_i32_field, opt_str_field, put_opt, str_field};

const TABLE: &str = "documents";

/// Projection resolving the joined author profile on reads.
const LIST_COLUMNS: &str = "*, author:profiles(id,full_name)";

/// Adapts a store row to a [`Document`]. Total: any row shape the store
/// can return maps to an entity without failing.
pub fn document_from_record(record: &Record) -> Document {
    let author = record
        .get("author")
        .and_then(Value::as_object)
        .map(|profile| Author {
            id: str_field(profile, "id"),
            full_name: str_field(profile, "full_name"),
        });

    let kind = record
        .get("kind")
        .and_then(Value::as_str)
        .map(|s| s.parse().unwrap_or_else(|_| DocumentKind::Other(s.to_string())))
        .unwrap_or(DocumentKind::Book);

    Document {
        id: str_field(record, "id"),
        name: str_field(record, "name"),
        kind,
        author_name: str_field(record, "author_name"),
        author_id: opt_str_field(record, "author_id"),
        author,
        year: opt_i32_field(record, "year"),
        description: opt_str_field(record, "description"),
        file_url: opt_str_field(record, "file_url"),
        external_url: opt_str_field(record, "external_url"),
        created_at: str_field(record, "created_at"),
    }
}

/// Builds the insert record for a new document. Drops entity-only fields
/// (id, created_at, resolved author); omitted optionals are left to the
/// store's column defaults.
pub fn document_insert_record(new: &NewDocument) -> Record {
    let mut record = Record::new();
    record.insert("name".into(), Value::String(new.name.clone()));
    record.insert("kind".into(), Value::String(new.kind.to_string()));
    record.insert("author_name".into(), Value::String(new.author_name.clone()));
    put_opt(
        &mut record,
        "author_id",
        new.author_id.as_ref().map(|v| Value::String(v.clone())),
    );
    put_opt(&mut record, "year", new.year.map(Value::from));
    put_opt(
        &mut record,
        "description",
        new.description.as_ref().map(|v| Value::String(v.clone())),
    );
    put_opt(
        &mut record,
        "file_url",
        new.file_url.as_ref().map(|v| Value::String(v.clone())),
    );
    put_opt(
        &mut record,
        "external_url",
        new.external_url.as_ref().map(|v| Value::String(v.clone())),
    );
    record
}

/// Builds the sparse patch record for a document update. Only keys the
/// caller supplied appear; `Patch::Clear` becomes an explicit null.
pub fn document_patch_record(patch: &DocumentPatch) -> Record {
    let mut record = Record::new();
    put_opt(
        &mut record,
        "name",
        patch.name.as_ref().map(|v| Value::String(v.clone())),
    );
    put_opt(
        &mut record,
        "kind",
        patch.kind.as_ref().map(|v| Value::String(v.to_string())),
    );
    put_opt(
        &mut record,
        "author_name",
        patch.author_name.as_ref().map(|v| Value::String(v.clone())),
    );
    put_opt(
        &mut record,
        "author_id",
        patch.author_id.to_value(|v| Value::String(v.clone())),
    );
    put_opt(&mut record, "year", patch.year.to_value(|v| Value::from(*v)));
    put_opt(
        &mut record,
        "description",
        patch.description.to_value(|v| Value::String(v.clone())),
    );
    put_opt(
        &mut record,
        "file_url",
        patch.file_url.to_value(|v| Value::String(v.clone())),
    );
    put_opt(
        &mut record,
        "external_url",
        patch.external_url.to_value(|v| Value::String(v.clone())),
    );
    record
}

/// Data access for the company library.
///
/// The only component permitted to touch the `documents` table. Each
/// operation is one store round trip; failures are logged here, then
/// absorbed or propagated according to the list policy.
pub struct DocumentService {
    store: Arc<dyn TableStore>,
    list_policy: ListPolicy,
}

impl DocumentService {
    /// Creates a document service with the library's default fail-soft
    /// list policy (reads are best-effort; the shelf renders empty).
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self {
            store,
            list_policy: ListPolicy::FailSoft,
        }
    }

    /// Overrides the list failure policy (see `ServicesConfig`).
    pub fn with_list_policy(mut self, policy: ListPolicy) -> Self {
        self.list_policy = policy;
        self
    }

    /// All documents, newest first, with the author profile resolved.
    pub async fn list(&self) -> Result<Vec<Document>, SitedeskError> {
        let query = SelectQuery::new()
            .columns(LIST_COLUMNS)
            .order_desc("created_at");
        match self.store.select(TABLE, query).await {
            Ok(rows) => Ok(rows.iter().map(document_from_record).collect()),
            Err(e) => {
                error!(table = TABLE, operation = "list", error = %e, "failed to list documents");
                match self.list_policy {
                    ListPolicy::FailSoft => Ok(Vec::new()),
                    ListPolicy::FailLoud => Err(e),
                }
            }
        }
    }

    /// Adds a document and returns the stored row as an entity.
    pub async fn create(&self, new: NewDocument) -> Result<Document, SitedeskError> {
        match self.store.insert(TABLE, document_insert_record(&new)).await {
            Ok(row) => Ok(document_from_record(&row)),
            Err(e) => {
                error!(table = TABLE, operation = "create", error = %e, "failed to create document");
                Err(e)
            }
        }
    }

    /// Applies a sparse patch to one document and returns the updated entity.
    pub async fn update(
        &self,
        id: &str,
        patch: DocumentPatch,
    ) -> Result<Document, SitedeskError> {
        match self
            .store
            .update(TABLE, id, document_patch_record(&patch))
            .await
        {
            Ok(row) => Ok(document_from_record(&row)),
            Err(e) => {
                error!(table = TABLE, operation = "update", id, error = %e, "failed to update document");
                Err(e)
            }
        }
    }

    /// Removes a document.
    pub async fn delete(&self, id: &str) -> Result<(), SitedeskError> {
        if let Err(e) = self.store.delete(TABLE, id).await {
            error!(table = TABLE, operation = "delete", id, error = %e, "failed to delete document");
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sitedesk_test_utils::{FailingStore, MemoryStore};
    use tracing_test::traced_test;

    fn record(value: Value) -> Record {
        value.as_object().unwrap().clone()
    }

    fn sample_new() -> NewDocument {
        NewDocument {
            name: "Concrete works handbook".into(),
            kind: DocumentKind::Book,
            author_name: "E. Aalto".into(),
            author_id: None,
            year: Some(2021),
            description: Some("Field reference for pours".into()),
            file_url: None,
            external_url: Some("https://library.example/concrete".into()),
        }
    }

    #[test]
    fn insert_then_read_round_trips_fields() {
        let new = sample_new();
        let mut row = document_insert_record(&new);
        row.insert("id".into(), json!("doc-1"));
        row.insert("created_at".into(), json!("2026-02-01T08:00:00Z"));

        let doc = document_from_record(&row);
        assert_eq!(doc.name, new.name);
        assert_eq!(doc.kind, new.kind);
        assert_eq!(doc.author_name, new.author_name);
        assert_eq!(doc.year, new.year);
        assert_eq!(doc.description, new.description);
        assert_eq!(doc.file_url, None);
        assert_eq!(doc.external_url, new.external_url);
        assert_eq!(doc.id, "doc-1");
    }

    #[test]
    fn insert_record_omits_unset_optionals_and_entity_only_fields() {
        let mut new = sample_new();
        new.year = None;
        new.description = None;
        new.external_url = None;
        let row = document_insert_record(&new);

        assert_eq!(row.len(), 3);
        assert!(row.contains_key("name"));
        assert!(row.contains_key("kind"));
        assert!(row.contains_key("author_name"));
        assert!(!row.contains_key("id"));
        assert!(!row.contains_key("author"));
    }

    #[test]
    fn from_record_resolves_joined_author() {
        let row = record(json!({
            "id": "doc-2",
            "name": "EN 1992 excerpt",
            "kind": "standard",
            "author_name": "CEN",
            "author_id": "u-7",
            "author": {"id": "u-7", "full_name": "Standards Desk"},
            "created_at": "2026-01-01T00:00:00Z"
        }));
        let doc = document_from_record(&row);
        let author = doc.author.unwrap();
        assert_eq!(author.id, "u-7");
        assert_eq!(author.full_name, "Standards Desk");
    }

    #[test]
    fn from_record_is_total_over_sparse_rows() {
        let doc = document_from_record(&record(json!({"description": null})));
        assert_eq!(doc.id, "");
        assert_eq!(doc.kind, DocumentKind::Book);
        assert_eq!(doc.description, None);
        assert_eq!(doc.author, None);
    }

    #[test]
    fn unknown_kind_survives_read_and_write_verbatim() {
        let row = record(json!({"id": "doc-3", "kind": "blueprint"}));
        let doc = document_from_record(&row);
        assert_eq!(doc.kind, DocumentKind::Other("blueprint".into()));

        let patch = DocumentPatch {
            kind: Some(doc.kind.clone()),
            ..Default::default()
        };
        assert_eq!(document_patch_record(&patch)["kind"], json!("blueprint"));
    }

    #[test]
    fn patch_record_is_sparse() {
        let patch = DocumentPatch {
            description: sitedesk_core::Patch::Set("Updated".into()),
            ..Default::default()
        };
        let row = document_patch_record(&patch);
        assert_eq!(row.len(), 1);
        assert_eq!(row["description"], json!("Updated"));
    }

    #[test]
    fn patch_clear_writes_explicit_null() {
        let patch = DocumentPatch {
            file_url: sitedesk_core::Patch::Clear,
            ..Default::default()
        };
        let row = document_patch_record(&patch);
        assert_eq!(row.len(), 1);
        assert_eq!(row["file_url"], Value::Null);
    }

    #[tokio::test]
    async fn create_then_list_returns_newest_first() {
        let store = Arc::new(MemoryStore::with_schema_defaults());
        let service = DocumentService::new(store.clone());

        store
            .seed(
                "documents",
                vec![
                    record(json!({"id": "old", "name": "Old", "kind": "book", "author_name": "A", "created_at": "2026-01-01T00:00:00Z"})),
                    record(json!({"id": "new", "name": "New", "kind": "book", "author_name": "B", "created_at": "2026-02-01T00:00:00Z"})),
                ],
            )
            .await;

        let docs = service.list().await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, "new");
        assert_eq!(docs[1].id, "old");
    }

    #[tokio::test]
    async fn create_returns_the_stored_entity() {
        let service = DocumentService::new(Arc::new(MemoryStore::with_schema_defaults()));
        let doc = service.create(sample_new()).await.unwrap();
        assert!(!doc.id.is_empty());
        assert!(!doc.created_at.is_empty());
        assert_eq!(doc.name, "Concrete works handbook");
    }

    #[tokio::test]
    async fn update_touches_only_patched_fields() {
        let store = Arc::new(MemoryStore::new());
        let service = DocumentService::new(store.clone());
        let created = service.create(sample_new()).await.unwrap();

        let updated = service
            .update(
                &created.id,
                DocumentPatch {
                    year: sitedesk_core::Patch::Set(2024),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.year, Some(2024));
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.description, created.description);
    }

    #[tokio::test]
    async fn delete_removes_the_document() {
        let store = Arc::new(MemoryStore::new());
        let service = DocumentService::new(store.clone());
        let created = service.create(sample_new()).await.unwrap();

        service.delete(&created.id).await.unwrap();
        assert!(service.list().await.unwrap().is_empty());
    }

    #[traced_test]
    #[tokio::test]
    async fn fail_soft_list_absorbs_failures_and_logs() {
        let store = Arc::new(FailingStore::with_message("store is down"));
        let service = DocumentService::new(store.clone());

        // Never throws, every call, and each call is exactly one round trip.
        for expected_calls in 1..=3 {
            let docs = service.list().await.unwrap();
            assert!(docs.is_empty());
            assert_eq!(store.call_count(), expected_calls);
        }
        assert!(logs_contain("failed to list documents"));
    }

    #[traced_test]
    #[tokio::test]
    async fn fail_loud_list_propagates_when_configured() {
        let service = DocumentService::new(Arc::new(FailingStore::new()))
            .with_list_policy(ListPolicy::FailLoud);
        let err = service.list().await.unwrap_err();
        assert!(matches!(err, SitedeskError::Store { .. }));
        assert!(logs_contain("failed to list documents"));
    }

    #[tokio::test]
    async fn create_failure_preserves_the_diagnostic() {
        let service = DocumentService::new(Arc::new(FailingStore::with_message(
            "duplicate key value violates unique constraint",
        )));
        let err = service.create(sample_new()).await.unwrap_err();
        assert!(err.to_string().contains("duplicate key value"));
    }
}
