// SPDX-FileCopyrightText: 2026 Sitedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Union board message CRUD operations.

use std::sync::Arc;

use serde_json::Value;
use tracing::error;

use sitedesk_core::entities::{
    MessageStatus, NewUnionMessage, UnionMessage, UnionMessagePatch, Vote,
};
use sitedesk_core::{ListPolicy, Record, SelectQuery, SitedeskError, TableStore};

use crate::record::{put_opt, str_field};

const TABLE: &str = "union_messages";

/// Adapts a store row to a [`UnionMessage`]. Total: a missing or null
/// votes column reads as an empty collection, never an error.
pub fn message_from_record(record: &Record) -> UnionMessage {
    let status = record
        .get("status")
        .and_then(Value::as_str)
        .map(|s| s.parse().unwrap_or_else(|_| MessageStatus::Other(s.to_string())))
        .unwrap_or(MessageStatus::New);

    let votes = record
        .get("votes")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().filter_map(vote_from_value).collect())
        .unwrap_or_default();

    UnionMessage {
        id: str_field(record, "id"),
        author_id: str_field(record, "author_id"),
        body: str_field(record, "body"),
        status,
        votes,
        created_at: str_field(record, "created_at"),
    }
}

fn vote_from_value(value: &Value) -> Option<Vote> {
    let entry = value.as_object()?;
    Some(Vote {
        voter_id: str_field(entry, "voter_id"),
        value: entry.get("value").and_then(Value::as_i64).unwrap_or(0),
    })
}

fn vote_to_value(vote: &Vote) -> Value {
    let mut entry = Record::new();
    entry.insert("voter_id".into(), Value::String(vote.voter_id.clone()));
    entry.insert("value".into(), Value::from(vote.value));
    Value::Object(entry)
}

/// Builds the insert record for a new message. A `None` status is
/// omitted so the store column default (`new`) applies.
pub fn message_insert_record(new: &NewUnionMessage) -> Record {
    let mut record = Record::new();
    record.insert("author_id".into(), Value::String(new.author_id.clone()));
    record.insert("body".into(), Value::String(new.body.clone()));
    put_opt(
        &mut record,
        "status",
        new.status.as_ref().map(|s| Value::String(s.to_string())),
    );
    record
}

/// Builds the sparse patch record for a message update. A supplied
/// `votes` collection replaces the whole array column.
pub fn message_patch_record(patch: &UnionMessagePatch) -> Record {
    let mut record = Record::new();
    put_opt(
        &mut record,
        "body",
        patch.body.as_ref().map(|v| Value::String(v.clone())),
    );
    put_opt(
        &mut record,
        "status",
        patch.status.as_ref().map(|s| Value::String(s.to_string())),
    );
    put_opt(
        &mut record,
        "votes",
        patch
            .votes
            .as_ref()
            .map(|votes| Value::Array(votes.iter().map(vote_to_value).collect())),
    );
    record
}

/// Data access for the union board.
///
/// The only component permitted to touch the `union_messages` table.
/// Status transitions are free-form and happen only through [`update`].
///
/// [`update`]: MessageService::update
pub struct MessageService {
    store: Arc<dyn TableStore>,
    list_policy: ListPolicy,
}

impl MessageService {
    /// Creates a message service. The union board is a write-adjacent
    /// surface, so the default list policy is fail-loud.
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

    /// All messages, newest first.
    pub async fn list(&self) -> Result<Vec<UnionMessage>, SitedeskError> {
        let query = SelectQuery::new().order_desc("created_at");
        match self.store.select(TABLE, query).await {
            Ok(rows) => Ok(rows.iter().map(message_from_record).collect()),
            Err(e) => {
                error!(table = TABLE, operation = "list", error = %e, "failed to list messages");
                match self.list_policy {
                    ListPolicy::FailSoft => Ok(Vec::new()),
                    ListPolicy::FailLoud => Err(e),
                }
            }
        }
    }

    /// Posts a message and returns the stored row as an entity.
    pub async fn create(&self, new: NewUnionMessage) -> Result<UnionMessage, SitedeskError> {
        match self.store.insert(TABLE, message_insert_record(&new)).await {
            Ok(row) => Ok(message_from_record(&row)),
            Err(e) => {
                error!(table = TABLE, operation = "create", error = %e, "failed to create message");
                Err(e)
            }
        }
    }

    /// Applies a sparse patch to one message and returns the updated entity.
    pub async fn update(
        &self,
        id: &str,
        patch: UnionMessagePatch,
    ) -> Result<UnionMessage, SitedeskError> {
        match self
            .store
            .update(TABLE, id, message_patch_record(&patch))
            .await
        {
            Ok(row) => Ok(message_from_record(&row)),
            Err(e) => {
                error!(table = TABLE, operation = "update", id, error = %e, "failed to update message");
                Err(e)
            }
        }
    }

    /// Removes a message.
    pub async fn delete(&self, id: &str) -> Result<(), SitedeskError> {
        if let Err(e) = self.store.delete(TABLE, id).await {
            error!(table = TABLE, operation = "delete", id, error = %e, "failed to delete message");
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

    fn record(value: Value) -> Record {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn create_without_status_omits_the_key() {
        let new = NewUnionMessage {
            author_id: "u-1".into(),
            body: "Leak in roof".into(),
            status: None,
        };
        let row = message_insert_record(&new);
        assert!(!row.contains_key("status"));
        assert_eq!(row["body"], json!("Leak in roof"));
    }

    #[tokio::test]
    async fn store_default_yields_status_new() {
        let service = MessageService::new(Arc::new(MemoryStore::with_schema_defaults()));
        let message = service
            .create(NewUnionMessage {
                author_id: "u-1".into(),
                body: "Leak in roof".into(),
                status: None,
            })
            .await
            .unwrap();
        assert_eq!(message.status, MessageStatus::New);
        assert!(message.votes.is_empty());
    }

    #[test]
    fn status_only_patch_transmits_exactly_one_key() {
        let patch = UnionMessagePatch {
            status: Some(MessageStatus::Resolved),
            ..Default::default()
        };
        let row = message_patch_record(&patch);
        assert_eq!(row.len(), 1);
        assert_eq!(row["status"], json!("resolved"));
    }

    #[test]
    fn votes_round_trip_in_order() {
        let votes = vec![
            Vote {
                voter_id: "u-2".into(),
                value: 1,
            },
            Vote {
                voter_id: "u-3".into(),
                value: -1,
            },
        ];
        let patch = UnionMessagePatch {
            votes: Some(votes.clone()),
            ..Default::default()
        };
        let mut row = message_patch_record(&patch);
        row.insert("id".into(), json!("m-1"));

        let message = message_from_record(&row);
        assert_eq!(message.votes, votes);
    }

    #[test]
    fn null_votes_read_as_empty_collection() {
        let message = message_from_record(&record(json!({"id": "m-1", "votes": null})));
        assert!(message.votes.is_empty());
    }

    #[test]
    fn unknown_status_survives_verbatim() {
        let message = message_from_record(&record(json!({"id": "m-1", "status": "escalated"})));
        assert_eq!(message.status, MessageStatus::Other("escalated".into()));

        let patch = UnionMessagePatch {
            status: Some(message.status),
            ..Default::default()
        };
        assert_eq!(message_patch_record(&patch)["status"], json!("escalated"));
    }

    #[tokio::test]
    async fn any_status_transition_is_permitted() {
        let service = MessageService::new(Arc::new(MemoryStore::with_schema_defaults()));
        let message = service
            .create(NewUnionMessage {
                author_id: "u-1".into(),
                body: "Cold water in barracks".into(),
                status: Some(MessageStatus::Resolved),
            })
            .await
            .unwrap();

        // resolved -> new is as legal as new -> resolved.
        let reopened = service
            .update(
                &message.id,
                UnionMessagePatch {
                    status: Some(MessageStatus::New),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(reopened.status, MessageStatus::New);
        assert_eq!(reopened.body, message.body);
    }

    #[tokio::test]
    async fn list_is_fail_loud_by_default() {
        let store = Arc::new(FailingStore::new());
        let service = MessageService::new(store.clone());
        let err = service.list().await.unwrap_err();
        assert!(matches!(err, SitedeskError::Store { .. }));
        // One failed call, no retry at the service layer.
        assert_eq!(store.call_count(), 1);
    }

    #[tokio::test]
    async fn delete_failure_propagates_with_diagnostic() {
        let service = MessageService::new(Arc::new(FailingStore::with_message(
            "row is referenced by grievance_log",
        )));
        let err = service.delete("m-1").await.unwrap_err();
        assert!(err.to_string().contains("grievance_log"));
    }
}
