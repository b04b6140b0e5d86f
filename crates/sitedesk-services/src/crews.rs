// SPDX-FileCopyrightText: 2026 Sitedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Crew CRUD operations.

use std::sync::Arc;

use serde_json::Value;
use tracing::error;

use sitedesk_core::entities::{Crew, CrewPatch, NewCrew};
use sitedesk_core::{ListPolicy, Record, SelectQuery, SitedeskError, TableStore};

use crate::record::{opt_str_field, put_opt, str_field};

const TABLE: &str = "crews";

/// Adapts a store row to a [`Crew`]. Total over any row shape.
pub fn crew_from_record(record: &Record) -> Crew {
    Crew {
        id: str_field(record, "id"),
        name: str_field(record, "name"),
        foreman: opt_str_field(record, "foreman"),
        specialty: opt_str_field(record, "specialty"),
        created_at: str_field(record, "created_at"),
    }
}

/// Builds the insert record for a new crew.
pub fn crew_insert_record(new: &NewCrew) -> Record {
    let mut record = Record::new();
    record.insert("name".into(), Value::String(new.name.clone()));
    put_opt(
        &mut record,
        "foreman",
        new.foreman.as_ref().map(|v| Value::String(v.clone())),
    );
    put_opt(
        &mut record,
        "specialty",
        new.specialty.as_ref().map(|v| Value::String(v.clone())),
    );
    record
}

/// Builds the sparse patch record for a crew update.
pub fn crew_patch_record(patch: &CrewPatch) -> Record {
    let mut record = Record::new();
    put_opt(
        &mut record,
        "name",
        patch.name.as_ref().map(|v| Value::String(v.clone())),
    );
    put_opt(
        &mut record,
        "foreman",
        patch.foreman.to_value(|v| Value::String(v.clone())),
    );
    put_opt(
        &mut record,
        "specialty",
        patch.specialty.to_value(|v| Value::String(v.clone())),
    );
    record
}

/// Data access for work crews.
///
/// The only component permitted to touch the `crews` table.
pub struct CrewService {
    store: Arc<dyn TableStore>,
    list_policy: ListPolicy,
}

impl CrewService {
    /// Creates a crew service with the default fail-loud list policy.
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

    /// All crews in roster order (name ascending).
    pub async fn list(&self) -> Result<Vec<Crew>, SitedeskError> {
        let query = SelectQuery::new().order_asc("name");
        match self.store.select(TABLE, query).await {
            Ok(rows) => Ok(rows.iter().map(crew_from_record).collect()),
            Err(e) => {
                error!(table = TABLE, operation = "list", error = %e, "failed to list crews");
                match self.list_policy {
                    ListPolicy::FailSoft => Ok(Vec::new()),
                    ListPolicy::FailLoud => Err(e),
                }
            }
        }
    }

    /// Registers a crew and returns the stored row as an entity.
    pub async fn create(&self, new: NewCrew) -> Result<Crew, SitedeskError> {
        match self.store.insert(TABLE, crew_insert_record(&new)).await {
            Ok(row) => Ok(crew_from_record(&row)),
            Err(e) => {
                error!(table = TABLE, operation = "create", error = %e, "failed to create crew");
                Err(e)
            }
        }
    }

    /// Applies a sparse patch to one crew and returns the updated entity.
    pub async fn update(&self, id: &str, patch: CrewPatch) -> Result<Crew, SitedeskError> {
        match self.store.update(TABLE, id, crew_patch_record(&patch)).await {
            Ok(row) => Ok(crew_from_record(&row)),
            Err(e) => {
                error!(table = TABLE, operation = "update", id, error = %e, "failed to update crew");
                Err(e)
            }
        }
    }

    /// Removes a crew.
    pub async fn delete(&self, id: &str) -> Result<(), SitedeskError> {
        if let Err(e) = self.store.delete(TABLE, id).await {
            error!(table = TABLE, operation = "delete", id, error = %e, "failed to delete crew");
            return Err(e);
        }
        Ok(())
    }
}
