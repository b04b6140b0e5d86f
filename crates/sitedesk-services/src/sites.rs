// SPDX-FileCopyrightText: 2026 Sitedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Construction site CRUD operations.

use std::sync::Arc;

use serde_json::Value;
use tracing::error;

use sitedesk_core::entities::{NewSite, Site, SitePatch, SiteStatus};
use sitedesk_core::{ListPolicy, Record, SelectQuery, SitedeskError, TableStore};

use crate::record::{opt_str_field, put_opt, str_field};

const TABLE: &str = "sites";

/// Adapts a store row to a [`Site`]. Total over any row shape.
pub fn site_from_record(record: &Record) -> Site {
    let status = record
        .get("status")
        .and_then(Value::as_str)
        .map(|s| s.parse().unwrap_or_else(|_| SiteStatus::Other(s.to_string())))
        .unwrap_or(SiteStatus::Planning);

    Site {
        id: str_field(record, "id"),
        name: str_field(record, "name"),
        address: str_field(record, "address"),
        status,
        crew_id: opt_str_field(record, "crew_id"),
        starts_on: opt_str_field(record, "starts_on"),
        ends_on: opt_str_field(record, "ends_on"),
        description: opt_str_field(record, "description"),
        created_at: str_field(record, "created_at"),
    }
}

/// Builds the insert record for a new site. A `None` status is omitted
/// so the store column default (`planning`) applies. End-before-start is
/// not rejected here; the forms own that rule.
pub fn site_insert_record(new: &NewSite) -> Record {
    let mut record = Record::new();
    record.insert("name".into(), Value::String(new.name.clone()));
    record.insert("address".into(), Value::String(new.address.clone()));
    put_opt(
        &mut record,
        "status",
        new.status.as_ref().map(|s| Value::String(s.to_string())),
    );
    put_opt(
        &mut record,
        "crew_id",
        new.crew_id.as_ref().map(|v| Value::String(v.clone())),
    );
    put_opt(
        &mut record,
        "starts_on",
        new.starts_on.as_ref().map(|v| Value::String(v.clone())),
    );
    put_opt(
        &mut record,
        "ends_on",
        new.ends_on.as_ref().map(|v| Value::String(v.clone())),
    );
    put_opt(
        &mut record,
        "description",
        new.description.as_ref().map(|v| Value::String(v.clone())),
    );
    record
}

/// Builds the sparse patch record for a site update. `Patch::Clear` on
/// `crew_id` unassigns the crew with an explicit null.
pub fn site_patch_record(patch: &SitePatch) -> Record {
    let mut record = Record::new();
    put_opt(
        &mut record,
        "name",
        patch.name.as_ref().map(|v| Value::String(v.clone())),
    );
    put_opt(
        &mut record,
        "address",
        patch.address.as_ref().map(|v| Value::String(v.clone())),
    );
    put_opt(
        &mut record,
        "status",
        patch.status.as_ref().map(|s| Value::String(s.to_string())),
    );
    put_opt(
        &mut record,
        "crew_id",
        patch.crew_id.to_value(|v| Value::String(v.clone())),
    );
    put_opt(
        &mut record,
        "starts_on",
        patch.starts_on.to_value(|v| Value::String(v.clone())),
    );
    put_opt(
        &mut record,
        "ends_on",
        patch.ends_on.to_value(|v| Value::String(v.clone())),
    );
    put_opt(
        &mut record,
        "description",
        patch.description.to_value(|v| Value::String(v.clone())),
    );
    record
}

/// Data access for construction sites.
///
/// The only component permitted to touch the `sites` table.
pub struct SiteService {
    store: Arc<dyn TableStore>,
    list_policy: ListPolicy,
}

impl SiteService {
    /// Creates a site service with the default fail-loud list policy:
    /// site data drives scheduling and must not silently read as empty.
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

    /// All sites, newest first.
    pub async fn list(&self) -> Result<Vec<Site>, SitedeskError> {
        let query = SelectQuery::new().order_desc("created_at");
        match self.store.select(TABLE, query).await {
            Ok(rows) => Ok(rows.iter().map(site_from_record).collect()),
            Err(e) => {
                error!(table = TABLE, operation = "list", error = %e, "failed to list sites");
                match self.list_policy {
                    ListPolicy::FailSoft => Ok(Vec::new()),
                    ListPolicy::FailLoud => Err(e),
                }
            }
        }
    }

    /// Registers a site and returns the stored row as an entity.
    pub async fn create(&self, new: NewSite) -> Result<Site, SitedeskError> {
        match self.store.insert(TABLE, site_insert_record(&new)).await {
            Ok(row) => Ok(site_from_record(&row)),
            Err(e) => {
                error!(table = TABLE, operation = "create", error = %e, "failed to create site");
                Err(e)
            }
        }
    }

    /// Applies a sparse patch to one site and returns the updated entity.
    pub async fn update(&self, id: &str, patch: SitePatch) -> Result<Site, SitedeskError> {
        match self.store.update(TABLE, id, site_patch_record(&patch)).await {
            Ok(row) => Ok(site_from_record(&row)),
            Err(e) => {
                error!(table = TABLE, operation = "update", id, error = %e, "failed to update site");
                Err(e)
            }
        }
    }

    /// Removes a site.
    pub async fn delete(&self, id: &str) -> Result<(), SitedeskError> {
        if let Err(e) = self.store.delete(TABLE, id).await {
            error!(table = TABLE, operation = "delete", id, error = %e, "failed to delete site");
            return Err(e);
        }
        Ok(())
    }
}
