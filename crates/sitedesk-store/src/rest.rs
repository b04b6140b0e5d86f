// SPDX-FileCopyrightText: 2026 Sitedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the hosted store's REST row API.
//!
//! Provides [`RestStore`], which handles request construction,
//! authentication headers, transient error retry, and error-body parsing.
//! This is the transport layer: retry and timeout live here, never in the
//! entity services.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use sitedesk_config::StoreConfig;
use sitedesk_core::{
    HealthStatus, Record, SelectQuery, SitedeskError, StoreBackend, TableStore,
};
use tracing::{debug, warn};

/// Structured error body the store returns alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
struct StoreErrorBody {
    message: String,
    code: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

/// HTTP client for the hosted store.
///
/// Manages authentication headers, connection pooling, and retry logic
/// for transient errors (429, 500, 503). Each trait method issues one
/// logical row operation against a single table.
#[derive(Debug, Clone)]
pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

impl RestStore {
    /// Creates a store client from configuration.
    ///
    /// Requires `store.base_url` and `store.api_key` to be set.
    pub fn from_config(config: &StoreConfig) -> Result<Self, SitedeskError> {
        let base_url = config.base_url.as_deref().ok_or_else(|| {
            SitedeskError::Config("store.base_url is required for the hosted store".into())
        })?;
        let api_key = config.api_key.as_deref().ok_or_else(|| {
            SitedeskError::Config("store.api_key is required for the hosted store".into())
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(api_key).map_err(|e| {
                SitedeskError::Config(format!("invalid api_key header value: {e}"))
            })?,
        );
        headers.insert(
            "authorization",
            HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
                SitedeskError::Config(format!("invalid api_key header value: {e}"))
            })?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SitedeskError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_retries: 1,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.base_url, table)
    }

    /// Sends a request, retrying once on transient statuses (429, 500, 503)
    /// after a 1-second delay, and maps non-success statuses to
    /// [`SitedeskError::Store`] with the store's diagnostic preserved.
    async fn execute(
        &self,
        table: &str,
        operation: &str,
        build: impl Fn(&reqwest::Client) -> reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, SitedeskError> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(table, operation, attempt, "retrying store request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = build(&self.client).send().await.map_err(|e| {
                SitedeskError::Store {
                    table: table.into(),
                    operation: operation.into(),
                    message: format!("HTTP request failed: {e}"),
                    source: Some(Box::new(e)),
                }
            })?;

            let status = response.status();
            debug!(table, operation, status = %status, attempt, "store response received");

            if status.is_success() {
                return Ok(response);
            }

            if is_transient_error(status) && attempt < self.max_retries {
                let body = response.text().await.unwrap_or_default();
                warn!(table, operation, status = %status, body = %body, "transient store error, will retry");
                last_error = Some(SitedeskError::Store {
                    table: table.into(),
                    operation: operation.into(),
                    message: format!("store returned {status}: {body}"),
                    source: None,
                });
                continue;
            }

            // Non-transient error or exhausted retries.
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<StoreErrorBody>(&body) {
                Ok(err_body) => {
                    let code = err_body.code.unwrap_or_else(|| status.as_u16().to_string());
                    let mut message = format!("store error {code}: {}", err_body.message);
                    if let Some(details) = err_body.details {
                        message.push_str(&format!(" ({details})"));
                    }
                    if let Some(hint) = err_body.hint {
                        message.push_str(&format!(" hint: {hint}"));
                    }
                    message
                }
                Err(_) => format!("store returned {status}: {body}"),
            };
            return Err(SitedeskError::Store {
                table: table.into(),
                operation: operation.into(),
                message,
                source: None,
            });
        }

        Err(last_error.unwrap_or_else(|| SitedeskError::Store {
            table: table.into(),
            operation: operation.into(),
            message: "store request failed after retries".into(),
            source: None,
        }))
    }

    async fn rows_from(
        &self,
        response: reqwest::Response,
        table: &str,
        operation: &str,
    ) -> Result<Vec<Record>, SitedeskError> {
        response.json().await.map_err(|e| SitedeskError::Store {
            table: table.into(),
            operation: operation.into(),
            message: format!("failed to parse store response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

#[async_trait]
impl StoreBackend for RestStore {
    fn name(&self) -> &str {
        "rest"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, SitedeskError> {
        // The API root answers any authenticated request with its schema.
        match self.client.get(&self.base_url).send().await {
            Ok(response) if response.status().is_success() => Ok(HealthStatus::Healthy),
            Ok(response) => Ok(HealthStatus::Unhealthy(format!(
                "store answered with {}",
                response.status()
            ))),
            Err(e) => Ok(HealthStatus::Unhealthy(format!("store unreachable: {e}"))),
        }
    }
}

#[async_trait]
impl TableStore for RestStore {
    async fn select(
        &self,
        table: &str,
        query: SelectQuery,
    ) -> Result<Vec<Record>, SitedeskError> {
        let url = self.table_url(table);
        let mut params: Vec<(String, String)> = Vec::new();
        if let Some(columns) = &query.columns {
            params.push(("select".into(), columns.clone()));
        }
        for (column, value) in &query.filters {
            params.push((column.clone(), format!("eq.{value}")));
        }
        if let Some(order) = &query.order {
            let direction = if order.descending { "desc" } else { "asc" };
            params.push(("order".into(), format!("{}.{direction}", order.column)));
        }

        let response = self
            .execute(table, "select", |client| client.get(&url).query(&params))
            .await?;
        self.rows_from(response, table, "select").await
    }

    async fn insert(&self, table: &str, record: Record) -> Result<Record, SitedeskError> {
        let url = self.table_url(table);
        let response = self
            .execute(table, "insert", |client| {
                client
                    .post(&url)
                    .header("Prefer", "return=representation")
                    .json(&record)
            })
            .await?;

        let rows = self.rows_from(response, table, "insert").await?;
        rows.into_iter().next().ok_or_else(|| SitedeskError::EmptyResult {
            table: table.into(),
            operation: "insert".into(),
        })
    }

    async fn update(
        &self,
        table: &str,
        id: &str,
        patch: Record,
    ) -> Result<Record, SitedeskError> {
        let url = self.table_url(table);
        let params = [("id".to_string(), format!("eq.{id}"))];
        let response = self
            .execute(table, "update", |client| {
                client
                    .patch(&url)
                    .query(&params)
                    .header("Prefer", "return=representation")
                    .json(&patch)
            })
            .await?;

        let rows = self.rows_from(response, table, "update").await?;
        rows.into_iter().next().ok_or_else(|| SitedeskError::EmptyResult {
            table: table.into(),
            operation: "update".into(),
        })
    }

    async fn delete(&self, table: &str, id: &str) -> Result<(), SitedeskError> {
        let url = self.table_url(table);
        let params = [("id".to_string(), format!("eq.{id}"))];
        self.execute(table, "delete", |client| {
            client.delete(&url).query(&params)
        })
        .await?;
        Ok(())
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_store(base_url: &str) -> RestStore {
        let config = StoreConfig {
            base_url: Some(base_url.to_string()),
            api_key: Some("test-anon-key".to_string()),
            timeout_secs: 5,
        };
        RestStore::from_config(&config).unwrap()
    }

    fn record(value: Value) -> Record {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn from_config_requires_base_url_and_api_key() {
        let missing_url = StoreConfig {
            base_url: None,
            api_key: Some("key".into()),
            timeout_secs: 5,
        };
        assert!(RestStore::from_config(&missing_url).is_err());

        let missing_key = StoreConfig {
            base_url: Some("https://example.test/rest/v1".into()),
            api_key: None,
            timeout_secs: 5,
        };
        assert!(RestStore::from_config(&missing_key).is_err());
    }

    #[tokio::test]
    async fn select_builds_projection_filters_and_order() {
        let server = MockServer::start().await;
        let rows = json!([{"id": "s-1", "name": "Harbor warehouse"}]);

        Mock::given(method("GET"))
            .and(path("/sites"))
            .and(query_param("select", "*"))
            .and(query_param("status", "eq.active"))
            .and(query_param("order", "created_at.desc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&rows))
            .mount(&server)
            .await;

        let store = test_store(&server.uri());
        let query = SelectQuery::new()
            .columns("*")
            .eq("status", "active")
            .order_desc("created_at");
        let result = store.select("sites", query).await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0]["id"], json!("s-1"));
    }

    #[tokio::test]
    async fn select_sends_auth_headers() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/crews"))
            .and(header("apikey", "test-anon-key"))
            .and(header("authorization", "Bearer test-anon-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let store = test_store(&server.uri());
        let result = store.select("crews", SelectQuery::new()).await;
        assert!(result.is_ok(), "headers should match: {result:?}");
    }

    #[tokio::test]
    async fn insert_returns_representation_row() {
        let server = MockServer::start().await;
        let sent = json!({"name": "Impact driver", "status": "available"});
        let returned = json!([{
            "id": "t-9",
            "name": "Impact driver",
            "status": "available",
            "created_at": "2026-02-01T08:00:00Z"
        }]);

        Mock::given(method("POST"))
            .and(path("/tools"))
            .and(header("Prefer", "return=representation"))
            .and(body_json(&sent))
            .respond_with(ResponseTemplate::new(201).set_body_json(&returned))
            .mount(&server)
            .await;

        let store = test_store(&server.uri());
        let row = store.insert("tools", record(sent.clone())).await.unwrap();
        assert_eq!(row["id"], json!("t-9"));
    }

    #[tokio::test]
    async fn insert_with_empty_representation_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/tools"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
            .mount(&server)
            .await;

        let store = test_store(&server.uri());
        let result = store
            .insert("tools", record(json!({"name": "Ladder"})))
            .await;
        assert!(matches!(
            result,
            Err(SitedeskError::EmptyResult { ref operation, .. }) if operation == "insert"
        ));
    }

    #[tokio::test]
    async fn update_scopes_to_id_and_sends_sparse_body() {
        let server = MockServer::start().await;
        let patch = json!({"status": "resolved"});
        let returned = json!([{
            "id": "def-002",
            "author_id": "u-1",
            "body": "Leak in roof",
            "status": "resolved",
            "votes": [],
            "created_at": "2026-01-15T09:30:00Z"
        }]);

        Mock::given(method("PATCH"))
            .and(path("/union_messages"))
            .and(query_param("id", "eq.def-002"))
            .and(body_json(&patch))
            .respond_with(ResponseTemplate::new(200).set_body_json(&returned))
            .mount(&server)
            .await;

        let store = test_store(&server.uri());
        let row = store
            .update("union_messages", "def-002", record(patch.clone()))
            .await
            .unwrap();
        assert_eq!(row["status"], json!("resolved"));
    }

    #[tokio::test]
    async fn delete_scopes_to_id() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/todos"))
            .and(query_param("id", "eq.td-4"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let store = test_store(&server.uri());
        store.delete("todos", "td-4").await.unwrap();
    }

    #[tokio::test]
    async fn retries_once_on_transient_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/sites"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .up_to_n_times(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/sites"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "s-1"}])))
            .mount(&server)
            .await;

        let store = test_store(&server.uri());
        let rows = store.select("sites", SelectQuery::new()).await.unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn does_not_retry_non_transient_errors() {
        let server = MockServer::start().await;
        let error_body = json!({
            "message": "permission denied for table documents",
            "code": "42501",
            "details": null,
            "hint": null
        });

        Mock::given(method("GET"))
            .and(path("/documents"))
            .respond_with(ResponseTemplate::new(403).set_body_json(&error_body))
            .expect(1)
            .mount(&server)
            .await;

        let store = test_store(&server.uri());
        let err = store
            .select("documents", SelectQuery::new())
            .await
            .unwrap_err();
        let rendered = err.to_string();
        assert!(rendered.contains("42501"), "got: {rendered}");
        assert!(rendered.contains("permission denied"), "got: {rendered}");
    }

    #[tokio::test]
    async fn exhausted_retries_surface_the_store_diagnostic() {
        let server = MockServer::start().await;
        let error_body = json!({
            "message": "connection pool exhausted",
            "code": "53300",
            "details": null,
            "hint": null
        });

        Mock::given(method("GET"))
            .and(path("/crews"))
            .respond_with(ResponseTemplate::new(500).set_body_json(&error_body))
            .expect(2)
            .mount(&server)
            .await;

        let store = test_store(&server.uri());
        let err = store.select("crews", SelectQuery::new()).await.unwrap_err();
        assert!(err.to_string().contains("53300"), "got: {err}");
    }

    #[tokio::test]
    async fn health_check_reports_unreachable_store() {
        let config = StoreConfig {
            base_url: Some("http://127.0.0.1:1/rest/v1".into()),
            api_key: Some("key".into()),
            timeout_secs: 1,
        };
        let store = RestStore::from_config(&config).unwrap();
        let status = store.health_check().await.unwrap();
        assert!(matches!(status, HealthStatus::Unhealthy(_)));
    }
}
