// SPDX-FileCopyrightText: 2026 Sitedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base trait that all store backends must implement.

use async_trait::async_trait;

use crate::error::SitedeskError;
use crate::types::HealthStatus;

/// The base trait for store backends.
///
/// Every backend (hosted REST store, in-memory fixture) implements this,
/// which provides identity and health check capabilities.
#[async_trait]
pub trait StoreBackend: Send + Sync + 'static {
    /// Returns the human-readable name of this backend.
    fn name(&self) -> &str;

    /// Returns the semantic version of this backend.
    fn version(&self) -> semver::Version;

    /// Performs a health check and returns the backend's current status.
    async fn health_check(&self) -> Result<HealthStatus, SitedeskError>;
}
