// SPDX-FileCopyrightText: 2026 Sitedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Sitedesk back office.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};
use sitedesk_core::ListPolicy;

/// Top-level Sitedesk configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SitedeskConfig {
    /// Hosted store connection settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Per-entity service policy settings.
    #[serde(default)]
    pub services: ServicesConfig,
}

/// Hosted store connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Base URL of the store's REST row API
    /// (e.g. `https://project.example.co/rest/v1`). `None` disables the
    /// hosted store; tests run against an in-memory backend instead.
    #[serde(default)]
    pub base_url: Option<String>,

    /// API key sent as both the `apikey` and bearer authorization header.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

/// Failure policy for each entity service's `list` operation.
///
/// The fail-soft/fail-loud split is inherited from the source system
/// (library reads are best-effort, everything else is critical) and is
/// kept configurable pending product-owner confirmation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServicesConfig {
    #[serde(default = "default_fail_soft")]
    pub documents_list: ListPolicy,

    #[serde(default = "default_fail_loud")]
    pub messages_list: ListPolicy,

    #[serde(default = "default_fail_loud")]
    pub sites_list: ListPolicy,

    #[serde(default = "default_fail_loud")]
    pub tools_list: ListPolicy,

    #[serde(default = "default_fail_loud")]
    pub crews_list: ListPolicy,

    #[serde(default = "default_fail_loud")]
    pub todos_list: ListPolicy,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            documents_list: default_fail_soft(),
            messages_list: default_fail_loud(),
            sites_list: default_fail_loud(),
            tools_list: default_fail_loud(),
            crews_list: default_fail_loud(),
            todos_list: default_fail_loud(),
        }
    }
}

fn default_fail_soft() -> ListPolicy {
    ListPolicy::FailSoft
}

fn default_fail_loud() -> ListPolicy {
    ListPolicy::FailLoud
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_policies() {
        let config = SitedeskConfig::default();
        assert_eq!(config.services.documents_list, ListPolicy::FailSoft);
        assert_eq!(config.services.messages_list, ListPolicy::FailLoud);
        assert_eq!(config.services.sites_list, ListPolicy::FailLoud);
        assert_eq!(config.store.timeout_secs, 30);
        assert!(config.store.base_url.is_none());
    }

    #[test]
    fn toml_overrides_list_policy() {
        let toml_str = r#"
[services]
documents_list = "fail-loud"
todos_list = "fail-soft"
"#;
        let config: SitedeskConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.services.documents_list, ListPolicy::FailLoud);
        assert_eq!(config.services.todos_list, ListPolicy::FailSoft);
        // Untouched sections keep their defaults.
        assert_eq!(config.services.sites_list, ListPolicy::FailLoud);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let toml_str = r#"
[store]
base_url = "https://example.test/rest/v1"
unknown_knob = true
"#;
        assert!(toml::from_str::<SitedeskConfig>(toml_str).is_err());
    }
}
