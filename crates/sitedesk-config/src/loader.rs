// SPDX-FileCopyrightText: 2026 Sitedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./sitedesk.toml` > `~/.config/sitedesk/sitedesk.toml`
//! > `/etc/sitedesk/sitedesk.toml` with environment variable overrides via
//! `SITEDESK_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::SitedeskConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/sitedesk/sitedesk.toml` (system-wide)
/// 3. `~/.config/sitedesk/sitedesk.toml` (user XDG config)
/// 4. `./sitedesk.toml` (local directory)
/// 5. `SITEDESK_*` environment variables
pub fn load_config() -> Result<SitedeskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SitedeskConfig::default()))
        .merge(Toml::file("/etc/sitedesk/sitedesk.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("sitedesk/sitedesk.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("sitedesk.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<SitedeskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SitedeskConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<SitedeskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SitedeskConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// CRITICAL: Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity
/// with underscore-containing key names. For example,
/// `SITEDESK_STORE_BASE_URL` must map to `store.base_url`, not
/// `store.base.url`.
fn env_provider() -> Env {
    Env::prefixed("SITEDESK_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: SITEDESK_STORE_API_KEY -> "store_api_key"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("store_", "store.", 1)
            .replacen("services_", "services.", 1);
        mapped.into()
    })
}
