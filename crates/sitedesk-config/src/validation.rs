// SPDX-FileCopyrightText: 2026 Sitedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as URL shape and non-zero timeouts.

use thiserror::Error;

use crate::model::SitedeskConfig;

/// A configuration error surfaced to the caller at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A semantic constraint on a deserialized value failed.
    #[error("{message}")]
    Validation { message: String },

    /// Figment failed to load or deserialize the configuration.
    #[error("failed to load configuration: {0}")]
    Load(#[from] figment::Error),
}

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)`
/// with all collected validation errors (does not fail fast).
pub fn validate_config(config: &SitedeskConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if let Some(base_url) = &config.store.base_url {
        let trimmed = base_url.trim();
        if trimmed.is_empty() {
            errors.push(ConfigError::Validation {
                message: "store.base_url must not be empty when set".to_string(),
            });
        } else if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            errors.push(ConfigError::Validation {
                message: format!("store.base_url `{trimmed}` must start with http:// or https://"),
            });
        }
    }

    if let Some(api_key) = &config.store.api_key
        && api_key.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "store.api_key must not be empty when set".to_string(),
        });
    }

    if config.store.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "store.timeout_secs must be at least 1".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
