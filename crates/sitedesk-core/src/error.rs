// SPDX-FileCopyrightText: 2026 Sitedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Sitedesk data-access layer.

use thiserror::Error;

/// The primary error type used across the store traits and entity services.
#[derive(Debug, Error)]
pub enum SitedeskError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Remote store errors (transport failure, permission, constraint violation).
    ///
    /// Carries the table and operation the call was issued for so failures
    /// stay attributable after crossing service boundaries.
    #[error("store error during {operation} on {table}: {message}")]
    Store {
        table: String,
        operation: String,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The store call succeeded but returned no row where one was expected
    /// (e.g. an insert with `return=representation` yielding an empty array).
    #[error("{operation} on {table} returned no row")]
    EmptyResult { table: String, operation: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
