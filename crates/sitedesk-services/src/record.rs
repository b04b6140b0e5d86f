// SPDX-FileCopyrightText: 2026 Sitedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared helpers for reading store records and building outgoing ones.
//!
//! Reads are total: a missing key, a JSON null, and a wrongly-typed value
//! all map to the entity-side "absent" representation. Writes only ever
//! insert keys that were explicitly supplied, which is what keeps insert
//! records default-friendly and patches sparse.

use serde_json::Value;
use sitedesk_core::Record;

/// Required text column; missing or null reads as empty.
pub(crate) fn str_field(record: &Record, key: &str) -> String {
    record
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Optional text column; missing and null both read as `None`.
pub(crate) fn opt_str_field(record: &Record, key: &str) -> Option<String> {
    record.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Optional integer column.
pub(crate) fn opt_i32_field(record: &Record, key: &str) -> Option<i32> {
    record
        .get(key)
        .and_then(Value::as_i64)
        .and_then(|n| i32::try_from(n).ok())
}

/// Boolean column; missing and null read as false.
pub(crate) fn bool_field(record: &Record, key: &str) -> bool {
    record.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// Inserts `key` only when the caller supplied a value.
pub(crate) fn put_opt(record: &mut Record, key: &str, value: Option<Value>) {
    if let Some(value) = value {
        record.insert(key.to_string(), value);
    }
}
