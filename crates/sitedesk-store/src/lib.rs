// SPDX-FileCopyrightText: 2026 Sitedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hosted store backend for the Sitedesk back office.
//!
//! Implements [`sitedesk_core::TableStore`] over the hosted relational
//! store's REST row API. Authentication, request timeout, and
//! transient-error retry are handled here at the transport; the entity
//! services above issue exactly one logical operation per call.

pub mod rest;

pub use rest::RestStore;
