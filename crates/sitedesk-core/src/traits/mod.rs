// SPDX-FileCopyrightText: 2026 Sitedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Store trait definitions.
//!
//! `StoreBackend` provides identity and health checking; `TableStore`
//! adds the four single-table row operations the entity services depend
//! on. Services receive an `Arc<dyn TableStore>`, so the same service
//! logic runs against the hosted store in production and an in-memory
//! fixture in tests.

pub mod backend;
pub mod table;

pub use backend::StoreBackend;
pub use table::TableStore;
