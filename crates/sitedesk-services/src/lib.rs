// SPDX-FileCopyrightText: 2026 Sitedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Entity services for the Sitedesk back office.
//!
//! One module per entity kind, each holding the pure record adapters
//! (store row shape ↔ entity shape) and the service struct that issues
//! the store calls. Services are the only components that touch the
//! store; callers hold their own disposable lists and reconcile them
//! from what the services return.

pub mod crews;
pub mod documents;
pub mod messages;
mod record;
pub mod sites;
pub mod todos;
pub mod tools;

use std::sync::Arc;

use sitedesk_config::ServicesConfig;
use sitedesk_core::TableStore;

pub use crews::CrewService;
pub use documents::DocumentService;
pub use messages::MessageService;
pub use sites::SiteService;
pub use todos::TodoService;
pub use tools::ToolService;

/// All entity services wired to one store backend.
///
/// The per-entity list policies come from configuration, keeping the
/// inherited fail-soft/fail-loud split adjustable without code changes.
pub struct Services {
    pub documents: DocumentService,
    pub messages: MessageService,
    pub sites: SiteService,
    pub tools: ToolService,
    pub crews: CrewService,
    pub todos: TodoService,
}

impl Services {
    /// Wires every service to `store` with the policies in `config`.
    pub fn from_config(store: Arc<dyn TableStore>, config: &ServicesConfig) -> Self {
        Self {
            documents: DocumentService::new(store.clone())
                .with_list_policy(config.documents_list),
            messages: MessageService::new(store.clone())
                .with_list_policy(config.messages_list),
            sites: SiteService::new(store.clone()).with_list_policy(config.sites_list),
            tools: ToolService::new(store.clone()).with_list_policy(config.tools_list),
            crews: CrewService::new(store.clone()).with_list_policy(config.crews_list),
            todos: TodoService::new(store).with_list_policy(config.todos_list),
        }
    }
}
