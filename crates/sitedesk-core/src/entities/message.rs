// SPDX-FileCopyrightText: 2026 Sitedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Union board messages with a free-transition status and a vote tally.

use strum::{Display, EnumString};

/// Review status of a union message.
///
/// Every transition between any two states is permitted, and transitions
/// happen only through `update` — no timers, no automatic moves. Unknown
/// store values pass through in [`MessageStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum MessageStatus {
    New,
    InReview,
    Resolved,
    #[strum(default, to_string = "{0}")]
    Other(String),
}

/// One vote on a message: a voter reference and a +1/-1 value.
///
/// The store keeps votes as a JSON array column in insertion order.
/// At-most-one-vote-per-voter is not enforced at this layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    pub voter_id: String,
    pub value: i64,
}

/// A message on the union board.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionMessage {
    pub id: String,
    pub author_id: String,
    pub body: String,
    pub status: MessageStatus,
    pub votes: Vec<Vote>,
    pub created_at: String,
}

/// Fields for posting a message. Leaving `status` unset lets the store
/// column default (`new`) apply.
#[derive(Debug, Clone)]
pub struct NewUnionMessage {
    pub author_id: String,
    pub body: String,
    pub status: Option<MessageStatus>,
}

/// Sparse update for a message. `votes` replaces the whole collection
/// when present — the store column is a single JSON array.
#[derive(Debug, Clone, Default)]
pub struct UnionMessagePatch {
    pub body: Option<String>,
    pub status: Option<MessageStatus>,
    pub votes: Option<Vec<Vote>>,
}
