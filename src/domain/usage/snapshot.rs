//! Read-only view of a subscriber's consumption this billing period.

use serde::{Deserialize, Serialize};

/// Counters consumed so far in the current billing period.
///
/// Owned by the persistence boundary and handed to the engine read-only.
/// Absent fields deserialize as zero, so a subscriber without a persisted
/// record yet evaluates against an empty snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageSnapshot {
    pub items_created: u64,
    pub stream_minutes_used: u64,
    pub web_lookups_used: u64,
    pub chat_messages_used: u64,
    pub tokens_used_total: u64,
    pub chat_tokens_used: u64,
}

impl UsageSnapshot {
    /// A snapshot with every counter at zero.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if nothing has been consumed this period.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
