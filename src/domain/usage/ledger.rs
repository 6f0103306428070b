//! Persisted usage record for one subscriber and billing period.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{BillingPeriod, Timestamp, UserId};
use crate::domain::plan::PlanTier;

use super::{UsageDelta, UsageSnapshot};

/// Accumulated counters for a subscriber in one billing period.
///
/// Created with all counters at zero when the period starts, incremented
/// after each successful action, and replaced by a fresh ledger at rollover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageLedger {
    pub user_id: UserId,
    pub period: BillingPeriod,
    /// Tier the ledger was opened under.
    pub plan: PlanTier,
    pub items_created: u64,
    pub stream_minutes_used: u64,
    pub web_lookups_used: u64,
    pub chat_messages_used: u64,
    pub tokens_estimated: u64,
    pub tokens_actual: u64,
    pub chat_tokens_estimated: u64,
    pub chat_tokens_actual: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UsageLedger {
    /// Opens an empty ledger.
    pub fn open(user_id: UserId, period: BillingPeriod, plan: PlanTier) -> Self {
        let now = Timestamp::now();
        Self {
            user_id,
            period,
            plan,
            items_created: 0,
            stream_minutes_used: 0,
            web_lookups_used: 0,
            chat_messages_used: 0,
            tokens_estimated: 0,
            tokens_actual: 0,
            chat_tokens_estimated: 0,
            chat_tokens_actual: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Adds a delta to every counter. Counters saturate instead of wrapping.
    pub fn apply(&mut self, delta: &UsageDelta) {
        self.items_created = self.items_created.saturating_add(delta.items_created);
        self.stream_minutes_used = self.stream_minutes_used.saturating_add(delta.stream_minutes);
        self.web_lookups_used = self.web_lookups_used.saturating_add(delta.web_lookups);
        self.chat_messages_used = self.chat_messages_used.saturating_add(delta.chat_messages);
        self.tokens_estimated = self.tokens_estimated.saturating_add(delta.tokens_estimated);
        self.tokens_actual = self.tokens_actual.saturating_add(delta.tokens_actual);
        self.chat_tokens_estimated = self
            .chat_tokens_estimated
            .saturating_add(delta.chat_tokens_estimated);
        self.chat_tokens_actual = self
            .chat_tokens_actual
            .saturating_add(delta.chat_tokens_actual);
        self.updated_at = Timestamp::now();
    }

    /// Snapshot handed to the admission engine.
    ///
    /// Token totals charge the larger of the estimated and actual ledgers.
    pub fn snapshot(&self) -> UsageSnapshot {
        UsageSnapshot {
            items_created: self.items_created,
            stream_minutes_used: self.stream_minutes_used,
            web_lookups_used: self.web_lookups_used,
            chat_messages_used: self.chat_messages_used,
            tokens_used_total: self.tokens_estimated.max(self.tokens_actual),
            chat_tokens_used: self.chat_tokens_estimated.max(self.chat_tokens_actual),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger() -> UsageLedger {
        UsageLedger::open(
            UserId::new("user-1").unwrap(),
            BillingPeriod::new(2025, 2).unwrap(),
            PlanTier::Free,
        )
    }

    #[test]
    fn open_ledger_snapshot_is_empty() {
        assert!(ledger().snapshot().is_empty());
    }

    #[test]
    fn apply_accumulates_counters() {
        let mut ledger = ledger();
        let delta = UsageDelta {
            items_created: 1,
            tokens_estimated: 31_000,
            tokens_actual: 20_000,
            ..UsageDelta::default()
        };
        ledger.apply(&delta);
        ledger.apply(&delta);

        assert_eq!(ledger.items_created, 2);
        assert_eq!(ledger.tokens_estimated, 62_000);
        assert_eq!(ledger.tokens_actual, 40_000);
        assert!(ledger.updated_at >= ledger.created_at);
    }

    #[test]
    fn snapshot_charges_larger_token_ledger() {
        let mut ledger = ledger();
        ledger.apply(&UsageDelta {
            chat_messages: 1,
            tokens_estimated: 1_000,
            tokens_actual: 1_800,
            chat_tokens_estimated: 1_000,
            chat_tokens_actual: 1_800,
            ..UsageDelta::default()
        });
        ledger.apply(&UsageDelta {
            items_created: 1,
            tokens_estimated: 31_000,
            tokens_actual: 9_000,
            ..UsageDelta::default()
        });

        let snapshot = ledger.snapshot();
        assert_eq!(snapshot.tokens_used_total, 32_000);
        assert_eq!(snapshot.chat_tokens_used, 1_800);
        assert_eq!(snapshot.chat_messages_used, 1);
        assert_eq!(snapshot.items_created, 1);
    }

    #[test]
    fn apply_saturates() {
        let mut ledger = ledger();
        ledger.tokens_estimated = u64::MAX - 1;
        ledger.apply(&UsageDelta {
            tokens_estimated: 10,
            ..UsageDelta::default()
        });
        assert_eq!(ledger.tokens_estimated, u64::MAX);
    }
}
