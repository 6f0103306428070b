//! UsageStore port - persistence of per-period usage ledgers.
//!
//! The admission engine only reads snapshots; this port is where counters are
//! read before evaluation and incremented after a successful AI call.
//!
//! # Concurrency
//!
//! Reading a snapshot and recording a delta are separate calls. Two requests
//! admitted against the same snapshot both pass, so a period budget can be
//! overspent by whatever was in flight. Implementations must at least make
//! each `record` call atomic so no increment is lost.

use async_trait::async_trait;

use crate::domain::foundation::{BillingPeriod, UserId};
use crate::domain::plan::PlanTier;
use crate::domain::usage::{UsageDelta, UsageLedger, UsageSnapshot};

/// Port for reading and incrementing usage ledgers.
#[async_trait]
pub trait UsageStore: Send + Sync {
    /// Returns the ledger for a subscriber and period, if one was opened.
    async fn ledger(
        &self,
        user_id: &UserId,
        period: BillingPeriod,
    ) -> Result<Option<UsageLedger>, UsageStoreError>;

    /// Adds `delta` to the ledger, opening it under `plan` if missing.
    ///
    /// Returns the ledger after the increment.
    async fn record(
        &self,
        user_id: &UserId,
        period: BillingPeriod,
        plan: PlanTier,
        delta: &UsageDelta,
    ) -> Result<UsageLedger, UsageStoreError>;

    /// Discards the ledger for a subscriber and period.
    async fn reset(&self, user_id: &UserId, period: BillingPeriod) -> Result<(), UsageStoreError>;

    /// Snapshot for the admission engine.
    ///
    /// A subscriber with no ledger yet gets an empty snapshot.
    async fn snapshot(
        &self,
        user_id: &UserId,
        period: BillingPeriod,
    ) -> Result<UsageSnapshot, UsageStoreError> {
        Ok(self
            .ledger(user_id, period)
            .await?
            .map(|ledger| ledger.snapshot())
            .unwrap_or_default())
    }
}

/// Errors from the usage store.
#[derive(Debug, thiserror::Error)]
pub enum UsageStoreError {
    /// Store backend is unavailable.
    #[error("usage store unavailable: {0}")]
    Unavailable(String),

    /// Database error.
    #[error("database error: {0}")]
    Database(String),
}
