//! In-memory usage store implementation.
//!
//! Useful for development, tests and single-server deployments that can
//! afford to lose counters on restart. Every `record` call runs under one
//! write lock, so increments are never lost, but a snapshot read before the
//! lock can still be stale by the time the increment lands.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{BillingPeriod, UserId};
use crate::domain::plan::PlanTier;
use crate::domain::usage::{UsageDelta, UsageLedger};
use crate::ports::{UsageStore, UsageStoreError};

/// In-memory implementation of the UsageStore port.
///
/// # Example
///
/// ```ignore
/// let store = InMemoryUsageStore::new();
/// let period = BillingPeriod::current();
///
/// store.record(&user_id, period, PlanTier::Free, &delta).await?;
/// let snapshot = store.snapshot(&user_id, period).await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryUsageStore {
    ledgers: Arc<RwLock<HashMap<(UserId, BillingPeriod), UsageLedger>>>,
}

impl InMemoryUsageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a ledger, for seeding tests.
    pub async fn insert(&self, ledger: UsageLedger) {
        let mut ledgers = self.ledgers.write().await;
        ledgers.insert((ledger.user_id.clone(), ledger.period), ledger);
    }

    /// Number of ledgers held.
    pub async fn len(&self) -> usize {
        self.ledgers.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.ledgers.read().await.is_empty()
    }

    /// Drops every ledger.
    pub async fn clear(&self) {
        self.ledgers.write().await.clear();
    }
}

#[async_trait]
impl UsageStore for InMemoryUsageStore {
    async fn ledger(
        &self,
        user_id: &UserId,
        period: BillingPeriod,
    ) -> Result<Option<UsageLedger>, UsageStoreError> {
        let ledgers = self.ledgers.read().await;
        Ok(ledgers.get(&(user_id.clone(), period)).cloned())
    }

    async fn record(
        &self,
        user_id: &UserId,
        period: BillingPeriod,
        plan: PlanTier,
        delta: &UsageDelta,
    ) -> Result<UsageLedger, UsageStoreError> {
        let mut ledgers = self.ledgers.write().await;
        let ledger = ledgers
            .entry((user_id.clone(), period))
            .or_insert_with(|| UsageLedger::open(user_id.clone(), period, plan));
        ledger.apply(delta);
        Ok(ledger.clone())
    }

    async fn reset(&self, user_id: &UserId, period: BillingPeriod) -> Result<(), UsageStoreError> {
        let mut ledgers = self.ledgers.write().await;
        ledgers.remove(&(user_id.clone(), period));
        Ok(())
    }
}
