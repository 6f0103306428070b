//! Plan resolver backed by an in-memory map of subscription statuses.
//!
//! Statuses are the raw strings stored on the subscriber profile, including
//! legacy values, and are mapped leniently to a tier on every lookup.
//!
//! # Usage
//!
//! ```ignore
//! use study_gate::adapters::plan::StaticPlanResolver;
//!
//! let resolver = StaticPlanResolver::new();
//! resolver.set_status(&user_id, "premium").await;
//! assert_eq!(resolver.resolve(&user_id).await?, PlanTier::Pro);
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::plan::PlanTier;
use crate::ports::PlanResolver;

/// PlanResolver over a map of user ID to subscription status.
#[derive(Debug, Clone, Default)]
pub struct StaticPlanResolver {
    statuses: Arc<RwLock<HashMap<UserId, String>>>,
}

impl StaticPlanResolver {
    /// Creates a resolver where every subscriber is on Free.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the stored subscription status for a subscriber.
    pub async fn set_status(&self, user_id: &UserId, status: impl Into<String>) {
        let mut statuses = self.statuses.write().await;
        statuses.insert(user_id.clone(), status.into());
    }

    /// Sets a subscriber's tier directly.
    pub async fn set_tier(&self, user_id: &UserId, tier: PlanTier) {
        self.set_status(user_id, tier.as_str()).await;
    }

    /// Removes a subscriber's status, returning them to Free.
    pub async fn clear_status(&self, user_id: &UserId) {
        self.statuses.write().await.remove(user_id);
    }
}

#[async_trait]
impl PlanResolver for StaticPlanResolver {
    async fn resolve(&self, user_id: &UserId) -> Result<PlanTier, DomainError> {
        let statuses = self.statuses.read().await;
        Ok(PlanTier::from_subscription_status(
            statuses.get(user_id).map(String::as_str),
        ))
    }
}
