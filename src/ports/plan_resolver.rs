//! PlanResolver port - which tier a subscriber is on.
//!
//! Subscription state lives with the payment processor and the persisted
//! profile; the engine only needs the resulting [`PlanTier`].

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::plan::PlanTier;

/// Resolves a subscriber's current plan tier.
#[async_trait]
pub trait PlanResolver: Send + Sync {
    /// Returns the subscriber's tier.
    ///
    /// Subscribers with no subscription record resolve to [`PlanTier::Free`].
    async fn resolve(&self, user_id: &UserId) -> Result<PlanTier, DomainError>;
}
