//! CheckActionHandler - Query handler deciding whether an action may proceed.
//!
//! Order of checks: request validation, short-window throttling, then the
//! admission engine against the subscriber's tier and current-period usage.

use std::sync::Arc;

use crate::application::{GateError, LimitResponse};
use crate::domain::admission::{ActionRequest, AdmissionDecision, AdmissionEngine};
use crate::domain::foundation::{BillingPeriod, UserId};
use crate::domain::plan::PlanTier;
use crate::domain::usage::UsageSnapshot;
use crate::ports::{
    PlanResolver, RateLimitDenied, RateLimitKey, RateLimitResult, RateLimiter, UsageStore,
};

/// Query to check whether a subscriber may perform an action.
#[derive(Debug, Clone)]
pub struct CheckActionQuery {
    pub user_id: UserId,
    pub period: BillingPeriod,
    pub request: ActionRequest,
}

impl CheckActionQuery {
    /// Query against the current billing period.
    pub fn new(user_id: UserId, request: ActionRequest) -> Self {
        Self {
            user_id,
            period: BillingPeriod::current(),
            request,
        }
    }

    pub fn for_period(mut self, period: BillingPeriod) -> Self {
        self.period = period;
        self
    }
}

/// Outcome of an action check.
#[derive(Debug, Clone)]
pub enum CheckActionOutcome {
    /// Throttled before reaching the engine.
    RateLimited(RateLimitDenied),
    /// Evaluated by the engine; the decision may still be a denial.
    Evaluated {
        tier: PlanTier,
        snapshot: UsageSnapshot,
        decision: AdmissionDecision,
    },
}

impl CheckActionOutcome {
    /// Returns true if the caller may go on to call the AI backend.
    pub fn is_admitted(&self) -> bool {
        matches!(self, CheckActionOutcome::Evaluated { decision, .. } if decision.is_allowed())
    }

    pub fn decision(&self) -> Option<&AdmissionDecision> {
        match self {
            CheckActionOutcome::Evaluated { decision, .. } => Some(decision),
            CheckActionOutcome::RateLimited(_) => None,
        }
    }

    /// Client payload for a throttled or denied action.
    pub fn limit_response(&self) -> Option<LimitResponse> {
        match self {
            CheckActionOutcome::RateLimited(denied) => Some(LimitResponse::rate_limited(denied)),
            CheckActionOutcome::Evaluated { decision, .. } => LimitResponse::from_decision(decision),
        }
    }
}

/// Handler for checking whether an action is admitted.
pub struct CheckActionHandler {
    engine: Arc<AdmissionEngine>,
    plans: Arc<dyn PlanResolver>,
    usage: Arc<dyn UsageStore>,
    rate_limiter: Option<Arc<dyn RateLimiter>>,
}

impl CheckActionHandler {
    pub fn new(
        engine: Arc<AdmissionEngine>,
        plans: Arc<dyn PlanResolver>,
        usage: Arc<dyn UsageStore>,
    ) -> Self {
        Self {
            engine,
            plans,
            usage,
            rate_limiter: None,
        }
    }

    /// Throttle requests with `limiter` before evaluating them.
    pub fn with_rate_limiter(mut self, limiter: Arc<dyn RateLimiter>) -> Self {
        self.rate_limiter = Some(limiter);
        self
    }

    pub async fn handle(&self, query: CheckActionQuery) -> Result<CheckActionOutcome, GateError> {
        query.request.validate()?;
        let action = query.request.kind();

        if let Some(limiter) = &self.rate_limiter {
            let key = RateLimitKey::user_action(&query.user_id, action);
            match limiter.check(key).await {
                Ok(RateLimitResult::Denied(denied)) => {
                    tracing::info!(
                        user_id = %query.user_id,
                        action = %action,
                        retry_after_secs = denied.retry_after_secs,
                        "Action rate limited"
                    );
                    return Ok(CheckActionOutcome::RateLimited(denied));
                }
                Ok(RateLimitResult::Allowed(_)) => {}
                Err(e) => {
                    // Fail open
                    tracing::warn!("Rate limiter unavailable: {}", e);
                }
            }
        }

        let tier = self.plans.resolve(&query.user_id).await?;
        let snapshot = self.usage.snapshot(&query.user_id, query.period).await?;
        let decision = self.engine.evaluate(tier, &snapshot, &query.request);

        if let Some(reason) = decision.reason {
            tracing::info!(
                user_id = %query.user_id,
                tier = %tier,
                action = %action,
                reason = %reason,
                estimated_tokens = ?decision.estimated_tokens,
                "Action denied"
            );
        }

        Ok(CheckActionOutcome::Evaluated {
            tier,
            snapshot,
            decision,
        })
    }
}
