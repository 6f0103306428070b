//! User-facing payload for a denied or throttled action.
//!
//! Maps the engine's closed reason and remediation vocabularies to copy and
//! to action identifiers the client knows how to render.

use serde::{Deserialize, Serialize};

use crate::domain::admission::{AdmissionDecision, DenialReason, RemediationHint};
use crate::ports::RateLimitDenied;

/// Reason identifier used for throttled requests.
pub const RATE_LIMITED: &str = "rate_limited";

/// Body returned to the client when an action cannot proceed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitResponse {
    pub reason: String,
    pub message: String,
    pub actions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_after_secs: Option<u32>,
}

impl LimitResponse {
    /// Builds the response for a denied decision, or `None` if it was allowed.
    pub fn from_decision(decision: &AdmissionDecision) -> Option<Self> {
        let reason = decision.reason.filter(|_| decision.is_denied())?;
        Some(Self {
            reason: reason.as_str().to_string(),
            message: message_for(reason).to_string(),
            actions: decision
                .remediation
                .map(|hint| vec![action_for(hint).to_string()])
                .unwrap_or_default(),
            retry_after_secs: None,
        })
    }

    /// Builds the response for a throttled request.
    pub fn rate_limited(denied: &RateLimitDenied) -> Self {
        Self {
            reason: RATE_LIMITED.to_string(),
            message: "Too many requests in a short time. Try again in a moment.".to_string(),
            actions: Vec::new(),
            retry_after_secs: Some(denied.retry_after_secs),
        }
    }
}

fn message_for(reason: DenialReason) -> &'static str {
    match reason {
        DenialReason::PeriodCountExhausted => "You have reached your plan's monthly limit.",
        DenialReason::TooManySources => "Your plan allows fewer sources per study guide.",
        DenialReason::ItemTooLarge => "This request is too large. Split it into smaller parts.",
        DenialReason::PeriodBudgetExhausted => {
            "You have used up your plan's monthly token budget."
        }
        DenialReason::MessageTooLarge => "Split your question into smaller parts to continue.",
    }
}

fn action_for(hint: RemediationHint) -> &'static str {
    match hint {
        RemediationHint::SplitRequest => "split_request",
        RemediationHint::RemoveSources => "remove_sources",
        RemediationHint::UpgradePlan => "view_plans",
    }
}
