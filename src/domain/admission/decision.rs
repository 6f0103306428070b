//! Admission decisions.
//!
//! A denial is an expected outcome, not an error: it is returned as a value
//! carrying a closed reason and an optional remediation the UI can act on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why an action was denied.
///
/// Closed set. A new denial cause gets a new variant; reusing an existing one
/// would make the caller's remediation messaging ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    /// A per-period count (items, stream minutes, web lookups) is used up.
    PeriodCountExhausted,
    TooManySources,
    /// A single request exceeds the per-item ceiling.
    ItemTooLarge,
    /// The period token budget cannot absorb the estimated cost.
    PeriodBudgetExhausted,
    MessageTooLarge,
}

impl DenialReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DenialReason::PeriodCountExhausted => "period_count_exhausted",
            DenialReason::TooManySources => "too_many_sources",
            DenialReason::ItemTooLarge => "item_too_large",
            DenialReason::PeriodBudgetExhausted => "period_budget_exhausted",
            DenialReason::MessageTooLarge => "message_too_large",
        }
    }
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Suggested way for the subscriber to recover from a denial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemediationHint {
    SplitRequest,
    RemoveSources,
    UpgradePlan,
}

impl RemediationHint {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemediationHint::SplitRequest => "split_request",
            RemediationHint::RemoveSources => "remove_sources",
            RemediationHint::UpgradePlan => "upgrade_plan",
        }
    }
}

/// Outcome of evaluating an action request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionDecision {
    pub allowed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<DenialReason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remediation: Option<RemediationHint>,
    /// Estimated token cost, for token-costed actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_tokens: Option<u64>,
}

impl AdmissionDecision {
    /// Allows an action with no token estimate.
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
            remediation: None,
            estimated_tokens: None,
        }
    }

    /// Allows an action and carries its estimated cost for later recording.
    pub fn allow_with_estimate(estimated_tokens: u64) -> Self {
        Self::allow().with_estimate(estimated_tokens)
    }

    /// Denies an action.
    pub fn deny(reason: DenialReason, remediation: Option<RemediationHint>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason),
            remediation,
            estimated_tokens: None,
        }
    }

    /// Attaches an estimated cost.
    pub fn with_estimate(mut self, estimated_tokens: u64) -> Self {
        self.estimated_tokens = Some(estimated_tokens);
        self
    }

    pub fn is_allowed(&self) -> bool {
        self.allowed
    }

    pub fn is_denied(&self) -> bool {
        !self.allowed
    }

    /// Converts to a `Result`, with a denial becoming the error.
    pub fn into_result(self) -> Result<Option<u64>, DenialReason> {
        match self.reason {
            Some(reason) if !self.allowed => Err(reason),
            _ => Ok(self.estimated_tokens),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_has_no_reason() {
        let decision = AdmissionDecision::allow();
        assert!(decision.is_allowed());
        assert!(decision.reason.is_none());
        assert!(decision.remediation.is_none());
        assert!(decision.estimated_tokens.is_none());
    }

    #[test]
    fn allow_with_estimate_carries_tokens() {
        let decision = AdmissionDecision::allow_with_estimate(31_000);
        assert_eq!(decision.estimated_tokens, Some(31_000));
        assert_eq!(decision.into_result(), Ok(Some(31_000)));
    }

    #[test]
    fn deny_carries_reason_and_hint() {
        let decision = AdmissionDecision::deny(
            DenialReason::TooManySources,
            Some(RemediationHint::RemoveSources),
        );
        assert!(decision.is_denied());
        assert_eq!(decision.reason, Some(DenialReason::TooManySources));
        assert_eq!(decision.remediation, Some(RemediationHint::RemoveSources));
        assert_eq!(decision.into_result(), Err(DenialReason::TooManySources));
    }

    #[test]
    fn decision_serializes_snake_case_and_skips_empty_fields() {
        let decision = AdmissionDecision::deny(
            DenialReason::PeriodBudgetExhausted,
            Some(RemediationHint::UpgradePlan),
        )
        .with_estimate(12);
        let json = serde_json::to_string(&decision).unwrap();
        assert_eq!(
            json,
            r#"{"allowed":false,"reason":"period_budget_exhausted","remediation":"upgrade_plan","estimated_tokens":12}"#
        );

        let json = serde_json::to_string(&AdmissionDecision::allow()).unwrap();
        assert_eq!(json, r#"{"allowed":true}"#);
    }

    #[test]
    fn reason_as_str_matches_serde() {
        for reason in [
            DenialReason::PeriodCountExhausted,
            DenialReason::TooManySources,
            DenialReason::ItemTooLarge,
            DenialReason::PeriodBudgetExhausted,
            DenialReason::MessageTooLarge,
        ] {
            let json = serde_json::to_string(&reason).unwrap();
            assert_eq!(json, format!("\"{}\"", reason.as_str()));
        }
    }
}
