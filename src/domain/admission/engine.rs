//! Admission engine.
//!
//! Decides whether a subscriber may perform an action before any call to the
//! AI backend is made. Evaluation depends only on its arguments plus the
//! catalog and estimator the engine was built with; it keeps no state between
//! calls and performs no I/O.

use crate::domain::plan::{PlanCatalog, PlanLimits, PlanTier, TaskKind};
use crate::domain::usage::UsageSnapshot;

use super::{
    ActionRequest, AdmissionDecision, ArtifactInput, ArtifactKind, ChatTurn, DenialReason,
    RemediationHint, SourceDescriptor, TokenEstimator,
};

/// Evaluates action requests against a plan catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct AdmissionEngine {
    catalog: PlanCatalog,
    estimator: TokenEstimator,
}

impl AdmissionEngine {
    pub fn new(catalog: PlanCatalog, estimator: TokenEstimator) -> Self {
        Self { catalog, estimator }
    }

    /// Engine over the standard catalog and default estimation constants.
    pub fn standard() -> Self {
        Self::new(PlanCatalog::standard(), TokenEstimator::default())
    }

    pub fn catalog(&self) -> &PlanCatalog {
        &self.catalog
    }

    pub fn estimator(&self) -> &TokenEstimator {
        &self.estimator
    }

    /// Decides whether `request` is admitted for a subscriber on `tier` with
    /// the given consumption so far this period.
    ///
    /// Checks run in a fixed order per action kind and the first failing check
    /// produces the decision.
    pub fn evaluate(
        &self,
        tier: PlanTier,
        snapshot: &UsageSnapshot,
        request: &ActionRequest,
    ) -> AdmissionDecision {
        let limits = self.catalog.limits_for(tier);

        let decision = match request {
            ActionRequest::CreateItem { sources } => self.create_item(limits, snapshot, sources),
            ActionRequest::StreamIngest { minutes } => {
                Self::stream_ingest(limits, snapshot, u64::from(*minutes))
            }
            ActionRequest::RunWebLookup => Self::run_web_lookup(limits, snapshot),
            ActionRequest::GenerateChatReply { history, message } => {
                self.generate_chat_reply(limits, snapshot, history, message)
            }
            ActionRequest::DeriveArtifact { artifact, input } => {
                self.derive_artifact(limits, snapshot, *artifact, input)
            }
        };

        tracing::debug!(
            tier = %tier,
            action = %request.kind(),
            allowed = decision.allowed,
            reason = ?decision.reason,
            estimated_tokens = ?decision.estimated_tokens,
            "Admission evaluated"
        );

        decision
    }

    fn create_item(
        &self,
        limits: &PlanLimits,
        snapshot: &UsageSnapshot,
        sources: &[SourceDescriptor],
    ) -> AdmissionDecision {
        if snapshot.items_created >= limits.max_items_per_period {
            return AdmissionDecision::deny(
                DenialReason::PeriodCountExhausted,
                Some(RemediationHint::UpgradePlan),
            );
        }

        if sources.len() as u64 > limits.max_sources_per_item {
            return AdmissionDecision::deny(
                DenialReason::TooManySources,
                Some(RemediationHint::RemoveSources),
            );
        }

        let chars = self.estimator.total_source_chars(sources);
        let estimated = self.estimator.estimate(chars, limits, TaskKind::Guide);

        if estimated > limits.max_tokens_per_item {
            return AdmissionDecision::deny(
                DenialReason::ItemTooLarge,
                Some(RemediationHint::SplitRequest),
            )
            .with_estimate(estimated);
        }

        if exceeds(snapshot.tokens_used_total, estimated, limits.max_tokens_per_period) {
            return AdmissionDecision::deny(
                DenialReason::PeriodBudgetExhausted,
                Some(RemediationHint::UpgradePlan),
            )
            .with_estimate(estimated);
        }

        AdmissionDecision::allow_with_estimate(estimated)
    }

    fn stream_ingest(limits: &PlanLimits, snapshot: &UsageSnapshot, minutes: u64) -> AdmissionDecision {
        if minutes > limits.max_stream_minutes_per_item {
            return AdmissionDecision::deny(DenialReason::ItemTooLarge, None);
        }

        if exceeds(
            snapshot.stream_minutes_used,
            minutes,
            limits.max_stream_minutes_per_period,
        ) {
            return AdmissionDecision::deny(
                DenialReason::PeriodCountExhausted,
                Some(RemediationHint::UpgradePlan),
            );
        }

        AdmissionDecision::allow()
    }

    fn run_web_lookup(limits: &PlanLimits, snapshot: &UsageSnapshot) -> AdmissionDecision {
        if snapshot.web_lookups_used >= limits.max_web_lookups_per_period {
            return AdmissionDecision::deny(
                DenialReason::PeriodCountExhausted,
                Some(RemediationHint::UpgradePlan),
            );
        }
        AdmissionDecision::allow()
    }

    fn generate_chat_reply(
        &self,
        limits: &PlanLimits,
        snapshot: &UsageSnapshot,
        history: &[ChatTurn],
        message: &str,
    ) -> AdmissionDecision {
        let chars = self.estimator.chat_chars(history, message);
        let estimated = self.estimator.estimate(chars, limits, TaskKind::Chat);

        if estimated > limits.max_tokens_per_chat_message {
            return AdmissionDecision::deny(DenialReason::MessageTooLarge, None)
                .with_estimate(estimated);
        }

        if exceeds(snapshot.chat_tokens_used, estimated, limits.chat_tokens_per_period())
            || exceeds(snapshot.tokens_used_total, estimated, limits.max_tokens_per_period)
        {
            return AdmissionDecision::deny(
                DenialReason::PeriodBudgetExhausted,
                Some(RemediationHint::UpgradePlan),
            )
            .with_estimate(estimated);
        }

        AdmissionDecision::allow_with_estimate(estimated)
    }

    fn derive_artifact(
        &self,
        limits: &PlanLimits,
        snapshot: &UsageSnapshot,
        artifact: ArtifactKind,
        input: &ArtifactInput,
    ) -> AdmissionDecision {
        let chars = match input {
            ArtifactInput::Text(text) => super::char_count(text),
            ArtifactInput::Sources(sources) => self.estimator.joined_source_chars(sources),
        };
        let estimated = self.estimator.estimate(chars, limits, artifact.task_kind());

        if exceeds(snapshot.tokens_used_total, estimated, limits.max_tokens_per_period) {
            return AdmissionDecision::deny(
                DenialReason::PeriodBudgetExhausted,
                Some(RemediationHint::UpgradePlan),
            )
            .with_estimate(estimated);
        }

        AdmissionDecision::allow_with_estimate(estimated)
    }
}

impl Default for AdmissionEngine {
    fn default() -> Self {
        Self::standard()
    }
}

/// Returns true if adding `amount` to `used` would go past `ceiling`.
fn exceeds(used: u64, amount: u64, ceiling: u64) -> bool {
    used.saturating_add(amount) > ceiling
}
