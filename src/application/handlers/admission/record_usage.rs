//! RecordUsageHandler - Command handler charging a completed action.
//!
//! Called after the AI backend returns successfully. The charge is built
//! from the admitted decision's estimate and the token count the backend
//! reported, if any.

use std::sync::Arc;

use crate::application::GateError;
use crate::domain::admission::{ActionRequest, AdmissionDecision};
use crate::domain::foundation::{BillingPeriod, UserId};
use crate::domain::plan::PlanTier;
use crate::domain::usage::{UsageDelta, UsageLedger};
use crate::ports::UsageStore;

/// Command to record usage for a completed action.
#[derive(Debug, Clone)]
pub struct RecordUsageCommand {
    pub user_id: UserId,
    pub period: BillingPeriod,
    /// Tier the action was admitted under.
    pub tier: PlanTier,
    pub request: ActionRequest,
    pub decision: AdmissionDecision,
    /// Tokens the AI backend reported, when it reports usage.
    pub actual_tokens: Option<u64>,
}

/// Result of recording usage.
#[derive(Debug, Clone)]
pub struct RecordUsageResult {
    pub delta: UsageDelta,
    pub ledger: UsageLedger,
}

/// Handler for recording usage.
pub struct RecordUsageHandler {
    usage: Arc<dyn UsageStore>,
}

impl RecordUsageHandler {
    pub fn new(usage: Arc<dyn UsageStore>) -> Self {
        Self { usage }
    }

    pub async fn handle(&self, cmd: RecordUsageCommand) -> Result<RecordUsageResult, GateError> {
        if cmd.decision.is_denied() {
            return Err(GateError::NotAdmitted(cmd.decision.reason));
        }

        let delta = UsageDelta::for_action(&cmd.request, &cmd.decision, cmd.actual_tokens);

        let ledger = self
            .usage
            .record(&cmd.user_id, cmd.period, cmd.tier, &delta)
            .await
            .map_err(|e| {
                tracing::warn!(user_id = %cmd.user_id, "Failed to record usage: {}", e);
                e
            })?;

        tracing::debug!(
            user_id = %cmd.user_id,
            period = %cmd.period,
            action = %cmd.request.kind(),
            charged_tokens = delta.charged_tokens(),
            "Usage recorded"
        );

        Ok(RecordUsageResult { delta, ledger })
    }
}
