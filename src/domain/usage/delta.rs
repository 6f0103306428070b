//! Increments recorded after a successful action.

use serde::{Deserialize, Serialize};

use crate::domain::admission::{ActionRequest, AdmissionDecision};

/// Counter increments for one completed action.
///
/// Estimated and actual token counts are kept apart: the estimate comes from
/// the admission decision, the actual count from the AI backend's response
/// when it reports one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageDelta {
    pub items_created: u64,
    pub stream_minutes: u64,
    pub web_lookups: u64,
    pub chat_messages: u64,
    pub tokens_estimated: u64,
    pub tokens_actual: u64,
    pub chat_tokens_estimated: u64,
    pub chat_tokens_actual: u64,
}

impl UsageDelta {
    /// Builds the increments for a completed action.
    pub fn for_action(
        request: &ActionRequest,
        decision: &AdmissionDecision,
        actual_tokens: Option<u64>,
    ) -> Self {
        let estimated = decision.estimated_tokens.unwrap_or(0);
        let actual = actual_tokens.unwrap_or(0);
        let tokens = Self {
            tokens_estimated: estimated,
            tokens_actual: actual,
            ..Self::default()
        };

        match request {
            ActionRequest::CreateItem { .. } => Self {
                items_created: 1,
                ..tokens
            },
            ActionRequest::GenerateChatReply { .. } => Self {
                chat_messages: 1,
                chat_tokens_estimated: estimated,
                chat_tokens_actual: actual,
                ..tokens
            },
            ActionRequest::RunWebLookup => Self {
                web_lookups: 1,
                ..tokens
            },
            ActionRequest::StreamIngest { minutes } => Self {
                stream_minutes: u64::from(*minutes),
                ..tokens
            },
            ActionRequest::DeriveArtifact { .. } => tokens,
        }
    }

    /// Tokens charged against the period budget.
    pub fn charged_tokens(&self) -> u64 {
        self.tokens_estimated.max(self.tokens_actual)
    }
}
