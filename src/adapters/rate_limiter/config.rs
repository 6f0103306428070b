//! Rate limit configuration types.
//!
//! One fixed window shared by every action, with a per-action request limit.
//! Callers keyed by IP get the same limits as subscribers.

use serde::{Deserialize, Serialize};

use crate::domain::admission::ActionKind;

/// Complete rate limit configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Window duration in seconds.
    pub window_secs: u32,
    /// Limits by action, for any key scope.
    pub per_action: ActionRateLimits,
}

/// Requests allowed per window for each action kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionRateLimits {
    pub create_item: u32,
    pub generate_chat_reply: u32,
    pub run_web_lookup: u32,
    pub stream_ingest: u32,
    pub derive_artifact: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_secs: 60,
            per_action: ActionRateLimits::default(),
        }
    }
}

impl Default for ActionRateLimits {
    /// | Guide | Chat | Web | Stream | Quiz/flashcards |
    /// |-------|------|-----|--------|-----------------|
    /// | 10    | 30   | 10  | 10     | 10              |
    fn default() -> Self {
        Self {
            create_item: 10,
            generate_chat_reply: 30,
            run_web_lookup: 10,
            stream_ingest: 10,
            derive_artifact: 10,
        }
    }
}

impl ActionRateLimits {
    /// Requests per window for an action.
    pub fn limit_for(&self, action: ActionKind) -> u32 {
        match action {
            ActionKind::CreateItem => self.create_item,
            ActionKind::GenerateChatReply => self.generate_chat_reply,
            ActionKind::RunWebLookup => self.run_web_lookup,
            ActionKind::StreamIngest => self.stream_ingest,
            ActionKind::DeriveArtifact => self.derive_artifact,
        }
    }
}
