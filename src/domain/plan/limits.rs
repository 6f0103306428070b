//! Quota ceilings for a plan tier.
//!
//! Pure data: every dimension the admission engine checks, plus the expected
//! output size per generation task used when estimating token cost.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of generation task, for output-size estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Study guide built from uploaded sources.
    Guide,
    Quiz,
    Flashcards,
    Chat,
}

impl TaskKind {
    pub const ALL: [TaskKind; 4] = [
        TaskKind::Guide,
        TaskKind::Quiz,
        TaskKind::Flashcards,
        TaskKind::Chat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Guide => "guide",
            TaskKind::Quiz => "quiz",
            TaskKind::Flashcards => "flashcards",
            TaskKind::Chat => "chat",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Expected output-size ceiling per task, in tokens.
///
/// Only used to estimate cost before the AI call; never measured afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputCeilings {
    pub guide: u64,
    pub quiz: u64,
    pub flashcards: u64,
    pub chat: u64,
}

impl OutputCeilings {
    /// Returns the ceiling for a task.
    pub fn for_task(&self, kind: TaskKind) -> u64 {
        match kind {
            TaskKind::Guide => self.guide,
            TaskKind::Quiz => self.quiz,
            TaskKind::Flashcards => self.flashcards,
            TaskKind::Chat => self.chat,
        }
    }
}

/// Quota ceilings for one plan tier.
///
/// Counts are per billing period unless the name says "per item" or
/// "per source". Token figures are abstract estimation units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanLimits {
    /// Study guides creatable per billing period.
    pub max_items_per_period: u64,
    pub max_sources_per_item: u64,
    pub max_pages_per_source: u64,
    /// Video/audio minutes ingestible per billing period.
    pub max_stream_minutes_per_period: u64,
    pub max_stream_minutes_per_item: u64,
    pub max_web_lookups_per_period: u64,
    pub max_chat_messages_per_period: u64,
    /// Overall token budget per billing period.
    pub max_tokens_per_period: u64,
    /// Ceiling for a single generation request, regardless of remaining budget.
    pub max_tokens_per_item: u64,
    pub max_tokens_per_chat_message: u64,
    pub max_output_tokens_by_task: OutputCeilings,
}

impl PlanLimits {
    /// Limits for the Free tier.
    ///
    /// | Items | Sources/item | Tokens/period | Tokens/item | Tokens/chat msg |
    /// |-------|--------------|---------------|-------------|-----------------|
    /// | 3     | 2            | 500 000       | 100 000     | 5 000           |
    pub fn free() -> Self {
        Self {
            max_items_per_period: 3,
            max_sources_per_item: 2,
            max_pages_per_source: 30,
            max_stream_minutes_per_period: 30,
            max_stream_minutes_per_item: 30,
            max_web_lookups_per_period: 10,
            max_chat_messages_per_period: 50,
            max_tokens_per_period: 500_000,
            max_tokens_per_item: 100_000,
            max_tokens_per_chat_message: 5_000,
            max_output_tokens_by_task: OutputCeilings {
                guide: 30_000,
                quiz: 3_000,
                flashcards: 5_000,
                chat: 1_000,
            },
        }
    }

    /// Limits for the Starter tier.
    pub fn starter() -> Self {
        Self {
            max_items_per_period: 25,
            max_sources_per_item: 10,
            max_pages_per_source: 200,
            max_stream_minutes_per_period: 200,
            max_stream_minutes_per_item: 60,
            max_web_lookups_per_period: 50,
            max_chat_messages_per_period: 500,
            max_tokens_per_period: 5_000_000,
            max_tokens_per_item: 300_000,
            max_tokens_per_chat_message: 10_000,
            max_output_tokens_by_task: OutputCeilings {
                guide: 50_000,
                quiz: 5_000,
                flashcards: 10_000,
                chat: 2_000,
            },
        }
    }

    /// Limits for the Pro tier.
    pub fn pro() -> Self {
        Self {
            max_items_per_period: 100,
            max_sources_per_item: 20,
            max_pages_per_source: 500,
            max_stream_minutes_per_period: 1_000,
            max_stream_minutes_per_item: 120,
            max_web_lookups_per_period: 200,
            max_chat_messages_per_period: 2_000,
            max_tokens_per_period: 20_000_000,
            max_tokens_per_item: 500_000,
            max_tokens_per_chat_message: 20_000,
            max_output_tokens_by_task: OutputCeilings {
                guide: 80_000,
                quiz: 10_000,
                flashcards: 20_000,
                chat: 4_000,
            },
        }
    }

    /// Expected output size for a task.
    pub fn output_tokens_for(&self, kind: TaskKind) -> u64 {
        self.max_output_tokens_by_task.for_task(kind)
    }

    /// Chat token ceiling for a whole billing period.
    pub fn chat_tokens_per_period(&self) -> u64 {
        self.max_chat_messages_per_period
            .saturating_mul(self.max_tokens_per_chat_message)
    }

    /// Returns true if every ceiling here, output ceilings included, is at
    /// least the matching one in `other`.
    pub fn covers(&self, other: &PlanLimits) -> bool {
        self.max_items_per_period >= other.max_items_per_period
            && self.max_sources_per_item >= other.max_sources_per_item
            && self.max_pages_per_source >= other.max_pages_per_source
            && self.max_stream_minutes_per_period >= other.max_stream_minutes_per_period
            && self.max_stream_minutes_per_item >= other.max_stream_minutes_per_item
            && self.max_web_lookups_per_period >= other.max_web_lookups_per_period
            && self.max_chat_messages_per_period >= other.max_chat_messages_per_period
            && self.max_tokens_per_period >= other.max_tokens_per_period
            && self.max_tokens_per_item >= other.max_tokens_per_item
            && self.max_tokens_per_chat_message >= other.max_tokens_per_chat_message
            && TaskKind::ALL
                .iter()
                .all(|&kind| self.output_tokens_for(kind) >= other.output_tokens_for(kind))
    }
}
