//! Token estimation configuration

use serde::Deserialize;

use super::ValidationError;
use crate::domain::admission::{
    TokenEstimator, DEFAULT_CHARS_PER_MINUTE, DEFAULT_CHARS_PER_PAGE, DEFAULT_CHARS_PER_TOKEN,
    DEFAULT_CHAT_HISTORY_TURNS,
};

/// Constants used to estimate token cost before an AI call
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EstimationConfig {
    /// Characters per abstract token
    #[serde(default = "default_chars_per_token")]
    pub chars_per_token: u64,

    /// Characters assumed per declared page of a binary document
    #[serde(default = "default_chars_per_page")]
    pub chars_per_page: u64,

    /// Characters assumed per declared minute of video or audio
    #[serde(default = "default_chars_per_minute")]
    pub chars_per_minute: u64,

    /// Chat history turns included in a reply estimate
    #[serde(default = "default_chat_history_turns")]
    pub chat_history_turns: usize,
}

fn default_chars_per_token() -> u64 {
    DEFAULT_CHARS_PER_TOKEN
}

fn default_chars_per_page() -> u64 {
    DEFAULT_CHARS_PER_PAGE
}

fn default_chars_per_minute() -> u64 {
    DEFAULT_CHARS_PER_MINUTE
}

fn default_chat_history_turns() -> usize {
    DEFAULT_CHAT_HISTORY_TURNS
}

impl Default for EstimationConfig {
    fn default() -> Self {
        Self {
            chars_per_token: default_chars_per_token(),
            chars_per_page: default_chars_per_page(),
            chars_per_minute: default_chars_per_minute(),
            chat_history_turns: default_chat_history_turns(),
        }
    }
}

impl EstimationConfig {
    /// Validate estimation constants
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.chars_per_token == 0 {
            return Err(ValidationError::InvalidCharsPerToken);
        }
        if self.chars_per_page == 0 || self.chars_per_minute == 0 {
            return Err(ValidationError::InvalidUnitSize);
        }
        Ok(())
    }

    /// Build the estimator used by the admission engine
    pub fn estimator(&self) -> TokenEstimator {
        TokenEstimator::new(
            self.chars_per_token,
            self.chars_per_page,
            self.chars_per_minute,
            self.chat_history_turns,
        )
    }
}
