//! Token cost estimation.
//!
//! The AI backend's tokenizer is external, so cost is approximated before the
//! call: input characters divided by a fixed characters-per-token ratio
//! (rounded up), plus the tier's expected output size for the task. The sum
//! is deliberately an over-estimate.

use crate::domain::plan::{PlanLimits, TaskKind};

use super::{ChatTurn, SourceDescriptor};

/// Characters per abstract token.
pub const DEFAULT_CHARS_PER_TOKEN: u64 = 4;

/// Characters assumed per declared page of an opaque document.
pub const DEFAULT_CHARS_PER_PAGE: u64 = 1_800;

/// Characters assumed per declared minute of video or audio.
pub const DEFAULT_CHARS_PER_MINUTE: u64 = 900;

/// Chat history turns included in a reply estimate.
pub const DEFAULT_CHAT_HISTORY_TURNS: usize = 5;

/// Estimation constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenEstimator {
    chars_per_token: u64,
    chars_per_page: u64,
    chars_per_minute: u64,
    chat_history_turns: usize,
}

impl TokenEstimator {
    /// Creates an estimator. A zero `chars_per_token` is treated as 1.
    pub fn new(
        chars_per_token: u64,
        chars_per_page: u64,
        chars_per_minute: u64,
        chat_history_turns: usize,
    ) -> Self {
        Self {
            chars_per_token: chars_per_token.max(1),
            chars_per_page,
            chars_per_minute,
            chat_history_turns,
        }
    }

    pub fn chars_per_token(&self) -> u64 {
        self.chars_per_token
    }

    pub fn chat_history_turns(&self) -> usize {
        self.chat_history_turns
    }

    /// Input tokens for a character count, rounded up.
    pub fn input_tokens(&self, chars: u64) -> u64 {
        chars / self.chars_per_token + u64::from(chars % self.chars_per_token != 0)
    }

    /// Input tokens plus the tier's expected output for `kind`.
    pub fn estimate(&self, chars: u64, limits: &PlanLimits, kind: TaskKind) -> u64 {
        self.input_tokens(chars)
            .saturating_add(limits.output_tokens_for(kind))
    }

    /// Character count attributed to one source.
    ///
    /// Opaque media use declared pages, then declared minutes, then the raw
    /// content length, which overshoots extracted text.
    pub fn source_chars(&self, source: &SourceDescriptor) -> u64 {
        if !source.media.is_opaque() {
            return source.content_length;
        }
        if let Some(pages) = source.pages {
            return u64::from(pages).saturating_mul(self.chars_per_page);
        }
        if let Some(minutes) = source.minutes {
            return u64::from(minutes).saturating_mul(self.chars_per_minute);
        }
        source.content_length
    }

    /// Sum of the sources' characters.
    pub fn total_source_chars(&self, sources: &[SourceDescriptor]) -> u64 {
        sources
            .iter()
            .fold(0u64, |acc, s| acc.saturating_add(self.source_chars(s)))
    }

    /// Characters of the sources joined with a newline separator.
    pub fn joined_source_chars(&self, sources: &[SourceDescriptor]) -> u64 {
        let separators = sources.len().saturating_sub(1) as u64;
        self.total_source_chars(sources).saturating_add(separators)
    }

    /// Characters of the most recent history turns plus the new message,
    /// joined with newlines.
    pub fn chat_chars(&self, history: &[ChatTurn], message: &str) -> u64 {
        let recent = &history[history.len().saturating_sub(self.chat_history_turns)..];
        let history_chars = recent
            .iter()
            .fold(0u64, |acc, turn| acc.saturating_add(char_count(&turn.text)));
        history_chars
            .saturating_add(char_count(message))
            .saturating_add(recent.len() as u64)
    }
}

impl Default for TokenEstimator {
    fn default() -> Self {
        Self::new(
            DEFAULT_CHARS_PER_TOKEN,
            DEFAULT_CHARS_PER_PAGE,
            DEFAULT_CHARS_PER_MINUTE,
            DEFAULT_CHAT_HISTORY_TURNS,
        )
    }
}

/// Characters in a string, counted as UTF-16 code units.
///
/// Characters outside the Basic Multilingual Plane count twice, which keeps
/// the count at or above what browser clients report as the text length.
pub fn char_count(text: &str) -> u64 {
    text.encode_utf16().count() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::admission::MediaKind;

    #[test]
    fn input_tokens_rounds_up() {
        let estimator = TokenEstimator::default();
        assert_eq!(estimator.input_tokens(0), 0);
        assert_eq!(estimator.input_tokens(1), 1);
        assert_eq!(estimator.input_tokens(4), 1);
        assert_eq!(estimator.input_tokens(5), 2);
        assert_eq!(estimator.input_tokens(4_000), 1_000);
    }

    #[test]
    fn estimate_adds_output_ceiling() {
        let estimator = TokenEstimator::default();
        let limits = PlanLimits::free();
        assert_eq!(estimator.estimate(4_000, &limits, TaskKind::Guide), 31_000);
        assert_eq!(estimator.estimate(50_000, &limits, TaskKind::Chat), 13_500);
    }

    #[test]
    fn zero_divisor_is_clamped() {
        let estimator = TokenEstimator::new(0, 1, 1, 5);
        assert_eq!(estimator.chars_per_token(), 1);
        assert_eq!(estimator.input_tokens(7), 7);
    }

    #[test]
    fn textual_source_uses_content_length() {
        let estimator = TokenEstimator::default();
        let source = SourceDescriptor::of_media(MediaKind::WebPage, 1_234).with_pages(99);
        assert_eq!(estimator.source_chars(&source), 1_234);
    }

    #[test]
    fn opaque_source_prefers_declared_pages() {
        let estimator = TokenEstimator::default();
        let source = SourceDescriptor::of_media(MediaKind::Pdf, 999_999).with_pages(10);
        assert_eq!(estimator.source_chars(&source), 18_000);
    }

    #[test]
    fn opaque_source_falls_back_to_minutes_then_raw_length() {
        let estimator = TokenEstimator::default();
        let video = SourceDescriptor::of_media(MediaKind::Video, 5_000_000).with_minutes(20);
        assert_eq!(estimator.source_chars(&video), 18_000);

        let epub = SourceDescriptor::of_media(MediaKind::Epub, 42_000);
        assert_eq!(estimator.source_chars(&epub), 42_000);
    }

    #[test]
    fn joined_sources_count_separators() {
        let estimator = TokenEstimator::default();
        let sources = vec![SourceDescriptor::text(10), SourceDescriptor::text(20)];
        assert_eq!(estimator.total_source_chars(&sources), 30);
        assert_eq!(estimator.joined_source_chars(&sources), 31);
        assert_eq!(estimator.joined_source_chars(&[]), 0);
    }

    #[test]
    fn chat_chars_uses_last_five_turns_and_newlines() {
        let estimator = TokenEstimator::default();
        let history: Vec<ChatTurn> = (0..8).map(|i| ChatTurn::user("x".repeat(i + 1))).collect();
        // last five turns have 4..=8 characters: 30, plus 5 separators, plus 2 for "hi"
        assert_eq!(estimator.chat_chars(&history, "hi"), 37);
    }

    #[test]
    fn chat_chars_without_history_is_message_length() {
        let estimator = TokenEstimator::default();
        assert_eq!(estimator.chat_chars(&[], "hello"), 5);
    }

    #[test]
    fn char_count_counts_utf16_units_not_bytes() {
        assert_eq!(char_count("ação"), 4);
    }

    #[test]
    fn char_count_counts_astral_characters_twice() {
        assert_eq!(char_count("📚"), 2);
        assert_eq!(char_count("study 📚📚"), 10);
    }
}
